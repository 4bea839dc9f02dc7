//! promptops validate コマンド
//!
//! YAML / JSON またはフロントマター形式のファイルを検証し、
//! 最新版に移行した正準形を表示する。

use clap::Parser;
use promptops::dsl::{
    dump_framework, dump_prompt, parse_framework, parse_prompt, DocumentKind, DslInput,
    FrameworkDsl, PromptDsl,
};
use promptops::error::Result;
use promptops::frontmatter::{from_text, to_text};
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct Args {
    /// Document file (.yaml, .json or front-matter .md)
    pub file: PathBuf,

    /// Document kind
    #[arg(long, value_enum)]
    pub kind: DocumentKind,
}

pub async fn run(args: Args) -> Result<()> {
    let text = tokio::fs::read_to_string(&args.file).await?;
    print!("{}", render(&text, args.kind)?);
    Ok(())
}

/// 最新版に移行済みのドキュメント
#[derive(Debug)]
pub enum ParsedDocument {
    Framework(FrameworkDsl),
    Prompt(PromptDsl),
}

/// フロントマター形式か YAML / JSON かを判別してパースする
///
/// 2 つ目の値はフロントマター形式だったかどうか。
pub fn parse_document(text: &str, kind: DocumentKind) -> Result<(ParsedDocument, bool)> {
    let front_matter = from_text(text);
    let is_front_matter = front_matter.is_some();
    let raw: DslInput<'_> = match front_matter {
        Some(front_matter) => front_matter.into_raw(kind).into(),
        None => text.into(),
    };

    let document = match kind {
        DocumentKind::Framework => ParsedDocument::Framework(parse_framework(raw)?),
        DocumentKind::Prompt => ParsedDocument::Prompt(parse_prompt(raw)?),
    };
    Ok((document, is_front_matter))
}

/// フロントマター形式なら同じ形式で、それ以外は YAML で返す
fn render(text: &str, kind: DocumentKind) -> Result<String> {
    match parse_document(text, kind)? {
        (ParsedDocument::Framework(doc), true) => to_text(&doc),
        (ParsedDocument::Prompt(doc), true) => to_text(&doc),
        (ParsedDocument::Framework(doc), false) => dump_framework(&doc),
        (ParsedDocument::Prompt(doc), false) => dump_prompt(&doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "11111111-1111-1111-8111-111111111111";

    #[test]
    fn renders_yaml_input_as_latest() {
        let out = render(&format!("id: {}\nname: n\n", ID), DocumentKind::Framework).unwrap();
        assert!(out.starts_with("version: 2\n"));
    }

    #[test]
    fn renders_front_matter_input_as_front_matter() {
        let text = format!("---\nid: {}\n---\nHello", ID);
        let out = render(&text, DocumentKind::Prompt).unwrap();
        assert!(out.starts_with("---\nversion: 2\n"));
        assert!(out.ends_with("---\nHello"));
    }

    #[test]
    fn parse_document_reports_format() {
        let (doc, front_matter) =
            parse_document(&format!("id: {}\ntemplate: t\n", ID), DocumentKind::Prompt).unwrap();
        assert!(!front_matter);
        assert!(matches!(doc, ParsedDocument::Prompt(p) if p.template == "t"));
    }

    #[test]
    fn invalid_document_is_an_error() {
        assert!(render("name: x", DocumentKind::Framework).is_err());
    }
}
