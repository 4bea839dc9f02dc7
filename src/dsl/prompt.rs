//! Prompt DSL レジストリ
//!
//! Framework と同じく、どの版の入力でも最新版（v2）に正規化して返す。

mod types;
mod v1;
mod v2;

pub use types::{
    EnumGroups, InputType, Labels, Metadata, ModelRef, PromptInput, PromptTest, TestAssert,
};
pub use v1::PromptDslV1;
pub use v2::PromptDslV2;

use super::schema::{DslInput, MigrationChain, MigrationStep};
use super::serializer::dump_yaml_stable;
use super::DocumentKind;
use crate::error::Result;

/// 最新版の Prompt ドキュメント
pub type PromptDsl = PromptDslV2;

static STEPS: [MigrationStep; 1] = [MigrationStep {
    from: PromptDslV1::VERSION,
    apply: v2::migrate_from_v1,
}];

static CHAIN: MigrationChain =
    MigrationChain::new(DocumentKind::Prompt, PromptDslV2::VERSION, &STEPS);

/// Prompt を最新版へパースする
pub fn parse_prompt<'a>(input: impl Into<DslInput<'a>>) -> Result<PromptDsl> {
    let value = input.into().into_value(DocumentKind::Prompt)?;
    let upgraded = CHAIN.upgrade(value)?;
    PromptDslV2::validate(upgraded)
}

/// Prompt を正準 YAML に書き出す
pub fn dump_prompt(prompt: &PromptDsl) -> Result<String> {
    dump_yaml_stable(prompt)
}

pub fn latest_prompt_version() -> u64 {
    CHAIN.latest()
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
