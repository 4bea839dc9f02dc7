//! CLI 向けの結果表示

use owo_colors::OwoColorize;
use promptops::import::{ImportMode, ImportReport};

pub struct CommandSummary {
    pub prefix: String,
    pub message: String,
}

impl CommandSummary {
    /// 成功件数と読み飛ばし件数から 1 行の要約を作る
    pub fn format(imported: usize, skipped: usize) -> Self {
        match (imported, skipped) {
            (i, s) if s > 0 => Self {
                prefix: "✗".red().to_string(),
                message: format!("{} imported, {} skipped", i.green(), s.red()),
            },
            (i, _) if i > 0 => Self {
                prefix: "✓".green().to_string(),
                message: format!("{} document(s) imported", i.green()),
            },
            _ => Self {
                prefix: "•".yellow().to_string(),
                message: "No new documents found".to_string(),
            },
        }
    }

    pub fn for_import(report: &ImportReport) -> Self {
        Self::format(
            report.frameworks_imported + report.prompts_imported,
            report.skipped.len(),
        )
    }

    pub fn print(&self) {
        println!("{} {}", self.prefix, self.message);
    }
}

/// 取り込み結果の詳細行
pub fn import_details(report: &ImportReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.mode == ImportMode::Full {
        lines.push(format!("  frameworks: {}", report.frameworks_imported));
    }
    lines.push(format!("  prompts:    {}", report.prompts_imported));
    if report.duplicates > 0 {
        lines.push(format!("  duplicates: {}", report.duplicates));
    }
    if report.existing > 0 {
        lines.push(format!("  existing:   {} (kept as is)", report.existing));
    }
    if let Some(id) = &report.default_framework_id {
        lines.push(format!("  default framework: {}", id));
    }
    for skipped in &report.skipped {
        lines.push(format!(
            "  {} {} [{}] {}",
            "skip".yellow(),
            skipped.file,
            skipped.code,
            skipped.reason
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_variants() {
        assert!(CommandSummary::format(3, 0).message.contains("imported"));
        assert!(CommandSummary::format(3, 1).message.contains("skipped"));
        assert_eq!(
            CommandSummary::format(0, 0).message,
            "No new documents found"
        );
    }

    #[test]
    fn details_hide_frameworks_in_diff_mode() {
        let report = ImportReport {
            mode: ImportMode::Diff,
            prompts_imported: 2,
            existing: 1,
            ..ImportReport::default()
        };
        let lines = import_details(&report);
        assert!(lines.iter().all(|l| !l.contains("frameworks")));
        assert!(lines.iter().any(|l| l.contains("existing")));
    }
}
