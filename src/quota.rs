//! プランとインポート上限

use crate::error::{PromptOpsError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// free プランで 1 回のインポートに含められる Prompt 数
pub const FREE_PROMPT_IMPORT_LIMIT: usize = 20;

/// 契約プラン
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Pro,
    Team,
    Enterprise,
}

/// プランから導かれる権限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entitlements {
    pub is_free: bool,
    pub is_pro_or_above: bool,
    pub is_team_or_above: bool,
    pub is_enterprise: bool,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
            Plan::Team => "team",
            Plan::Enterprise => "enterprise",
        }
    }

    pub fn entitlements(&self) -> Entitlements {
        Entitlements {
            is_free: *self == Plan::Free,
            is_pro_or_above: *self >= Plan::Pro,
            is_team_or_above: *self >= Plan::Team,
            is_enterprise: *self == Plan::Enterprise,
        }
    }

    /// 1 回のインポートで許可される Prompt 数（None は無制限）
    pub fn prompt_import_limit(&self) -> Option<usize> {
        match self {
            Plan::Free => Some(FREE_PROMPT_IMPORT_LIMIT),
            Plan::Pro | Plan::Team | Plan::Enterprise => None,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = PromptOpsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "pro" => Ok(Plan::Pro),
            "team" => Ok(Plan::Team),
            "enterprise" => Ok(Plan::Enterprise),
            other => Err(PromptOpsError::InvalidArgument(format!(
                "unknown plan '{}' (expected free, pro, team or enterprise)",
                other
            ))),
        }
    }
}

/// 候補数がプランの上限内か検査する
///
/// インポート処理の中で、永続化より前に一度だけ呼ばれる。
pub fn check_quota(plan: Plan, candidate_count: usize) -> Result<()> {
    match plan.prompt_import_limit() {
        Some(limit) if candidate_count > limit => {
            tracing::warn!(%plan, limit, requested = candidate_count, "import refused by quota");
            Err(PromptOpsError::QuotaExceeded {
                plan,
                limit,
                requested: candidate_count,
            })
        }
        _ => Ok(()),
    }
}
