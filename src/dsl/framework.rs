//! Framework DSL レジストリ
//!
//! 入力は YAML / JSON 文字列または既にパース済みの値の両対応。
//! どの版の入力でも最新版（v2）に正規化して返す。

mod v1;
mod v2;

pub use v1::FrameworkDslV1;
pub use v2::FrameworkDslV2;

use super::schema::{DslInput, MigrationChain, MigrationStep};
use super::serializer::dump_yaml_stable;
use super::DocumentKind;
use crate::error::Result;

/// 最新版の Framework ドキュメント
pub type FrameworkDsl = FrameworkDslV2;

/// 任意の追加情報
pub type Metadata = std::collections::BTreeMap<String, serde_json::Value>;

static STEPS: [MigrationStep; 1] = [MigrationStep {
    from: FrameworkDslV1::VERSION,
    apply: v2::migrate_from_v1,
}];

static CHAIN: MigrationChain =
    MigrationChain::new(DocumentKind::Framework, FrameworkDslV2::VERSION, &STEPS);

/// Framework を最新版へパースする
pub fn parse_framework<'a>(input: impl Into<DslInput<'a>>) -> Result<FrameworkDsl> {
    let value = input.into().into_value(DocumentKind::Framework)?;
    let upgraded = CHAIN.upgrade(value)?;
    FrameworkDslV2::validate(upgraded)
}

/// Framework を正準 YAML に書き出す
pub fn dump_framework(framework: &FrameworkDsl) -> Result<String> {
    dump_yaml_stable(framework)
}

pub fn latest_framework_version() -> u64 {
    CHAIN.latest()
}

#[cfg(test)]
#[path = "framework_test.rs"]
mod tests;
