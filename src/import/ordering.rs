//! 取り込んだ Prompt の order / shared の決定
//!
//! 入力は取り込み順（ファイル列挙順・重複排除後）の id 列。
//! 出力は同じ並びの `(order, shared)`。

use crate::archive::ManifestEntry;
use crate::dsl::defaults;
use std::collections::HashMap;

/// 1 件分の配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub order: i64,
    pub shared: bool,
}

impl Placement {
    fn new(order: i64, shared: bool) -> Self {
        Self { order, shared }
    }
}

/// 全置換インポート
///
/// マニフェストに記載された id はその order をそのまま使い、
/// 記載の無い id は記載分の最大 order の後ろに続ける。
/// マニフェストが無ければ 1..N。
pub fn full_placements(ids: &[&str], manifest: Option<&[ManifestEntry]>) -> Vec<Placement> {
    let Some(manifest) = manifest else {
        return sequential(ids.len(), 0);
    };

    let described = index_manifest(manifest);
    let mut next = ids
        .iter()
        .filter_map(|id| described.get(id).map(|e| e.order))
        .max()
        .unwrap_or(0);

    ids.iter()
        .map(|id| match described.get(id) {
            Some(entry) => Placement::new(entry.order, entry.shared),
            None => {
                next += 1;
                Placement::new(next, defaults::PROMPT_SHARED)
            }
        })
        .collect()
}

/// 差分インポート
///
/// 既存の最大 order (`offset`) の後ろに追加する。マニフェストの相対順は
/// 取り込んだ id の間で 1..K に振り直してから `offset` を足す。
pub fn diff_placements(
    ids: &[&str],
    manifest: Option<&[ManifestEntry]>,
    offset: i64,
) -> Vec<Placement> {
    let Some(manifest) = manifest else {
        return sequential(ids.len(), offset);
    };

    let described = index_manifest(manifest);

    // 記載分を manifest の order で安定ソートし、順位を振る
    let mut ranked: Vec<(usize, i64)> = ids
        .iter()
        .enumerate()
        .filter_map(|(i, id)| described.get(id).map(|e| (i, e.order)))
        .collect();
    ranked.sort_by_key(|&(_, order)| order);
    let rank: HashMap<usize, i64> = ranked
        .iter()
        .zip(1..)
        .map(|(&(i, _), position)| (i, position))
        .collect();

    let mut next = offset + ranked.len() as i64;
    ids.iter()
        .enumerate()
        .map(|(i, id)| match (rank.get(&i), described.get(id)) {
            (Some(position), Some(entry)) => Placement::new(offset + position, entry.shared),
            _ => {
                next += 1;
                Placement::new(next, defaults::PROMPT_SHARED)
            }
        })
        .collect()
}

fn sequential(count: usize, offset: i64) -> Vec<Placement> {
    (1..=count as i64)
        .map(|n| Placement::new(offset + n, defaults::PROMPT_SHARED))
        .collect()
}

/// id → エントリ（同じ id が複数あれば先勝ち）
fn index_manifest(manifest: &[ManifestEntry]) -> HashMap<&str, &ManifestEntry> {
    let mut index = HashMap::with_capacity(manifest.len());
    for entry in manifest {
        index.entry(entry.id.as_str()).or_insert(entry);
    }
    index
}

#[cfg(test)]
#[path = "ordering_test.rs"]
mod tests;
