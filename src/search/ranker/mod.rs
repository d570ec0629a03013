
use tracing::debug;

use super::SearchKey;
use super::payload::MatchRecord;
use crate::Result;
use crate::index::VectorIndex;

/// Number of nearest-neighbor candidates requested from the index.
pub const TOP_K: usize = 100;

/// Run the nearest-neighbor search and build the full ordered match set.
///
/// One index query, keyed by vector or stored id per `key`. The match whose id
/// equals `exclude` is dropped so a paper never appears in its own results.
/// Index order is preserved; the index's own tie-break policy governs ties.
#[inline]
pub fn rank(
    index: &dyn VectorIndex,
    k: usize,
    key: &SearchKey,
    exclude: Option<&str>,
) -> Result<Vec<MatchRecord>> {
    let raw = match key {
        SearchKey::Vector(vector) => index.query_by_vector(vector, k)?,
        SearchKey::Id(id) => index.query_by_id(id, k)?,
    };

    debug!("Index returned {} raw matches", raw.len());

    Ok(raw
        .into_iter()
        .filter(|m| exclude != Some(m.id.as_str()))
        .map(MatchRecord::from_raw)
        .collect())
}
