
use std::collections::HashMap;

use tracing::debug;

use super::payload::{AuthorGroup, MatchRecord, RESULT_LIMIT, round_score};

/// Derive the ranked author groups from the full match set.
///
/// Grouping key is the exact parsed name string; two spellings of the same
/// person are distinct groups. Members keep match-rank order. Groups are
/// sorted by descending paper count; the sort is stable over first-appearance
/// order, so count ties resolve to whichever author's first paper ranked
/// earlier. At most [`RESULT_LIMIT`] groups are returned, each with its full
/// membership.
#[inline]
pub fn aggregate(matches: &[MatchRecord]) -> Vec<AuthorGroup> {
    let mut order: Vec<&str> = Vec::new();
    let mut members: HashMap<&str, Vec<&MatchRecord>> = HashMap::new();

    for record in matches {
        for author in &record.authors_parsed {
            members
                .entry(author.as_str())
                .or_insert_with(|| {
                    order.push(author.as_str());
                    Vec::new()
                })
                .push(record);
        }
    }

    debug!(
        "Aggregated {} matches into {} author groups",
        matches.len(),
        order.len()
    );

    let mut groups: Vec<AuthorGroup> = order
        .into_iter()
        .filter_map(|author| {
            let papers = members.remove(author)?;
            let avg_score =
                round_score(papers.iter().map(|p| p.score).sum::<f32>() / papers.len() as f32);
            Some(AuthorGroup {
                author: author.to_string(),
                papers: papers.into_iter().cloned().collect(),
                avg_score,
            })
        })
        .collect();

    // Stable sort: ties keep first-appearance order.
    groups.sort_by(|a, b| b.papers.len().cmp(&a.papers.len()));
    groups.truncate(RESULT_LIMIT);
    groups
}
