use crate::index::{PositionalIndex, PostingList};
use crate::{DocId, Position};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which query term comes first in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    XThenY,
    YThenX,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub doc_id: DocId,
    pub first_pos: Position,
    pub second_pos: Position,
    pub direction: Direction,
}

/// Two normalized terms and the exact distance between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProximityQuery {
    pub first: String,
    pub second: String,
    pub distance: u32,
}

impl ProximityQuery {
    /// Validate and normalize: both terms ASCII letters only, distance of at least 1.
    pub fn new(first: &str, second: &str, distance: i64) -> Result<Self> {
        for (name, term) in [("first", first), ("second", second)] {
            if term.is_empty() || !term.bytes().all(|b| b.is_ascii_alphabetic()) {
                bail!("{name} word must only contain alphabet letters, got {term:?}");
            }
        }
        if distance < 1 {
            bail!("distance between words must be greater than 0, got {distance}");
        }
        let Ok(distance) = u32::try_from(distance) else {
            bail!("distance between words is too large: {distance}");
        };
        Ok(Self { first: first.to_ascii_lowercase(), second: second.to_ascii_lowercase(), distance })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    TermAbsent { term: String },
    NoMatches,
    Matches(Vec<MatchRecord>),
}

impl SearchOutcome {
    pub fn matches(&self) -> &[MatchRecord] {
        match self {
            SearchOutcome::Matches(m) => m,
            _ => &[],
        }
    }
}

/// Every place where `x` occurs exactly `k` positions before or after `y`.
///
/// Forward matches (`x` then `y`) come first, then backward ones. Each pass walks
/// the shared documents in ascending order and compares every pair of positions.
pub fn search(index: &PositionalIndex, x: &str, y: &str, k: u32) -> Vec<MatchRecord> {
    let (Some(dx), Some(dy)) = (index.postings(x), index.postings(y)) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    scan(dx, dy, k, Direction::XThenY, &mut out);
    scan(dy, dx, k, Direction::YThenX, &mut out);
    out
}

fn scan(
    lead: &BTreeMap<DocId, PostingList>,
    trail: &BTreeMap<DocId, PostingList>,
    k: u32,
    direction: Direction,
    out: &mut Vec<MatchRecord>,
) {
    for (&doc_id, lead_positions) in lead {
        let Some(trail_positions) = trail.get(&doc_id) else { continue };
        for &first in lead_positions {
            let Some(target) = first.checked_add(k) else { continue };
            for &second in trail_positions {
                if second == target {
                    out.push(MatchRecord { doc_id, first_pos: first, second_pos: second, direction });
                }
            }
        }
    }
}

/// Run `query` and tell an absent term apart from an empty match set.
pub fn evaluate(index: &PositionalIndex, query: &ProximityQuery) -> SearchOutcome {
    for term in [&query.first, &query.second] {
        if !index.contains_term(term) {
            tracing::info!(term = %term, "query term not in index");
            return SearchOutcome::TermAbsent { term: term.clone() };
        }
    }
    let records = search(index, &query.first, &query.second, query.distance);
    if records.is_empty() {
        tracing::info!(first = %query.first, second = %query.second, k = query.distance, "no position pairs at distance");
        SearchOutcome::NoMatches
    } else {
        SearchOutcome::Matches(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_validation() {
        let q = ProximityQuery::new("Cat", "RAN", 1).unwrap();
        assert_eq!((q.first.as_str(), q.second.as_str(), q.distance), ("cat", "ran", 1));
        assert!(ProximityQuery::new("ca t", "ran", 1).is_err());
        assert!(ProximityQuery::new("cat", "r4n", 1).is_err());
        assert!(ProximityQuery::new("", "ran", 1).is_err());
        assert!(ProximityQuery::new("cat", "ran", 0).is_err());
        assert!(ProximityQuery::new("cat", "ran", -3).is_err());
    }

    #[test]
    fn distance_overflow_never_matches() {
        let mut lead = BTreeMap::new();
        lead.insert(1, vec![u32::MAX]);
        let mut trail = BTreeMap::new();
        trail.insert(1, vec![0]);
        let mut out = Vec::new();
        scan(&lead, &trail, 1, Direction::XThenY, &mut out);
        assert!(out.is_empty());
    }
}
