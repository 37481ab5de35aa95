//! Restaurant roster and the ranking merge.
//!
//! The aggregator only returns restaurants that received votes. Both the
//! participant view and the admin view need every candidate, so the merge
//! back-fills zero entries from the roster and re-sorts.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// One restaurant the poll asks about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The restaurants of the current poll.
pub fn default_roster() -> Vec<Candidate> {
    vec![
        Candidate::new("r1", "Il Besugo Innamorato"),
        Candidate::new("r2", "La Brinca"),
        Candidate::new("r3", "L'Arca Tra gli Ulivi"),
        Candidate::new("r4", "Ca da Nonna"),
        Candidate::new("r5", "Pizzeria Vesuvio"),
    ]
}

/// Per-restaurant totals as produced by the aggregator.
pub trait RestaurantTally {
    fn restaurant_id(&self) -> &str;
    fn total_score(&self) -> i64;
    fn votes_count(&self) -> i64;
}

/// A roster entry with its totals, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub id: String,
    pub name: String,
    pub total_score: i64,
    pub votes_count: i64,
}

/// Merge aggregator rows into the full roster.
///
/// Every candidate appears exactly once (first occurrence wins on duplicate
/// ids). Candidates without a row get zero totals; rows for ids outside the
/// roster are dropped. The sort is stable, so equal scores keep roster order.
pub fn merge_with_roster<T: RestaurantTally>(
    roster: &[Candidate],
    results: &[T],
) -> Vec<RankedEntry> {
    let by_id: HashMap<&str, &T> = results.iter().map(|r| (r.restaurant_id(), r)).collect();
    let mut seen = HashSet::new();

    let mut ranked: Vec<RankedEntry> = roster
        .iter()
        .filter(|c| seen.insert(c.id.as_str()))
        .map(|c| {
            let (total_score, votes_count) = by_id
                .get(c.id.as_str())
                .map_or((0, 0), |r| (r.total_score(), r.votes_count()));
            RankedEntry {
                id: c.id.clone(),
                name: c.name.clone(),
                total_score,
                votes_count,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, i64, i64);

    impl RestaurantTally for Row {
        fn restaurant_id(&self) -> &str {
            self.0
        }
        fn total_score(&self) -> i64 {
            self.1
        }
        fn votes_count(&self) -> i64 {
            self.2
        }
    }

    fn ids(entries: &[RankedEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn zero_fills_missing_candidates() {
        let results = [Row("r3", 5, 3), Row("r5", 2, 1)];
        let merged = merge_with_roster(&default_roster(), &results);

        assert_eq!(merged.len(), 5);
        assert_eq!(ids(&merged), ["r3", "r5", "r1", "r2", "r4"]);
        assert_eq!((merged[0].total_score, merged[0].votes_count), (5, 3));
        assert_eq!((merged[1].total_score, merged[1].votes_count), (2, 1));
        for entry in &merged[2..] {
            assert_eq!((entry.total_score, entry.votes_count), (0, 0));
        }
        assert_eq!(merged[0].name, "L'Arca Tra gli Ulivi");
    }

    #[test]
    fn interleaves_zero_entries_by_score() {
        let roster = vec![
            Candidate::new("a", "A"),
            Candidate::new("b", "B"),
            Candidate::new("c", "C"),
        ];
        // "a" has a vote worth 0, "b" has none; equal scores keep roster order.
        let results = [Row("c", 4, 2), Row("a", 0, 1)];
        let merged = merge_with_roster(&roster, &results);
        assert_eq!(ids(&merged), ["c", "a", "b"]);
        assert_eq!(merged[1].votes_count, 1);
        assert_eq!(merged[2].votes_count, 0);
    }

    #[test]
    fn drops_rows_outside_roster() {
        let roster = vec![Candidate::new("a", "A")];
        let merged = merge_with_roster(&roster, &[Row("zzz", 9, 9)]);
        assert_eq!(ids(&merged), ["a"]);
        assert_eq!(merged[0].total_score, 0);
    }

    #[test]
    fn duplicate_roster_ids_appear_once() {
        let roster = vec![Candidate::new("a", "A"), Candidate::new("a", "A again")];
        let merged = merge_with_roster::<Row>(&roster, &[]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "A");
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let results = [Row("r2", 3, 2), Row("r4", 3, 3)];
        let first = merge_with_roster(&default_roster(), &results);
        let second = merge_with_roster(&default_roster(), &results);
        assert_eq!(first, second);
        assert_eq!(ids(&first)[..2], ["r2", "r4"]);
    }
}
