//! # Query Resolver
//!
//! Maps a free-text query to one catalog record by unanchored substring
//! search over title, then authors, then publisher, and ranks the other
//! records by their similarity to it.

use std::cmp::Ordering;

use tracing::debug;

use crate::catalog::Catalog;
use crate::types::{Record, SearchPhase};

/// Field selector paired with the phase it reports.
pub type Phase = (SearchPhase, fn(&Record) -> &str);

/// Lookup phases in evaluation order. The first phase with any match wins.
pub const PHASES: [Phase; 3] = [
    (SearchPhase::Title, Record::title),
    (SearchPhase::Authors, Record::authors),
    (SearchPhase::Publisher, Record::publisher),
];

/// Finds the record a query refers to.
///
/// The query is lowercased and matched as a plain substring against the
/// already-normalized fields. Within a phase the lowest-index match is taken,
/// even when many records match.
pub fn locate(catalog: &Catalog, query: &str) -> Option<(usize, SearchPhase)> {
    let needle = query.to_lowercase();

    PHASES.iter().find_map(|&(phase, field)| {
        let hit = catalog
            .iter()
            .find(|(_, record)| field(record).contains(needle.as_str()))
            .map(|(index, _)| (index, phase));
        if hit.is_none() {
            debug!(%phase, query = %needle, "no match in phase");
        }
        hit
    })
}

/// Ranks every entry of a similarity row except `exclude`.
///
/// Sorted by descending score; equal scores keep ascending index order.
/// Returns at most `top_k` `(index, score)` pairs.
pub fn rank_neighbors(row: &[f32], exclude: usize, top_k: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(index, _)| index != exclude)
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scored.truncate(top_k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            Record::new("dune", "frank herbert", "ace books", "en"),
            Record::new("emma", "jane austen", "penguin", "en"),
            Record::new("persuasion", "jane austen", "penguin", "en"),
            Record::new("pride prejudice", "jane austen", "modern library", "en"),
            Record::new("hobbit", "j.r.r. tolkien", "houghton mifflin", "en"),
        ])
    }

    #[test]
    fn title_phase_wins() {
        assert_eq!(locate(&catalog(), "dune"), Some((0, SearchPhase::Title)));
    }

    #[test]
    fn query_is_lowercased() {
        assert_eq!(locate(&catalog(), "HOBBIT"), Some((4, SearchPhase::Title)));
    }

    #[test]
    fn substring_is_unanchored() {
        assert_eq!(locate(&catalog(), "suas"), Some((2, SearchPhase::Title)));
    }

    #[test]
    fn author_phase_takes_lowest_index() {
        assert_eq!(locate(&catalog(), "austen"), Some((1, SearchPhase::Authors)));
    }

    #[test]
    fn publisher_phase_is_last() {
        assert_eq!(locate(&catalog(), "mifflin"), Some((4, SearchPhase::Publisher)));
    }

    #[test]
    fn title_beats_later_author_match() {
        // "emma" is a title; a later record's author containing it must not win
        let catalog = Catalog::from_records(vec![
            Record::new("novel", "emmanuel carrere", "pol", "fr"),
            Record::new("emma", "jane austen", "penguin", "en"),
        ]);
        assert_eq!(locate(&catalog, "emma"), Some((1, SearchPhase::Title)));
    }

    #[test]
    fn no_match_in_any_phase() {
        assert_eq!(locate(&catalog(), "neuromancer"), None);
        assert_eq!(locate(&Catalog::default(), "dune"), None);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert_eq!(locate(&catalog(), "j.r.r."), Some((4, SearchPhase::Authors)));
        assert_eq!(locate(&catalog(), "j.r.r.*"), None);
    }

    #[test]
    fn rank_excludes_self_and_orders_by_score() {
        let row = [1.0, 0.2, 0.9, 0.0, 0.5];
        assert_eq!(
            rank_neighbors(&row, 0, 10),
            vec![(2, 0.9), (4, 0.5), (1, 0.2), (3, 0.0)]
        );
    }

    #[test]
    fn rank_ties_keep_index_order() {
        let row = [0.3, 1.0, 0.3, 0.3, 1.0];
        assert_eq!(
            rank_neighbors(&row, 1, 10),
            vec![(4, 1.0), (0, 0.3), (2, 0.3), (3, 0.3)]
        );
    }

    #[test]
    fn rank_truncates_to_top_k() {
        let row: Vec<f32> = (0..20).map(|i| i as f32 / 20.0).collect();
        let ranked = rank_neighbors(&row, 19, 10);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].0, 18);
        assert_eq!(ranked[9].0, 9);
    }

    #[test]
    fn rank_single_entry_row_is_empty() {
        assert!(rank_neighbors(&[1.0], 0, 10).is_empty());
    }
}
