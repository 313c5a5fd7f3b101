//! The dedup core: pure grouping and admission logic, no I/O.
//!
//! Dedup identity is `(source, published_at)` ordering only, never a
//! GUID or link. An item republished with an old timestamp stays
//! skipped, and of two items published at the identical instant only
//! the batch containing them first survives. That trades precision for
//! a single cutoff query per source instead of a set-membership check
//! against every historical item.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::feed::NewArticle;

/// Group candidates by owning source before any filtering.
///
/// Every candidate lands in exactly one group, keyed solely by its
/// source id; within-group order is the extractor's order.
pub fn partition_by_source(candidates: Vec<NewArticle>) -> HashMap<i64, Vec<NewArticle>> {
    let mut groups: HashMap<i64, Vec<NewArticle>> = HashMap::new();

    for candidate in candidates {
        groups.entry(candidate.source_id).or_default().push(candidate);
    }

    groups
}

/// Admit the candidates published strictly after the cutoff.
///
/// No cutoff (nothing ever persisted for the source) admits the whole
/// group. The boundary is exclusive: a candidate at exactly the cutoff
/// is dropped.
pub fn admit(group: Vec<NewArticle>, cutoff: Option<DateTime<Utc>>) -> Vec<NewArticle> {
    match cutoff {
        None => group,
        Some(cutoff) => group
            .into_iter()
            .filter(|article| article.published_at > cutoff)
            .collect(),
    }
}

/// Filter all candidates against the per-source cutoffs.
///
/// `latest_known` maps each source to its stored latest publish time;
/// a missing entry means no article was ever persisted for it. Each
/// group is filtered against a cutoff read once, so every candidate of
/// a source observes the same boundary. Sources left with nothing
/// admitted are omitted from the result.
pub fn compute_new_articles(
    candidates: Vec<NewArticle>,
    latest_known: &HashMap<i64, DateTime<Utc>>,
) -> HashMap<i64, Vec<NewArticle>> {
    partition_by_source(candidates)
        .into_iter()
        .map(|(source_id, group)| {
            let admitted = admit(group, latest_known.get(&source_id).copied());
            (source_id, admitted)
        })
        .filter(|(_, admitted)| !admitted.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn article(source_id: i64, title: &str, published_at: DateTime<Utc>) -> NewArticle {
        NewArticle {
            source_id,
            title: title.to_string(),
            link: format!("https://example.com/{}", title),
            description: String::new(),
            published_at,
        }
    }

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn no_prior_article_admits_all_candidates() {
        let group = vec![
            article(1, "a", ts(2020, 1, 1)),
            article(1, "b", ts(1999, 6, 15)),
        ];

        let admitted = admit(group.clone(), None);
        assert_eq!(admitted, group);
    }

    #[test]
    fn boundary_is_exclusive() {
        let cutoff = ts(2024, 1, 1);
        let group = vec![
            article(1, "older", ts(2023, 12, 31)),
            article(1, "at-cutoff", cutoff),
            article(1, "newer", ts(2024, 1, 2)),
        ];

        let admitted = admit(group, Some(cutoff));

        assert_eq!(admitted.len(), 1);
        assert_eq!(admitted[0].title, "newer");
    }

    #[test]
    fn all_candidates_at_cutoff_are_dropped() {
        let cutoff = ts(2024, 1, 1);
        let group = vec![
            article(1, "a", cutoff),
            article(1, "b", cutoff),
        ];

        assert!(admit(group, Some(cutoff)).is_empty());
    }

    #[test]
    fn partition_is_a_partition() {
        let candidates = vec![
            article(1, "a", ts(2024, 1, 1)),
            article(2, "b", ts(2024, 1, 2)),
            article(1, "c", ts(2024, 1, 3)),
            article(3, "d", ts(2024, 1, 4)),
        ];

        let groups = partition_by_source(candidates.clone());

        let total: usize = groups.values().map(Vec::len).sum();
        assert_eq!(total, candidates.len());

        for (source_id, group) in &groups {
            assert!(group.iter().all(|a| a.source_id == *source_id));
        }

        // within-group order preserved
        let group1 = &groups[&1];
        assert_eq!(group1[0].title, "a");
        assert_eq!(group1[1].title, "c");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let latest_known = HashMap::new();
        assert!(compute_new_articles(Vec::new(), &latest_known).is_empty());
    }

    #[test]
    fn mixed_sources_filter_independently() {
        let mut latest_known = HashMap::new();
        latest_known.insert(1, ts(2024, 1, 1));
        // source 2 has no prior article

        let candidates = vec![
            article(1, "stale", ts(2023, 12, 31)),
            article(1, "fresh", ts(2024, 1, 2)),
            article(2, "anything", ts(2000, 1, 1)),
        ];

        let new = compute_new_articles(candidates, &latest_known);

        assert_eq!(new[&1].len(), 1);
        assert_eq!(new[&1][0].title, "fresh");
        assert_eq!(new[&2].len(), 1);
        assert_eq!(new[&2][0].title, "anything");
    }

    #[test]
    fn sources_with_nothing_admitted_are_omitted() {
        let mut latest_known = HashMap::new();
        latest_known.insert(1, ts(2024, 1, 1));

        let candidates = vec![article(1, "stale", ts(2023, 1, 1))];

        let new = compute_new_articles(candidates, &latest_known);
        assert!(new.is_empty());
    }

    #[test]
    fn stored_latest_scenario() {
        // source 1 has stored latest 2024-01-01; candidates dated
        // 2023-12-31, 2024-01-01, 2024-01-02 yield exactly one
        let mut latest_known = HashMap::new();
        latest_known.insert(1, ts(2024, 1, 1));

        let candidates = vec![
            article(1, "dec31", ts(2023, 12, 31)),
            article(1, "jan01", ts(2024, 1, 1)),
            article(1, "jan02", ts(2024, 1, 2)),
        ];

        let new = compute_new_articles(candidates, &latest_known);

        assert_eq!(new[&1].len(), 1);
        assert_eq!(new[&1][0].title, "jan02");
    }
}
