//! Reciprocal Rank Fusion: score = Σ 1/(k + rank_i)
//!
//! Combines the vector and keyword rankings without normalizing their raw
//! scores. Ranks are 1-indexed; a chunk absent from a list gets nothing
//! from it.

use std::collections::HashMap;

use schemalink_core::models::RankedHit;

/// Fuse the two ranked id lists.
///
/// Output is sorted by fused score descending, ties by chunk id ascending,
/// so identical inputs always produce identical order. A repeated id within
/// one list only counts at its first position.
pub fn fuse(vector_ranked: &[String], keyword_ranked: &[String], k: u32) -> Vec<RankedHit> {
    let mut hits: HashMap<&str, RankedHit> = HashMap::new();

    for (position, chunk_id) in vector_ranked.iter().enumerate() {
        let hit = hits.entry(chunk_id.as_str()).or_insert_with(|| empty_hit(chunk_id));
        if hit.vector_rank.is_none() {
            hit.vector_rank = Some(position + 1);
        }
    }
    for (position, chunk_id) in keyword_ranked.iter().enumerate() {
        let hit = hits.entry(chunk_id.as_str()).or_insert_with(|| empty_hit(chunk_id));
        if hit.keyword_rank.is_none() {
            hit.keyword_rank = Some(position + 1);
        }
    }

    let mut fused: Vec<RankedHit> = hits
        .into_values()
        .map(|mut hit| {
            // Vector first, then keyword: fixed summation order.
            hit.fused_score = contribution(hit.vector_rank, k) + contribution(hit.keyword_rank, k);
            hit
        })
        .collect();

    fused.sort_by(|a, b| {
        b.fused_score
            .total_cmp(&a.fused_score)
            .then_with(|| a.chunk_id.cmp(&b.chunk_id))
    });
    fused
}

fn contribution(rank: Option<usize>, k: u32) -> f64 {
    rank.map_or(0.0, |r| 1.0 / (k as f64 + r as f64))
}

fn empty_hit(chunk_id: &str) -> RankedHit {
    RankedHit {
        chunk_id: chunk_id.to_string(),
        vector_rank: None,
        keyword_rank: None,
        fused_score: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn two_list_example_orders_by_summed_reciprocal_rank() {
        let fused = fuse(&ids(&["c1", "c2", "c3"]), &ids(&["c3", "c1", "c4"]), 60);
        let order: Vec<&str> = fused.iter().map(|h| h.chunk_id.as_str()).collect();
        assert_eq!(order, vec!["c1", "c3", "c2", "c4"]);

        let c1 = &fused[0];
        assert!((c1.fused_score - (1.0 / 61.0 + 1.0 / 62.0)).abs() < 1e-12);
        assert_eq!(c1.vector_rank, Some(1));
        assert_eq!(c1.keyword_rank, Some(2));

        let c3 = &fused[1];
        assert!((c3.fused_score - (1.0 / 63.0 + 1.0 / 61.0)).abs() < 1e-12);

        let c4 = fused.iter().find(|h| h.chunk_id == "c4").unwrap();
        assert_eq!(c4.vector_rank, None);
        assert!((c4.fused_score - 1.0 / 63.0).abs() < 1e-12);
    }

    #[test]
    fn ties_break_by_chunk_id() {
        // b and a are both rank 1 in exactly one list.
        let fused = fuse(&ids(&["b"]), &ids(&["a"]), 60);
        assert_eq!(fused[0].chunk_id, "a");
        assert_eq!(fused[1].chunk_id, "b");
        assert_eq!(fused[0].fused_score, fused[1].fused_score);
    }

    #[test]
    fn empty_lists_fuse_to_nothing() {
        assert!(fuse(&[], &[], 60).is_empty());
    }

    #[test]
    fn duplicate_ids_count_once_per_list() {
        let fused = fuse(&ids(&["a", "a"]), &[], 60);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].vector_rank, Some(1));
        assert!((fused[0].fused_score - 1.0 / 61.0).abs() < 1e-12);
    }
}
