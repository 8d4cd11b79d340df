//! Hypothesis scoring
//!
//! Each hypothesis gets an inconsistency score (sum of contradiction
//! weights over its cells) and a consistency score (sum of support
//! credits). Ranking is by inconsistency only, ascending: the hypothesis
//! with the least evidence against it ranks first.
//!
//! The sort is stable. Ties keep the order the hypotheses were passed in,
//! which sensitivity analysis relies on to pick the same winner every time.

use serde::{Deserialize, Serialize};

use crate::model::{Hypothesis, HypothesisId, MatrixRating};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HypothesisScore {
    pub hypothesis_id: HypothesisId,
    pub label: String,
    pub inconsistency_score: u32,
    pub consistency_score: u32,
    /// 1-based, 1 = least inconsistent
    pub rank: usize,
}

/// Sum of inconsistency weights for one hypothesis
pub(crate) fn inconsistency_of<'a, I>(hypothesis_id: HypothesisId, ratings: I) -> u32
where
    I: IntoIterator<Item = &'a MatrixRating>,
{
    ratings
        .into_iter()
        .filter(|r| r.hypothesis_id == hypothesis_id)
        .map(|r| r.rating.inconsistency_weight())
        .sum()
}

/// Score and rank every hypothesis
pub fn calculate_scores(hypotheses: &[Hypothesis], ratings: &[MatrixRating]) -> Vec<HypothesisScore> {
    let mut scores: Vec<HypothesisScore> = hypotheses
        .iter()
        .map(|h| {
            let (inconsistency, consistency) = ratings
                .iter()
                .filter(|r| r.hypothesis_id == h.id)
                .fold((0, 0), |(i, c), r| {
                    (i + r.rating.inconsistency_weight(), c + r.rating.consistency_credit())
                });
            HypothesisScore {
                hypothesis_id: h.id,
                label: h.label.clone(),
                inconsistency_score: inconsistency,
                consistency_score: consistency,
                rank: 0,
            }
        })
        .collect();

    // Vec::sort_by_key is stable
    scores.sort_by_key(|s| s.inconsistency_score);
    for (index, score) in scores.iter_mut().enumerate() {
        score.rank = index + 1;
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rating;
    use uuid::Uuid;

    fn hypothesis(label: &str) -> Hypothesis {
        Hypothesis::new(label, label, "#000000", 0)
    }

    #[test]
    fn test_lowest_inconsistency_ranks_first() {
        let h1 = hypothesis("H1");
        let h2 = hypothesis("H2");
        let e = Uuid::new_v4();
        let ratings = vec![
            MatrixRating::new(e, h1.id, Rating::VeryInconsistent),
            MatrixRating::new(e, h2.id, Rating::VeryConsistent),
        ];

        let scores = calculate_scores(&[h1, h2], &ratings);
        assert_eq!(scores[0].label, "H2");
        assert_eq!(scores[0].rank, 1);
        assert_eq!(scores[0].inconsistency_score, 0);
        assert_eq!(scores[0].consistency_score, 2);
        assert_eq!(scores[1].label, "H1");
        assert_eq!(scores[1].inconsistency_score, 2);
        assert_eq!(scores[1].rank, 2);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let hs: Vec<_> = ["H1", "H2", "H3", "H4"].iter().map(|l| hypothesis(l)).collect();
        let e = Uuid::new_v4();
        let ratings = vec![
            MatrixRating::new(e, hs[0].id, Rating::Inconsistent),
            MatrixRating::new(e, hs[2].id, Rating::Consistent),
        ];

        let labels: Vec<_> = calculate_scores(&hs, &ratings)
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, ["H2", "H3", "H4", "H1"]);
    }

    #[test]
    fn test_unrated_hypothesis_scores_zero() {
        let h = hypothesis("H1");
        let scores = calculate_scores(std::slice::from_ref(&h), &[]);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].inconsistency_score, 0);
        assert_eq!(scores[0].consistency_score, 0);
        assert_eq!(scores[0].rank, 1);
    }

    #[test]
    fn test_neutral_and_unrated_carry_no_weight() {
        let h = hypothesis("H1");
        let ratings = vec![
            MatrixRating::new(Uuid::new_v4(), h.id, Rating::Neutral),
            MatrixRating::new(Uuid::new_v4(), h.id, Rating::Unrated),
        ];
        let scores = calculate_scores(std::slice::from_ref(&h), &ratings);
        assert_eq!(scores[0].inconsistency_score, 0);
        assert_eq!(scores[0].consistency_score, 0);
    }

    #[test]
    fn test_no_hypotheses() {
        assert!(calculate_scores(&[], &[]).is_empty());
    }
}
