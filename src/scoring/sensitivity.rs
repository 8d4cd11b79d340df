//! Sensitivity analysis
//!
//! Leave-one-out over evidence: for each item, drop its cells, re-rank the
//! hypotheses by inconsistency alone and see whether the top hypothesis
//! changes. An item is critical when removing it changes the winner.
//!
//! `score_delta` is how the original winner's inconsistency score moves
//! when the item is removed (new minus original). A negative delta means
//! the item was counting against the winner.

use serde::{Deserialize, Serialize};

use crate::model::{Evidence, EvidenceId, Hypothesis, MatrixRating};

use super::scores::{calculate_scores, inconsistency_of};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityResult {
    pub evidence_id: EvidenceId,
    pub evidence_label: String,
    pub is_critical: bool,
    /// Top label with every cell in place
    pub original_winner: String,
    /// Top label with this item's cells removed
    pub winner_if_removed: String,
    pub score_delta: i64,
}

pub fn analyze_sensitivity(
    hypotheses: &[Hypothesis],
    evidence: &[Evidence],
    ratings: &[MatrixRating],
) -> Vec<SensitivityResult> {
    if hypotheses.is_empty() {
        return Vec::new();
    }

    let baseline = calculate_scores(hypotheses, ratings);
    let (original_winner, winner_id, original_score) = match baseline.first() {
        Some(top) => (top.label.clone(), Some(top.hypothesis_id), top.inconsistency_score),
        None => (String::new(), None, 0),
    };

    evidence
        .iter()
        .map(|item| {
            let remaining: Vec<&MatrixRating> =
                ratings.iter().filter(|r| r.evidence_id != item.id).collect();

            let mut rescored: Vec<(&str, u32)> = hypotheses
                .iter()
                .map(|h| (h.label.as_str(), inconsistency_of(h.id, remaining.iter().copied())))
                .collect();
            // Stable, same tie-break as calculate_scores
            rescored.sort_by_key(|(_, score)| *score);
            let winner_if_removed = rescored
                .first()
                .map(|(label, _)| label.to_string())
                .unwrap_or_default();

            let new_score = winner_id
                .map(|id| inconsistency_of(id, remaining.iter().copied()))
                .unwrap_or(0);

            SensitivityResult {
                evidence_id: item.id,
                evidence_label: item.label.clone(),
                is_critical: winner_if_removed != original_winner,
                original_winner: original_winner.clone(),
                winner_if_removed,
                score_delta: i64::from(new_score) - i64::from(original_score),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewEvidence, Rating};

    fn hypothesis(label: &str) -> Hypothesis {
        Hypothesis::new(label, label, "#000000", 0)
    }

    fn item(label: &str) -> Evidence {
        Evidence::from_new(label.to_string(), 0, NewEvidence::new(label))
    }

    #[test]
    fn test_no_hypotheses_gives_empty_result() {
        let e = item("E1");
        assert!(analyze_sensitivity(&[], &[e], &[]).is_empty());
    }

    #[test]
    fn test_critical_evidence_flips_winner() {
        let h1 = hypothesis("H1");
        let h2 = hypothesis("H2");
        let e1 = item("E1");
        let e2 = item("E2");
        let ratings = vec![
            // E1 alone puts H1 behind
            MatrixRating::new(e1.id, h1.id, Rating::VeryInconsistent),
            MatrixRating::new(e1.id, h2.id, Rating::Consistent),
            // E2 counts once against H2
            MatrixRating::new(e2.id, h1.id, Rating::Neutral),
            MatrixRating::new(e2.id, h2.id, Rating::Inconsistent),
        ];

        let results = analyze_sensitivity(&[h1, h2], &[e1, e2], &ratings);
        assert_eq!(results.len(), 2);

        // H1 = 2, H2 = 1 -> H2 wins
        let r1 = &results[0];
        assert_eq!(r1.original_winner, "H2");
        // Without E1: H1 = 0, H2 = 1 -> H1 wins
        assert_eq!(r1.winner_if_removed, "H1");
        assert!(r1.is_critical);
        assert_eq!(r1.score_delta, 0);

        // Without E2: H1 = 2, H2 = 0 -> H2 still wins, its score drops by 1
        let r2 = &results[1];
        assert_eq!(r2.winner_if_removed, "H2");
        assert!(!r2.is_critical);
        assert_eq!(r2.score_delta, -1);
    }

    #[test]
    fn test_unrated_evidence_is_never_critical() {
        let h1 = hypothesis("H1");
        let h2 = hypothesis("H2");
        let rated = item("E1");
        let unrated = item("E2");
        let ratings = vec![MatrixRating::new(rated.id, h1.id, Rating::Inconsistent)];

        let results = analyze_sensitivity(&[h1, h2], &[rated, unrated], &ratings);
        let r = &results[1];
        assert!(!r.is_critical);
        assert_eq!(r.score_delta, 0);
        assert_eq!(r.original_winner, r.winner_if_removed);
    }

    #[test]
    fn test_ties_resolve_to_first_hypothesis() {
        let h1 = hypothesis("H1");
        let h2 = hypothesis("H2");
        let e = item("E1");
        let ratings = vec![MatrixRating::new(e.id, h1.id, Rating::Inconsistent)];

        // With E1: H2 wins. Without: tie at 0, H1 comes first.
        let results = analyze_sensitivity(&[h1, h2], &[e], &ratings);
        assert_eq!(results[0].original_winner, "H2");
        assert_eq!(results[0].winner_if_removed, "H1");
        assert!(results[0].is_critical);
    }
}
