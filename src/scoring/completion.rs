//! Matrix completion

use serde::{Deserialize, Serialize};

use crate::model::Analysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatrixCompletion {
    /// hypotheses x evidence
    pub total: usize,
    /// cells with a rating other than Unrated
    pub rated: usize,
    /// 0..=100
    pub percentage: u8,
}

pub fn matrix_completion(analysis: &Analysis) -> MatrixCompletion {
    let total = analysis.hypotheses.len() * analysis.evidence.len();
    let rated = analysis
        .ratings
        .iter()
        .filter(|r| r.rating.is_rated())
        .count();

    let percentage = if total > 0 {
        (100.0 * rated as f64 / total as f64).round().clamp(0.0, 100.0) as u8
    } else {
        0
    };

    MatrixCompletion {
        total,
        rated,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MatrixRating, NewEvidence, Rating};
    use crate::repository::Workspace;

    #[test]
    fn test_empty_analysis() {
        let analysis = Analysis::new("t", "q", None);
        assert_eq!(matrix_completion(&analysis), MatrixCompletion::default());
    }

    #[test]
    fn test_rounding() {
        let mut ws = Workspace::new();
        ws.create_analysis("t", "q", None);
        let hs: Vec<_> = (0..3).map(|i| ws.add_hypothesis(format!("h{}", i)).unwrap()).collect();
        let e = ws.add_evidence(NewEvidence::new("e")).unwrap();
        ws.set_rating(e.id, hs[0].id, Rating::Consistent);
        ws.set_rating(e.id, hs[1].id, Rating::Unrated);

        let c = matrix_completion(ws.active_analysis().unwrap());
        assert_eq!(c.total, 3);
        assert_eq!(c.rated, 1);
        assert_eq!(c.percentage, 33);

        ws.set_rating(e.id, hs[1].id, Rating::Neutral);
        assert_eq!(matrix_completion(ws.active_analysis().unwrap()).percentage, 67);
    }

    #[test]
    fn test_percentage_never_exceeds_100() {
        let mut analysis = Analysis::new("t", "q", None);
        analysis.hypotheses.push(crate::model::Hypothesis::new("H1", "a", "#fff", 0));
        analysis.ratings = (0..5)
            .map(|_| MatrixRating::new(uuid::Uuid::new_v4(), uuid::Uuid::new_v4(), Rating::Consistent))
            .collect();
        // total is 0 without evidence
        assert_eq!(matrix_completion(&analysis).percentage, 0);

        analysis.evidence.push(crate::model::Evidence::from_new(
            "E1".into(),
            0,
            NewEvidence::new("e"),
        ));
        assert_eq!(matrix_completion(&analysis).percentage, 100);
    }
}
