use crate::math::RandomSource;
use serde::{Deserialize, Serialize};

pub const ROC_POINTS: usize = 101;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    pub fpr: f32,
    pub tpr: f32,
}

/// Headline numbers quoted next to the ROC and performance charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub auc: f32,
    pub f1: f32,
    pub eer: f32,
    pub threshold: f32,
}

pub const PERFORMANCE_SUMMARY: PerformanceSummary = PerformanceSummary {
    auc: 0.998,
    f1: 0.999,
    eer: 0.001,
    threshold: 0.5,
};

/// `tpr = 1 - exp(-5 fpr) + noise`, noise uniform in `[0, 0.02)`, clipped to 1.
pub fn generate_roc(rng: &mut dyn RandomSource) -> Vec<RocPoint> {
    (0..ROC_POINTS)
        .map(|i| {
            let fpr = i as f64 / (ROC_POINTS - 1) as f64;
            let tpr = 1.0 - (-5.0 * fpr).exp() + rng.next_unit() * 0.02;
            RocPoint {
                fpr: fpr as f32,
                tpr: tpr.min(1.0) as f32,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{EntropySource, FixedSequence};

    #[test]
    fn sweeps_fpr_in_hundredths() {
        let mut rng = EntropySource::seeded(1);
        let points = generate_roc(&mut rng);
        assert_eq!(points.len(), ROC_POINTS);
        assert_eq!(points[0].fpr, 0.0);
        assert_eq!(points[100].fpr, 1.0);
        for (i, pair) in points.windows(2).enumerate() {
            assert!(pair[1].fpr > pair[0].fpr, "fpr not increasing at {i}");
            assert!((pair[1].fpr - pair[0].fpr - 0.01).abs() < 1e-5);
        }
        assert!(points.iter().all(|p| p.tpr <= 1.0));
    }

    #[test]
    fn tpr_is_clipped_at_one() {
        let mut rng = FixedSequence::constant(0.99);
        let points = generate_roc(&mut rng);
        assert_eq!(points[100].tpr, 1.0);
        assert!(points[0].tpr > 0.0);
    }
}
