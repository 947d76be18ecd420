pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().sum::<f32>() / samples.len() as f32
    }

    /// Largest sample, or `0.0` for an empty slice.
    pub fn max(samples: &[f32]) -> f32 {
        samples
            .iter()
            .cloned()
            .fold(None, |acc: Option<f32>, v| Some(acc.map_or(v, |m| m.max(v))))
            .unwrap_or(0.0)
    }

    pub fn centroid(points: &[(f32, f32)]) -> Option<(f32, f32)> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f32;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
        Some((sx / n, sy / n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequences_yield_zero() {
        assert_eq!(StatsHelper::mean(&[]), 0.0);
        assert_eq!(StatsHelper::max(&[]), 0.0);
        assert!(StatsHelper::centroid(&[]).is_none());
    }

    #[test]
    fn mean_and_max() {
        assert_eq!(StatsHelper::mean(&[2.0, 4.0]), 3.0);
        assert_eq!(StatsHelper::max(&[-3.0, -1.0]), -1.0);
    }

    #[test]
    fn centroid_of_square() {
        let c = StatsHelper::centroid(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        assert_eq!(c, Some((1.0, 1.0)));
    }
}
