/// Round a percentage to the nearest integer, halves away from zero
/// (so `80.5` gives `81`).
#[allow(clippy::cast_possible_truncation)]
pub fn round_percent(percentage: f64) -> i64 {
    percentage.round() as i64
}

/// Rounded extrema and mean of an assignment's scores.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Statistics {
    pub min: i64,
    pub avg: i64,
    pub max: i64,
}

impl Statistics {
    /// Compute the statistics of a list of percentages, `None` if it is empty.
    ///
    /// The mean is clamped into `[min, max]` before rounding, so that
    /// accumulated floating-point error can never put it outside.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_scores(scores: &[f64]) -> Option<Statistics> {
        let (&first, rest) = scores.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((first, first), |(lo, hi), &s| (lo.min(s), hi.max(s)));
        let avg = scores.iter().sum::<f64>() / scores.len() as f64;
        Some(Statistics {
            min: round_percent(min),
            avg: round_percent(avg.clamp(min, max)),
            max: round_percent(max),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_percent() {
        assert_eq!(round_percent(80.0), 80);
        assert_eq!(round_percent(80.4999), 80);
        assert_eq!(round_percent(80.5), 81);
        assert_eq!(round_percent(81.5), 82);
        assert_eq!(round_percent(87.3), 87);
        assert_eq!(round_percent(0.0), 0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(Statistics::from_scores(&[]), None);
    }

    #[test]
    fn test_single() {
        assert_eq!(
            Statistics::from_scores(&[80.0]),
            Some(Statistics {
                min: 80,
                avg: 80,
                max: 80
            })
        );
    }

    #[test]
    fn test_several() {
        assert_eq!(
            Statistics::from_scores(&[90.0, 55.4, 72.5, 100.0]),
            Some(Statistics {
                min: 55,
                avg: 79,
                max: 100
            })
        );
    }

    #[test]
    fn test_ordering_holds() {
        let scores = [0.1, 0.2, 0.3, 33.3, 33.3, 33.3, 99.9, 12.5, 67.5];
        for n in 1..=scores.len() {
            let s = Statistics::from_scores(&scores[..n]).unwrap();
            assert!(s.min <= s.avg && s.avg <= s.max, "{s:?}");
        }
        let same = [0.1; 7];
        let s = Statistics::from_scores(&same).unwrap();
        assert_eq!((s.min, s.avg, s.max), (0, 0, 0));
    }
}
