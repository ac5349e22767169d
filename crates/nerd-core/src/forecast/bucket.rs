//! Forecast buckets: when does an aggregate reach its full threshold.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::growth::{GrowthError, mean_weekly_growth};

/// Coarse time until an aggregate reaches its full threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForecastBucket {
    MoreThanOneYear,
    AlreadyOverNinety,
    DecreasingTrend,
    ThisYear,
    ThisQuarter,
    NextMonth,
}

impl ForecastBucket {
    pub fn label(self) -> &'static str {
        match self {
            ForecastBucket::MoreThanOneYear => "More than one year",
            ForecastBucket::AlreadyOverNinety => "Already > 90",
            ForecastBucket::DecreasingTrend => "On decreasing trend",
            ForecastBucket::ThisYear => "This year",
            ForecastBucket::ThisQuarter => "This quarter",
            ForecastBucket::NextMonth => "Next month",
        }
    }
}

impl fmt::Display for ForecastBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper bounds on the remaining time, checked in order; first match wins.
///
/// The 12 bound is listed first, so every value it covers never reaches the
/// tighter bounds below it.
const HORIZONS: [(f64, ForecastBucket); 3] = [
    (12.0, ForecastBucket::ThisYear),
    (3.0, ForecastBucket::ThisQuarter),
    (2.0, ForecastBucket::NextMonth),
];

/// Places a remaining-time estimate into a bucket.
///
/// `headroom` is the distance to the full threshold, `rate` the mean weekly
/// absolute growth, both in the same unit. The remaining time is
/// `headroom / rate`.
pub fn bucket_for(headroom: f64, rate: f64) -> ForecastBucket {
    if rate == 0.0 {
        return ForecastBucket::MoreThanOneYear;
    }
    if headroom <= 0.0 {
        return ForecastBucket::AlreadyOverNinety;
    }

    let remaining = headroom / rate;
    if remaining < 0.0 {
        return ForecastBucket::DecreasingTrend;
    }

    HORIZONS
        .iter()
        .find(|(bound, _)| remaining <= *bound)
        .map(|(_, bucket)| *bucket)
        .unwrap_or(ForecastBucket::MoreThanOneYear)
}

/// Buckets a most-recent-first series against `full_fraction * ceiling`.
pub fn classify_bucket(
    samples: &[f64],
    ceiling: f64,
    full_fraction: f64,
) -> Result<ForecastBucket, GrowthError> {
    let rate = mean_weekly_growth(samples)?;
    let headroom = full_fraction * ceiling - samples[0];
    Ok(bucket_for(headroom, rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_order() {
        let cases = [
            // (headroom, rate, expected)
            (100.0, 0.0, ForecastBucket::MoreThanOneYear),
            (-5.0, 0.0, ForecastBucket::MoreThanOneYear),
            (0.0, 10.0, ForecastBucket::AlreadyOverNinety),
            (-5.0, -10.0, ForecastBucket::AlreadyOverNinety),
            (100.0, -10.0, ForecastBucket::DecreasingTrend),
            (120.0, 10.0, ForecastBucket::ThisYear),
            (60.0, 10.0, ForecastBucket::ThisYear),
            (25.0, 10.0, ForecastBucket::ThisYear),
            (5.0, 10.0, ForecastBucket::ThisYear),
            (121.0, 10.0, ForecastBucket::MoreThanOneYear),
        ];

        for (headroom, rate, expected) in cases {
            assert_eq!(
                bucket_for(headroom, rate),
                expected,
                "headroom {} rate {}",
                headroom,
                rate
            );
        }
    }

    #[test]
    fn test_horizon_table_order() {
        // Tighter horizons are shadowed by the 12 bound.
        for (bound, _) in &HORIZONS[1..] {
            assert!(*bound <= HORIZONS[0].0);
            assert_eq!(bucket_for(*bound, 1.0), ForecastBucket::ThisYear);
        }
    }

    #[test]
    fn test_opposite_trends() {
        // Stride rows 1000/1100 and 2000/1900: -100 and +100 per week.
        assert_eq!(
            classify_bucket(&[1000.0, 1100.0], 5000.0, 0.9),
            Ok(ForecastBucket::DecreasingTrend)
        );
        assert_eq!(
            classify_bucket(&[2000.0, 1900.0], 3000.0, 0.9),
            Ok(ForecastBucket::ThisYear)
        );
    }

    #[test]
    fn test_over_threshold() {
        assert_eq!(
            classify_bucket(&[95.0, 90.0], 100.0, 0.9),
            Ok(ForecastBucket::AlreadyOverNinety)
        );
    }

    #[test]
    fn test_insufficient_samples() {
        assert_eq!(
            classify_bucket(&[95.0], 100.0, 0.9),
            Err(GrowthError::InsufficientSamples { samples: 1 })
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(ForecastBucket::AlreadyOverNinety.to_string(), "Already > 90");
        assert_eq!(ForecastBucket::DecreasingTrend.label(), "On decreasing trend");
        assert_eq!(ForecastBucket::MoreThanOneYear.label(), "More than one year");
    }
}
