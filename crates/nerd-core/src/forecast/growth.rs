//! Growth figures over a most-recent-first capacity series.
//!
//! All functions take samples ordered newest first, so the weekly delta is
//! `d_i = s[i] - s[i+1]` and the earliest observation is `s[n-1]`.

use serde::{Deserialize, Serialize};

use super::bucket::{ForecastBucket, classify_bucket};
use crate::config::ForecastConfig;

/// Why a growth figure could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthError {
    /// Fewer than two samples.
    InsufficientSamples { samples: usize },
    /// A sample used as a divisor is zero.
    ZeroBaseline,
}

impl std::fmt::Display for GrowthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrowthError::InsufficientSamples { samples } => {
                write!(f, "need at least 2 samples, got {}", samples)
            }
            GrowthError::ZeroBaseline => write!(f, "zero baseline sample"),
        }
    }
}

impl std::error::Error for GrowthError {}

/// Monthly growth rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GrowthRate {
    Percent(f64),
    /// The weekly rate is too large to be meaningful.
    Uncheckable,
}

/// Returns `s[i] - s[i+1]` for every consecutive pair.
pub fn weekly_deltas(samples: &[f64]) -> Result<Vec<f64>, GrowthError> {
    if samples.len() < 2 {
        return Err(GrowthError::InsufficientSamples {
            samples: samples.len(),
        });
    }
    Ok(samples.windows(2).map(|w| w[0] - w[1]).collect())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean weekly absolute growth in source units (KB).
pub fn mean_weekly_growth(samples: &[f64]) -> Result<f64, GrowthError> {
    weekly_deltas(samples).map(|d| mean(&d))
}

/// Mean weekly growth converted to report units per month.
pub fn monthly_growth(samples: &[f64], config: &ForecastConfig) -> Result<f64, GrowthError> {
    let weekly = mean_weekly_growth(samples)?;
    Ok(weekly / config.kb_per_unit * config.weeks_per_month)
}

/// Mean weekly relative growth (%) scaled to a month.
///
/// A weekly mean whose magnitude reaches `degenerate_rate_pct` yields
/// [`GrowthRate::Uncheckable`].
pub fn monthly_growth_rate(
    samples: &[f64],
    config: &ForecastConfig,
) -> Result<GrowthRate, GrowthError> {
    let deltas = weekly_deltas(samples)?;

    let mut rates = Vec::with_capacity(deltas.len());
    for (delta, base) in deltas.iter().zip(&samples[1..]) {
        if *base == 0.0 {
            return Err(GrowthError::ZeroBaseline);
        }
        rates.push(delta / base * 100.0);
    }

    let weekly = mean(&rates);
    if weekly.abs() >= config.degenerate_rate_pct {
        Ok(GrowthRate::Uncheckable)
    } else {
        Ok(GrowthRate::Percent(weekly * config.weeks_per_month))
    }
}

/// Compound growth (%) between the earliest and the latest sample:
/// `((s[0] / s[n-1])^(1/n) - 1) * 100`.
pub fn cagr(samples: &[f64]) -> Result<f64, GrowthError> {
    let n = samples.len();
    if n < 2 {
        return Err(GrowthError::InsufficientSamples { samples: n });
    }
    let earliest = samples[n - 1];
    if earliest == 0.0 {
        return Err(GrowthError::ZeroBaseline);
    }
    Ok(((samples[0] / earliest).powf(1.0 / n as f64) - 1.0) * 100.0)
}

/// Growth figures of one aggregate; each one fails independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthSummary {
    /// Report units (TB by default) per month.
    pub monthly_growth: Result<f64, GrowthError>,
    pub monthly_rate: Result<GrowthRate, GrowthError>,
    pub cagr_pct: Result<f64, GrowthError>,
    pub bucket: Result<ForecastBucket, GrowthError>,
}

/// Computes every growth figure for one series.
///
/// Without a ceiling no bucket can be placed; that only happens when no
/// observation parsed, so it is reported as insufficient samples.
pub fn summarize(
    samples: &[f64],
    ceiling_kb: Option<f64>,
    config: &ForecastConfig,
) -> GrowthSummary {
    let bucket = match ceiling_kb {
        Some(ceiling) => classify_bucket(samples, ceiling, config.full_fraction),
        None => Err(GrowthError::InsufficientSamples {
            samples: samples.len(),
        }),
    };

    GrowthSummary {
        monthly_growth: monthly_growth(samples, config),
        monthly_rate: monthly_growth_rate(samples, config),
        cagr_pct: cagr(samples),
        bucket,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KB_PER_TB;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn tb(values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| v * KB_PER_TB).collect()
    }

    #[test]
    fn test_weekly_deltas() {
        assert_eq!(weekly_deltas(&[1000.0, 1100.0]), Ok(vec![-100.0]));
        assert_eq!(weekly_deltas(&[2000.0, 1900.0]), Ok(vec![100.0]));
        assert_eq!(
            weekly_deltas(&[5.0]),
            Err(GrowthError::InsufficientSamples { samples: 1 })
        );
    }

    #[test]
    fn test_monthly_growth() {
        let config = ForecastConfig::default();
        let samples = tb(&[6.0, 5.5, 5.0]);
        assert!(approx(monthly_growth(&samples, &config).unwrap(), 2.0));

        let shrinking = tb(&[4.0, 5.0]);
        assert!(approx(monthly_growth(&shrinking, &config).unwrap(), -4.0));
    }

    #[test]
    fn test_monthly_growth_rate() {
        let config = ForecastConfig::default();
        let samples = tb(&[6.0, 5.5, 5.0]);
        let expected = (0.5 / 5.5 * 100.0 + 10.0) / 2.0 * 4.0;
        match monthly_growth_rate(&samples, &config).unwrap() {
            GrowthRate::Percent(rate) => assert!(approx(rate, expected)),
            other => panic!("unexpected rate {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_rate() {
        let config = ForecastConfig::default();
        // 150 % in one week.
        assert_eq!(
            monthly_growth_rate(&[250.0, 100.0], &config),
            Ok(GrowthRate::Uncheckable)
        );
        // Exactly at the threshold.
        assert_eq!(
            monthly_growth_rate(&[200.0, 100.0], &config),
            Ok(GrowthRate::Uncheckable)
        );
        match monthly_growth_rate(&[199.0, 100.0], &config) {
            Ok(GrowthRate::Percent(rate)) => assert!(approx(rate, 396.0)),
            other => panic!("unexpected rate {:?}", other),
        }
    }

    #[test]
    fn test_zero_baseline() {
        let config = ForecastConfig::default();
        assert_eq!(cagr(&[100.0, 0.0]), Err(GrowthError::ZeroBaseline));
        assert_eq!(
            monthly_growth_rate(&[100.0, 0.0], &config),
            Err(GrowthError::ZeroBaseline)
        );
        // The absolute growth has no divisor.
        assert!(monthly_growth(&[100.0, 0.0], &config).is_ok());
    }

    #[test]
    fn test_cagr() {
        let samples = tb(&[6.0, 5.5, 5.0]);
        let expected = (1.2f64.powf(1.0 / 3.0) - 1.0) * 100.0;
        assert!(approx(cagr(&samples).unwrap(), expected));
        assert!(approx(cagr(&[100.0, 100.0]).unwrap(), 0.0));
    }

    #[test]
    fn test_single_sample() {
        let summary = summarize(&[100.0], Some(1000.0), &ForecastConfig::default());
        let err = GrowthError::InsufficientSamples { samples: 1 };
        assert_eq!(summary.monthly_growth, Err(err));
        assert_eq!(summary.monthly_rate, Err(err));
        assert_eq!(summary.cagr_pct, Err(err));
        assert_eq!(summary.bucket, Err(err));
    }

    #[test]
    fn test_summarize_without_ceiling() {
        let summary = summarize(&[], None, &ForecastConfig::default());
        assert_eq!(
            summary.bucket,
            Err(GrowthError::InsufficientSamples { samples: 0 })
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            GrowthError::InsufficientSamples { samples: 1 }.to_string(),
            "need at least 2 samples, got 1"
        );
        assert_eq!(GrowthError::ZeroBaseline.to_string(), "zero baseline sample");
    }
}
