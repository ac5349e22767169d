//! System and volume counter summaries.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::ByVolume;
use crate::section::{ExtractError, SectionKind};
use crate::util::{labelled_values, tag_values};

/// Busy-hour estimate (mean + one sample standard deviation) per counter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub cpu_busy: Option<f64>,
    pub cifs_ops: Option<f64>,
    pub fcp_ops: Option<f64>,
    pub iscsi_ops: Option<f64>,
    pub nfs_ops: Option<f64>,
}

/// Returns `mean + sample stddev`, or `None` with fewer than two samples.
pub fn mean_plus_stddev(samples: &[f64]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(mean + variance.sqrt())
}

fn counter_samples(text: &str, counter: &str) -> Vec<f64> {
    labelled_values(text, counter, "counterValue")
        .into_iter()
        .filter_map(|v| v.trim().parse().ok())
        .collect()
}

/// Summarizes the system counters section.
///
/// # Errors
/// `MissingSection(SystemCounters)` when none of the counters is present.
pub fn parse_performance(text: &str) -> Result<PerformanceSummary, ExtractError> {
    let cpu_busy = counter_samples(text, "cpu_busy");
    let cifs_ops = counter_samples(text, "cifs_ops");
    let fcp_ops = counter_samples(text, "fcp_ops");
    let iscsi_ops = counter_samples(text, "iscsi_ops");
    let nfs_ops = counter_samples(text, "nfs_ops");

    if [&cpu_busy, &cifs_ops, &fcp_ops, &iscsi_ops, &nfs_ops]
        .iter()
        .all(|s| s.is_empty())
    {
        return Err(ExtractError::MissingSection(SectionKind::SystemCounters));
    }

    debug!(
        cpu_busy = cpu_busy.len(),
        nfs_ops = nfs_ops.len(),
        "counter samples"
    );

    Ok(PerformanceSummary {
        cpu_busy: mean_plus_stddev(&cpu_busy),
        cifs_ops: mean_plus_stddev(&cifs_ops),
        fcp_ops: mean_plus_stddev(&fcp_ops),
        iscsi_ops: mean_plus_stddev(&iscsi_ops),
        nfs_ops: mean_plus_stddev(&nfs_ops),
    })
}

/// Parses mean total ops per volume.
///
/// Names and values containing spaces are summary rows and are skipped. The
/// dump lists every volume twice, so names are paired with the value at the
/// same index at every second position. Values are reported as magnitudes.
///
/// # Errors
/// `MissingSection(VolumeCounters)` when the section has no counter values.
pub fn parse_volume_iops(text: &str) -> Result<ByVolume<f64>, ExtractError> {
    let values: Vec<&str> = tag_values(text, "counter_stat_value")
        .into_iter()
        .filter(|v| !v.contains(' '))
        .collect();
    if values.is_empty() {
        return Err(ExtractError::MissingSection(SectionKind::VolumeCounters));
    }

    let names: Vec<&str> = tag_values(text, "instance_name")
        .into_iter()
        .filter(|n| !n.contains(' '))
        .collect();

    let mut volumes = ByVolume::new();
    for i in (0..names.len().saturating_sub(1)).step_by(2) {
        let Some(value) = values.get(i).and_then(|v| v.trim().parse::<f64>().ok()) else {
            continue;
        };
        volumes.insert(names[i], value.abs());
    }

    Ok(volumes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::scenarios::{SYSTEM_COUNTERS, VOLUME_COUNTERS};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_mean_plus_stddev() {
        assert_eq!(mean_plus_stddev(&[]), None);
        assert_eq!(mean_plus_stddev(&[5.0]), None);
        assert_eq!(mean_plus_stddev(&[3.0, 3.0, 3.0]), Some(3.0));
        assert!(approx(mean_plus_stddev(&[40.0, 50.0]).unwrap(), 52.071));
    }

    #[test]
    fn test_parse_performance() {
        let perf = parse_performance(SYSTEM_COUNTERS).unwrap();
        assert!(approx(perf.cpu_busy.unwrap(), 52.071));
        assert_eq!(perf.cifs_ops, Some(0.0));
        assert_eq!(perf.fcp_ops, None);
        assert!(approx(perf.iscsi_ops.unwrap(), 34.142));
        assert!(approx(perf.nfs_ops.unwrap(), 1241.421));
    }

    #[test]
    fn test_parse_performance_missing() {
        assert_eq!(
            parse_performance("<counters></counters>"),
            Err(ExtractError::MissingSection(SectionKind::SystemCounters))
        );
    }

    #[test]
    fn test_parse_volume_iops() {
        let volumes = parse_volume_iops(VOLUME_COUNTERS).unwrap();
        assert_eq!(volumes.len(), 2);
        assert_eq!(volumes.get("vol0"), Some(&120.5));
        assert_eq!(volumes.get("vol1"), Some(&33.25));
    }

    #[test]
    fn test_parse_volume_iops_missing() {
        assert_eq!(
            parse_volume_iops("<instance_name>vol0</instance_name>"),
            Err(ExtractError::MissingSection(SectionKind::VolumeCounters))
        );
    }
}
