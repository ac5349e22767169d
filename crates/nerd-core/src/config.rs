//! Scan and forecast tunables.
//!
//! Defaults describe the ASUP layouts this crate was written against. They
//! are plain values so a CLI or an embedding application can override them.

use serde::{Deserialize, Serialize};

use crate::util::StrideSchema;

/// Token offset from a `Type` header to the disk type inspected for it.
///
/// The header is followed by 5 column names and 9 dash rulers; the offset
/// lands on the Type column of the group's second disk row.
pub const DEFAULT_DISK_TYPE_OFFSET: usize = 33;

/// `df -A` rows: a 5-token preamble, then 10 tokens per aggregate
/// (aggregate line + `.snapshot` line) of which name, kbytes and used matter.
pub const DF_A_SCHEMA: StrideSchema = StrideSchema::new(5, 10, 3);

/// Kilobytes per terabyte (binary).
pub const KB_PER_TB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Weekly samples folded into one reported month.
pub const WEEKS_PER_MONTH: f64 = 4.0;

/// Fraction of the ceiling at which an aggregate is considered full.
pub const NINETY_PERCENT: f64 = 0.9;

/// Weekly growth rate (%) at or above which the rate is not reported.
pub const DEGENERATE_RATE_PCT: f64 = 100.0;

/// Structural extractor settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub disk_type_offset: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            disk_type_offset: DEFAULT_DISK_TYPE_OFFSET,
        }
    }
}

/// Capacity forecast settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub schema: StrideSchema,
    pub weeks_per_month: f64,
    /// Divisor from the source unit (KB) to the report unit.
    pub kb_per_unit: f64,
    pub full_fraction: f64,
    pub degenerate_rate_pct: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            schema: DF_A_SCHEMA,
            weeks_per_month: WEEKS_PER_MONTH,
            kb_per_unit: KB_PER_TB,
            full_fraction: NINETY_PERCENT,
            degenerate_rate_pct: DEGENERATE_RATE_PCT,
        }
    }
}

/// All extraction settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub scan: ScanConfig,
    pub forecast: ForecastConfig,
}
