//! Report-facing formatting helpers.
//!
//! The core keeps figures unrounded; everything that turns them into the
//! strings shown to a reader lives here.

use crate::forecast::{ForecastBucket, GrowthError, GrowthRate};
use crate::model::DiskTypeTally;

/// Shown for any figure that could not be computed.
pub const NO_DATA: &str = "No Data Available";

/// Shown instead of a monthly growth rate that is too large to be trusted.
pub const UNCHECKABLE_RATE: &str = "Over 100%. Check ASUP for details.";

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Format terabytes with two decimals: `"10.00 TB"`.
pub fn format_tb(tb: f64) -> String {
    format!("{:.2} TB", tb)
}

/// Format a percentage with two decimals: `"38.18%"`.
pub fn format_pct(pct: f64) -> String {
    format!("{:.2}%", pct)
}

/// Format an optional value with two decimals, or [`NO_DATA`].
pub fn format_opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{:.2}", v),
        None => NO_DATA.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Disks and RAID layout
// ---------------------------------------------------------------------------

/// `"3 disks"`, `"1 disk"`.
pub fn format_disk_count(disks: u32) -> String {
    if disks == 1 {
        "1 disk".to_string()
    } else {
        format!("{} disks", disks)
    }
}

/// `"(4 SAS; 2 SSD)"`. Rotational media are reported as SAS.
pub fn format_media(tally: &DiskTypeTally) -> String {
    format!("({} SAS; {} SSD)", tally.rotational, tally.solid_state)
}

/// `"2 groups (0 SAS; 2 SSD)"`, or just `"2 groups"` without a media tally.
pub fn format_raid_layout(groups: usize, media: Option<&DiskTypeTally>) -> String {
    let count = if groups == 1 {
        "1 group".to_string()
    } else {
        format!("{} groups", groups)
    };
    match media {
        Some(tally) => format!("{} {}", count, format_media(tally)),
        None => count,
    }
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

pub fn format_growth(growth: &Result<f64, GrowthError>) -> String {
    match growth {
        Ok(tb) => format_tb(*tb),
        Err(_) => NO_DATA.to_string(),
    }
}

pub fn format_growth_rate(rate: &Result<GrowthRate, GrowthError>) -> String {
    match rate {
        Ok(GrowthRate::Percent(pct)) => format_pct(*pct),
        Ok(GrowthRate::Uncheckable) => UNCHECKABLE_RATE.to_string(),
        Err(_) => NO_DATA.to_string(),
    }
}

pub fn format_bucket(bucket: &Result<ForecastBucket, GrowthError>) -> String {
    match bucket {
        Ok(bucket) => bucket.label().to_string(),
        Err(_) => NO_DATA.to_string(),
    }
}
