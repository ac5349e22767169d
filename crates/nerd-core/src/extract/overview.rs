//! Controller overview and warranty dates.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::util::{first_inline_value, tag_values};

/// Identity and support facts of one controller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SystemOverview {
    pub asup_id: Option<String>,
    pub received_date: Option<String>,
    pub biz_key: Option<String>,
    pub cluster_name: Option<String>,
    pub hostname: Option<String>,
    pub site_name: Option<String>,
    pub os_version: Option<String>,
    pub system_id: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub warranty_end: Option<NaiveDate>,
}

impl SystemOverview {
    /// Whether the warranty ends on or before `deadline`; `None` without a
    /// warranty date.
    pub fn warranty_expires_by(&self, deadline: NaiveDate) -> Option<bool> {
        self.warranty_end.map(|end| end <= deadline)
    }
}

fn block_value(text: &str, tag: &str) -> Option<String> {
    tag_values(text, tag)
        .first()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn inline_value(text: &str, tag: &str) -> Option<String> {
    first_inline_value(text, tag)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses a `YYYY-MM-DD` (or `YYYYMMDD`) date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&value.trim().replace('-', ""), "%Y%m%d").ok()
}

/// Parses the overview section. Absent fields stay `None`.
pub fn parse_overview(text: &str) -> SystemOverview {
    SystemOverview {
        asup_id: block_value(text, "asup_id"),
        received_date: block_value(text, "asup_received_date"),
        biz_key: block_value(text, "biz_key"),
        cluster_name: inline_value(text, "cluster_name"),
        hostname: inline_value(text, "hostname"),
        site_name: inline_value(text, "site_name"),
        os_version: inline_value(text, "sys_version"),
        system_id: inline_value(text, "system_id"),
        model: inline_value(text, "sys_model"),
        serial_number: inline_value(text, "sys_serial_no"),
        warranty_end: tag_values(text, "warranty_end_date")
            .first()
            .and_then(|v| parse_date(v)),
    }
}

/// Returns the end of the fiscal year that contains `today`.
///
/// The fiscal year ends on the last Friday of April. From May on, that is
/// next year's April.
pub fn fiscal_year_end(today: NaiveDate) -> Option<NaiveDate> {
    let year = if today.month() > 4 {
        today.year() + 1
    } else {
        today.year()
    };
    let april_30 = NaiveDate::from_ymd_opt(year, 4, 30)?;

    let weekday = april_30.weekday().num_days_from_monday();
    let friday = Weekday::Fri.num_days_from_monday();
    let back = (weekday + 7 - friday) % 7;

    april_30.checked_sub_days(Days::new(u64::from(back)))
}
