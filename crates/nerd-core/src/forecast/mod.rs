//! Capacity Forecast Engine.
//!
//! The `DF-A` section carries one `CDATA[ ... ]]>` block per week, most
//! recent first. Each block tokenizes into one stride matrix row (see
//! [`crate::util::matrix`]); the first row doubles as the header that names
//! the aggregates. Per aggregate the engine keeps the first observed total
//! size as the ceiling and the used size of every week as the series.

pub mod bucket;
pub mod growth;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use bucket::{ForecastBucket, bucket_for, classify_bucket};
pub use growth::{GrowthError, GrowthRate, GrowthSummary, summarize};

use crate::model::ByAggregate;
use crate::section::{ExtractError, SectionKind};
use crate::util::{StrideSchema, blocks_between, reshape, tokenize};

/// Weekly used-space history of one aggregate, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityTimeSeries {
    pub aggregate: String,
    /// Total size (KB) of the most recent parsed observation.
    pub ceiling_kb: Option<f64>,
    pub samples_kb: Vec<f64>,
}

impl CapacityTimeSeries {
    /// Most recent used size.
    pub fn current_kb(&self) -> Option<f64> {
        self.samples_kb.first().copied()
    }
}

/// All series parsed from one `DF-A` section.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SeriesSet {
    pub series: ByAggregate<CapacityTimeSeries>,
    /// Slots or values that could not be used (short rows, unknown
    /// aggregates, non-numeric sizes).
    pub skipped_fields: usize,
}

/// Parses the weekly capacity history.
///
/// Every aggregate named by the header gets a series, possibly empty.
///
/// # Errors
/// `MissingSection(DfA)` when the text carries no `CDATA[` block.
pub fn parse_capacity_history(
    text: &str,
    schema: &StrideSchema,
) -> Result<SeriesSet, ExtractError> {
    let rows: Vec<Vec<&str>> = blocks_between(text, "CDATA[", "]]>")
        .into_iter()
        .map(tokenize)
        .collect();
    let Some(header) = rows.first() else {
        return Err(ExtractError::MissingSection(SectionKind::DfA));
    };

    let shaped = reshape(schema, header, &rows);
    let mut set = SeriesSet {
        skipped_fields: shaped.out_of_bounds + shaped.unknown_keys,
        ..SeriesSet::default()
    };

    for (name, groups) in &shaped.groups {
        let mut series = CapacityTimeSeries {
            aggregate: name.to_string(),
            ceiling_kb: None,
            samples_kb: Vec::with_capacity(groups.len()),
        };

        for fields in groups {
            let total = fields.get(1).and_then(|v| v.parse::<f64>().ok());
            let used = fields.get(2).and_then(|v| v.parse::<f64>().ok());
            match (total, used) {
                (Some(total), Some(used)) => {
                    series.ceiling_kb.get_or_insert(total);
                    series.samples_kb.push(used);
                }
                _ => set.skipped_fields += 1,
            }
        }

        set.series.insert(*name, series);
    }

    debug!(
        weeks = rows.len(),
        aggregates = set.series.len(),
        skipped = set.skipped_fields,
        "parsed capacity history"
    );

    Ok(set)
}
