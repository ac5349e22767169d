//! Aggregate object view (`AGGREGATE` section).

use serde::{Deserialize, Serialize};

use crate::model::ByAggregate;
use crate::section::{ExtractError, SectionKind};
use crate::util::tag_values;

/// Size, utilization and RAID type reported for one aggregate.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateInventory {
    pub allocated_kb: Option<f64>,
    pub used_pct: Option<f64>,
    pub raid_type: Option<String>,
}

impl AggregateInventory {
    /// Allocated capacity converted with `kb_per_unit` (KB per TB by default).
    pub fn capacity(&self, kb_per_unit: f64) -> Option<f64> {
        self.allocated_kb.map(|kb| kb / kb_per_unit)
    }
}

/// Parses the aggregate object view.
///
/// Field values are matched to `aggr_name` values by position. A value that
/// does not parse, or a field list shorter than the name list, leaves the
/// corresponding field `None`.
///
/// # Errors
/// `MissingSection(AggregateObject)` when the view names no aggregate.
pub fn parse_inventory(text: &str) -> Result<ByAggregate<AggregateInventory>, ExtractError> {
    let names = tag_values(text, "aggr_name");
    if names.is_empty() {
        return Err(ExtractError::MissingSection(SectionKind::AggregateObject));
    }

    let allocated = tag_values(text, "aggr_allocated_kb");
    let used = tag_values(text, "aggr_used_pct");
    let raid = tag_values(text, "aggr_raid_type");

    let number = |values: &[&str], i: usize| -> Option<f64> {
        values.get(i).and_then(|v| v.trim().parse().ok())
    };

    Ok(names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let inventory = AggregateInventory {
                allocated_kb: number(&allocated, i),
                used_pct: number(&used, i),
                raid_type: raid.get(i).map(|r| r.trim().to_string()),
            };
            (name.trim().to_string(), inventory)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KB_PER_TB;
    use crate::section::scenarios::AGGREGATE;

    #[test]
    fn test_parse_inventory() {
        let inventory = parse_inventory(AGGREGATE).unwrap();
        assert_eq!(inventory.names().collect::<Vec<_>>(), vec!["aggr0", "aggr1"]);

        let aggr0 = inventory.get("aggr0").unwrap();
        assert_eq!(aggr0.capacity(KB_PER_TB), Some(10.0));
        assert_eq!(aggr0.used_pct, Some(60.0));
        assert_eq!(aggr0.raid_type.as_deref(), Some("raid_dp"));

        let aggr1 = inventory.get("aggr1").unwrap();
        assert_eq!(aggr1.capacity(KB_PER_TB), Some(20.0));
        assert_eq!(aggr1.used_pct, Some(95.0));
    }

    #[test]
    fn test_short_field_lists() {
        let text = "\
<aggr_name>a1</aggr_name><aggr_allocated_kb>n/a</aggr_allocated_kb>
<aggr_name>a2</aggr_name>";
        let inventory = parse_inventory(text).unwrap();
        assert_eq!(inventory.get("a1"), Some(&AggregateInventory::default()));
        assert_eq!(inventory.get("a2"), Some(&AggregateInventory::default()));
    }

    #[test]
    fn test_no_aggregates() {
        assert_eq!(
            parse_inventory("<results></results>"),
            Err(ExtractError::MissingSection(SectionKind::AggregateObject))
        );
    }
}
