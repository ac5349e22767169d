//! Per-aggregate records joined from every section.
//!
//! The aggregate listing comes from the RAID configuration dump when it is
//! available, else from the aggregate object view, else from the capacity
//! history header. Facts about aggregates outside that listing are dropped.

use serde::Serialize;
use tracing::warn;

use crate::config::ForecastConfig;
use crate::extract::{AggregateInventory, PerformanceSummary, SysconfigFacts, SystemOverview};
use crate::fmt::format_raid_layout;
use crate::forecast::{GrowthSummary, SeriesSet, summarize};
use crate::model::{ByAggregate, ByVolume, DiskTypeTally, RaidGroupRecord};
use crate::section::SectionKind;

/// Everything known about one aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRecord {
    pub name: String,
    pub raid_type: Option<String>,
    pub raid_groups: Vec<RaidGroupRecord>,
    /// e.g. `2 groups (0 SAS; 2 SSD)`.
    pub raid_layout: Option<String>,
    /// Data disks of the last counted RAID group.
    pub data_disks_per_group: Option<u32>,
    pub disk_types: Option<DiskTypeTally>,
    pub capacity_tb: Option<f64>,
    pub used_pct: Option<f64>,
    pub growth: Option<GrowthSummary>,
}

/// Extraction result for one bundle.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SystemReport {
    pub overview: SystemOverview,
    pub aggregates: Vec<AggregateRecord>,
    pub performance: Option<PerformanceSummary>,
    pub volumes: ByVolume<f64>,
    /// Sections that were absent, unreadable, blank, or without payload.
    pub missing: Vec<SectionKind>,
}

/// Per-section facts to be joined into [`AggregateRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct AggregateFacts {
    pub sysconfig: Option<SysconfigFacts>,
    pub inventory: Option<ByAggregate<AggregateInventory>>,
    pub history: Option<SeriesSet>,
}

impl AggregateFacts {
    /// Aggregate names in report order.
    pub fn listing(&self) -> Vec<String> {
        if let Some(sysconfig) = self.sysconfig.as_ref().filter(|s| !s.names.is_empty()) {
            return sysconfig.names.clone();
        }
        if let Some(inventory) = self.inventory.as_ref().filter(|i| !i.is_empty()) {
            return inventory.names().map(str::to_string).collect();
        }
        self.history
            .as_ref()
            .map(|h| h.series.names().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

fn count_unlisted<T>(facts: Option<&ByAggregate<T>>, listing: &[String]) -> usize {
    facts.map_or(0, |f| {
        f.names()
            .filter(|n| !listing.iter().any(|l| l == n))
            .count()
    })
}

/// Joins all facts by aggregate name.
pub fn build_aggregates(facts: &AggregateFacts, config: &ForecastConfig) -> Vec<AggregateRecord> {
    let listing = facts.listing();

    let unlisted = count_unlisted(facts.inventory.as_ref(), &listing)
        + count_unlisted(facts.history.as_ref().map(|h| &h.series), &listing);
    if unlisted > 0 {
        warn!(unlisted, "dropped facts about aggregates outside the listing");
    }

    listing
        .into_iter()
        .map(|name| {
            let sysconfig = facts.sysconfig.as_ref();
            let raid_groups = sysconfig
                .and_then(|s| s.raid_groups.as_ref())
                .and_then(|groups| groups.get(&name))
                .cloned()
                .unwrap_or_default();
            let disk_types = sysconfig.and_then(|s| s.disk_types.get(&name)).copied();
            let data_disks_per_group = sysconfig
                .and_then(|s| s.disk_counts.get(&name))
                .and_then(|groups| groups.last())
                .map(|g| g.data);
            let raid_layout = (!raid_groups.is_empty())
                .then(|| format_raid_layout(raid_groups.len(), disk_types.as_ref()));

            let inventory = facts.inventory.as_ref().and_then(|i| i.get(&name));
            let growth = facts
                .history
                .as_ref()
                .and_then(|h| h.series.get(&name))
                .map(|s| summarize(&s.samples_kb, s.ceiling_kb, config));

            AggregateRecord {
                raid_type: inventory.and_then(|i| i.raid_type.clone()),
                capacity_tb: inventory.and_then(|i| i.capacity(config.kb_per_unit)),
                used_pct: inventory.and_then(|i| i.used_pct),
                raid_groups,
                raid_layout,
                data_disks_per_group,
                disk_types,
                growth,
                name,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DF_A_SCHEMA, ScanConfig};
    use crate::extract::{parse_inventory, parse_sysconfig};
    use crate::forecast::parse_capacity_history;
    use crate::section::scenarios::{AGGREGATE, DF_A, SYSCONFIG_R};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    fn typical_facts() -> AggregateFacts {
        AggregateFacts {
            sysconfig: Some(parse_sysconfig(SYSCONFIG_R, &ScanConfig::default()).unwrap()),
            inventory: Some(parse_inventory(AGGREGATE).unwrap()),
            history: Some(parse_capacity_history(DF_A, &DF_A_SCHEMA).unwrap()),
        }
    }

    #[test]
    fn test_listing_precedence() {
        let mut facts = typical_facts();
        assert_eq!(facts.listing(), vec!["aggr0", "aggr1"]);

        facts.sysconfig = None;
        let mut inventory = ByAggregate::new();
        inventory.insert("aggr1", AggregateInventory::default());
        facts.inventory = Some(inventory);
        assert_eq!(facts.listing(), vec!["aggr1"]);

        facts.inventory = None;
        assert_eq!(facts.listing(), vec!["aggr0", "aggr1"]);

        facts.history = None;
        assert!(facts.listing().is_empty());
    }

    #[test]
    fn test_unlisted_facts_dropped() {
        let mut facts = typical_facts();
        let mut inventory = parse_inventory(AGGREGATE).unwrap();
        inventory.insert("aggr9", AggregateInventory::default());
        facts.inventory = Some(inventory);

        let records = build_aggregates(&facts, &ForecastConfig::default());
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.name != "aggr9"));
    }

    /// Counts `WARN` events seen by the subscriber.
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_unlisted_facts_logged_as_warning() {
        let mut facts = typical_facts();
        let mut inventory = parse_inventory(AGGREGATE).unwrap();
        inventory.insert("aggr9", AggregateInventory::default());
        facts.inventory = Some(inventory);

        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(warnings.clone()));
        tracing::subscriber::with_default(subscriber, || {
            build_aggregates(&facts, &ForecastConfig::default())
        });
        assert_eq!(warnings.load(Ordering::SeqCst), 1);

        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(warnings.clone()));
        tracing::subscriber::with_default(subscriber, || {
            build_aggregates(&typical_facts(), &ForecastConfig::default())
        });
        assert_eq!(warnings.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_build_aggregates_partial_facts() {
        let facts = AggregateFacts {
            sysconfig: Some(parse_sysconfig(SYSCONFIG_R, &ScanConfig::default()).unwrap()),
            ..AggregateFacts::default()
        };
        let records = build_aggregates(&facts, &ForecastConfig::default());

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].data_disks_per_group, Some(4));
        assert_eq!(records[1].raid_type, None);
        assert_eq!(records[1].capacity_tb, None);
        assert_eq!(records[1].growth, None);
    }

    #[test]
    fn test_report_serializes_by_name() {
        let records = build_aggregates(&typical_facts(), &ForecastConfig::default());
        let report = SystemReport {
            aggregates: records,
            ..SystemReport::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["aggregates"][0]["name"], "aggr0");
        assert_eq!(json["aggregates"][1]["disk_types"]["solid_state"], 2);
        assert_eq!(json["aggregates"][0]["growth"]["bucket"]["Ok"], "ThisYear");
    }
}
