//! Structural extraction and the bundle-level `Extractor`.
//!
//! Each submodule parses one kind of section from a borrowed `&str`:
//! - `names`, `raid`, `media` - the RAID configuration dump (`SYSCONFIG-R`)
//! - `inventory` - the aggregate object view (`AGGREGATE`)
//! - `overview` - controller identity and warranty
//! - `perf` - system and volume counters
//!
//! The [`Extractor`] reads every section from a [`SectionSource`], runs the
//! parsers and the forecast engine, and joins the results into a
//! [`SystemReport`].

pub mod inventory;
pub mod media;
pub mod names;
pub mod overview;
pub mod perf;
pub mod raid;

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

pub use inventory::{AggregateInventory, parse_inventory};
pub use media::parse_disk_types;
pub use names::parse_aggregate_names;
pub use overview::{SystemOverview, fiscal_year_end, parse_overview};
pub use perf::{PerformanceSummary, parse_performance, parse_volume_iops};
pub use raid::{RaidScanState, join_groups, parse_disk_counts, parse_raid_groups};

use crate::config::{ExtractConfig, ScanConfig};
use crate::forecast::parse_capacity_history;
use crate::model::{ByAggregate, DiskTypeTally, RaidGroupRecord, RaidGroupTally};
use crate::report::{AggregateFacts, SystemReport, build_aggregates};
use crate::section::{DiagnosticSection, ExtractError, SectionKind, SectionSource, require};

/// Everything the RAID configuration dump says about the aggregates.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SysconfigFacts {
    /// Aggregate listing in section order.
    pub names: Vec<String>,
    pub disk_counts: ByAggregate<Vec<RaidGroupTally>>,
    pub disk_types: ByAggregate<DiskTypeTally>,
    /// `None` when the dump carries no RAID group label.
    pub raid_groups: Option<ByAggregate<Vec<RaidGroupRecord>>>,
}

/// Runs every structural pass over one `SYSCONFIG-R` section.
///
/// A section that lists no aggregate yields empty facts.
///
/// # Errors
/// `MissingSection(SysconfigR)` when the text has no `<data>` payload.
pub fn parse_sysconfig(text: &str, config: &ScanConfig) -> Result<SysconfigFacts, ExtractError> {
    let names = parse_aggregate_names(text);
    let disk_counts = parse_disk_counts(text, &names)?;
    let disk_types = parse_disk_types(text, &names, config.disk_type_offset)?;
    let raid_groups = match parse_raid_groups(text, &names) {
        Ok(labels) => Some(join_groups(&labels, &disk_counts)),
        Err(e) => {
            debug!(error = %e, "no RAID group labels");
            None
        }
    };

    debug!(
        aggregates = names.len(),
        raid_groups = raid_groups
            .iter()
            .flat_map(|groups| groups.iter())
            .map(|(_, g)| g.len())
            .sum::<usize>(),
        "parsed RAID configuration"
    );

    Ok(SysconfigFacts {
        names: names.iter().map(|n| n.to_string()).collect(),
        disk_counts,
        disk_types,
        raid_groups,
    })
}

/// Timing information for each extraction phase.
#[derive(Debug, Clone, Default)]
pub struct ExtractTiming {
    /// Total extraction time.
    pub total: Duration,
    /// Time spent reading sections from the source.
    pub read: Duration,
    pub overview: Duration,
    pub sysconfig: Duration,
    pub inventory: Duration,
    pub history: Duration,
    pub counters: Duration,
    /// Time to join facts into aggregate records.
    pub assemble: Duration,
}

/// Extracts a [`SystemReport`] from one bundle.
///
/// Sections the bundle does not carry are listed in
/// [`SystemReport::missing`]; the facts they would have provided stay `None`.
pub struct Extractor<S: SectionSource> {
    source: S,
    config: ExtractConfig,
    /// Timing information from the last extract call.
    last_timing: Option<ExtractTiming>,
}

impl<S: SectionSource> Extractor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: ExtractConfig::default(),
            last_timing: None,
        }
    }

    pub fn with_config(mut self, config: ExtractConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns timing information from the last extract call.
    pub fn last_timing(&self) -> Option<&ExtractTiming> {
        self.last_timing.as_ref()
    }

    /// Reads and parses every section of the bundle.
    ///
    /// A section the source fails to read is treated like an absent one.
    pub fn extract(&mut self) -> SystemReport {
        let total_start = Instant::now();
        let mut timing = ExtractTiming::default();
        let mut missing = Vec::new();

        let start = Instant::now();
        let mut sections = Vec::with_capacity(SectionKind::ALL.len());
        for kind in SectionKind::ALL {
            match self.source.section(kind) {
                Ok(section) => sections.push(section),
                Err(e) => {
                    warn!(section = %kind, error = %e, "failed to read section");
                    missing.push(kind);
                }
            }
        }
        timing.read = start.elapsed();
        let section = |kind: SectionKind| {
            sections
                .iter()
                .flatten()
                .find(|s: &&DiagnosticSection| s.kind == kind)
        };

        let start = Instant::now();
        let overview = run_pass(
            section(SectionKind::Overview),
            SectionKind::Overview,
            &mut missing,
            |t| Ok(parse_overview(t)),
        )
        .unwrap_or_default();
        timing.overview = start.elapsed();

        let start = Instant::now();
        let sysconfig = run_pass(
            section(SectionKind::SysconfigR),
            SectionKind::SysconfigR,
            &mut missing,
            |t| parse_sysconfig(t, &self.config.scan),
        );
        timing.sysconfig = start.elapsed();

        let start = Instant::now();
        let inventory = run_pass(
            section(SectionKind::AggregateObject),
            SectionKind::AggregateObject,
            &mut missing,
            parse_inventory,
        );
        timing.inventory = start.elapsed();

        let start = Instant::now();
        let history = run_pass(
            section(SectionKind::DfA),
            SectionKind::DfA,
            &mut missing,
            |t| parse_capacity_history(t, &self.config.forecast.schema),
        );
        timing.history = start.elapsed();

        let start = Instant::now();
        let performance = run_pass(
            section(SectionKind::SystemCounters),
            SectionKind::SystemCounters,
            &mut missing,
            parse_performance,
        );
        let volumes = run_pass(
            section(SectionKind::VolumeCounters),
            SectionKind::VolumeCounters,
            &mut missing,
            parse_volume_iops,
        )
        .unwrap_or_default();
        timing.counters = start.elapsed();

        let start = Instant::now();
        let facts = AggregateFacts {
            sysconfig,
            inventory,
            history,
        };
        let aggregates = build_aggregates(&facts, &self.config.forecast);
        timing.assemble = start.elapsed();

        timing.total = total_start.elapsed();
        debug!(
            aggregates = aggregates.len(),
            missing = missing.len(),
            elapsed_us = timing.total.as_micros() as u64,
            "extracted bundle"
        );
        self.last_timing = Some(timing);

        SystemReport {
            overview,
            aggregates,
            performance,
            volumes,
            missing,
        }
    }
}

/// Runs one parser over a section, recording the section as missing when it
/// is absent, blank, or lacks its payload.
fn run_pass<T>(
    section: Option<&DiagnosticSection>,
    kind: SectionKind,
    missing: &mut Vec<SectionKind>,
    parse: impl FnOnce(&str) -> Result<T, ExtractError>,
) -> Option<T> {
    match require(section, kind).and_then(parse) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(section = %kind, error = %e, "no data from section");
            if !missing.contains(&kind) {
                missing.push(kind);
            }
            None
        }
    }
}
