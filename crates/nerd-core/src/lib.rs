//! nerd-core - aggregate inventory and capacity forecasting from ASUP sections.
//!
//! Provides:
//! - `section` - section kinds, the `SectionSource` seam (directory, in-memory)
//! - `extract` - structural extraction (RAID groups, disk counts, disk types)
//!   plus overview, inventory and performance extractors, and the `Extractor`
//!   that runs them over one bundle
//! - `forecast` - capacity time series, growth figures, forecast buckets
//! - `report` - per-aggregate records joined by aggregate name
//! - `model` - shared record types and the ordered `NamedMap`
//! - `config` - scan and forecast tunables
//! - `fmt` - report-facing formatting helpers
//! - `util` - tokenization and strided-matrix reshaping

pub mod config;
pub mod extract;
pub mod fmt;
pub mod forecast;
pub mod model;
pub mod report;
pub mod section;
pub mod util;

pub use config::{ExtractConfig, ForecastConfig, ScanConfig};
pub use extract::Extractor;
pub use report::{AggregateRecord, SystemReport};
pub use section::{DiagnosticSection, ExtractError, SectionKind};
