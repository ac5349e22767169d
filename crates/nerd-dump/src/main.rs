//! nerd-dump - Inspect ASUP bundles saved as section files.
//!
//! Each bundle is a directory holding one file per section (see
//! `nerd_core::section::DirSource`). Reports are grouped by cluster and
//! printed as text or JSON.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Parser;
use serde::Serialize;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use nerd_core::config::ExtractConfig;
use nerd_core::extract::fiscal_year_end;
use nerd_core::fmt::{
    NO_DATA, format_bucket, format_disk_count, format_growth, format_growth_rate, format_opt,
    format_pct, format_tb,
};
use nerd_core::section::DirSource;
use nerd_core::{Extractor, SystemReport};

#[derive(Parser)]
#[command(
    name = "nerd-dump",
    about = "Extract aggregate inventory and capacity forecasts from ASUP bundles"
)]
struct Cli {
    /// Bundle directories, one per controller
    #[arg(required = true)]
    bundles: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,

    /// Token offset from a `Type` header to the disk type column.
    #[arg(long, value_name = "N")]
    disk_type_offset: Option<usize>,

    /// Weekly samples folded into one reported month.
    #[arg(long, value_name = "N")]
    weeks_per_month: Option<f64>,
}

impl Cli {
    fn extract_config(&self) -> ExtractConfig {
        let mut config = ExtractConfig::default();
        if let Some(offset) = self.disk_type_offset {
            config.scan.disk_type_offset = offset;
        }
        if let Some(weeks) = self.weeks_per_month {
            config.forecast.weeks_per_month = weeks;
        }
        config
    }
}

/// Initializes the tracing subscriber with the appropriate log level.
///
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["nerd_dump", "nerd_core"] {
        if let Ok(directive) = format!("{}={}", target, level).parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// One extracted bundle.
#[derive(Serialize)]
struct BundleReport {
    path: PathBuf,
    /// Whether the warranty ends within the current fiscal year.
    warranty_expires_this_fiscal_year: Option<bool>,
    report: SystemReport,
}

/// Groups bundles by cluster name. Bundles without one get a cluster of
/// their own, numbered in input order.
fn group_by_cluster(bundles: Vec<BundleReport>) -> BTreeMap<String, Vec<BundleReport>> {
    let mut clusters: BTreeMap<String, Vec<BundleReport>> = BTreeMap::new();
    let mut unnamed = 0;

    for bundle in bundles {
        let name = match &bundle.report.overview.cluster_name {
            Some(name) => name.clone(),
            None => {
                let name = format!("No_Cluster_Name_{}", unnamed);
                unnamed += 1;
                name
            }
        };
        clusters.entry(name).or_default().push(bundle);
    }

    clusters
}

fn or_no_data(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NO_DATA)
}

fn print_bundle(bundle: &BundleReport) {
    let report = &bundle.report;
    let overview = &report.overview;

    println!(
        "  {} ({})",
        or_no_data(&overview.hostname),
        bundle.path.display()
    );
    println!(
        "    model {}  serial {}  site {}",
        or_no_data(&overview.model),
        or_no_data(&overview.serial_number),
        or_no_data(&overview.site_name)
    );
    println!("    version {}", or_no_data(&overview.os_version));
    match (overview.warranty_end, bundle.warranty_expires_this_fiscal_year) {
        (Some(end), Some(true)) => println!("    warranty ends {} (this fiscal year)", end),
        (Some(end), _) => println!("    warranty ends {}", end),
        (None, _) => println!("    warranty {}", NO_DATA),
    }

    if !report.aggregates.is_empty() {
        println!(
            "    {:<16} {:<10} {:<26} {:>9} {:>11} {:>8} {:>11} {:>10}  {}",
            "Aggregate",
            "RAID",
            "Layout",
            "Disks/RG",
            "Capacity",
            "Used",
            "Growth/mo",
            "Rate/mo",
            "Full"
        );
    }
    for aggr in &report.aggregates {
        let (growth, rate, bucket) = match &aggr.growth {
            Some(g) => (
                format_growth(&g.monthly_growth),
                format_growth_rate(&g.monthly_rate),
                format_bucket(&g.bucket),
            ),
            None => (NO_DATA.to_string(), NO_DATA.to_string(), NO_DATA.to_string()),
        };
        println!(
            "    {:<16} {:<10} {:<26} {:>9} {:>11} {:>8} {:>11} {:>10}  {}",
            aggr.name,
            or_no_data(&aggr.raid_type),
            or_no_data(&aggr.raid_layout),
            aggr.data_disks_per_group
                .map(format_disk_count)
                .unwrap_or_else(|| NO_DATA.to_string()),
            aggr.capacity_tb
                .map(format_tb)
                .unwrap_or_else(|| NO_DATA.to_string()),
            aggr.used_pct
                .map(format_pct)
                .unwrap_or_else(|| NO_DATA.to_string()),
            growth,
            rate,
            bucket
        );
    }

    if let Some(perf) = &report.performance {
        println!(
            "    cpu_busy {}  cifs {}  fcp {}  iscsi {}  nfs {}",
            format_opt(perf.cpu_busy),
            format_opt(perf.cifs_ops),
            format_opt(perf.fcp_ops),
            format_opt(perf.iscsi_ops),
            format_opt(perf.nfs_ops)
        );
    }

    for (volume, ops) in report.volumes.iter() {
        println!("    volume {:<24} {:>10.2} ops", volume, ops);
    }

    if !report.missing.is_empty() {
        let missing: Vec<String> = report.missing.iter().map(|k| k.to_string()).collect();
        println!("    missing sections: {}", missing.join(", "));
    }
}

fn print_text(clusters: &BTreeMap<String, Vec<BundleReport>>) {
    for (cluster, bundles) in clusters {
        println!("== {} ==", cluster);
        for bundle in bundles {
            print_bundle(bundle);
        }
        println!();
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = cli.extract_config();
    let today: NaiveDate = Local::now().date_naive();
    let fiscal_end = fiscal_year_end(today);
    info!(
        bundles = cli.bundles.len(),
        fiscal_year_end = ?fiscal_end,
        "extracting"
    );

    let mut bundles = Vec::with_capacity(cli.bundles.len());
    let mut failed = false;
    for path in &cli.bundles {
        if !path.is_dir() {
            error!(path = %path.display(), "not a bundle directory");
            failed = true;
            continue;
        }

        let mut extractor = Extractor::new(DirSource::new(path)).with_config(config);
        let report = extractor.extract();
        if !report.missing.is_empty() {
            info!(path = %path.display(), missing = report.missing.len(), "incomplete bundle");
        }
        let warranty_expires_this_fiscal_year =
            fiscal_end.and_then(|end| report.overview.warranty_expires_by(end));
        bundles.push(BundleReport {
            path: path.clone(),
            warranty_expires_this_fiscal_year,
            report,
        });
    }

    let clusters = group_by_cluster(bundles);
    if cli.json {
        match serde_json::to_string_pretty(&clusters) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_text(&clusters);
    }

    if failed {
        std::process::exit(1);
    }
}
