//! RAID group counting and labelling for `sysconfig -r` dumps.
//!
//! Two independent passes:
//! - [`parse_disk_counts`] walks the tokens of the `<data>` payload with a
//!   small state machine and records a [`RaidGroupTally`] per closed group.
//! - [`parse_raid_groups`] collects the `RAID group <label> (` labels.
//!
//! [`join_groups`] pairs the two by position within each aggregate.

use tracing::warn;

use crate::model::{ByAggregate, RaidGroupRecord, RaidGroupTally};
use crate::section::{ExtractError, SectionKind};
use crate::util::{block_between, delimited_spans, tokenize};

/// Position of the disk scanner relative to the current RAID group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaidScanState {
    /// Before the first data disk of a group.
    #[default]
    Idle,
    /// Counting data disks.
    InDataGroup,
    /// A parity marker closed the group; later roles are ignored until the
    /// next aggregate.
    ParityReached,
}

/// Side effect of one scanner transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAction {
    Ignore,
    CountData,
    /// Close the open group with one parity disk.
    CloseWithParity,
    /// Move to the next aggregate, closing the open group without parity.
    EnterAggregate { close_pending: bool },
    /// End of the aggregate listing (spare pool reached).
    Stop { close_pending: bool },
}

impl RaidScanState {
    /// Applies one token. Checks run in a fixed order and the first match
    /// wins; matching is by substring, so `dparity` counts as `parity`.
    pub fn step(self, token: &str) -> (RaidScanState, ScanAction) {
        use RaidScanState::*;

        if token.contains("parity") && self == InDataGroup {
            (ParityReached, ScanAction::CloseWithParity)
        } else if token.contains("data") && self != ParityReached {
            (InDataGroup, ScanAction::CountData)
        } else if token.contains("Aggregate") {
            let close_pending = self == InDataGroup;
            (Idle, ScanAction::EnterAggregate { close_pending })
        } else if token.contains("spare") && self != ParityReached {
            let close_pending = self == InDataGroup;
            (self, ScanAction::Stop { close_pending })
        } else {
            (self, ScanAction::Ignore)
        }
    }
}

/// Tallies under construction, addressed by a cursor into the listing.
struct TallySink<'n> {
    names: &'n [&'n str],
    cursor: Option<usize>,
    counts: ByAggregate<Vec<RaidGroupTally>>,
    dropped: usize,
}

impl<'n> TallySink<'n> {
    fn new(names: &'n [&'n str]) -> Self {
        Self {
            names,
            cursor: None,
            counts: names.iter().map(|n| (n.to_string(), Vec::new())).collect(),
            dropped: 0,
        }
    }

    fn advance(&mut self) {
        self.cursor = Some(self.cursor.map_or(0, |c| c + 1));
    }

    fn emit(&mut self, tally: RaidGroupTally) {
        let names = self.names;
        let slot = self
            .cursor
            .and_then(|c| names.get(c))
            .and_then(|name| self.counts.get_mut(name));
        match slot {
            Some(groups) => groups.push(tally),
            None => self.dropped += 1,
        }
    }
}

/// Counts data and parity disks per RAID group for every listed aggregate.
///
/// Every name in `names` gets an entry, possibly empty. Groups closed before
/// the first `Aggregate` token or past the end of the listing cannot be
/// attributed and are dropped.
///
/// # Errors
/// `MissingSection(SysconfigR)` when the text has no `<data>` payload.
pub fn parse_disk_counts(
    text: &str,
    names: &[&str],
) -> Result<ByAggregate<Vec<RaidGroupTally>>, ExtractError> {
    let payload = block_between(text, "<data>", "</data>")
        .ok_or(ExtractError::MissingSection(SectionKind::SysconfigR))?;

    let mut sink = TallySink::new(names);
    let mut state = RaidScanState::Idle;
    let mut counter = 0u32;

    for token in tokenize(payload) {
        let (next, action) = state.step(token);
        match action {
            ScanAction::Ignore => {}
            ScanAction::CountData => counter += 1,
            ScanAction::CloseWithParity => {
                sink.emit(RaidGroupTally {
                    data: counter,
                    parity: 1,
                });
                counter = 0;
            }
            ScanAction::EnterAggregate { close_pending } => {
                if close_pending {
                    sink.emit(RaidGroupTally {
                        data: counter,
                        parity: 0,
                    });
                }
                counter = 0;
                sink.advance();
            }
            ScanAction::Stop { close_pending } => {
                if close_pending {
                    sink.emit(RaidGroupTally {
                        data: counter,
                        parity: 0,
                    });
                }
                break;
            }
        }
        state = next;
    }

    if sink.dropped > 0 {
        warn!(dropped = sink.dropped, "RAID group tallies without an aggregate");
    }

    Ok(sink.counts)
}

/// Collects the RAID group labels of every listed aggregate.
///
/// A label belongs to each aggregate whose name it contains; labels are
/// trimmed, deduplicated and kept in first-seen order.
///
/// # Errors
/// `MissingSection(SysconfigR)` when the text carries no RAID group label.
pub fn parse_raid_groups(
    text: &str,
    names: &[&str],
) -> Result<ByAggregate<Vec<String>>, ExtractError> {
    let labels: Vec<&str> = delimited_spans(text, "RAID group", "(")
        .into_iter()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if labels.is_empty() {
        return Err(ExtractError::MissingSection(SectionKind::SysconfigR));
    }

    Ok(names
        .iter()
        .map(|name| {
            let mut own: Vec<String> = Vec::new();
            for label in labels.iter().filter(|l| l.contains(name)) {
                if !own.iter().any(|o| o == label) {
                    own.push(label.to_string());
                }
            }
            (name.to_string(), own)
        })
        .collect())
}

/// Pairs RAID group labels with tallies by position within each aggregate.
///
/// Tallies past the last label have nothing to attach to and are dropped.
pub fn join_groups(
    labels: &ByAggregate<Vec<String>>,
    tallies: &ByAggregate<Vec<RaidGroupTally>>,
) -> ByAggregate<Vec<RaidGroupRecord>> {
    labels
        .iter()
        .map(|(name, own)| {
            let counted = tallies.get(name).map(Vec::as_slice).unwrap_or_default();
            if counted.len() > own.len() {
                warn!(
                    aggregate = name,
                    labels = own.len(),
                    tallies = counted.len(),
                    "more tallies than RAID group labels"
                );
            }
            let records = own
                .iter()
                .enumerate()
                .map(|(i, label)| RaidGroupRecord {
                    label: label.clone(),
                    tally: counted.get(i).copied(),
                })
                .collect();
            (name.to_string(), records)
        })
        .collect()
}
