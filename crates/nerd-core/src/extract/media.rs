//! Disk media tally per aggregate.

use tracing::warn;

use crate::model::{ByAggregate, DiskTypeTally, MediaClass};
use crate::section::{ExtractError, SectionKind};
use crate::util::{block_between, tokenize};

fn is_boundary(token: &str) -> bool {
    token.contains("Aggregate") || token.contains("spare")
}

/// Stores `tally` for the aggregate at `at`; false when the listing has none.
fn store(
    tallies: &mut ByAggregate<DiskTypeTally>,
    names: &[&str],
    at: usize,
    tally: DiskTypeTally,
) -> bool {
    match names.get(at).and_then(|name| tallies.get_mut(name)) {
        Some(slot) => {
            *slot = tally;
            true
        }
        None => false,
    }
}

/// Counts disks by media class for every listed aggregate.
///
/// Aggregate boundaries are `Aggregate` and `spare` tokens. The first
/// boundary arms the scan; every later one stores the running tally for the
/// current aggregate and moves to the next. A `spare` boundary ends the scan.
/// For each `Type` column header, the token `disk_type_offset` positions
/// further on is classified with [`MediaClass::classify`]. Offsets past the
/// end of the payload classify nothing.
///
/// # Errors
/// `MissingSection(SysconfigR)` when the text has no `<data>` payload.
pub fn parse_disk_types(
    text: &str,
    names: &[&str],
    disk_type_offset: usize,
) -> Result<ByAggregate<DiskTypeTally>, ExtractError> {
    let payload = block_between(text, "<data>", "</data>")
        .ok_or(ExtractError::MissingSection(SectionKind::SysconfigR))?;
    let tokens = tokenize(payload);

    let mut tallies: ByAggregate<DiskTypeTally> = names
        .iter()
        .map(|n| (n.to_string(), DiskTypeTally::default()))
        .collect();

    let mut armed = false;
    let mut ended = false;
    let mut cursor = 0usize;
    let mut current = DiskTypeTally::default();
    let mut unattributed = 0usize;

    for (k, token) in tokens.iter().enumerate() {
        if is_boundary(token) {
            if armed {
                if !store(&mut tallies, names, cursor, current) {
                    unattributed += 1;
                }
                cursor += 1;
                if token.contains("spare") {
                    ended = true;
                    break;
                }
            } else {
                armed = true;
            }
            current = DiskTypeTally::default();
        } else if token.contains("Type") {
            let Some(disk_type) = k
                .checked_add(disk_type_offset)
                .and_then(|i| tokens.get(i))
            else {
                continue;
            };
            current.record(MediaClass::classify(disk_type));
        }
    }

    if armed && !ended && !store(&mut tallies, names, cursor, current) {
        unattributed += 1;
    }

    if unattributed > 0 {
        warn!(unattributed, "disk type tallies without an aggregate");
    }

    Ok(tallies)
}
