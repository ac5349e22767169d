//! Aggregate listing of the RAID configuration section.

use crate::util::delimited_spans;

/// Returns the aggregate names of a `sysconfig -r` dump in first-seen order.
///
/// A name is the text between `Aggregate ` and ` (` on one line. The section
/// lists every aggregate a second time further down, so the listing ends at
/// the first name seen twice.
pub fn parse_aggregate_names(text: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();

    for name in delimited_spans(text, "Aggregate ", " (") {
        if names.contains(&name) {
            break;
        }
        names.push(name);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::scenarios::SYSCONFIG_R;

    #[test]
    fn test_parse_aggregate_names() {
        assert_eq!(parse_aggregate_names(SYSCONFIG_R), vec!["aggr0", "aggr1"]);
    }

    #[test]
    fn test_listing_stops_at_first_repeat() {
        let text = "\
Aggregate aggr0 (online, raid_dp)
Aggregate aggr1 (online, raid_dp)
Aggregate aggr0 (online, raid_dp)
Aggregate aggr9 (online, raid_dp)
";
        assert_eq!(parse_aggregate_names(text), vec!["aggr0", "aggr1"]);
    }

    #[test]
    fn test_no_aggregates() {
        assert!(parse_aggregate_names("<data>\nSpare disks\n</data>").is_empty());
        assert!(parse_aggregate_names("").is_empty());
    }
}
