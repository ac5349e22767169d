//! Record types shared by the extractors.
//!
//! Every per-aggregate fact is stored in a [`NamedMap`] keyed by aggregate
//! name. The map keeps first-seen order, which is the order the controller
//! lists its aggregates in and the order reports present them in.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Ordered map from a name to a value, preserving first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMap<T> {
    entries: Vec<(String, T)>,
}

/// Facts keyed by aggregate name.
pub type ByAggregate<T> = NamedMap<T>;

/// Facts keyed by volume name.
pub type ByVolume<T> = NamedMap<T>;

impl<T> Default for NamedMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> NamedMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing an existing one in place.
    pub fn insert(&mut self, name: impl Into<String>, value: T) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> FromIterator<(String, T)> for NamedMap<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl<T> IntoIterator for NamedMap<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T: Serialize> Serialize for NamedMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Disk roles counted for one RAID group.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct RaidGroupTally {
    /// Data disks seen before the group was closed.
    pub data: u32,
    /// 1 when a parity marker closed the group, 0 when a boundary did.
    pub parity: u32,
}

/// RAID group of an aggregate.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct RaidGroupRecord {
    /// Group label as printed, e.g. `/aggr0/plex0/rg0`.
    pub label: String,
    /// Disk tally at the same position in the scan, when one was recorded.
    pub tally: Option<RaidGroupTally>,
}

/// Media class of a disk.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum MediaClass {
    Rotational,
    SolidState,
    Unclassified,
}

impl MediaClass {
    /// Classifies a disk type column value by substring.
    pub fn classify(disk_type: &str) -> Self {
        const ROTATIONAL: [&str; 3] = ["SAS", "ATA", "FC"];

        if disk_type.contains("SSD") {
            MediaClass::SolidState
        } else if ROTATIONAL.iter().any(|t| disk_type.contains(t)) {
            MediaClass::Rotational
        } else {
            MediaClass::Unclassified
        }
    }
}

/// Disk counts by media class for one aggregate.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct DiskTypeTally {
    pub rotational: u32,
    pub solid_state: u32,
    pub unclassified: u32,
}

impl DiskTypeTally {
    pub fn record(&mut self, class: MediaClass) {
        match class {
            MediaClass::Rotational => self.rotational += 1,
            MediaClass::SolidState => self.solid_state += 1,
            MediaClass::Unclassified => self.unclassified += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.rotational + self.solid_state + self.unclassified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_map_keeps_first_seen_order() {
        let mut map = NamedMap::new();
        map.insert("aggr1", 1);
        map.insert("aggr0", 2);
        map.insert("aggr1", 3);

        let entries: Vec<(&str, &i32)> = map.iter().collect();
        assert_eq!(entries, vec![("aggr1", &3), ("aggr0", &2)]);
        assert_eq!(map.len(), 2);
        assert!(map.contains("aggr0"));
        assert!(!map.contains("aggr2"));
    }

    #[test]
    fn test_named_map_get_mut() {
        let mut map: NamedMap<Vec<u32>> = NamedMap::new();
        map.insert("aggr0", Vec::new());
        map.get_mut("aggr0").unwrap().push(4);
        assert_eq!(map.get("aggr0"), Some(&vec![4]));
        assert!(map.get_mut("missing").is_none());
    }

    #[test]
    fn test_media_class() {
        assert_eq!(MediaClass::classify("SSD"), MediaClass::SolidState);
        assert_eq!(MediaClass::classify("SSD-NVM"), MediaClass::SolidState);
        assert_eq!(MediaClass::classify("SAS"), MediaClass::Rotational);
        assert_eq!(MediaClass::classify("BSAS"), MediaClass::Rotational);
        assert_eq!(MediaClass::classify("FSAS"), MediaClass::Rotational);
        assert_eq!(MediaClass::classify("SATA"), MediaClass::Rotational);
        assert_eq!(MediaClass::classify("LUN"), MediaClass::Unclassified);
    }

    #[test]
    fn test_disk_type_tally() {
        let mut tally = DiskTypeTally::default();
        tally.record(MediaClass::Rotational);
        tally.record(MediaClass::SolidState);
        tally.record(MediaClass::SolidState);
        assert_eq!(tally.rotational, 1);
        assert_eq!(tally.solid_state, 2);
        assert_eq!(tally.total(), 3);
    }
}
