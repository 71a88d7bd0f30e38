use crate::catalog::record::{PlanetRecord, PlanetSummary};

/// Prefix for identifiers minted for user-entered planets.
pub const CUSTOM_ID_PREFIX: &str = "CUSTOM";

/// User-entered planets, newest first. Lives for the session only.
#[derive(Debug, Clone, Default)]
pub struct CustomPlanetStore {
    entries: Vec<PlanetRecord>,
}

impl CustomPlanetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the head. A record with the same id replaces the old one.
    pub fn add(&mut self, record: PlanetRecord) {
        self.entries.retain(|r| r.kepoi_name != record.kepoi_name);
        self.entries.insert(0, record);
    }

    pub fn get(&self, id: &str) -> Option<&PlanetRecord> {
        self.entries.iter().find(|r| r.kepoi_name == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanetRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Custom entries first, then `remote` minus anything a custom entry shadows.
    pub fn merge_listing(&self, remote: Vec<PlanetSummary>) -> Vec<PlanetSummary> {
        let mut merged: Vec<PlanetSummary> = self.entries.iter().map(PlanetRecord::summary).collect();
        merged.extend(remote.into_iter().filter(|s| !self.contains(&s.kepoi_name)));
        merged
    }

    /// `CUSTOM` + the last six digits of the wall-clock millisecond stamp.
    /// Bumps the stamp until the id is unused.
    pub fn next_identifier(&self, now_ms: u64) -> String {
        let mut stamp = now_ms;
        loop {
            let id = format!("{CUSTOM_ID_PREFIX}{:06}", stamp % 1_000_000);
            if !self.contains(&id) {
                return id;
            }
            stamp = stamp.wrapping_add(1);
        }
    }
}
