//! What the user has picked, what they are looking at, and which planet the
//! info popover describes.
//!
//! Selection order is insertion order and is significant: it seeds each
//! system's starting orbit angle and animation phase.

use std::collections::HashMap;

use log::{debug, warn};

use crate::api::config::VisualTuning;
use crate::catalog::record::PlanetRecord;
use crate::mapping::params::VisualizationParams;
use crate::mapping::units::DistanceConversion;

/// Maximum number of simultaneously selected planets.
pub const MAX_SELECTED: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopoverState {
    pub open: bool,
    /// Planet the popover describes. `None` shows the summary view.
    pub info_id: Option<String>,
}

/// Claim on an in-flight detail fetch. Completing with a stale ticket is a
/// no-op, so a fetch that finishes after its planet was removed or
/// re-requested never lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    id: String,
    serial: u64,
}

impl FetchTicket {
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Default)]
pub struct SelectionState {
    selected: Vec<PlanetRecord>,
    focused: Option<String>,
    popover: PopoverState,
    pending: HashMap<String, u64>,
    next_serial: u64,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──

    pub fn selected(&self) -> &[PlanetRecord] {
        &self.selected
    }

    pub fn get(&self, id: &str) -> Option<&PlanetRecord> {
        self.selected.iter().find(|r| r.kepoi_name == id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= MAX_SELECTED
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn popover(&self) -> &PopoverState {
        &self.popover
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    // ── Selection ──

    /// Append `record`. No-op when it is already selected or the cap is reached.
    pub fn add(&mut self, record: PlanetRecord) -> bool {
        if self.is_selected(&record.kepoi_name) || self.is_full() {
            return false;
        }
        debug!("selected {}", record.kepoi_name);
        self.selected.push(record);
        true
    }

    /// Remove `id`. Clears focus on it, points the popover away from it and
    /// drops any pending fetch for it.
    pub fn remove(&mut self, id: &str) -> Option<PlanetRecord> {
        self.pending.remove(id);
        let idx = self.selected.iter().position(|r| r.kepoi_name == id)?;
        let record = self.selected.remove(idx);
        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        }
        if self.popover.info_id.as_deref() == Some(id) {
            self.popover.info_id = None;
        }
        debug!("deselected {id}");
        Some(record)
    }

    // ── Focus ──

    /// Focus `id`, or clear focus with `None`. An id that is not selected is
    /// ignored, so focus always names a selected planet.
    pub fn set_focus(&mut self, id: Option<&str>) -> bool {
        match id {
            Some(id) if !self.is_selected(id) => {
                warn!("ignoring focus on unselected planet {id}");
                false
            }
            _ => {
                self.focused = id.map(str::to_string);
                true
            }
        }
    }

    /// Focus from a click in the scene or the list: also opens the popover
    /// on the focused planet.
    pub fn focus_planet(&mut self, id: Option<&str>) {
        if !self.set_focus(id) {
            return;
        }
        self.popover.info_id = id.map(str::to_string);
        self.popover.open = id.is_some();
    }

    /// Clears focus and shows every system again.
    pub fn show_all(&mut self) {
        self.focused = None;
    }

    // ── Popover ──

    /// Point the popover at `id` (opening it) or close it with `None`.
    /// An id that is not selected closes it too.
    pub fn select_info(&mut self, id: Option<&str>) {
        self.popover.info_id = id.filter(|id| self.is_selected(id)).map(str::to_string);
        self.popover.open = self.popover.info_id.is_some();
    }

    pub fn set_popover_open(&mut self, open: bool) {
        self.popover.open = open;
    }

    // ── Pending fetches ──

    /// Reserve a slot for fetching `id`. `None` when it is already selected,
    /// already in flight, or selected + in-flight would exceed the cap.
    pub fn begin_fetch(&mut self, id: &str) -> Option<FetchTicket> {
        if self.is_selected(id) || self.is_pending(id) || self.selected.len() + self.pending.len() >= MAX_SELECTED {
            return None;
        }
        self.next_serial += 1;
        self.pending.insert(id.to_string(), self.next_serial);
        Some(FetchTicket { id: id.to_string(), serial: self.next_serial })
    }

    /// Land a fetch. Returns whether the record was added.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, record: Option<PlanetRecord>) -> bool {
        if self.pending.get(&ticket.id) != Some(&ticket.serial) {
            warn!("discarding stale fetch for {}", ticket.id);
            return false;
        }
        self.pending.remove(&ticket.id);
        match record {
            Some(record) if record.kepoi_name == ticket.id => self.add(record),
            Some(record) => {
                warn!("fetch for {} returned {}", ticket.id, record.kepoi_name);
                false
            }
            None => false,
        }
    }

    // ── Derived ──

    /// Scene parameters for every selected planet, in selection order.
    pub fn visualization_params(&self, conversion: DistanceConversion, tuning: &VisualTuning) -> Vec<VisualizationParams> {
        self.selected
            .iter()
            .map(|r| VisualizationParams::from_record(r, conversion, tuning))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin::builtin_records;

    fn record(i: usize) -> PlanetRecord {
        builtin_records().remove(i)
    }

    #[test]
    fn add_is_capped_and_unique() {
        let mut state = SelectionState::new();
        for i in 0..8 {
            state.add(record(i));
        }
        assert_eq!(state.len(), MAX_SELECTED);
        assert!(!state.add(record(0)));
        assert_eq!(state.selected()[0].kepoi_name, "K00282.01");
    }

    #[test]
    fn duplicate_add_is_noop() {
        let mut state = SelectionState::new();
        assert!(state.add(record(0)));
        assert!(!state.add(record(0)));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn removing_focused_planet_clears_focus() {
        let mut state = SelectionState::new();
        state.add(record(0));
        state.add(record(4));
        state.focus_planet(Some("K00282.01"));
        assert_eq!(state.focused(), Some("K00282.01"));
        assert_eq!(state.popover().info_id.as_deref(), Some("K00282.01"));

        state.remove("K00282.01");
        assert_eq!(state.focused(), None);
        assert_eq!(state.popover().info_id, None);
    }

    #[test]
    fn removing_other_planet_keeps_focus() {
        let mut state = SelectionState::new();
        state.add(record(0));
        state.add(record(4));
        state.set_focus(Some("K00087.01"));
        state.remove("K00282.01");
        assert_eq!(state.focused(), Some("K00087.01"));
    }

    #[test]
    fn focus_on_unselected_is_ignored() {
        let mut state = SelectionState::new();
        state.add(record(0));
        assert!(!state.set_focus(Some("K00087.01")));
        assert_eq!(state.focused(), None);
    }

    #[test]
    fn info_select_and_close() {
        let mut state = SelectionState::new();
        state.add(record(0));
        state.select_info(Some("K00282.01"));
        assert!(state.popover().open);
        state.select_info(None);
        assert_eq!(*state.popover(), PopoverState::default());
    }

    #[test]
    fn info_on_unselected_planet_stays_closed() {
        let mut state = SelectionState::new();
        state.add(record(0));
        state.select_info(Some("K00282.01"));
        state.select_info(Some("K00087.01"));
        assert!(!state.popover().open);
        assert_eq!(state.popover().info_id, None);
    }

    #[test]
    fn show_all_clears_focus_only() {
        let mut state = SelectionState::new();
        state.add(record(0));
        state.focus_planet(Some("K00282.01"));
        state.show_all();
        assert_eq!(state.focused(), None);
        assert!(state.popover().open);
    }

    #[test]
    fn stale_fetch_is_discarded() {
        let mut state = SelectionState::new();
        let first = state.begin_fetch("K00282.01").unwrap();
        assert!(state.begin_fetch("K00282.01").is_none());

        // Deselecting drops the reservation; a new request gets a new serial.
        state.remove("K00282.01");
        let second = state.begin_fetch("K00282.01").unwrap();

        assert!(!state.complete_fetch(first, Some(record(0))));
        assert!(state.is_empty());
        assert!(state.complete_fetch(second, Some(record(0))));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn fetch_after_remove_does_not_land() {
        let mut state = SelectionState::new();
        let ticket = state.begin_fetch("K00282.01").unwrap();
        state.remove("K00282.01");
        assert!(!state.complete_fetch(ticket, Some(record(0))));
        assert!(state.is_empty());
    }

    #[test]
    fn pending_fetches_count_toward_cap() {
        let mut state = SelectionState::new();
        for i in 0..4 {
            state.add(record(i));
        }
        assert!(state.begin_fetch("K07554.01").is_some());
        assert!(state.begin_fetch("K00123.02").is_some());
        assert!(state.begin_fetch("K00117.02").is_none());
    }

    #[test]
    fn failed_fetch_frees_the_slot() {
        let mut state = SelectionState::new();
        let ticket = state.begin_fetch("K00282.01").unwrap();
        assert!(!state.complete_fetch(ticket, None));
        assert!(!state.is_pending("K00282.01"));
    }

    #[test]
    fn params_follow_selection_order() {
        let mut state = SelectionState::new();
        state.add(record(4));
        state.add(record(0));
        let params = state.visualization_params(DistanceConversion::Identity, &VisualTuning::default());
        let ids: Vec<&str> = params.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["K00087.01", "K00282.01"]);
    }
}
