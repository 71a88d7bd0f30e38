//! Diff between the systems currently in the scene and the systems the
//! selection asks for. Pure: the caller applies the plan.

use std::collections::{HashMap, HashSet};

use crate::mapping::params::VisualizationParams;

/// What has to change to turn the live scene into the desired one.
/// `create`, `update` and `unchanged` index into the desired slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub create: Vec<usize>,
    pub update: Vec<usize>,
    pub unchanged: Vec<usize>,
    /// Live identifiers that are no longer requested.
    pub destroy: Vec<String>,
}

impl ReconcilePlan {
    /// True if applying the plan would not touch the scene.
    pub fn is_noop(&self) -> bool {
        self.create.is_empty() && self.update.is_empty() && self.destroy.is_empty()
    }
}

/// Compare live entries against the desired list.
///
/// Identifiers repeated in `desired` are honored once (first occurrence).
/// `destroy` keeps the order of `existing`.
pub fn plan_reconcile<'a>(
    existing: impl IntoIterator<Item = (&'a str, &'a VisualizationParams)>,
    desired: &[VisualizationParams],
) -> ReconcilePlan {
    let live: HashMap<&str, &VisualizationParams> = existing.into_iter().collect();
    let live_order: Vec<&str> = {
        let mut ids: Vec<&str> = live.keys().copied().collect();
        ids.sort_unstable();
        ids
    };

    let mut plan = ReconcilePlan::default();
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, params) in desired.iter().enumerate() {
        if !seen.insert(params.id.as_str()) {
            log::debug!("duplicate system {} ignored", params.id);
            continue;
        }
        match live.get(params.id.as_str()) {
            None => plan.create.push(index),
            Some(current) if *current != params => plan.update.push(index),
            Some(_) => plan.unchanged.push(index),
        }
    }

    plan.destroy = live_order
        .into_iter()
        .filter(|id| !seen.contains(id))
        .map(str::to_string)
        .collect();
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::VisualTuning;
    use crate::catalog::builtin::builtin_records;
    use crate::mapping::color::Color;
    use crate::mapping::units::DistanceConversion;

    fn params() -> Vec<VisualizationParams> {
        let tuning = VisualTuning::default();
        builtin_records()
            .iter()
            .take(4)
            .map(|r| VisualizationParams::from_record(r, DistanceConversion::Identity, &tuning))
            .collect()
    }

    fn live(list: &[VisualizationParams]) -> Vec<(&str, &VisualizationParams)> {
        list.iter().map(|p| (p.id.as_str(), p)).collect()
    }

    #[test]
    fn empty_scene_creates_everything() {
        let desired = params();
        let plan = plan_reconcile(Vec::new(), &desired);
        assert_eq!(plan.create, vec![0, 1, 2, 3]);
        assert!(plan.update.is_empty());
        assert!(plan.destroy.is_empty());
    }

    #[test]
    fn same_input_is_noop() {
        let desired = params();
        let plan = plan_reconcile(live(&desired), &desired);
        assert!(plan.is_noop());
        assert_eq!(plan.unchanged.len(), 4);
    }

    #[test]
    fn removed_ids_are_destroyed() {
        let current = params();
        let desired = vec![current[1].clone(), current[3].clone()];
        let plan = plan_reconcile(live(&current), &desired);
        assert_eq!(plan.destroy.len(), 2);
        assert!(plan.destroy.contains(&current[0].id));
        assert!(plan.destroy.contains(&current[2].id));
        assert_eq!(plan.unchanged, vec![0, 1]);
    }

    #[test]
    fn changed_params_update_in_place() {
        let current = params();
        let mut desired = current.clone();
        desired[2].planet_color = Color::from_hex(0x123456);
        let plan = plan_reconcile(live(&current), &desired);
        assert_eq!(plan.update, vec![2]);
        assert!(plan.create.is_empty());
        assert!(plan.destroy.is_empty());
    }

    #[test]
    fn duplicates_are_taken_once() {
        let base = params();
        let desired = vec![base[0].clone(), base[0].clone(), base[1].clone()];
        let plan = plan_reconcile(Vec::new(), &desired);
        assert_eq!(plan.create, vec![0, 2]);
    }
}
