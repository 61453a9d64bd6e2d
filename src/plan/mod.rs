use anyhow::{ensure, Result};
use serde::Deserialize;

/// Number of days in the reading plan. `current_day` past this value
/// means the plan is finished.
pub const PLAN_DAYS: i64 = 365;

static PLAN_JSON: &str = include_str!("../../plan/reading_plan.json");

/// One day of the fixed plan. Sourced entirely from static data, never
/// written by the application.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanEntry {
    pub day: i64,
    /// Display date label, e.g. "January 1".
    pub date: String,
    /// Reading reference, e.g. "Genesis 1-3".
    pub reading: String,
    pub theme: Option<String>,
}

/// Read-only lookup over the ordered 365-entry plan.
pub struct PlanStore {
    entries: Vec<PlanEntry>,
}

impl PlanStore {
    /// Parses the embedded plan resource. Fails at startup rather than
    /// at lookup time if the resource is malformed or incomplete.
    pub fn load() -> Result<Self> {
        let entries: Vec<PlanEntry> = serde_json::from_str(PLAN_JSON)?;
        ensure!(
            entries.len() as i64 == PLAN_DAYS,
            "reading plan must contain {} entries, found {}",
            PLAN_DAYS,
            entries.len()
        );
        Ok(Self { entries })
    }

    /// Looks up the entry for `day` in 1..=365; out-of-range days return
    /// `None` and completion handling is left to the caller.
    pub fn get(&self, day: i64) -> Option<&PlanEntry> {
        if (1..=PLAN_DAYS).contains(&day) {
            self.entries.get(day as usize - 1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_loads_with_365_entries() {
        let plan = PlanStore::load().unwrap();
        assert!(plan.get(1).is_some());
        assert!(plan.get(365).is_some());
    }

    #[test]
    fn test_plan_days_are_sequential() {
        let plan = PlanStore::load().unwrap();
        for day in 1..=PLAN_DAYS {
            let entry = plan.get(day).unwrap();
            assert_eq!(entry.day, day);
            assert!(!entry.reading.is_empty());
        }
    }

    #[test]
    fn test_out_of_range_days_are_rejected() {
        let plan = PlanStore::load().unwrap();
        assert!(plan.get(0).is_none());
        assert!(plan.get(366).is_none());
        assert!(plan.get(-1).is_none());
    }

    #[test]
    fn test_plan_starts_at_the_beginning() {
        let plan = PlanStore::load().unwrap();
        let first = plan.get(1).unwrap();
        assert!(first.reading.starts_with("Genesis"));
    }
}
