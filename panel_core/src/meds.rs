//! Weekly medication scheduler.
//!
//! Owns the medication collection for the dashboard's lifetime. The
//! list lives only in memory — losing it on exit is deliberate, not an
//! omission. A successful add raises a transient indicator that clears
//! itself after three seconds; adding again restarts the window rather
//! than stacking it.

use crate::timer::OneShot;
use crate::types::Medication;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// How long the "added" indicator stays visible.
const SUCCESS_INDICATOR_WINDOW: Duration = Duration::from_secs(3);

/// The medication collection plus its success indicator.
#[derive(Default)]
pub struct MedicationScheduler {
    meds: Vec<Medication>,
    success: OneShot,
}

impl MedicationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a medication entry.
    ///
    /// Blank name/dosage/schedule or a weekday outside 0-6 makes the
    /// call a silent no-op — no error is raised or reported. The
    /// caller's constrained input is assumed to keep `schedule` a
    /// well-formed "HH:MM" string.
    pub fn add(&mut self, now: Instant, name: &str, dosage: &str, schedule: &str, weekday: u8) {
        if name.trim().is_empty()
            || dosage.trim().is_empty()
            || schedule.trim().is_empty()
            || weekday > 6
        {
            tracing::debug!("rejected medication entry: blank field or bad weekday");
            return;
        }

        let med = Medication {
            id: Uuid::new_v4(),
            name: name.to_string(),
            dosage: dosage.to_string(),
            schedule: schedule.to_string(),
            weekday,
        };
        tracing::info!("scheduled {} ({}) on weekday {}", med.name, med.dosage, weekday);
        self.meds.push(med);

        self.success.start(now, SUCCESS_INDICATOR_WINDOW);
    }

    /// Remove the entry with this id; unknown ids are a no-op.
    pub fn remove(&mut self, id: Uuid) {
        self.meds.retain(|m| m.id != id);
    }

    /// Medications on one calendar column (0 = Monday .. 6 = Sunday),
    /// lazily, in insertion order. Restartable on every call.
    pub fn by_weekday(&self, weekday: u8) -> impl Iterator<Item = &Medication> + '_ {
        self.meds.iter().filter(move |m| m.weekday == weekday)
    }

    /// All medications in insertion order.
    pub fn medications(&self) -> &[Medication] {
        &self.meds
    }

    /// Clear the success indicator once its window has elapsed.
    pub fn poll(&mut self, now: Instant) {
        if self.success.fire_if_due(now) {
            tracing::debug!("success indicator cleared");
        }
    }

    /// Whether the "added" indicator is currently showing.
    pub fn success_visible(&self) -> bool {
        self.success.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_filter_by_weekday() {
        let t0 = Instant::now();
        let mut sched = MedicationScheduler::new();
        sched.add(t0, "Aspirin", "81mg", "09:00", 2);

        let wednesday: Vec<_> = sched.by_weekday(2).collect();
        assert_eq!(wednesday.len(), 1);
        assert_eq!(wednesday[0].name, "Aspirin");

        for weekday in [0, 1, 3, 4, 5, 6] {
            assert_eq!(sched.by_weekday(weekday).count(), 0);
        }
    }

    #[test]
    fn test_blank_fields_are_silent_noops() {
        let t0 = Instant::now();
        let mut sched = MedicationScheduler::new();

        sched.add(t0, "", "81mg", "09:00", 2);
        sched.add(t0, "Aspirin", "  ", "09:00", 2);
        sched.add(t0, "Aspirin", "81mg", "", 2);
        sched.add(t0, "Aspirin", "81mg", "09:00", 7);

        assert!(sched.medications().is_empty());
        assert!(!sched.success_visible());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let t0 = Instant::now();
        let mut sched = MedicationScheduler::new();
        sched.add(t0, "Alprazolam", "0.25mg", "08:00", 1);
        sched.add(t0, "Lisinopril", "10mg", "21:00", 1);

        let names: Vec<_> = sched.by_weekday(1).map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Alprazolam", "Lisinopril"]);
    }

    #[test]
    fn test_remove_by_id_and_unknown_id_noop() {
        let t0 = Instant::now();
        let mut sched = MedicationScheduler::new();
        sched.add(t0, "Aspirin", "81mg", "09:00", 2);
        let id = sched.medications()[0].id;

        sched.remove(Uuid::new_v4());
        assert_eq!(sched.medications().len(), 1);

        sched.remove(id);
        assert!(sched.medications().is_empty());
    }

    #[test]
    fn test_success_indicator_clears_after_3s() {
        let t0 = Instant::now();
        let mut sched = MedicationScheduler::new();
        sched.add(t0, "Aspirin", "81mg", "09:00", 2);
        assert!(sched.success_visible());

        sched.poll(t0 + Duration::from_millis(2999));
        assert!(sched.success_visible());

        sched.poll(t0 + Duration::from_secs(3));
        assert!(!sched.success_visible());
    }

    #[test]
    fn test_rapid_adds_restart_indicator_window() {
        let t0 = Instant::now();
        let mut sched = MedicationScheduler::new();
        sched.add(t0, "Aspirin", "81mg", "09:00", 2);
        sched.add(t0 + Duration::from_secs(2), "Lipitor", "10mg", "21:00", 4);

        // Measured from the second add: still visible at t0+4.9s...
        sched.poll(t0 + Duration::from_millis(4900));
        assert!(sched.success_visible());

        // ...gone at t0+5s, not stacked out to t0+6s.
        sched.poll(t0 + Duration::from_secs(5));
        assert!(!sched.success_visible());
    }

    #[test]
    fn test_fresh_scheduler_is_empty() {
        let sched = MedicationScheduler::new();
        assert!(sched.medications().is_empty());
        assert!(!sched.success_visible());
    }
}
