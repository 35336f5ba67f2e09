//! Safety screening gate.
//!
//! The questionnaire every user must pass before reaching the pump
//! controls. Selecting any dangerous condition produces a hard block
//! rather than a warning — the pump is not proven safe for those
//! conditions — and the blocked screen stays up for five seconds so
//! the warning is actually read before the gate sends the user back
//! to the entry point.

use crate::conditions;
use crate::timer::OneShot;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

/// How long the blocked screen stays up before redirecting.
const BLOCK_REDIRECT_DELAY: Duration = Duration::from_secs(5);

/// Gate lifecycle. `Blocked` and `Passed` are terminal for a gate
/// instance; the shell drops it and builds a fresh one on re-entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GatePhase {
    Collecting,
    Blocked,
    Passed,
}

/// Outcome of a submit, handed to the caller synchronously.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Passed,
    Blocked,
}

/// Events emitted by [`ScreeningGate::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateEvent {
    /// The block-redirect delay elapsed; navigate back to the entry
    /// point. Fires exactly once per block.
    ReturnToEntry,
}

/// The screening questionnaire state machine.
pub struct ScreeningGate {
    selected: BTreeSet<String>,
    terms_accepted: bool,
    phase: GatePhase,
    redirect: OneShot,
}

impl Default for ScreeningGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreeningGate {
    pub fn new() -> Self {
        Self {
            selected: BTreeSet::new(),
            terms_accepted: false,
            phase: GatePhase::Collecting,
            redirect: OneShot::new(),
        }
    }

    /// Flip membership of a condition id.
    ///
    /// `none` is mutually exclusive with everything else: selecting it
    /// replaces the whole selection, and selecting any other id drops
    /// `none` first.
    pub fn toggle_condition(&mut self, id: &str) {
        if self.phase != GatePhase::Collecting {
            return;
        }

        if id == "none" {
            self.selected.clear();
            self.selected.insert("none".into());
        } else {
            self.selected.remove("none");
            if !self.selected.remove(id) {
                self.selected.insert(id.to_string());
            }
        }
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        if self.phase != GatePhase::Collecting {
            return;
        }
        self.terms_accepted = accepted;
    }

    /// Decide Pass or Block.
    ///
    /// Returns `None` without any state change when the preconditions
    /// (terms accepted, non-empty selection) are not met — the shell
    /// should have disabled the action, so a violation is a no-op, not
    /// a fault. On Block the redirect timer starts; nothing in the
    /// current design cancels it early.
    pub fn submit(&mut self, now: Instant) -> Option<GateDecision> {
        if self.phase != GatePhase::Collecting {
            return None;
        }
        if !self.terms_accepted || self.selected.is_empty() {
            return None;
        }

        let dangerous = self.selected.iter().any(|id| conditions::is_dangerous(id));
        if dangerous {
            self.phase = GatePhase::Blocked;
            self.redirect.start(now, BLOCK_REDIRECT_DELAY);
            tracing::info!("screening blocked: dangerous condition selected");
            Some(GateDecision::Blocked)
        } else {
            self.phase = GatePhase::Passed;
            tracing::info!("screening passed");
            Some(GateDecision::Passed)
        }
    }

    /// Fire the block-redirect if its delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<GateEvent> {
        if self.redirect.fire_if_due(now) {
            Some(GateEvent::ReturnToEntry)
        } else {
            None
        }
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    /// Currently selected condition ids, in sorted order.
    pub fn selected(&self) -> impl Iterator<Item = &str> + '_ {
        self.selected.iter().map(String::as_str)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected_ids(gate: &ScreeningGate) -> Vec<&str> {
        gate.selected().collect()
    }

    #[test]
    fn test_none_replaces_selection() {
        let mut gate = ScreeningGate::new();
        gate.toggle_condition("heart");
        gate.toggle_condition("allergies");
        gate.toggle_condition("none");

        assert_eq!(selected_ids(&gate), vec!["none"]);
    }

    #[test]
    fn test_other_id_evicts_none() {
        let mut gate = ScreeningGate::new();
        gate.toggle_condition("none");
        gate.toggle_condition("heart");

        assert_eq!(selected_ids(&gate), vec!["heart"]);
    }

    #[test]
    fn test_toggle_is_membership_flip() {
        let mut gate = ScreeningGate::new();
        gate.toggle_condition("heart");
        gate.toggle_condition("respiratory");
        gate.toggle_condition("heart");

        assert_eq!(selected_ids(&gate), vec!["respiratory"]);
    }

    #[test]
    fn test_submit_noop_without_terms_or_selection() {
        let t0 = Instant::now();

        let mut gate = ScreeningGate::new();
        gate.toggle_condition("none");
        assert_eq!(gate.submit(t0), None); // terms missing

        let mut gate = ScreeningGate::new();
        gate.set_terms_accepted(true);
        assert_eq!(gate.submit(t0), None); // empty selection

        assert_eq!(gate.phase(), GatePhase::Collecting);
    }

    #[test]
    fn test_safe_selection_passes_synchronously() {
        let t0 = Instant::now();
        let mut gate = ScreeningGate::new();
        gate.toggle_condition("none");
        gate.set_terms_accepted(true);

        assert_eq!(gate.submit(t0), Some(GateDecision::Passed));
        assert_eq!(gate.phase(), GatePhase::Passed);

        // No timer was scheduled on a pass.
        assert_eq!(gate.poll(t0 + Duration::from_secs(60)), None);
    }

    #[test]
    fn test_dangerous_selection_blocks_then_redirects_at_5s() {
        let t0 = Instant::now();
        let mut gate = ScreeningGate::new();
        gate.toggle_condition("heart");
        gate.set_terms_accepted(true);

        assert_eq!(gate.submit(t0), Some(GateDecision::Blocked));
        assert_eq!(gate.phase(), GatePhase::Blocked);

        // Never earlier than the full delay.
        assert_eq!(gate.poll(t0 + Duration::from_millis(4999)), None);
        assert_eq!(
            gate.poll(t0 + Duration::from_secs(5)),
            Some(GateEvent::ReturnToEntry)
        );

        // Exactly once.
        assert_eq!(gate.poll(t0 + Duration::from_secs(6)), None);
    }

    #[test]
    fn test_mixed_selection_with_dangerous_id_blocks() {
        let t0 = Instant::now();
        let mut gate = ScreeningGate::new();
        gate.toggle_condition("allergies");
        gate.toggle_condition("neuro");
        gate.set_terms_accepted(true);

        assert_eq!(gate.submit(t0), Some(GateDecision::Blocked));
    }

    #[test]
    fn test_blocked_is_terminal_and_redirect_survives_mutation() {
        let t0 = Instant::now();
        let mut gate = ScreeningGate::new();
        gate.toggle_condition("heart");
        gate.set_terms_accepted(true);
        gate.submit(t0);

        // Deselecting after the block changes nothing and does not
        // cancel the pending redirect.
        gate.toggle_condition("heart");
        gate.set_terms_accepted(false);
        assert_eq!(gate.submit(t0 + Duration::from_secs(1)), None);
        assert_eq!(gate.phase(), GatePhase::Blocked);
        assert!(gate.is_selected("heart"));

        assert_eq!(
            gate.poll(t0 + Duration::from_secs(5)),
            Some(GateEvent::ReturnToEntry)
        );
    }

    #[test]
    fn test_passed_is_terminal() {
        let t0 = Instant::now();
        let mut gate = ScreeningGate::new();
        gate.toggle_condition("none");
        gate.set_terms_accepted(true);
        gate.submit(t0);

        gate.toggle_condition("heart");
        assert_eq!(selected_ids(&gate), vec!["none"]);
        assert_eq!(gate.submit(t0), None);
    }
}
