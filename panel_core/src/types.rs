//! Core domain types for the pump control panel.
//!
//! This module defines the fundamental types used throughout the system:
//! - Pump intensity levels
//! - Medication entries for the weekly calendar
//! - Week-window calendar cells
//! - Display locale

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pump intensity level.
///
/// Intensity is informational: it is held locally and never transmitted
/// to the device, even while a session is running.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PumpIntensity {
    Low,
    Medium,
    High,
}

impl Default for PumpIntensity {
    fn default() -> Self {
        PumpIntensity::Medium
    }
}

/// A medication reminder entry on the weekly calendar.
///
/// `weekday` uses the calendar's Monday-first convention:
/// 0 = Monday .. 6 = Sunday. See [`crate::week::calendar_column`] for the
/// conversion against `chrono`'s day-of-week.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    pub dosage: String,
    /// Time of day as an "HH:MM" string, as entered by the caller.
    pub schedule: String,
    pub weekday: u8,
}

/// One cell of a 7-day week window: the day of month plus an
/// abbreviated month label in the active locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub day_number: u32,
    pub month_label: &'static str,
}

/// Display locale. Only affects the month labels produced by the week
/// window; full translation tables belong to the hosting shell.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}
