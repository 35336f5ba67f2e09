#![forbid(unsafe_code)]

//! Core domain model and decision logic for the PumpPanel control panel.
//!
//! This crate provides:
//! - Domain types (intensity levels, medications, calendar cells)
//! - The screening gate that guards pump access
//! - The pump session with its elapsed-time counter and device dispatch
//! - The weekly medication scheduler and week-window computation
//! - Single-threaded timer primitives shared by all of the above
//!
//! Presentation (layout, navigation, translation tables) lives in the
//! hosting shell, not here.

pub mod conditions;
pub mod config;
pub mod device;
pub mod error;
pub mod logging;
pub mod meds;
pub mod pump;
pub mod screening;
pub mod timer;
pub mod types;
pub mod week;

// Re-export commonly used types
pub use conditions::{condition_catalog, is_dangerous, ConditionEntry};
pub use config::Config;
pub use device::{DeviceError, DeviceLink, HttpDeviceLink, NullDeviceLink, PumpCommand};
pub use error::{Error, Result};
pub use meds::MedicationScheduler;
pub use pump::{format_elapsed, PumpSession};
pub use screening::{GateDecision, GateEvent, GatePhase, ScreeningGate};
pub use types::*;
pub use week::week_dates;
