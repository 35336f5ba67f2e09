//! Pump session control.
//!
//! One session covers one start-to-stop pumping interval: the on/off
//! flag, the intensity choice, and the elapsed-time counter. Device
//! commands are optimistic fire-and-forget — the local flag flips
//! first, and a failed command is logged and otherwise ignored. The
//! session has no notion of device acknowledgment, so there is no
//! degraded or disconnected state to model.

use crate::device::{DeviceLink, PumpCommand};
use crate::timer::Ticker;
use crate::types::PumpIntensity;
use std::time::{Duration, Instant};

/// A pump control session.
///
/// Invariant: `elapsed_seconds` is 0 whenever the pump is inactive;
/// stopping resets the counter rather than pausing it.
pub struct PumpSession<D: DeviceLink> {
    active: bool,
    intensity: PumpIntensity,
    elapsed_seconds: u64,
    tick: Ticker,
    link: D,
}

impl<D: DeviceLink> PumpSession<D> {
    pub fn new(link: D) -> Self {
        Self {
            active: false,
            intensity: PumpIntensity::default(),
            elapsed_seconds: 0,
            tick: Ticker::new(Duration::from_secs(1)),
            link,
        }
    }

    /// Flip the pump on or off; returns the new state.
    ///
    /// The flag and the elapsed-time ticker are updated before the
    /// device command goes out, and a command failure never reverts
    /// them. Failures are logged, not retried and not surfaced.
    pub fn toggle(&mut self, now: Instant) -> bool {
        self.active = !self.active;

        if self.active {
            self.tick.start(now);
        } else {
            self.tick.cancel();
            self.elapsed_seconds = 0;
        }

        let command = if self.active {
            PumpCommand::On
        } else {
            PumpCommand::Off
        };

        if let Err(e) = self.link.send(command) {
            tracing::warn!("device command {:?} failed: {}", command, e);
        }

        self.active
    }

    /// Set the intensity level. Local only: intensity is not re-sent
    /// to the device, even while the pump is running.
    pub fn set_intensity(&mut self, level: PumpIntensity) {
        self.intensity = level;
    }

    /// Advance the elapsed-time counter by the whole seconds due.
    pub fn poll(&mut self, now: Instant) {
        self.elapsed_seconds += u64::from(self.tick.ticks_due(now));
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn intensity(&self) -> PumpIntensity {
        self.intensity
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }
}

/// Format a second count as zero-padded `HH:MM:SS` (hours unbounded).
pub fn format_elapsed(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}
