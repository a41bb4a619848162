//! Timing configuration
//!
//! Settings arrive from the settings collaborator in microseconds and are
//! recompiled into timer ticks whenever they change. Out-of-range values
//! are clamped to the minimum safe tick count rather than rejected, so the
//! engine always has a well-formed, non-zero pulse length.

use crate::axes::AxisBits;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pulse timer ticks per microsecond
pub const TICKS_PER_US: f32 = 24.0;

/// Latency between one-shot retrigger and the step edge appearing on the
/// pin, compensated out of the programmed pulse width
pub const STEP_PULSE_LATENCY_US: f32 = 2.3;

/// Fixed overhead compensated out of the direction-settling delay
pub const PULSE_DELAY_OFFSET_US: f32 = 1.7;

/// Shortest pulse the hardware can produce reliably
pub const MIN_PULSE_TICKS: u16 = 2;

/// Ceiling selection for the cycle timer compare value
///
/// Adaptive smoothing trades maximum pacing interval for a more even
/// distribution of step edges across axes at low feed rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SmoothingLevel {
    /// Adaptive multi-axis step smoothing active, ceiling 2^18
    Adaptive,
    /// Full 2^23 pacing range
    Full,
}

impl SmoothingLevel {
    /// Maximum representable cycle count for this level
    pub const fn cycle_ceiling(self) -> u32 {
        match self {
            SmoothingLevel::Adaptive => 1 << 18,
            SmoothingLevel::Full => 1 << 23,
        }
    }

    /// Clamp a requested cycle count below the ceiling
    pub const fn clamp_cycles(self, cycles: u32) -> u32 {
        let ceiling = self.cycle_ceiling();
        if cycles < ceiling {
            cycles
        } else {
            ceiling - 1
        }
    }
}

/// Per-axis polarity inversion masks
///
/// Applied by exclusive-or to logical signal state before pin writes, to
/// support normally-high or normally-low driver wiring. Written only via
/// settings application, read-only inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InvertMasks {
    /// Step signal inversion
    pub step: AxisBits,
    /// Direction signal inversion
    pub dir: AxisBits,
    /// Drive-enable signal inversion
    pub enable: AxisBits,
}

/// Stepper timing and polarity settings, as configured (microseconds)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepperSettings {
    /// Step pulse width in microseconds
    pub pulse_us: f32,
    /// Direction-change settling delay in microseconds; 0 disables the
    /// delay entirely (Immediate mode)
    pub pulse_delay_us: f32,
    /// Signal polarity masks
    pub invert: InvertMasks,
    /// Enable adaptive multi-axis step smoothing
    pub adaptive_smoothing: bool,
    /// Axes whose drives are released when settings are applied
    pub deenergize: AxisBits,
}

impl Default for StepperSettings {
    fn default() -> Self {
        Self {
            pulse_us: 10.0,
            pulse_delay_us: 0.0,
            invert: InvertMasks::default(),
            adaptive_smoothing: false,
            deenergize: AxisBits::empty(),
        }
    }
}

impl StepperSettings {
    /// Smoothing level selected by these settings
    pub fn smoothing(&self) -> SmoothingLevel {
        if self.adaptive_smoothing {
            SmoothingLevel::Adaptive
        } else {
            SmoothingLevel::Full
        }
    }
}

/// Derived pulse timer programming, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseTimingConfig {
    /// One-shot length of a step pulse
    pub pulse_length_ticks: u16,
    /// One-shot length of the direction-settling delay; 0 when the delay
    /// is disabled
    pub pulse_delay_ticks: u16,
}

impl Default for PulseTimingConfig {
    fn default() -> Self {
        Self::from_settings(&StepperSettings::default())
    }
}

impl PulseTimingConfig {
    /// Recompute tick counts from microsecond settings
    ///
    /// Widths below the fixed latency clamp to [`MIN_PULSE_TICKS`] instead
    /// of being rejected.
    pub fn from_settings(settings: &StepperSettings) -> Self {
        let pulse_length_ticks =
            compensated_ticks(settings.pulse_us, STEP_PULSE_LATENCY_US);

        let pulse_delay_ticks = if settings.pulse_delay_us > 0.0 {
            compensated_ticks(settings.pulse_delay_us, PULSE_DELAY_OFFSET_US)
        } else {
            0
        };

        Self {
            pulse_length_ticks,
            pulse_delay_ticks,
        }
    }

    /// Whether a direction-settling delay is configured (Delayed mode)
    pub const fn delayed(&self) -> bool {
        self.pulse_delay_ticks > 0
    }
}

// Truncating conversion, matching the timer's view of a partial tick.
fn compensated_ticks(us: f32, compensation_us: f32) -> u16 {
    let t = (TICKS_PER_US * (us - compensation_us)) as i16 - 1;
    if t < MIN_PULSE_TICKS as i16 {
        MIN_PULSE_TICKS
    } else {
        t as u16
    }
}
