//! Board-agnostic pulse generation engine for stepper motion
//!
//! This crate contains the real-time core that turns per-axis
//! step/direction commands into precisely timed electrical edges:
//!
//! - Per-axis signal bitmasks and the planner-facing step command
//! - Timing configuration (pulse width, direction-settling delay, smoothing)
//! - Output latch (polarity inversion and pin writes)
//! - Interrupt dispatch registry (handler tags, no function-pointer table)
//! - Pulse width/delay state machine
//! - Rate controller pacing segment requests
//! - The engine context tying it all together
//!
//! Hardware access goes through the `cadence-hal` capability traits, so the
//! whole engine is unit-testable against software fakes.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod axes;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod latch;
pub mod pulse;
pub mod rate;

#[cfg(test)]
pub(crate) mod testutil;

pub use axes::{AxisBits, StepCommand};
pub use config::{InvertMasks, PulseTimingConfig, SmoothingLevel, StepperSettings};
pub use engine::{NextSegment, SegmentSource, StepEngine};
