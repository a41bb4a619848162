//! Cadence Hardware Abstraction Layer
//!
//! This crate defines the hardware capability traits the pulse generation
//! engine runs on. Chip-specific HALs (SAMD21, RP2040, etc.) implement
//! these against their timer/counter and GPIO peripherals; host-side tests
//! implement them with recording fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Engine (cadence-core)                  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cadence-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip HAL     │       │  test fakes   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`timer::CycleTimer`] - 32-bit counter pacing segment requests
//! - [`timer::PulseTimer`] - 16-bit one-shot counter shaping step pulses
//! - [`outputs::StepOutputs`] - step/direction/enable pin port

#![no_std]
#![deny(unsafe_code)]

pub mod outputs;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use outputs::StepOutputs;
pub use timer::{CycleTimer, PulseTimer};
