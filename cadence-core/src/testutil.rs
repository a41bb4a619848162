//! Recording fakes for the HAL capability traits
//!
//! Hardware synchronization waits resolve instantly; every register access
//! is appended to an operation log so tests can assert ordering.

use std::vec::Vec;

use cadence_hal::{CycleTimer, PulseTimer, StepOutputs};

/// Recorded output port
#[derive(Debug, Default)]
pub(crate) struct FakePort {
    /// Step pin patterns, in write order
    pub steps: Vec<u8>,
    /// Direction pin patterns, in write order
    pub dirs: Vec<u8>,
    /// Enable patterns with the hold flag, in write order
    pub enables: Vec<(u8, bool)>,
}

impl FakePort {
    pub fn last_steps(&self) -> Option<u8> {
        self.steps.last().copied()
    }

    pub fn last_dirs(&self) -> Option<u8> {
        self.dirs.last().copied()
    }
}

impl StepOutputs for FakePort {
    fn write_steps(&mut self, bits: u8) {
        self.steps.push(bits);
    }

    fn write_dirs(&mut self, bits: u8) {
        self.dirs.push(bits);
    }

    fn write_enable(&mut self, bits: u8) {
        self.enables.push((bits, false));
    }

    fn write_enable_hold(&mut self, bits: u8) {
        self.enables.push((bits, true));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CycleTimerOp {
    Start,
    Stop,
    SetCompare(u32),
    ResetCount,
    ClearIrq,
}

/// Recorded 32-bit pacing timer
#[derive(Debug, Default)]
pub(crate) struct FakeCycleTimer {
    pub ops: Vec<CycleTimerOp>,
    pub compare: Option<u32>,
    pub running: bool,
}

impl CycleTimer for FakeCycleTimer {
    fn start(&mut self) {
        self.ops.push(CycleTimerOp::Start);
        self.running = true;
    }

    fn stop(&mut self) {
        self.ops.push(CycleTimerOp::Stop);
        self.running = false;
    }

    fn set_compare(&mut self, ticks: u32) {
        self.ops.push(CycleTimerOp::SetCompare(ticks));
        self.compare = Some(ticks);
    }

    fn reset_count(&mut self) {
        self.ops.push(CycleTimerOp::ResetCount);
    }

    fn clear_irq(&mut self) {
        self.ops.push(CycleTimerOp::ClearIrq);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PulseTimerOp {
    Start,
    Stop,
    SetCompare(u16),
    ResetCount,
    Oneshot,
    ClearIrq,
}

/// Recorded 16-bit one-shot pulse timer
#[derive(Debug, Default)]
pub(crate) struct FakePulseTimer {
    pub ops: Vec<PulseTimerOp>,
    pub compare: Option<u16>,
    /// A one-shot has been retriggered and not stopped since
    pub armed: bool,
    pub enabled: bool,
}

impl PulseTimer for FakePulseTimer {
    fn start(&mut self) {
        self.ops.push(PulseTimerOp::Start);
        self.enabled = true;
    }

    fn stop(&mut self) {
        self.ops.push(PulseTimerOp::Stop);
        self.enabled = false;
        self.armed = false;
    }

    fn set_compare(&mut self, ticks: u16) {
        self.ops.push(PulseTimerOp::SetCompare(ticks));
        self.compare = Some(ticks);
    }

    fn reset_count(&mut self) {
        self.ops.push(PulseTimerOp::ResetCount);
    }

    fn oneshot(&mut self) {
        self.ops.push(PulseTimerOp::Oneshot);
        self.armed = true;
    }

    fn clear_irq(&mut self) {
        self.ops.push(PulseTimerOp::ClearIrq);
    }
}
