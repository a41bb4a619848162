//! Rate controller
//!
//! Owns the cycle timer that paces how often the planner is asked for the
//! next step segment. The compare value is reprogrammed every tick by the
//! planner callback; requests above the smoothing-level ceiling are
//! silently clamped, never overflowed into the hardware counter.

use cadence_hal::CycleTimer;

use crate::config::SmoothingLevel;

/// Compare value programmed at wake-up so the first cycle interrupt fires
/// immediately and primes the first segment
const PRIME_CYCLES: u32 = 1;

/// Pacing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacingState {
    /// Cycle timer stopped, no segment requests
    Stopped,
    /// Cycle timer running
    Running,
}

/// Segment pacing controller
#[derive(Debug)]
pub struct RateController {
    state: PacingState,
    smoothing: SmoothingLevel,
}

impl Default for RateController {
    fn default() -> Self {
        Self::new()
    }
}

impl RateController {
    /// Create a stopped controller with the full pacing range
    pub fn new() -> Self {
        Self {
            state: PacingState::Stopped,
            smoothing: SmoothingLevel::Full,
        }
    }

    /// Current pacing state
    pub fn state(&self) -> PacingState {
        self.state
    }

    /// Active smoothing level
    pub fn smoothing(&self) -> SmoothingLevel {
        self.smoothing
    }

    /// Select the smoothing level (cycle ceiling)
    pub fn set_smoothing(&mut self, level: SmoothingLevel) {
        self.smoothing = level;
    }

    /// Begin pacing: reset the counter, force an immediate first interrupt
    /// and start the timer
    pub fn wake_up<T: CycleTimer>(&mut self, timer: &mut T) {
        timer.reset_count();
        timer.set_compare(PRIME_CYCLES);
        timer.start();
        self.state = PacingState::Running;
    }

    /// Reprogram the pacing interval, clamped below the smoothing ceiling
    ///
    /// Callable from both task and interrupt context.
    pub fn cycles_per_tick<T: CycleTimer>(&self, timer: &mut T, cycles: u32) {
        timer.set_compare(self.smoothing.clamp_cycles(cycles));
    }

    /// Stop pacing
    pub fn go_idle<T: CycleTimer>(&mut self, timer: &mut T) {
        timer.stop();
        self.state = PacingState::Stopped;
    }
}
