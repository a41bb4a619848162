//! Pulse width/delay state machine
//!
//! Owns the pulse-shaping one-shot timer. In Immediate mode a step edge
//! follows the direction write in the same call. In Delayed mode a
//! direction change first settles for the configured delay; the step edge
//! is emitted from the delay-elapsed interrupt. The delay is only paid
//! when a direction actually changes and a pulse is due, so axes moving in
//! a constant direction lose no step rate.
//!
//! Phases (Delayed mode):
//! `Idle -> WaitingDelay -> Pulsing -> Idle`; without a direction change
//! `Idle -> Pulsing -> Idle`. Immediate mode only uses the second path.

use cadence_hal::{PulseTimer, StepOutputs};

use crate::axes::{AxisBits, StepCommand};
use crate::config::PulseTimingConfig;
use crate::dispatch::{InterruptId, IrqHandler, VectorRegistry};
use crate::latch::OutputLatch;

/// Operating mode, selected once when timing configuration changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseMode {
    /// No direction-settling delay configured
    Immediate,
    /// Direction changes settle for `pulse_delay_ticks` before stepping
    Delayed,
}

/// Where the shaper is in the current pulse cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulsePhase {
    /// No pulse in flight
    Idle,
    /// Direction written, step edge pending the settling delay
    WaitingDelay,
    /// Step outputs asserted, waiting for the pulse width to elapse
    Pulsing,
}

/// Pulse-shaping state machine
#[derive(Debug)]
pub struct PulseShaper {
    timing: PulseTimingConfig,
    mode: PulseMode,
    phase: PulsePhase,
    /// Step pattern stashed across the settling delay
    pending_steps: AxisBits,
}

impl Default for PulseShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseShaper {
    /// Create a shaper with default timing, Immediate mode
    pub fn new() -> Self {
        Self {
            timing: PulseTimingConfig::default(),
            mode: PulseMode::Immediate,
            phase: PulsePhase::Idle,
            pending_steps: AxisBits::empty(),
        }
    }

    /// Active timing configuration
    pub fn timing(&self) -> PulseTimingConfig {
        self.timing
    }

    /// Active operating mode
    pub fn mode(&self) -> PulseMode {
        self.mode
    }

    /// Current phase
    pub fn phase(&self) -> PulsePhase {
        self.phase
    }

    /// Apply a new timing configuration
    ///
    /// Selects the operating mode, restores the end-pulse handler, drops
    /// any stashed step pattern and pre-programs the pulse width. Caller
    /// must guarantee the pulse timer cannot fire during the update.
    pub fn apply_timing<T: PulseTimer>(
        &mut self,
        timing: PulseTimingConfig,
        timer: &mut T,
        registry: &mut VectorRegistry,
    ) {
        self.timing = timing;
        self.mode = if timing.delayed() {
            PulseMode::Delayed
        } else {
            PulseMode::Immediate
        };
        self.phase = PulsePhase::Idle;
        self.pending_steps = AxisBits::empty();

        registry.register(InterruptId::PulseTimer, IrqHandler::EndPulse);
        timer.set_compare(timing.pulse_length_ticks);
    }

    /// Abort any in-flight pulse bookkeeping
    ///
    /// Cancellation may stop the one-shot mid-delay, which would strand
    /// the delay-elapsed handler, the stashed step pattern and the delay
    /// compare value; the next pulse would then replay the cancelled
    /// segment's steps. Restore the end-pulse handler and the pulse-width
    /// compare so the next pulse starts from a clean slate.
    pub fn reset<T: PulseTimer>(&mut self, timer: &mut T, registry: &mut VectorRegistry) {
        self.pending_steps = AxisBits::empty();
        self.phase = PulsePhase::Idle;

        registry.register(InterruptId::PulseTimer, IrqHandler::EndPulse);
        timer.set_compare(self.timing.pulse_length_ticks);
    }

    /// Latch one segment's step/direction output and start a step pulse
    pub fn pulse_start<P: StepOutputs, T: PulseTimer>(
        &mut self,
        cmd: &StepCommand,
        latch: &mut OutputLatch<P>,
        timer: &mut T,
        registry: &mut VectorRegistry,
    ) {
        match self.mode {
            PulseMode::Immediate => self.start_immediate(cmd, latch, timer),
            PulseMode::Delayed => self.start_delayed(cmd, latch, timer, registry),
        }
    }

    fn start_immediate<P: StepOutputs, T: PulseTimer>(
        &mut self,
        cmd: &StepCommand,
        latch: &mut OutputLatch<P>,
        timer: &mut T,
    ) {
        if cmd.dir_changed {
            latch.set_directions(cmd.dir_out);
        }

        if !cmd.step_out.is_empty() {
            latch.set_steps(cmd.step_out);
            timer.oneshot();
            self.phase = PulsePhase::Pulsing;
        }
    }

    fn start_delayed<P: StepOutputs, T: PulseTimer>(
        &mut self,
        cmd: &StepCommand,
        latch: &mut OutputLatch<P>,
        timer: &mut T,
        registry: &mut VectorRegistry,
    ) {
        if cmd.dir_changed {
            latch.set_directions(cmd.dir_out);

            if !cmd.step_out.is_empty() {
                registry.register(InterruptId::PulseTimer, IrqHandler::DelayElapsed);
                self.pending_steps = cmd.step_out;

                timer.set_compare(self.timing.pulse_delay_ticks);
                timer.oneshot();
                self.phase = PulsePhase::WaitingDelay;
            }

            return;
        }

        if !cmd.step_out.is_empty() {
            latch.set_steps(cmd.step_out);
            timer.oneshot();
            self.phase = PulsePhase::Pulsing;
        }
    }

    /// Direction-settling delay has elapsed: emit the stashed step edge
    /// and rearm the one-shot for the pulse width
    pub fn on_delay_elapsed<P: StepOutputs, T: PulseTimer>(
        &mut self,
        latch: &mut OutputLatch<P>,
        timer: &mut T,
        registry: &mut VectorRegistry,
    ) {
        timer.clear_irq();
        timer.set_compare(self.timing.pulse_length_ticks);

        latch.set_steps(self.pending_steps);
        timer.reset_count();

        registry.register(InterruptId::PulseTimer, IrqHandler::EndPulse);
        timer.oneshot();
        self.phase = PulsePhase::Pulsing;
    }

    /// Pulse width has elapsed: end the step pulse
    pub fn on_end_pulse<P: StepOutputs, T: PulseTimer>(
        &mut self,
        latch: &mut OutputLatch<P>,
        timer: &mut T,
    ) {
        timer.clear_irq();
        latch.set_steps(AxisBits::empty());
        self.phase = PulsePhase::Idle;
    }
}
