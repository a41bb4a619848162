//! Engine context
//!
//! One owned object bundles the output latch, the two timers, the dispatch
//! registry, the pulse shaper and the rate controller. The planner drives
//! it through the public operations from task context; the board's two
//! interrupt entry points forward into [`StepEngine::on_cycle_timer_irq`]
//! and [`StepEngine::on_pulse_timer_irq`]. The only concurrency hazard is
//! interrupt preemption, handled with scoped critical sections around the
//! multi-step settings update - never with locks, and never calling back
//! into planner code while interrupts are masked.
//!
//! The pulse-timer interrupt must be configured at a higher hardware
//! priority than the cycle-timer interrupt.

use cadence_hal::{CycleTimer, PulseTimer, StepOutputs};

use crate::axes::{AxisBits, StepCommand};
use crate::config::{PulseTimingConfig, StepperSettings};
use crate::dispatch::{InterruptId, IrqHandler, VectorRegistry};
use crate::latch::OutputLatch;
use crate::pulse::{PulsePhase, PulseShaper};
use crate::rate::{PacingState, RateController};

/// Planner response to a cycle tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NextSegment {
    /// Step/direction output for this segment
    pub command: StepCommand,
    /// New pacing interval, applied before the pulse starts
    pub cycles_per_tick: Option<u32>,
}

/// Planner collaborator, polled from the cycle-timer interrupt
///
/// `next_segment` executes in interrupt context: it must not block and
/// must complete well within one pacing interval.
pub trait SegmentSource {
    /// Produce the next segment, or `None` when no motion is queued
    fn next_segment(&mut self) -> Option<NextSegment>;
}

/// The pulse generation engine
///
/// Process-wide singleton per machine; created at power-on initialization
/// and never destroyed during operation.
#[derive(Debug)]
pub struct StepEngine<P: StepOutputs, C: CycleTimer, T: PulseTimer> {
    latch: OutputLatch<P>,
    cycle_timer: C,
    pulse_timer: T,
    registry: VectorRegistry,
    shaper: PulseShaper,
    rate: RateController,
}

impl<P: StepOutputs, C: CycleTimer, T: PulseTimer> StepEngine<P, C, T> {
    /// Create an idle engine with default timing
    pub fn new(port: P, cycle_timer: C, pulse_timer: T) -> Self {
        let mut registry = VectorRegistry::new();
        registry.register(InterruptId::CycleTimer, IrqHandler::CycleTick);
        registry.register(InterruptId::PulseTimer, IrqHandler::EndPulse);

        Self {
            latch: OutputLatch::new(port),
            cycle_timer,
            pulse_timer,
            registry,
            shaper: PulseShaper::new(),
            rate: RateController::new(),
        }
    }

    /// Apply changed stepper settings
    ///
    /// Recompiles the microsecond values into timer ticks, selects
    /// Immediate or Delayed mode, restores the end-pulse handler and
    /// updates the inversion masks. The multi-step update runs inside a
    /// critical section so neither interrupt observes it half-applied.
    pub fn apply_settings(&mut self, settings: &StepperSettings) {
        let timing = PulseTimingConfig::from_settings(settings);
        let smoothing = settings.smoothing();

        critical_section::with(|_| {
            self.latch.set_invert_masks(settings.invert);
            self.rate.set_smoothing(smoothing);
            self.shaper
                .apply_timing(timing, &mut self.pulse_timer, &mut self.registry);
        });

        self.enable(settings.deenergize, false);
    }

    /// Begin pulse generation
    ///
    /// Re-asserts drive enable for all axes, starts the pulse timer and
    /// wakes the rate controller; the primed first cycle interrupt pulls
    /// the first segment.
    pub fn wake_up(&mut self) {
        self.latch.set_enable(AxisBits::all(), false);
        self.pulse_timer.start();
        self.rate.wake_up(&mut self.cycle_timer);
    }

    /// Halt pulse generation
    ///
    /// Stops the cycle timer. With `clear_signals` the in-flight one-shot
    /// is stopped as well and all step and direction outputs are forced to
    /// their inactive level.
    pub fn go_idle(&mut self, clear_signals: bool) {
        self.rate.go_idle(&mut self.cycle_timer);

        if clear_signals {
            // Stopping the one-shot can strand a pending delay; reset the
            // shaper so the stale handler and step pattern cannot replay.
            self.pulse_timer.stop();
            self.shaper
                .reset(&mut self.pulse_timer, &mut self.registry);
            self.latch.set_steps(AxisBits::empty());
            self.latch.set_directions(AxisBits::empty());
        }
    }

    /// Set which axes have their drive enabled
    pub fn enable(&mut self, axes: AxisBits, hold: bool) {
        self.latch.set_enable(axes, hold);
    }

    /// Reprogram the pacing interval, clamped below the smoothing ceiling
    pub fn cycles_per_tick(&mut self, cycles: u32) {
        self.rate.cycles_per_tick(&mut self.cycle_timer, cycles);
    }

    /// Latch one segment's output and start a step pulse
    pub fn pulse_start(&mut self, cmd: &StepCommand) {
        self.shaper.pulse_start(
            cmd,
            &mut self.latch,
            &mut self.pulse_timer,
            &mut self.registry,
        );
    }

    /// Cycle-timer interrupt entry point
    ///
    /// Acknowledges the hardware flag and asks the planner for the next
    /// segment; the planner's pacing update is applied before the pulse
    /// starts, matching the hardware's program-then-trigger order.
    pub fn on_cycle_timer_irq<S: SegmentSource>(&mut self, source: &mut S) {
        match self.registry.dispatch(InterruptId::CycleTimer) {
            IrqHandler::CycleTick => {
                self.cycle_timer.clear_irq();

                if let Some(segment) = source.next_segment() {
                    if let Some(cycles) = segment.cycles_per_tick {
                        self.cycles_per_tick(cycles);
                    }
                    self.pulse_start(&segment.command);
                }
            }
            _ => {}
        }
    }

    /// Pulse-timer interrupt entry point
    pub fn on_pulse_timer_irq(&mut self) {
        match self.registry.dispatch(InterruptId::PulseTimer) {
            IrqHandler::EndPulse => {
                self.shaper
                    .on_end_pulse(&mut self.latch, &mut self.pulse_timer);
            }
            IrqHandler::DelayElapsed => {
                self.shaper.on_delay_elapsed(
                    &mut self.latch,
                    &mut self.pulse_timer,
                    &mut self.registry,
                );
            }
            _ => {}
        }
    }

    /// Current pacing state
    pub fn pacing_state(&self) -> PacingState {
        self.rate.state()
    }

    /// Current pulse phase
    pub fn pulse_phase(&self) -> PulsePhase {
        self.shaper.phase()
    }

    /// Active derived timing
    pub fn timing(&self) -> PulseTimingConfig {
        self.shaper.timing()
    }

    /// Borrow the underlying output port
    pub fn port(&self) -> &P {
        self.latch.port()
    }
}
