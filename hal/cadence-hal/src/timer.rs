//! Hardware counter/timer abstractions
//!
//! The engine coordinates two independent counters: a 32-bit cycle timer
//! whose expiry paces requests for the next motion segment, and a 16-bit
//! one-shot pulse timer whose expiry ends a step pulse or a
//! direction-settling delay.
//!
//! Implementations own any register synchronization the hardware requires:
//! a method returns only once the write has taken effect. Those busy-waits
//! are bounded by hardware latency on the order of timer-clock cycles and
//! are assumed to terminate.

/// 32-bit pacing counter
///
/// Fires an interrupt when the count reaches the compare value. All methods
/// must be callable from both task and interrupt context and complete in
/// bounded time.
pub trait CycleTimer {
    /// Start (or resume) the counter
    fn start(&mut self);

    /// Stop the counter; no further interrupts fire until restarted
    fn stop(&mut self);

    /// Program the compare register
    ///
    /// Returns once the value is committed, including any hardware
    /// synchronization wait.
    fn set_compare(&mut self, ticks: u32);

    /// Reset the count to zero
    fn reset_count(&mut self);

    /// Acknowledge the pending compare-match interrupt flag
    fn clear_irq(&mut self);
}

/// 16-bit one-shot pulse counter
///
/// Configured for one-shot operation: the count runs to the compare value
/// once per [`oneshot`](PulseTimer::oneshot) retrigger, fires its interrupt
/// and stops. Its interrupt is expected to sit at a higher hardware priority
/// than the cycle timer's.
pub trait PulseTimer {
    /// Enable the counter clock (does not start a pulse)
    fn start(&mut self);

    /// Disable the counter, cancelling any in-flight one-shot
    fn stop(&mut self);

    /// Program the compare register
    ///
    /// Returns once the value is committed, including any hardware
    /// synchronization wait.
    fn set_compare(&mut self, ticks: u16);

    /// Reset the count to zero
    fn reset_count(&mut self);

    /// Retrigger the one-shot: count from the current value to compare,
    /// fire the interrupt, stop
    fn oneshot(&mut self);

    /// Acknowledge the pending compare-match interrupt flag
    fn clear_irq(&mut self);
}
