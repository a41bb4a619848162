//! Step/direction/enable output port
//!
//! The engine hands this trait fully shaped bit patterns: polarity
//! inversion has already been applied. Implementations map bits to the
//! physical pins (bit 0 = first axis).

/// Stepper signal output port
///
/// All methods are register writes only: callable from interrupt context,
/// no polling loops, bounded completion time.
pub trait StepOutputs {
    /// Drive the step pins to the given pattern
    fn write_steps(&mut self, bits: u8);

    /// Drive the direction pins to the given pattern
    fn write_dirs(&mut self, bits: u8);

    /// Drive the enable lines to the given pattern
    ///
    /// When enable is not a raw GPIO, implementations forward the pattern
    /// to the stepper-driver bridge (I/O expander, Trinamic chip, ...).
    fn write_enable(&mut self, bits: u8);

    /// Drive the enable lines with reduced-current hold requested
    ///
    /// Only meaningful for driver bridges that support a hold-current
    /// level; the raw-GPIO default ignores the distinction.
    fn write_enable_hold(&mut self, bits: u8) {
        self.write_enable(bits);
    }
}
