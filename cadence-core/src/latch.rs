//! Output latch
//!
//! Applies the polarity inversion masks and writes step/direction/enable
//! patterns through the [`StepOutputs`] port. Stateless aside from the
//! masks; every method is a bounded pin write, callable from interrupt
//! context.

use cadence_hal::StepOutputs;

use crate::axes::AxisBits;
use crate::config::InvertMasks;

/// Inversion-aware front end for the step output port
#[derive(Debug)]
pub struct OutputLatch<P: StepOutputs> {
    port: P,
    invert: InvertMasks,
}

impl<P: StepOutputs> OutputLatch<P> {
    /// Wrap an output port with all-zero inversion masks
    pub fn new(port: P) -> Self {
        Self {
            port,
            invert: InvertMasks::default(),
        }
    }

    /// Replace the inversion masks
    ///
    /// Caller is responsible for not racing the interrupt handlers; the
    /// engine updates masks inside a critical section.
    pub fn set_invert_masks(&mut self, invert: InvertMasks) {
        self.invert = invert;
    }

    /// Currently configured inversion masks
    pub fn invert_masks(&self) -> InvertMasks {
        self.invert
    }

    /// Set the step pin outputs
    pub fn set_steps(&mut self, bits: AxisBits) {
        self.port.write_steps((bits ^ self.invert.step).bits());
    }

    /// Set the direction pin outputs
    pub fn set_directions(&mut self, bits: AxisBits) {
        self.port.write_dirs((bits ^ self.invert.dir).bits());
    }

    /// Assert/deassert the drive-enable lines
    ///
    /// `hold` requests reduced-current hold on driver bridges that support
    /// it; the raw-GPIO path ignores it.
    pub fn set_enable(&mut self, axes: AxisBits, hold: bool) {
        let bits = (axes ^ self.invert.enable).bits();
        if hold {
            self.port.write_enable_hold(bits);
        } else {
            self.port.write_enable(bits);
        }
    }

    /// Borrow the underlying port
    pub fn port(&self) -> &P {
        &self.port
    }
}
