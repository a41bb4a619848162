//! Per-axis signal bitmasks and the step command exchanged with the planner

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Per-axis signal mask, one bit per axis
    ///
    /// Bit positions match the physical pin ordering of the output port
    /// (bit 0 = X). The mask is wider than the three machine axes to leave
    /// room for additional axes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct AxisBits: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const Z = 1 << 2;
    }
}

impl Default for AxisBits {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AxisBits {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u8:b}", self.bits());
    }
}

/// One segment's pre-shaped step/direction output
///
/// Produced once per segment by the planner and consumed exactly once by
/// the pulse state machine; it is not retained afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepCommand {
    /// Axes that step this segment
    pub step_out: AxisBits,
    /// Direction pattern for all axes
    pub dir_out: AxisBits,
    /// Direction pattern differs from the previous segment
    pub dir_changed: bool,
}

impl StepCommand {
    /// Create a step command
    pub const fn new(step_out: AxisBits, dir_out: AxisBits, dir_changed: bool) -> Self {
        Self {
            step_out,
            dir_out,
            dir_changed,
        }
    }

    /// Create a command that steps nothing and changes nothing
    pub const fn idle() -> Self {
        Self {
            step_out: AxisBits::empty(),
            dir_out: AxisBits::empty(),
            dir_changed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_command_is_empty() {
        let cmd = StepCommand::idle();
        assert!(cmd.step_out.is_empty());
        assert!(cmd.dir_out.is_empty());
        assert!(!cmd.dir_changed);
    }

    #[test]
    fn test_axis_bits_map_to_pin_order() {
        assert_eq!(AxisBits::X.bits(), 0b001);
        assert_eq!(AxisBits::Y.bits(), 0b010);
        assert_eq!(AxisBits::Z.bits(), 0b100);
        assert_eq!(AxisBits::all().bits(), 0b111);
    }
}
