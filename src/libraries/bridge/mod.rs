//! Power-stage switch bank
//!
//! The ESC power stage exposes four logical switches once two of its three
//! half-bridge legs are wired to a brushed motor:
//!
//! | Switch         | Role                                       |
//! |----------------|--------------------------------------------|
//! | `ForwardHigh`  | connects the forward terminal to battery    |
//! | `ForwardLow`   | connects the backward terminal to ground    |
//! | `BackwardHigh` | connects the backward terminal to battery   |
//! | `BackwardLow`  | connects the forward terminal to ground     |
//!
//! The bank itself guarantees nothing about ordering; callers own the
//! no-shoot-through sequencing (see the motor state machine). Each enable or
//! disable takes effect on the pin immediately.

use crate::platform::traits::{GpioInterface, Platform};
use crate::platform::{BoardConfig, Result};

/// Identity of one logical power switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub enum Switch {
    /// Forward-path high-side switch
    ForwardHigh,
    /// Forward-path low-side switch
    ForwardLow,
    /// Backward-path high-side switch
    BackwardHigh,
    /// Backward-path low-side switch
    BackwardLow,
}

/// The four logical switches of the repurposed power stage.
///
/// Owns one GPIO output per switch. A switch is "enabled" when its gate
/// driver pin is high.
pub struct SwitchBank<G: GpioInterface> {
    forward_high: G,
    forward_low: G,
    backward_high: G,
    backward_low: G,
}

impl<G: GpioInterface> SwitchBank<G> {
    /// Build a bank from four already-configured output pins.
    pub fn new(forward_high: G, forward_low: G, backward_high: G, backward_low: G) -> Self {
        Self {
            forward_high,
            forward_low,
            backward_high,
            backward_low,
        }
    }

    /// Build a bank from a platform and a board pin map, with every switch
    /// off afterwards.
    pub fn from_platform<P>(platform: &mut P, board: &BoardConfig) -> Result<Self>
    where
        P: Platform<Gpio = G>,
    {
        let mut bank = Self::new(
            platform.create_gpio(board.forward_high)?,
            platform.create_gpio(board.forward_low)?,
            platform.create_gpio(board.backward_high)?,
            platform.create_gpio(board.backward_low)?,
        );
        bank.all_off()?;
        Ok(bank)
    }

    fn pin_mut(&mut self, switch: Switch) -> &mut G {
        match switch {
            Switch::ForwardHigh => &mut self.forward_high,
            Switch::ForwardLow => &mut self.forward_low,
            Switch::BackwardHigh => &mut self.backward_high,
            Switch::BackwardLow => &mut self.backward_low,
        }
    }

    fn pin(&self, switch: Switch) -> &G {
        match switch {
            Switch::ForwardHigh => &self.forward_high,
            Switch::ForwardLow => &self.forward_low,
            Switch::BackwardHigh => &self.backward_high,
            Switch::BackwardLow => &self.backward_low,
        }
    }

    /// Turn the named switch on.
    pub fn enable(&mut self, switch: Switch) -> Result<()> {
        self.pin_mut(switch).set_high()
    }

    /// Turn the named switch off.
    pub fn disable(&mut self, switch: Switch) -> Result<()> {
        self.pin_mut(switch).set_low()
    }

    /// Whether the named switch is currently on.
    pub fn is_on(&self, switch: Switch) -> bool {
        self.pin(switch).read()
    }

    /// Turn every switch off.
    pub fn all_off(&mut self) -> Result<()> {
        self.disable(Switch::ForwardHigh)?;
        self.disable(Switch::ForwardLow)?;
        self.disable(Switch::BackwardHigh)?;
        self.disable(Switch::BackwardLow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockGpio, MockPlatform};
    use crate::platform::traits::Platform;

    fn mock_bank() -> SwitchBank<MockGpio> {
        SwitchBank::new(
            MockGpio::new_output(),
            MockGpio::new_output(),
            MockGpio::new_output(),
            MockGpio::new_output(),
        )
    }

    #[test]
    fn enable_targets_only_the_named_switch() {
        let mut bank = mock_bank();

        bank.enable(Switch::ForwardLow).unwrap();

        assert!(bank.is_on(Switch::ForwardLow));
        assert!(!bank.is_on(Switch::ForwardHigh));
        assert!(!bank.is_on(Switch::BackwardHigh));
        assert!(!bank.is_on(Switch::BackwardLow));
    }

    #[test]
    fn disable_is_independent_per_switch() {
        let mut bank = mock_bank();

        bank.enable(Switch::ForwardHigh).unwrap();
        bank.enable(Switch::BackwardLow).unwrap();
        bank.disable(Switch::ForwardHigh).unwrap();

        assert!(!bank.is_on(Switch::ForwardHigh));
        assert!(bank.is_on(Switch::BackwardLow));
    }

    #[test]
    fn all_off_clears_every_switch() {
        let mut bank = mock_bank();
        for s in [
            Switch::ForwardHigh,
            Switch::ForwardLow,
            Switch::BackwardHigh,
            Switch::BackwardLow,
        ] {
            bank.enable(s).unwrap();
        }

        bank.all_off().unwrap();

        for s in [
            Switch::ForwardHigh,
            Switch::ForwardLow,
            Switch::BackwardHigh,
            Switch::BackwardLow,
        ] {
            assert!(!bank.is_on(s));
        }
    }

    #[test]
    fn from_platform_allocates_board_pins() {
        let mut platform = MockPlatform::init().unwrap();
        let board = BoardConfig::f80a();

        let bank = SwitchBank::from_platform(&mut platform, &board).unwrap();
        assert!(!bank.is_on(Switch::ForwardHigh));

        // The board pins are now taken
        assert!(platform.create_gpio(board.forward_high).is_err());
    }
}
