//! LED feedback
//!
//! The blink is a fixed number of toggles with a busy-wait after each one.
//! It blocks the caller for `toggles * half_period_ms`.

use embedded_hal::delay::DelayNs;
use tremor_core::config::FeedbackConfig;
use tremor_hal::OutputPin;

use crate::sensor::Presence;

/// Feedback indicator
pub struct Feedback<LED, D> {
    led: LED,
    delay: D,
    config: FeedbackConfig,
}

impl<LED, D> Feedback<LED, D>
where
    LED: OutputPin,
    D: DelayNs,
{
    pub fn new(led: LED, delay: D, config: FeedbackConfig) -> Self {
        Self { led, delay, config }
    }

    /// Run the feedback blink
    ///
    /// An even toggle count leaves the LED as it was found.
    pub fn blink(&mut self) {
        for _ in 0..self.config.toggles {
            self.led.toggle();
            self.delay.delay_ms(u32::from(self.config.half_period_ms));
        }
    }

    /// Show the boot identify result: dark when the sensor answered
    pub fn show_presence(&mut self, presence: Presence) {
        self.led.set_state(!presence.is_found());
    }

    /// Light the LED steadily
    pub fn hold_on(&mut self) {
        self.led.set_high();
    }

    pub fn is_lit(&self) -> bool {
        self.led.is_set_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDelay, MockLed};

    #[test]
    fn test_blink_toggles_and_waits() {
        let led = MockLed::default();
        let delay = MockDelay::default();
        let mut feedback = Feedback::new(led.clone(), delay.clone(), FeedbackConfig::default());

        feedback.blink();

        assert_eq!(led.toggles.get(), 20);
        assert_eq!(delay.total_ns.get(), 20 * 30 * 1_000_000);
        assert!(!feedback.is_lit());
    }

    #[test]
    fn test_zero_toggles() {
        let led = MockLed::default();
        let config = FeedbackConfig {
            toggles: 0,
            half_period_ms: 0,
        };
        let mut feedback = Feedback::new(led.clone(), MockDelay::default(), config);

        feedback.blink();
        assert_eq!(led.toggles.get(), 0);
    }

    #[test]
    fn test_presence_indicator() {
        let mut feedback = Feedback::new(
            MockLed::default(),
            MockDelay::default(),
            FeedbackConfig::default(),
        );

        feedback.show_presence(Presence::Absent { id: 0x00 });
        assert!(feedback.is_lit());

        feedback.show_presence(Presence::Found);
        assert!(!feedback.is_lit());
    }
}
