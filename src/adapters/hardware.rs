//! Hardware adapter — bridges `embedded-hal` pins to the [`HardwarePort`].
//!
//! Owns the two motor enable outputs, the two sensor inputs and a
//! blocking delay.  Any HAL whose pin drivers implement `embedded-hal`
//! 1.0 (ESP-IDF `PinDriver`, RP2040, STM32, host mocks) plugs in here.
//!
//! Pin errors never reach the core.  They are logged; a failed read
//! reports [`Level::Low`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::ports::HardwarePort;
use crate::lines::{DigitalLine, Direction, Level};

/// Concrete adapter that combines all printer I/O behind [`HardwarePort`].
pub struct EmbeddedHalBoard<Head, Feed, Paper, Ink, D> {
    head: Head,
    feed: Feed,
    paper: Paper,
    ink: Ink,
    delay: D,
}

impl<Head, Feed, Paper, Ink, D> EmbeddedHalBoard<Head, Feed, Paper, Ink, D>
where
    Head: OutputPin,
    Feed: OutputPin,
    Paper: InputPin,
    Ink: InputPin,
    D: DelayNs,
{
    pub fn new(head: Head, feed: Feed, paper: Paper, ink: Ink, delay: D) -> Self {
        Self {
            head,
            feed,
            paper,
            ink,
            delay,
        }
    }

    /// Hand the pins and delay back.
    pub fn release(self) -> (Head, Feed, Paper, Ink, D) {
        (self.head, self.feed, self.paper, self.ink, self.delay)
    }
}

impl<Head, Feed, Paper, Ink, D> HardwarePort for EmbeddedHalBoard<Head, Feed, Paper, Ink, D>
where
    Head: OutputPin,
    Feed: OutputPin,
    Paper: InputPin,
    Ink: InputPin,
    D: DelayNs,
{
    fn configure(&mut self, line: DigitalLine, direction: Direction) {
        // Pin drivers are typed by direction at construction; this only
        // catches wiring mistakes in the caller.
        if direction != line.direction() {
            warn!(
                "{} requested as {:?}, wired as {:?}",
                line,
                direction,
                line.direction()
            );
        }
    }

    fn write(&mut self, line: DigitalLine, level: Level) {
        let result = match line {
            DigitalLine::PrintHeadMotor => self.head.set_state(level.into()).map_err(|_| ()),
            DigitalLine::PaperFeedMotor => self.feed.set_state(level.into()).map_err(|_| ()),
            DigitalLine::PaperSensor | DigitalLine::InkSensor => {
                warn!("Ignoring write to input line {}", line);
                return;
            }
        };
        if result.is_err() {
            warn!("GPIO write failed on {}", line);
        }
    }

    fn read(&mut self, line: DigitalLine) -> Level {
        let result = match line {
            DigitalLine::PaperSensor => self.paper.is_high().map_err(|_| ()),
            DigitalLine::InkSensor => self.ink.is_high().map_err(|_| ()),
            DigitalLine::PrintHeadMotor | DigitalLine::PaperFeedMotor => {
                warn!("Ignoring read of output line {}", line);
                return Level::Low;
            }
        };
        match result {
            Ok(high) => Level::from(high),
            Err(()) => {
                warn!("GPIO read failed on {}, reporting LOW", line);
                Level::Low
            }
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
