//! Tremor - Motion-Wake Sensor Node Firmware
//!
//! Main firmware binary for RP2040-based nodes with an ADXL362
//! accelerometer. The node idles with the core in WFE until the sensor
//! raises INT1, blinks the LED, acknowledges the sensor and goes back
//! to sleep.
//!
//! # Pin map
//!
//! | Signal        | Pin    |
//! |---------------|--------|
//! | SPI0 SCK      | GPIO18 |
//! | SPI0 MOSI     | GPIO19 |
//! | SPI0 MISO     | GPIO16 |
//! | ADXL362 CS    | GPIO17 |
//! | ADXL362 INT1  | GPIO20 |
//! | LED           | GPIO25 |
//! | Battery sense | GPIO26..29 per `[battery] channel`, default GPIO29 (ADC3, VSYS/3) |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::Spi;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use tremor_drivers::battery::BatteryGuard;
use tremor_drivers::feedback::Feedback;
use tremor_drivers::{ActivityMonitor, Adxl362, PolledTransport};
use tremor_hal::spi::SpiConfig;
use tremor_hal_rp2040::spi::embassy_config;
use tremor_hal_rp2040::{InterruptLine, Pl022Shifter, PolledAdc, PushPull};

mod channels;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tremor firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let node = config::load();

    // Sensor bus: SPI0 mode 0 at 2 MHz, chip-select parked high
    let spi = Spi::new_blocking(
        p.SPI0,
        p.PIN_18,
        p.PIN_19,
        p.PIN_16,
        embassy_config(&SpiConfig::default()),
    );
    let transport = PolledTransport::new(Pl022Shifter::new(spi), node.timeouts.transport());
    let cs = PushPull::new(Output::new(p.PIN_17, Level::High));
    let sensor = Adxl362::new(transport, cs);

    let led = PushPull::new(Output::new(p.PIN_25, Level::Low));
    let feedback = Feedback::new(led, Delay, node.feedback);

    let guard = if node.variant.is_battery_guarded() {
        let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
        // config::load only passes channels with a pin
        let battery = match node.guard.channel {
            0 => Channel::new_pin(p.PIN_26, Pull::None),
            1 => Channel::new_pin(p.PIN_27, Pull::None),
            2 => Channel::new_pin(p.PIN_28, Pull::None),
            _ => Channel::new_pin(p.PIN_29, Pull::None),
        };
        let adc = PolledAdc::new(adc, battery, node.guard.channel);

        match BatteryGuard::new(adc, node.guard, node.timeouts.adc()) {
            Ok(guard) => Some(guard),
            Err(e) => {
                error!("Battery guard disabled: {:?}", e);
                None
            }
        }
    } else {
        None
    };

    let line = InterruptLine::new(Input::new(p.PIN_20, Pull::Down));

    let monitor = ActivityMonitor::new(sensor, feedback, guard, node);

    info!("Spawning tasks...");
    spawner.spawn(tasks::supervisor_task()).unwrap();
    spawner.spawn(tasks::activity_task(monitor, line)).unwrap();
}
