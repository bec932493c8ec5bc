// LED Task - Beleuchtungs-LED über RMT Peripheral
use defmt::error;
use esp_hal_smartled::smart_led_buffer;
use farbsensor_core::Fabric;
use farbsensor_core::tasks::led_logic;

use crate::config::{RMT_CLOCK_MHZ, led_config};
use crate::hal::RmtLedWriter;

/// LED Task - Embassy Task für parallele Ausführung
///
/// Übernimmt die Hardware-Initialisierung und ruft dann die testbare
/// `led_logic()` auf. Schlägt das RMT-Setup fehl, endet der Task,
/// der Rest des Systems läuft ohne Beleuchtung weiter.
#[embassy_executor::task]
pub async fn led_task(
    gpio8: esp_hal::peripherals::GPIO8<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    fabric: &'static Fabric,
) {
    // Buffer für SmartLED Daten erstellen (1 LED)
    let mut rmt_buffer = smart_led_buffer!(1);

    let led = match RmtLedWriter::new(gpio8, rmt_peripheral, RMT_CLOCK_MHZ, &mut rmt_buffer, fabric)
    {
        Ok(led) => led,
        Err(e) => {
            error!("RMT init failed: {}", e);
            return;
        }
    };

    led_logic(led, fabric, led_config()).await
}
