// SmartLED Writer für die Beleuchtungs-LED
//
// Nutzt den RMT Peripheral um eine WS2812 LED anzusteuern.
// Der Transfer ist blockierend: nach jedem write() ist er abgeschlossen,
// daher wird `Fabric::led_done` direkt danach signalisiert.

use esp_hal::Blocking;
use esp_hal::rmt::{PulseCode, Rmt};
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use farbsensor_core::{Fabric, LedError, SmartLedWriter};
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

// Buffer-Größe für 1 LED (3 Farben * 8 Bits + 1 Reset)
pub const LED_BUFFER_SIZE: usize = 25;

/// Fehler beim Aufsetzen des RMT Peripherals
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct RmtInitError;

/// Real Hardware LED Writer
///
/// Hinweis: Der Buffer muss so lange leben wie der Writer, daher wird er
/// im Task erstellt und als Parameter übergeben.
pub struct RmtLedWriter<'a> {
    led: SmartLedsAdapter<'a, LED_BUFFER_SIZE>,
    fabric: &'static Fabric,
}

impl<'a> RmtLedWriter<'a> {
    /// Erstellt einen neuen RmtLedWriter
    ///
    /// # Parameter
    /// - `pin`: GPIO8 Peripheral für LED-Datenleitung
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für LED-Daten (erstellt mit smart_led_buffer!(1) Macro)
    /// - `fabric`: für das Transfer-Ende Signal
    pub fn new(
        pin: esp_hal::peripherals::GPIO8<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [PulseCode; LED_BUFFER_SIZE],
        fabric: &'static Fabric,
    ) -> Result<Self, RmtInitError> {
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
            .map_err(|_| RmtInitError)?;

        let led = SmartLedsAdapter::new(rmt.channel0, pin, buffer);

        Ok(Self { led, fabric })
    }
}

impl<'a> SmartLedWriter for RmtLedWriter<'a> {
    fn write(&mut self, color: RGB8) -> Result<(), LedError> {
        let result = self
            .led
            .write([color].into_iter())
            .map_err(|_| LedError::WriteFailed);
        self.fabric.led_done.signal(());
        result
    }
}
