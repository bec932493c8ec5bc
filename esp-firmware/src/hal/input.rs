// Taster und Potentiometer
//
// Beide Treiber liefern nur Rohwerte; Entprellung und Hysterese
// übernimmt die Input-Logik in farbsensor-core.

use esp_hal::Async;
use esp_hal::analog::adc::{Adc, AdcConfig, AdcPin, Attenuation};
use esp_hal::gpio::{Input, InputConfig, Pull};
use esp_hal::peripherals::{ADC1, GPIO2};
use farbsensor_core::{AdcError, AnalogInput, Button};

use crate::config::ADC_SHIFT;

// ============================================================================
// Taster
// ============================================================================

/// Taster gegen GND mit internem Pull-Up (gedrückt = low)
pub struct PushButton<'a> {
    pin: Input<'a>,
}

impl<'a> PushButton<'a> {
    pub fn new(pin: impl esp_hal::gpio::InputPin + 'a) -> Self {
        let pin = Input::new(pin, InputConfig::default().with_pull(Pull::Up));
        Self { pin }
    }
}

impl<'a> Button for PushButton<'a> {
    fn is_pressed(&mut self) -> bool {
        self.pin.is_low()
    }
}

// ============================================================================
// Potentiometer
// ============================================================================

/// Potentiometer am ADC1, auf 8 Bit reduziert
pub struct PotiInput<'a> {
    adc: Adc<'a, ADC1<'a>, Async>,
    pin: AdcPin<GPIO2<'a>, ADC1<'a>>,
}

impl<'a> PotiInput<'a> {
    pub fn new(adc: ADC1<'a>, pin: GPIO2<'a>) -> Self {
        let mut adc_config = AdcConfig::new();
        let pin = adc_config.enable_pin(pin, Attenuation::_11dB);
        let adc = Adc::new(adc, adc_config).into_async();
        Self { adc, pin }
    }
}

impl<'a> AnalogInput for PotiInput<'a> {
    async fn read_raw(&mut self) -> Result<u16, AdcError> {
        let value = self.adc.read_oneshot(&mut self.pin).await;
        Ok((value >> ADC_SHIFT).min(255))
    }
}
