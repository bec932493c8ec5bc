//! Input-Task Logik: Taster entprellen, Potentiometer abtasten
//!
//! Klick → `IoFlags::CLICK`, neuer Poti-Wert → Scroll-Queue + `IoFlags::SCROLL`.

use embassy_time::{Duration, Timer};

use crate::config::InputConfig;
use crate::fabric::{Fabric, IoFlags};
use crate::logic::{SCROLL_MAX, SCROLL_MIN, scale_to_range};
use crate::traits::{AnalogInput, Button};
use crate::types::ScrollSample;

/// Software-Entprellung
///
/// Ein Klick wird genau einmal gemeldet, beim Loslassen.
#[derive(Debug, Default)]
pub struct Debouncer {
    held: bool,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self { held: false }
    }

    /// Tastet den Taster einmal ab, `true` wenn ein Klick abgeschlossen ist
    pub async fn poll<B: Button>(&mut self, button: &mut B, settle: Duration) -> bool {
        let pressed = button.is_pressed();
        if pressed && !self.held {
            Timer::after(settle).await;
            if button.is_pressed() {
                self.held = true;
            }
        } else if !pressed && self.held {
            self.held = false;
            return true;
        }
        false
    }
}

/// Zustand des Input-Tasks zwischen zwei Abtastungen
pub struct InputSampler<B, A> {
    button: B,
    adc: A,
    config: InputConfig,
    debouncer: Debouncer,
    last_raw: u16,
}

impl<B: Button, A: AnalogInput> InputSampler<B, A> {
    pub fn new(button: B, adc: A, config: InputConfig) -> Self {
        Self {
            button,
            adc,
            config,
            debouncer: Debouncer::new(),
            last_raw: 0,
        }
    }

    /// Ein Abtast-Durchlauf (ohne das Poll-Intervall)
    pub async fn poll_once(&mut self, fabric: &Fabric) {
        if self
            .debouncer
            .poll(&mut self.button, self.config.debounce_settle)
            .await
        {
            debug!("click");
            fabric.io_events.set(IoFlags::CLICK);
            Timer::after(self.config.click_cooldown).await;
        }

        let raw = match self.adc.read_raw().await {
            Ok(raw) => raw,
            Err(_) => {
                trace!("adc read failed");
                return;
            }
        };

        if raw.abs_diff(self.last_raw) > self.config.hysteresis {
            let sample = ScrollSample {
                raw,
                scaled: scale_to_range(SCROLL_MIN, SCROLL_MAX, raw),
            };
            // Volle Queue: der Wert kommt mit dem nächsten Durchlauf
            if !fabric.scroll.try_put(sample) {
                trace!("scroll queue full");
            }
            fabric.io_events.set(IoFlags::SCROLL);
            self.last_raw = raw;
        }
    }

    /// Zuletzt gemeldeter Rohwert
    pub fn last_raw(&self) -> u16 {
        self.last_raw
    }
}

/// Input Logic - läuft endlos im festen Poll-Intervall
pub async fn input_logic<B: Button, A: AnalogInput>(
    button: B,
    adc: A,
    fabric: &Fabric,
    config: InputConfig,
) -> ! {
    let mut sampler = InputSampler::new(button, adc, config);
    info!("input task started");
    loop {
        sampler.poll_once(fabric).await;
        Timer::after(config.poll_interval).await;
    }
}
