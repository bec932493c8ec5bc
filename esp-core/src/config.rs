//! Timing- und Schwellwert-Konfiguration der Tasks
//!
//! Die Defaults entsprechen dem Verhalten auf der Hardware.
//! Tests bauen sich Varianten mit kürzeren Zeiten.

use embassy_time::Duration;

use crate::types::Color;

/// Konfiguration des Input-Tasks (Taster + Potentiometer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputConfig {
    /// Abfrage-Intervall für Taster und ADC
    pub poll_interval: Duration,
    /// Wartezeit nach der ersten Flanke bevor erneut gelesen wird
    pub debounce_settle: Duration,
    /// Pause nach einem gemeldeten Klick
    pub click_cooldown: Duration,
    /// Mindest-Änderung des Rohwerts bevor ein SCROLL gemeldet wird
    pub hysteresis: u16,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(50),
            debounce_settle: Duration::from_millis(1),
            click_cooldown: Duration::from_millis(10),
            hysteresis: 1,
        }
    }
}

/// Konfiguration des Menü-Tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuConfig {
    /// Blink-Takt des Punktes auf dem Startbildschirm
    pub idle_blink: Duration,
    /// Wie lange das Logo vor der "PRESS BUTTON"-Meldung steht
    pub splash: Duration,
    /// Wartezeit zwischen Einschalten der Beleuchtung und Messung (Get Color)
    pub illumination_settle: Duration,
    /// Farbe der LED während "Get Color" misst
    pub illumination: Color,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            idle_blink: Duration::from_millis(500),
            splash: Duration::from_millis(1000),
            // Integrationszeit des Sensors ist 100 ms
            illumination_settle: Duration::from_millis(200),
            illumination: Color {
                r: 230,
                g: 160,
                b: 90,
            },
        }
    }
}

/// Konfiguration des LED-Tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedConfig {
    /// Start-Animation abspielen bevor Farben angenommen werden
    pub startup_animation: bool,
    /// Helligkeit der Start-Animation
    pub animation_brightness: u8,
    /// Dauer eines Animations-Schritts
    pub animation_step: Duration,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            startup_animation: true,
            animation_brightness: 30,
            animation_step: Duration::from_millis(15),
        }
    }
}
