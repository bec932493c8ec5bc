//! Core Types für Farbsensor und Menü
//!
//! Datenstrukturen ohne Hardware-Dependencies

use rgb::RGB8;

use crate::traits::SensorError;

/// Farbe für die RGB LED (r, g, b je 8 Bit)
pub type Color = RGB8;

/// Schwarz - LED aus
pub const BLACK: Color = RGB8 { r: 0, g: 0, b: 0 };

/// Eine Messung des Farbsensors (fünf Kanäle, je 16 Bit)
///
/// Wird einmal erzeugt und danach nur noch gelesen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub clear: u16,
    pub infrared: u16,
}

/// Ergebnis einer Messanfrage: Messwerte oder Sensor-Fehler
pub type Reading = Result<Sample, SensorError>;

/// Potentiometer-Wert: Rohwert plus Position auf der Anzeige
///
/// Für Entscheidungen zählt nur `scaled`, `raw` wird für den
/// Farb-Schieberegler gebraucht (feinere Auflösung).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSample {
    pub raw: u16,
    pub scaled: u16,
}

impl Default for ScrollSample {
    fn default() -> Self {
        Self {
            raw: 0,
            scaled: crate::logic::SCROLL_MIN,
        }
    }
}

/// Die vier Einträge des Hauptmenüs (von oben nach unten)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    Measurement,
    LuxCct,
    GetColor,
    SetColor,
}

impl MenuItem {
    /// Alle Einträge in Anzeige-Reihenfolge
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Measurement,
        MenuItem::LuxCct,
        MenuItem::GetColor,
        MenuItem::SetColor,
    ];

    /// Beschriftung im Hauptmenü
    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Measurement => "Measurement",
            MenuItem::LuxCct => "LUX + CCT",
            MenuItem::GetColor => "Get Color",
            MenuItem::SetColor => "Set Color",
        }
    }

    /// Index 0..=3 (Position im Menü)
    pub fn index(self) -> usize {
        match self {
            MenuItem::Measurement => 0,
            MenuItem::LuxCct => 1,
            MenuItem::GetColor => 2,
            MenuItem::SetColor => 3,
        }
    }
}

/// Auswahl in der Button-Leiste eines Untermenüs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Choice {
    /// Linker Button ("AGAIN")
    Repeat,
    /// Rechter Button ("BACK")
    Back,
}

/// Einer der drei einstellbaren LED-Kanäle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    /// Liest den Kanal aus einer Farbe
    pub fn get(self, color: Color) -> u8 {
        match self {
            ColorChannel::Red => color.r,
            ColorChannel::Green => color.g,
            ColorChannel::Blue => color.b,
        }
    }

    /// Setzt den Kanal in einer Farbe
    pub fn set(self, color: &mut Color, value: u8) {
        match self {
            ColorChannel::Red => color.r = value,
            ColorChannel::Green => color.g = value,
            ColorChannel::Blue => color.b = value,
        }
    }
}

/// Kanal-Register des Farbsensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorChannel {
    Red,
    Green,
    Blue,
    Infrared,
    Clear,
}

impl SensorChannel {
    /// Lese-Reihenfolge der Akquise (entspricht der Wire-Reihenfolge von `MEA:`)
    pub const READ_ORDER: [SensorChannel; 5] = [
        SensorChannel::Red,
        SensorChannel::Green,
        SensorChannel::Blue,
        SensorChannel::Infrared,
        SensorChannel::Clear,
    ];
}
