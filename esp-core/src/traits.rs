//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung. Die Firmware liefert die echten
//! Treiber, die Tests liefern Mocks.

// Die Traits werden nur in Single-Core-Executoren benutzt,
// ein `Send`-Bound auf den Futures ist nicht nötig.
#![allow(async_fn_in_trait)]

use rgb::RGB8;

use crate::types::SensorChannel;

// ============================================================================
// LED
// ============================================================================

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    /// Hardware-Zugriff fehlgeschlagen
    WriteFailed,
    /// Vorheriger Transfer läuft noch, Farbe wurde nicht übernommen
    Busy,
}

/// Trait für SmartLED Hardware-Zugriff
///
/// Abstrahiert den Zugriff auf RGB LEDs (WS2812/Neopixel).
///
/// # Implementierungen
/// - **Production:** RmtLedWriter (ESP32 RMT Peripheral)
/// - **Testing:** MockLedWriter (in-memory Mock)
pub trait SmartLedWriter: Send {
    /// Schreibt eine RGB-Farbe auf die LED
    ///
    /// # Fehlerbehandlung
    /// - `LedError::Busy` wenn noch ein Transfer läuft; das Ende wird über
    ///   `Fabric::led_done` gemeldet
    /// - `LedError::WriteFailed` wenn Hardware-Zugriff fehlschlägt
    fn write(&mut self, color: RGB8) -> Result<(), LedError>;
}

// ============================================================================
// Farbsensor
// ============================================================================

/// Fehler-Typ für den Farbsensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Device-ID passt nicht oder Konfiguration wurde nicht übernommen
    DeviceNotFound,
    /// Bus-Fehler beim Lesen eines Kanals
    Bus,
    /// Messung als fertig gemeldet, aber kein Ergebnis in der Queue
    NoData,
}

/// Trait für den Farbsensor (fünf Kanäle)
///
/// Es gibt bewusst kein kombiniertes Lesen: jeder Kanal ist ein eigener
/// Register-Zugriff.
pub trait ColorSensor {
    /// Konfiguriert den Sensor und prüft die Device-ID (nur beim Start)
    async fn init(&mut self) -> Result<(), SensorError>;

    /// Liest einen einzelnen Kanal
    async fn read_channel(&mut self, channel: SensorChannel) -> Result<u16, SensorError>;
}

// ============================================================================
// Eingabe (Potentiometer + Taster)
// ============================================================================

/// Fehler-Typ für den ADC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    ConversionFailed,
}

/// Trait für den analogen Eingang (Potentiometer)
///
/// Liefert Rohwerte im Bereich 0..=255.
pub trait AnalogInput {
    async fn read_raw(&mut self) -> Result<u16, AdcError>;
}

/// Trait für den Taster (ungefilterter Pegel)
///
/// Entprellung passiert im Input-Task, nicht im Treiber.
pub trait Button {
    fn is_pressed(&mut self) -> bool;
}

// ============================================================================
// Display
// ============================================================================

/// Rechteck in Pixel-Koordinaten, Endwerte exklusiv
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x0: u8,
    pub y0: u8,
    pub x1: u8,
    pub y1: u8,
}

impl Rect {
    pub const fn new(x0: u8, y0: u8, x1: u8, y1: u8) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

/// Vordefinierte Vollbild-Grafiken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bitmap {
    /// Startbild
    Logo,
    /// Leerer (weißer) Hintergrund
    Blank,
}

/// Trait für das Display (passive Senke für Zeichenbefehle)
///
/// Alle Aufrufe sind fire-and-forget, Farben im RGB565-Format.
pub trait Display {
    fn fill_rect(&mut self, area: Rect, color: u16);
    fn draw_bitmap(&mut self, bitmap: Bitmap, x: u8, y: u8);
    fn draw_text(&mut self, text: &str, x: u8, y: u8);
}

// ============================================================================
// Serielle Schnittstelle
// ============================================================================

/// Fehler-Typ für die serielle Schnittstelle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError {
    WriteFailed,
}

/// Trait für die zeilenorientierte serielle Schnittstelle
pub trait SerialPort {
    /// Startet einen Empfang und wartet bis eine Zeile fertig ist
    /// (Leerlauf auf der Leitung oder Zeilenende). Liefert die Anzahl Bytes.
    async fn receive_to_idle(&mut self, buffer: &mut [u8]) -> usize;

    /// Meldet ob der Empfänger übergelaufen ist
    fn overrun(&self) -> bool;

    /// Löscht den Überlauf und verwirft bereits empfangene Daten
    fn discard_overrun(&mut self);

    /// Sendet eine Diagnose-Zeile
    fn write_line(&mut self, line: &str) -> Result<(), SerialError>;
}
