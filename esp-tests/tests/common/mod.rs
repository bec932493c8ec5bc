//! Gemeinsame Mocks für die Host-Tests
//!
//! Jede Test-Datei bindet dieses Modul mit `mod common;` ein und nutzt
//! nur einen Teil davon.
#![allow(dead_code)]

use std::collections::VecDeque;

use embassy_time::Duration;
use farbsensor_core::types::SensorChannel;
use farbsensor_core::{
    AdcError, AnalogInput, Bitmap, Button, ColorSensor, Display, Fabric, InputConfig, LedConfig,
    LedError, MenuConfig, Rect, Sample, SensorError, SerialError, SerialPort, SmartLedWriter,
};
use rgb::RGB8;

// ============================================================================
// Kurze Konfigurationen, damit die Tests schnell laufen
// ============================================================================

pub fn fast_input_config() -> InputConfig {
    InputConfig {
        poll_interval: Duration::from_millis(1),
        debounce_settle: Duration::from_micros(100),
        click_cooldown: Duration::from_micros(100),
        hysteresis: 1,
    }
}

pub fn fast_menu_config() -> MenuConfig {
    MenuConfig {
        idle_blink: Duration::from_millis(5),
        splash: Duration::from_millis(1),
        illumination_settle: Duration::from_millis(1),
        ..MenuConfig::default()
    }
}

pub fn quiet_led_config() -> LedConfig {
    LedConfig {
        startup_animation: false,
        ..LedConfig::default()
    }
}

pub fn sample(red: u16, green: u16, blue: u16, clear: u16, infrared: u16) -> Sample {
    Sample {
        red,
        green,
        blue,
        clear,
        infrared,
    }
}

// ============================================================================
// Mock LED Writer
// ============================================================================

pub struct MockLedWriter<'a> {
    /// Alle geschriebenen Farben in Reihenfolge
    pub history: Vec<RGB8>,
    pub fail_next_write: bool,
    /// Nächster write() meldet Busy und signalisiert danach das Transfer-Ende
    pub busy_next_write: bool,
    fabric: Option<&'a Fabric>,
}

impl<'a> MockLedWriter<'a> {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            fail_next_write: false,
            busy_next_write: false,
            fabric: None,
        }
    }

    /// Mock der wie der echte Treiber `led_done` signalisiert
    pub fn with_fabric(fabric: &'a Fabric) -> Self {
        Self {
            fabric: Some(fabric),
            ..Self::new()
        }
    }

    pub fn last_color(&self) -> Option<RGB8> {
        self.history.last().copied()
    }

    pub fn write_count(&self) -> usize {
        self.history.len()
    }
}

impl SmartLedWriter for MockLedWriter<'_> {
    fn write(&mut self, color: RGB8) -> Result<(), LedError> {
        if self.busy_next_write {
            self.busy_next_write = false;
            if let Some(fabric) = self.fabric {
                fabric.led_done.signal(());
            }
            return Err(LedError::Busy);
        }
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(LedError::WriteFailed);
        }

        self.history.push(color);
        Ok(())
    }
}

// ============================================================================
// Mock Display
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Fill(Rect, u16),
    Bitmap(Bitmap, u8, u8),
    Text(String, u8, u8),
}

/// Zeichnet nichts, protokolliert nur die Aufrufe
#[derive(Debug, Default)]
pub struct MockDisplay {
    pub calls: Vec<DrawCall>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text(text, _, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, text: &str) -> bool {
        self.texts().contains(&text)
    }

    pub fn fills(&self) -> Vec<(Rect, u16)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Fill(area, color) => Some((*area, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Display for MockDisplay {
    fn fill_rect(&mut self, area: Rect, color: u16) {
        self.calls.push(DrawCall::Fill(area, color));
    }

    fn draw_bitmap(&mut self, bitmap: Bitmap, x: u8, y: u8) {
        self.calls.push(DrawCall::Bitmap(bitmap, x, y));
    }

    fn draw_text(&mut self, text: &str, x: u8, y: u8) {
        self.calls.push(DrawCall::Text(text.to_string(), x, y));
    }
}

// ============================================================================
// Mock Farbsensor
// ============================================================================

pub struct MockSensor {
    pub sample: Sample,
    /// Kanal, dessen Lesen fehlschlägt
    pub fail_on: Option<SensorChannel>,
    /// Gelesene Kanäle in Reihenfolge
    pub reads: Vec<SensorChannel>,
    pub init_result: Result<(), SensorError>,
}

impl MockSensor {
    pub fn new(sample: Sample) -> Self {
        Self {
            sample,
            fail_on: None,
            reads: Vec::new(),
            init_result: Ok(()),
        }
    }
}

impl ColorSensor for MockSensor {
    async fn init(&mut self) -> Result<(), SensorError> {
        self.init_result
    }

    async fn read_channel(&mut self, channel: SensorChannel) -> Result<u16, SensorError> {
        self.reads.push(channel);
        if self.fail_on == Some(channel) {
            return Err(SensorError::Bus);
        }
        Ok(match channel {
            SensorChannel::Red => self.sample.red,
            SensorChannel::Green => self.sample.green,
            SensorChannel::Blue => self.sample.blue,
            SensorChannel::Infrared => self.sample.infrared,
            SensorChannel::Clear => self.sample.clear,
        })
    }
}

// ============================================================================
// Mock Eingabe
// ============================================================================

/// Taster mit vorgegebener Pegelfolge, danach losgelassen
#[derive(Debug, Default)]
pub struct ScriptedButton {
    pub levels: VecDeque<bool>,
}

impl ScriptedButton {
    pub fn new(levels: &[bool]) -> Self {
        Self {
            levels: levels.iter().copied().collect(),
        }
    }
}

impl Button for ScriptedButton {
    fn is_pressed(&mut self) -> bool {
        self.levels.pop_front().unwrap_or(false)
    }
}

/// ADC mit vorgegebener Wertefolge, der letzte Wert bleibt stehen
#[derive(Debug)]
pub struct ScriptedAdc {
    pub values: VecDeque<Result<u16, AdcError>>,
    last: Result<u16, AdcError>,
}

impl ScriptedAdc {
    pub fn new(values: &[Result<u16, AdcError>]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            last: Ok(0),
        }
    }

    pub fn constant(raw: u16) -> Self {
        Self::new(&[Ok(raw)])
    }
}

impl AnalogInput for ScriptedAdc {
    async fn read_raw(&mut self) -> Result<u16, AdcError> {
        if let Some(value) = self.values.pop_front() {
            self.last = value;
        }
        self.last
    }
}

// ============================================================================
// Mock serielle Schnittstelle
// ============================================================================

/// Liefert vorgegebene Zeilen, danach wartet der Empfang für immer
#[derive(Debug, Default)]
pub struct MockSerial {
    /// (Zeile, Überlauf nach dieser Zeile)
    pub lines: VecDeque<(Vec<u8>, bool)>,
    pub written: Vec<String>,
    pub discarded: usize,
    pub fail_writes: bool,
    overrun: bool,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &[u8]) {
        self.lines.push_back((line.to_vec(), false));
    }

    pub fn push_overrun_line(&mut self, line: &[u8]) {
        self.lines.push_back((line.to_vec(), true));
    }

    pub fn set_overrun(&mut self) {
        self.overrun = true;
    }
}

impl SerialPort for MockSerial {
    async fn receive_to_idle(&mut self, buffer: &mut [u8]) -> usize {
        match self.lines.pop_front() {
            Some((line, overrun)) => {
                let len = line.len().min(buffer.len());
                buffer[..len].copy_from_slice(&line[..len]);
                self.overrun = overrun;
                len
            }
            None => core::future::pending().await,
        }
    }

    fn overrun(&self) -> bool {
        self.overrun
    }

    fn discard_overrun(&mut self) {
        self.overrun = false;
        self.discarded += 1;
    }

    fn write_line(&mut self, line: &str) -> Result<(), SerialError> {
        if self.fail_writes {
            return Err(SerialError::WriteFailed);
        }
        self.written.push(line.to_string());
        Ok(())
    }
}
