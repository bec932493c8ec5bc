//! Farbsensor Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, Pure Functions, die Kommunikations-Fabric
//! und die Logik aller Tasks.

#![no_std]

// Muss als erstes Modul stehen, damit die Log-Makros überall sichtbar sind
#[macro_use]
mod fmt;

pub mod config;
pub mod fabric;
pub mod logic;
pub mod protocol;
pub mod tasks;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use config::{InputConfig, LedConfig, MenuConfig};
pub use fabric::{AcquisitionFlags, Fabric, IoFlags, QUEUE_DEPTH, Timeout};
pub use protocol::{Command, parse_line};
pub use traits::{
    AdcError, AnalogInput, Bitmap, Button, ColorSensor, Display, LedError, Rect, SensorError,
    SerialError, SerialPort, SmartLedWriter,
};
pub use types::{Choice, Color, ColorChannel, MenuItem, Reading, Sample, ScrollSample};
