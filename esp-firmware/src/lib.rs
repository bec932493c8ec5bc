// Library-Root: Hardware-Treiber und Embassy-Tasks des Farbsensors
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von farbsensor-core
pub use farbsensor_core::{
    AnalogInput, Button, Color, ColorSensor, Display, Fabric, LedError, SensorError, SerialPort,
    SmartLedWriter,
};

// ============================================================================
// Aufteilung Firmware / Core
// ============================================================================
//
// Die gesamte Task-Logik (Flags, Queues, Menü-Zustandsmaschine, Protokoll)
// liegt in farbsensor-core und wird auf dem Host getestet (esp-tests).
//
// Diese Crate liefert nur:
// 1. Treiber, die die Core-Traits mit esp-hal Peripherie implementieren (hal/)
// 2. Dünne #[embassy_executor::task] Wrapper um die *_logic Funktionen (tasks/)
// 3. Die Pin- und Timing-Konstanten (config.rs)
