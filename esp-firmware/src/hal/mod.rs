// Hardware Abstraction Layer (HAL) Module
//
// Jeder Treiber implementiert einen Trait aus farbsensor-core,
// damit die Task-Logik ohne Hardware getestet werden kann.

pub mod input;
pub mod led_writer;
pub mod oled;
pub mod serial;
pub mod veml3328;

pub use input::{PotiInput, PushButton};
pub use led_writer::RmtLedWriter;
pub use oled::Ssd1351;
pub use serial::UartPort;
pub use veml3328::Veml3328;
