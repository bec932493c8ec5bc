//! Task-Logik ohne Hardware
//!
//! Jede Datei enthält die testbare Logik eines Tasks. Die Firmware
//! ruft sie aus ihren `#[embassy_executor::task]`-Wrappern mit den
//! echten Treibern auf, die Tests mit Mocks.

pub mod acquisition;
pub mod bridge;
pub mod input;
pub mod led;
pub mod menu;

pub use acquisition::acquisition_logic;
pub use bridge::bridge_logic;
pub use input::input_logic;
pub use led::led_logic;
pub use menu::MenuTask;
