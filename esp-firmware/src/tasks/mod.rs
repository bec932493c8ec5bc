// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task ist ein dünner Wrapper: Hardware übernehmen, dann die
// testbare *_logic Funktion aus farbsensor-core aufrufen.
// Kommuniziert wird ausschließlich über die statische Fabric.

pub mod acquisition;
pub mod bridge;
pub mod input;
pub mod led;
pub mod menu;

// Re-export Tasks für einfachen Import
pub use acquisition::acquisition_task;
pub use bridge::bridge_task;
pub use input::input_task;
pub use led::led_task;
pub use menu::{OledDisplay, menu_task};
