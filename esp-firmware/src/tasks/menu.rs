// Menü Task - OLED-Oberfläche
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use esp_hal::Blocking;
use esp_hal::gpio::Output;
use esp_hal::spi::master::Spi;
use farbsensor_core::Fabric;
use farbsensor_core::tasks::MenuTask;

use crate::config::menu_config;
use crate::hal::Ssd1351;

/// OLED an SPI2 mit eigenem Chip-Select und DC-Pin
pub type OledDisplay =
    Ssd1351<ExclusiveDevice<Spi<'static, Blocking>, Output<'static>, NoDelay>, Output<'static>>;

/// Einziger Besitzer des UI-Zustands
#[embassy_executor::task]
pub async fn menu_task(display: OledDisplay, fabric: &'static Fabric) {
    MenuTask::new(fabric, display, menu_config()).run().await
}
