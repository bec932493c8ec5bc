// Akquise Task - bedient Messanforderungen mit dem VEML3328
use esp_hal::Async;
use esp_hal::i2c::master::I2c;
use farbsensor_core::Fabric;
use farbsensor_core::tasks::acquisition_logic;

use crate::hal::Veml3328;

/// Sensor-Typ mit dem asynchronen I2C-Bus
pub type ColorSensorDevice = Veml3328<I2c<'static, Async>>;

/// Der Sensor wird in main() initialisiert, hier nur noch gelesen
#[embassy_executor::task]
pub async fn acquisition_task(sensor: ColorSensorDevice, fabric: &'static Fabric) {
    acquisition_logic(sensor, fabric).await
}
