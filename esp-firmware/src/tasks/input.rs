// Input Task - Taster und Potentiometer abfragen
use farbsensor_core::Fabric;
use farbsensor_core::tasks::input_logic;

use crate::config::input_config;
use crate::hal::{PotiInput, PushButton};

/// Meldet CLICK und SCROLL an den Menü-Task
#[embassy_executor::task]
pub async fn input_task(
    button: PushButton<'static>,
    poti: PotiInput<'static>,
    fabric: &'static Fabric,
) {
    input_logic(button, poti, fabric, input_config()).await
}
