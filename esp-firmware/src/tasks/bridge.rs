// Bridge Task - Zeilen von der UART in die Fabric
use farbsensor_core::Fabric;
use farbsensor_core::protocol::OVERRUN_DIAGNOSTIC;
use farbsensor_core::tasks::bridge_logic;

use crate::hal::UartPort;

#[embassy_executor::task]
pub async fn bridge_task(port: UartPort<'static>, fabric: &'static Fabric) {
    bridge_logic(port, fabric, OVERRUN_DIAGNOSTIC).await
}
