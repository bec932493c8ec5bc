//! Akquise-Task Logik: Messung auf Anfrage
//!
//! Wartet auf `MEASUREMENT_NEEDED`, liest die fünf Kanäle einzeln,
//! legt das Ergebnis in `Fabric::readings` und setzt `MEASUREMENT_DONE`.

use crate::fabric::{AcquisitionFlags, ClearMode, Fabric, Timeout, WaitCondition};
use crate::traits::ColorSensor;
use crate::types::{Reading, Sample, SensorChannel};

/// Liest alle Kanäle in Akquise-Reihenfolge (red, green, blue, infrared, clear)
///
/// Der erste fehlgeschlagene Kanal bricht die Messung ab.
pub async fn read_sample<S: ColorSensor>(sensor: &mut S) -> Reading {
    let mut values = [0u16; 5];
    for (slot, channel) in values.iter_mut().zip(SensorChannel::READ_ORDER) {
        *slot = sensor.read_channel(channel).await?;
    }
    let [red, green, blue, infrared, clear] = values;
    Ok(Sample {
        red,
        green,
        blue,
        clear,
        infrared,
    })
}

/// Bedient genau eine Messanfrage
pub async fn serve_request<S: ColorSensor>(sensor: &mut S, fabric: &Fabric) {
    let events = &fabric.acquisition_events;
    // Forever kann nicht in einen Timeout laufen
    let _ = events
        .wait(
            AcquisitionFlags::MEASUREMENT_NEEDED,
            WaitCondition::Any,
            ClearMode::NoClear,
            Timeout::Forever,
        )
        .await;
    events.clear(AcquisitionFlags::MEASUREMENT_NEEDED);

    let reading = read_sample(sensor).await;
    match &reading {
        Ok(sample) => debug!("measured {}", sample),
        Err(e) => error!("sensor read failed: {}", e),
    }

    // Genau ein Leser, die Queue läuft nicht dauerhaft voll
    fabric.readings.put(reading, Timeout::Forever).await;
    events.set(AcquisitionFlags::MEASUREMENT_DONE);
}

/// Akquise Logic - Server-Schleife, endet nie
pub async fn acquisition_logic<S: ColorSensor>(mut sensor: S, fabric: &Fabric) -> ! {
    info!("acquisition task started");
    loop {
        serve_request(&mut sensor, fabric).await;
    }
}
