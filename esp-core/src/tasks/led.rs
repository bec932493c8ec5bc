//! LED-Task Logik: Farben aus der Queue auf die LED bringen

use embassy_time::Timer;

use crate::config::LedConfig;
use crate::fabric::{AcquisitionFlags, ClearMode, Fabric, Timeout, WaitCondition};
use crate::logic::StartupAnimation;
use crate::traits::{LedError, SmartLedWriter};
use crate::types::Color;

/// Schreibt eine Farbe, bei `Busy` genau ein zweiter Versuch
///
/// Statt aktiv zu warten wird auf `Fabric::led_done` gewartet,
/// das der Treiber nach jedem Transfer signalisiert.
pub async fn write_color<L: SmartLedWriter>(
    led: &mut L,
    fabric: &Fabric,
    color: Color,
) -> Result<(), LedError> {
    fabric.led_done.reset();
    match led.write(color) {
        Err(LedError::Busy) => {
            trace!("led busy, waiting for transfer");
            fabric.led_done.wait().await;
            led.write(color)
        }
        result => result,
    }
}

/// Spielt die Start-Animation ab, endet mit LED aus
pub async fn play_startup_animation<L: SmartLedWriter>(
    led: &mut L,
    fabric: &Fabric,
    config: &LedConfig,
) {
    for color in StartupAnimation::new(config.animation_brightness) {
        if let Err(e) = write_color(led, fabric, color).await {
            error!("startup animation aborted: {}", e);
            return;
        }
        Timer::after(config.animation_step).await;
    }
}

/// Wendet alle wartenden Farben in FIFO-Reihenfolge an
///
/// Liefert die Anzahl erfolgreich geschriebener Farben.
pub async fn apply_pending<L: SmartLedWriter>(led: &mut L, fabric: &Fabric) -> usize {
    let mut written = 0;
    while let Some(color) = fabric.colors.try_get() {
        match write_color(led, fabric, color).await {
            Ok(()) => written += 1,
            Err(e) => error!("failed to write color: {}", e),
        }
    }
    written
}

/// LED Logic - wartet auf `NEW_COLOR` und übernimmt die Farben
pub async fn led_logic<L: SmartLedWriter>(mut led: L, fabric: &Fabric, config: LedConfig) -> ! {
    if config.startup_animation {
        play_startup_animation(&mut led, fabric, &config).await;
    }
    info!("led task ready");

    let events = &fabric.acquisition_events;
    loop {
        // Forever kann nicht in einen Timeout laufen
        let _ = events
            .wait(
                AcquisitionFlags::NEW_COLOR,
                WaitCondition::Any,
                ClearMode::NoClear,
                Timeout::Forever,
            )
            .await;
        events.clear(AcquisitionFlags::NEW_COLOR);
        apply_pending(&mut led, fabric).await;
    }
}
