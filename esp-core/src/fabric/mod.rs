//! Kommunikations-Fabric zwischen den Tasks
//!
//! Alle Tasks teilen sich genau eine `Fabric`. Sie wird beim Start einmal
//! erzeugt und lebt bis zum Ausschalten; Daten fließen nur über die
//! Flags und Queues hier, nie über geteilte Variablen.

mod flags;
mod queue;

pub use flags::{
    AcquisitionFlags, ClearMode, EventFlags, FlagSet, FlagsError, IoFlags, MAX_WAITERS,
    WaitCondition,
};
pub use queue::BoundedQueue;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Duration;

use crate::traits::SensorError;
use crate::types::{Color, Reading, Sample, ScrollSample};

/// Tiefe aller Queues
pub const QUEUE_DEPTH: usize = 2;

/// Wie lange eine Operation höchstens wartet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Timeout {
    /// Sofort zurückkehren
    NoWait,
    After(Duration),
    Forever,
}

/// Gemeinsamer Kontext aller Tasks
pub struct Fabric {
    /// CLICK / SCROLL vom Input-Task
    pub io_events: EventFlags<IoFlags>,
    /// Messanfrage, Messung fertig, neue Farbe
    pub acquisition_events: EventFlags<AcquisitionFlags>,
    /// Potentiometer-Werte (Input-Task → Menü)
    pub scroll: BoundedQueue<ScrollSample, QUEUE_DEPTH>,
    /// Ergebnisse des lokalen Sensors (Akquise → Menü)
    pub readings: BoundedQueue<Reading, QUEUE_DEPTH>,
    /// Messungen von der Gegenstelle (Bridge → Menü)
    pub remote_samples: BoundedQueue<Sample, QUEUE_DEPTH>,
    /// Farben für die LED (Menü/Bridge → LED-Task)
    pub colors: BoundedQueue<Color, QUEUE_DEPTH>,
    /// LED-Transfer abgeschlossen (aus dem Treiber gemeldet)
    pub led_done: Signal<CriticalSectionRawMutex, ()>,
}

impl Fabric {
    pub const fn new() -> Self {
        Self {
            io_events: EventFlags::new(),
            acquisition_events: EventFlags::new(),
            scroll: BoundedQueue::new(),
            readings: BoundedQueue::new(),
            remote_samples: BoundedQueue::new(),
            colors: BoundedQueue::new(),
            led_done: Signal::new(),
        }
    }

    /// Fordert eine Messung an und wartet auf das Ergebnis
    ///
    /// Single-Slot-RPC: es darf nur eine Anfrage gleichzeitig laufen.
    /// Zuerst wird das lokale Ergebnis genommen, sonst das der Gegenstelle.
    pub async fn request_measurement(&self) -> Reading {
        // Alte Antworten verwerfen, sonst würden sie als Antwort gelten
        self.acquisition_events
            .clear(AcquisitionFlags::MEASUREMENT_DONE);
        self.readings.clear();
        self.remote_samples.clear();

        self.acquisition_events
            .set(AcquisitionFlags::MEASUREMENT_NEEDED);
        // Forever kann nicht in einen Timeout laufen
        let _ = self
            .acquisition_events
            .wait(
                AcquisitionFlags::MEASUREMENT_DONE,
                WaitCondition::Any,
                ClearMode::NoClear,
                Timeout::Forever,
            )
            .await;
        self.acquisition_events
            .clear(AcquisitionFlags::MEASUREMENT_DONE);

        if let Some(reading) = self.readings.try_get() {
            return reading;
        }
        match self.remote_samples.try_get() {
            Some(sample) => Ok(sample),
            None => {
                warn!("measurement done without result");
                Err(SensorError::NoData)
            }
        }
    }

    /// Stellt eine Farbe für den LED-Task bereit
    ///
    /// Liefert `false` wenn die Farb-Queue voll war (Farbe verworfen).
    pub fn publish_color(&self, color: Color) -> bool {
        let queued = self.colors.try_put(color);
        self.acquisition_events.set(AcquisitionFlags::NEW_COLOR);
        queued
    }
}

impl Default for Fabric {
    fn default() -> Self {
        Self::new()
    }
}
