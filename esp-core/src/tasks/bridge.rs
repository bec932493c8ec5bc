//! Serial Command Bridge: Zeilen-Protokoll → Flags und Queues

use crate::fabric::{AcquisitionFlags, Fabric};
use crate::protocol::{Command, parse_line};
use crate::traits::SerialPort;

/// Größe des Empfangspuffers (eine Zeile)
pub const RX_BUFFER_SIZE: usize = 30;

/// Verteilt einen erkannten Befehl auf die Fabric
///
/// Volle Queues verwerfen den Wert, das Flag wird trotzdem gesetzt.
pub fn dispatch(fabric: &Fabric, command: Command) {
    match command {
        Command::Measurement(sample) => {
            if !fabric.remote_samples.try_put(sample) {
                warn!("remote sample dropped");
            }
            fabric
                .acquisition_events
                .set(AcquisitionFlags::MEASUREMENT_DONE);
        }
        Command::SetColor(color) => {
            if !fabric.publish_color(color) {
                warn!("color dropped");
            }
        }
    }
}

/// Verarbeitet eine empfangene Zeile inklusive Überlauf-Behandlung
///
/// Liefert den erkannten Befehl (für Logs und Tests).
pub fn process_line<P: SerialPort>(
    port: &mut P,
    fabric: &Fabric,
    line: &[u8],
    diagnostic: &str,
) -> Option<Command> {
    let command = parse_line(line);
    match command {
        Some(cmd) => {
            debug!("serial command: {}", cmd);
            dispatch(fabric, cmd);
        }
        None => trace!("ignored line of {} bytes", line.len()),
    }

    if port.overrun() {
        warn!("uart overrun");
        port.discard_overrun();
        if port.write_line(diagnostic).is_err() {
            error!("failed to write diagnostic");
        }
    }
    command
}

/// Bridge Logic - genau ein Empfang pro verarbeiteter Zeile
pub async fn bridge_logic<P: SerialPort>(mut port: P, fabric: &Fabric, diagnostic: &str) -> ! {
    let mut buffer = [0u8; RX_BUFFER_SIZE];
    info!("serial bridge started");
    loop {
        let len = port.receive_to_idle(&mut buffer).await.min(RX_BUFFER_SIZE);
        process_line(&mut port, fabric, &buffer[..len], diagnostic);
    }
}
