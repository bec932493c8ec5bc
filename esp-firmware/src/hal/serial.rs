// UART-Anbindung der seriellen Brücke
//
// Empfang asynchron bis Leerlauf auf der Leitung oder Puffer voll,
// Senden blockierend (nur kurze Diagnose-Zeilen).

use esp_hal::Async;
use esp_hal::uart::{RxError, Uart};
use farbsensor_core::{SerialError, SerialPort};

pub struct UartPort<'a> {
    uart: Uart<'a, Async>,
    overrun: bool,
}

impl<'a> UartPort<'a> {
    pub fn new(uart: Uart<'a, Async>) -> Self {
        Self {
            uart,
            overrun: false,
        }
    }
}

impl<'a> SerialPort for UartPort<'a> {
    async fn receive_to_idle(&mut self, buffer: &mut [u8]) -> usize {
        // read_async kehrt nach dem RX-Timeout (Leitung im Leerlauf) oder
        // bei vollem Puffer zurück, das ist das Zeilenende
        loop {
            match self.uart.read_async(buffer).await {
                Ok(0) => continue,
                Ok(count) => return count,
                Err(RxError::FifoOverflowed) => {
                    self.overrun = true;
                    return 0;
                }
                Err(e) => {
                    defmt::warn!("UART rx error: {}", e);
                    return 0;
                }
            }
        }
    }

    fn overrun(&self) -> bool {
        self.overrun
    }

    fn discard_overrun(&mut self) {
        self.overrun = false;
        // Reste aus dem FIFO verwerfen
        let mut scratch = [0u8; 16];
        while let Ok(count) = self.uart.read_buffered(&mut scratch) {
            if count == 0 {
                break;
            }
        }
    }

    fn write_line(&mut self, line: &str) -> Result<(), SerialError> {
        let mut bytes = line.as_bytes();
        while !bytes.is_empty() {
            let written = self
                .uart
                .write(bytes)
                .map_err(|_| SerialError::WriteFailed)?;
            bytes = &bytes[written..];
        }
        self.uart.flush().map_err(|_| SerialError::WriteFailed)
    }
}
