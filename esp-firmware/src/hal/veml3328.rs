// VEML3328 RGB/Clear/IR Farbsensor über I2C
//
// Alle Register sind 16 Bit breit, Little Endian übertragen.

use embedded_hal_async::i2c::I2c;
use farbsensor_core::types::SensorChannel;
use farbsensor_core::{ColorSensor, SensorError};

/// Feste 7-Bit Adresse des Sensors
pub const ADDRESS: u8 = 0x10;

// ============================================================================
// Register
// ============================================================================

const REG_CONFIG: u8 = 0x00;
const REG_CLEAR: u8 = 0x04;
const REG_RED: u8 = 0x05;
const REG_GREEN: u8 = 0x06;
const REG_BLUE: u8 = 0x07;
const REG_IR: u8 = 0x08;
const REG_DEVICE_ID: u8 = 0x0C;

/// Erwartete Device-ID im unteren Byte
const DEVICE_ID: u8 = 0x28;

/// Konfiguration: alle Kanäle aktiv, Integrationszeit 100 ms
const CONFIG_VALUE: u16 = 0x0010;

pub struct Veml3328<I> {
    i2c: I,
}

impl<I: I2c> Veml3328<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    async fn read_register(&mut self, register: u8) -> Result<u16, SensorError> {
        let mut buffer = [0u8; 2];
        self.i2c
            .write_read(ADDRESS, &[register], &mut buffer)
            .await
            .map_err(|_| SensorError::Bus)?;
        Ok(u16::from_le_bytes(buffer))
    }

    async fn write_register(&mut self, register: u8, value: u16) -> Result<(), SensorError> {
        let [lo, hi] = value.to_le_bytes();
        self.i2c
            .write(ADDRESS, &[register, lo, hi])
            .await
            .map_err(|_| SensorError::Bus)
    }
}

impl<I: I2c> ColorSensor for Veml3328<I> {
    async fn init(&mut self) -> Result<(), SensorError> {
        let id = self
            .read_register(REG_DEVICE_ID)
            .await
            .map_err(|_| SensorError::DeviceNotFound)?;
        if (id & 0x00FF) as u8 != DEVICE_ID {
            defmt::error!("VEML3328: unexpected device id {=u16:#x}", id);
            return Err(SensorError::DeviceNotFound);
        }

        self.write_register(REG_CONFIG, CONFIG_VALUE).await?;

        // Zurücklesen: Sensor hat die Konfiguration übernommen?
        let config = self.read_register(REG_CONFIG).await?;
        if config != CONFIG_VALUE {
            defmt::error!("VEML3328: config readback {=u16:#x}", config);
            return Err(SensorError::DeviceNotFound);
        }

        defmt::info!("VEML3328 initialized");
        Ok(())
    }

    async fn read_channel(&mut self, channel: SensorChannel) -> Result<u16, SensorError> {
        let register = match channel {
            SensorChannel::Red => REG_RED,
            SensorChannel::Green => REG_GREEN,
            SensorChannel::Blue => REG_BLUE,
            SensorChannel::Infrared => REG_IR,
            SensorChannel::Clear => REG_CLEAR,
        };
        self.read_register(register).await
    }
}
