// Projekt-Konfiguration: Konstanten und Task-Timings
//
// Die Pin-Belegung steht direkt in main.rs (peripherals.GPIOx).

use embassy_time::Duration;
use farbsensor_core::{InputConfig, LedConfig, MenuConfig};

// ============================================================================
// LED Konfiguration
// ============================================================================

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// Helligkeit der Start-Animation (0-255)
pub const LED_ANIMATION_BRIGHTNESS: u8 = 30;

/// Dauer eines Animations-Schritts in Millisekunden
pub const LED_ANIMATION_STEP_MS: u64 = 15;

// ============================================================================
// Farbsensor (VEML3328, I2C)
// ============================================================================

/// I2C Taktfrequenz in kHz
pub const I2C_FREQUENCY_KHZ: u32 = 100;

// ============================================================================
// OLED Display (SSD1351, 96x96, SPI)
// ============================================================================

/// SPI Taktfrequenz in MHz
pub const SPI_FREQUENCY_MHZ: u32 = 10;

// ============================================================================
// Eingabe (Taster + Potentiometer)
// ============================================================================

/// Abfrage-Intervall in Millisekunden
pub const INPUT_POLL_MS: u64 = 50;

/// Entprell-Wartezeit in Millisekunden
pub const DEBOUNCE_SETTLE_MS: u64 = 1;

/// Pause nach einem Klick in Millisekunden
pub const CLICK_COOLDOWN_MS: u64 = 10;

/// Der ADC liefert 12 Bit, das Menü rechnet mit 8 Bit
pub const ADC_SHIFT: u32 = 4;

// ============================================================================
// Serielle Schnittstelle (UART1)
// ============================================================================

pub const UART_BAUDRATE: u32 = 115_200;

/// Leerlauf auf der Leitung (in Zeichen-Zeiten) der eine Zeile beendet
pub const UART_RX_TIMEOUT_SYMBOLS: u8 = 10;

// ============================================================================
// Menü
// ============================================================================

/// Blink-Takt des Punktes auf dem Startbildschirm
pub const IDLE_BLINK_MS: u64 = 500;

/// Anzeigedauer des Logos
pub const SPLASH_MS: u64 = 1000;

/// Wartezeit zwischen Beleuchtung an und Messung
pub const ILLUMINATION_SETTLE_MS: u64 = 200;

// ============================================================================
// Task-Konfigurationen aus den Konstanten
// ============================================================================

pub fn input_config() -> InputConfig {
    InputConfig {
        poll_interval: Duration::from_millis(INPUT_POLL_MS),
        debounce_settle: Duration::from_millis(DEBOUNCE_SETTLE_MS),
        click_cooldown: Duration::from_millis(CLICK_COOLDOWN_MS),
        ..InputConfig::default()
    }
}

pub fn menu_config() -> MenuConfig {
    MenuConfig {
        idle_blink: Duration::from_millis(IDLE_BLINK_MS),
        splash: Duration::from_millis(SPLASH_MS),
        illumination_settle: Duration::from_millis(ILLUMINATION_SETTLE_MS),
        ..MenuConfig::default()
    }
}

pub fn led_config() -> LedConfig {
    LedConfig {
        startup_animation: true,
        animation_brightness: LED_ANIMATION_BRIGHTNESS,
        animation_step: Duration::from_millis(LED_ANIMATION_STEP_MS),
    }
}
