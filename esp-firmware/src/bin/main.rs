// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::uart::{Config as UartConfig, RxConfig, Uart};

use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_farbsensor::config::{
    I2C_FREQUENCY_KHZ, SPI_FREQUENCY_MHZ, UART_BAUDRATE, UART_RX_TIMEOUT_SYMBOLS,
};
use esp_farbsensor::hal::{PotiInput, PushButton, Ssd1351, UartPort, Veml3328};
use esp_farbsensor::tasks::{acquisition_task, bridge_task, input_task, led_task, menu_task};
use esp_farbsensor::{ColorSensor, Fabric};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Kommunikations-Fabric: Flags und Queues aller Tasks
static FABRIC: StaticCell<Fabric> = StaticCell::new();

/// Fehler beim Hochfahren, danach ist kein sinnvoller Betrieb möglich
#[derive(Debug, defmt::Format)]
enum StartupError {
    /// Peripheral-Setup fehlgeschlagen (Name des Peripherals)
    Peripheral(&'static str),
    Sensor(esp_farbsensor::SensorError),
    TaskSpawn,
}

/// Main Entry Point
///
/// Initialisiert Hardware, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    let fabric: &'static Fabric = FABRIC.init(Fabric::new());

    if let Err(e) = start(spawner, peripherals, fabric).await {
        error!("startup failed: {}", e);
        panic!("startup failed");
    }
    info!("all tasks running");

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}

async fn start(
    spawner: Spawner,
    peripherals: esp_hal::peripherals::Peripherals,
    fabric: &'static Fabric,
) -> Result<(), StartupError> {
    // ========================================================================
    // Farbsensor (I2C0)
    // ========================================================================
    // SDA = GPIO6, SCL = GPIO7
    let i2c = I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ)),
    )
    .map_err(|_| StartupError::Peripheral("I2C0"))?
    .with_sda(peripherals.GPIO6)
    .with_scl(peripherals.GPIO7)
    .into_async();

    let mut sensor = Veml3328::new(i2c);
    sensor.init().await.map_err(StartupError::Sensor)?;

    // ========================================================================
    // OLED (SPI2)
    // ========================================================================
    // SCK = GPIO19, MOSI = GPIO18
    let spi_bus = Spi::new(
        peripherals.SPI2,
        SpiConfig::default().with_frequency(Rate::from_mhz(SPI_FREQUENCY_MHZ)),
    )
    .map_err(|_| StartupError::Peripheral("SPI2"))?
    .with_sck(peripherals.GPIO19)
    .with_mosi(peripherals.GPIO18);

    // CS = GPIO20, DC = GPIO21, RST = GPIO22
    let cs = Output::new(peripherals.GPIO20, Level::High, OutputConfig::default());
    let spi_device = ExclusiveDevice::new_no_delay(spi_bus, cs)
        .map_err(|_| StartupError::Peripheral("SPI2"))?;
    let dc = Output::new(peripherals.GPIO21, Level::Low, OutputConfig::default());
    let mut rst = Output::new(peripherals.GPIO22, Level::High, OutputConfig::default());

    let display = Ssd1351::new(spi_device, dc, &mut rst, &mut Delay)
        .map_err(|_| StartupError::Peripheral("SSD1351"))?;

    // ========================================================================
    // Eingabe
    // ========================================================================
    // Taster GPIO9 (aktiv low), Poti an GPIO2 / ADC1
    let button = PushButton::new(peripherals.GPIO9);
    let poti = PotiInput::new(peripherals.ADC1, peripherals.GPIO2);

    // ========================================================================
    // Serielle Brücke (UART1)
    // ========================================================================
    // TX = GPIO16, RX = GPIO17
    let uart = Uart::new(
        peripherals.UART1,
        UartConfig::default()
            .with_baudrate(UART_BAUDRATE)
            .with_rx(RxConfig::default().with_timeout(UART_RX_TIMEOUT_SYMBOLS)),
    )
    .map_err(|_| StartupError::Peripheral("UART1"))?
    .with_tx(peripherals.GPIO16)
    .with_rx(peripherals.GPIO17)
    .into_async();

    // ========================================================================
    // Tasks
    // ========================================================================
    // RGB LED (WS2812) an GPIO8
    spawner
        .spawn(led_task(peripherals.GPIO8, peripherals.RMT, fabric))
        .map_err(|_| StartupError::TaskSpawn)?;
    spawner
        .spawn(acquisition_task(sensor, fabric))
        .map_err(|_| StartupError::TaskSpawn)?;
    spawner
        .spawn(input_task(button, poti, fabric))
        .map_err(|_| StartupError::TaskSpawn)?;
    spawner
        .spawn(bridge_task(UartPort::new(uart), fabric))
        .map_err(|_| StartupError::TaskSpawn)?;
    spawner
        .spawn(menu_task(display, fabric))
        .map_err(|_| StartupError::TaskSpawn)?;

    Ok(())
}
