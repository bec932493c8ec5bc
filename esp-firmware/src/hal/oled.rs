// SSD1351 OLED (96x96, RGB565) über SPI + Data/Command Pin
//
// Rechtecke werden direkt als RAM-Fenster gefüllt, Text und Logo
// zeichnet embedded-graphics über die DrawTarget-Implementierung.

use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_6X9};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use farbsensor_core::{Bitmap, Display, Rect};

pub const WIDTH: u8 = 96;
pub const HEIGHT: u8 = 96;

/// Das 96x96 Panel liegt ab Spalte 16 im 128er RAM des Controllers
const COLUMN_OFFSET: u8 = 0x10;
const ROW_OFFSET: u8 = 0x00;

// ============================================================================
// Kommandos
// ============================================================================

const CMD_SET_COLUMN: u8 = 0x15;
const CMD_SET_ROW: u8 = 0x75;
const CMD_WRITE_RAM: u8 = 0x5C;
const CMD_MODE_NORMAL: u8 = 0xA6;
const CMD_SLEEP_OFF: u8 = 0xAF;

/// Initialisierungs-Sequenz (Kommando, Argumente)
const INIT_SEQUENCE: [(u8, &[u8]); 14] = [
    // Entsperren
    (0xFD, &[0x12]),
    (0xFD, &[0xB1]),
    // Remap: horizontal, Farbreihenfolge, Scan rückwärts, Split, 65k Farben
    (0xA0, &[0x32]),
    (0xCA, &[0x5F]),
    (0xA1, &[0x80]),
    (0xA2, &[0x20]),
    (0xBE, &[0x05]),
    (0xB3, &[0xF1]),
    (0xB1, &[0x32]),
    (0xB6, &[0x01]),
    (0xC7, &[0x0E]),
    (0xC1, &[0x75, 0x42, 0x49]),
    (0xB4, &[0xA0, 0xB5, 0x55]),
    (0xB2, &[0xA4, 0x00, 0x00]),
];

/// Pixel pro SPI-Transfer beim Füllen
const FILL_CHUNK: usize = 32;

/// Fehler beim Zugriff auf das Display
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum OledError {
    Spi,
    Pin,
}

pub struct Ssd1351<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI: SpiDevice, DC: OutputPin> Ssd1351<SPI, DC> {
    /// Hardware-Reset, Initialisierung und schwarzer Bildschirm
    pub fn new<RST: OutputPin, D: DelayNs>(
        spi: SPI,
        dc: DC,
        rst: &mut RST,
        delay: &mut D,
    ) -> Result<Self, OledError> {
        rst.set_low().map_err(|_| OledError::Pin)?;
        delay.delay_ms(1);
        rst.set_high().map_err(|_| OledError::Pin)?;
        delay.delay_ms(1);

        let mut oled = Self { spi, dc };
        for (command, args) in INIT_SEQUENCE {
            oled.command(command, args)?;
        }
        oled.command(CMD_MODE_NORMAL, &[])?;
        oled.command(CMD_SLEEP_OFF, &[])?;
        oled.fill_window(0, 0, WIDTH, HEIGHT, 0x0000)?;
        Ok(oled)
    }

    fn command(&mut self, command: u8, args: &[u8]) -> Result<(), OledError> {
        self.dc.set_low().map_err(|_| OledError::Pin)?;
        self.spi.write(&[command]).map_err(|_| OledError::Spi)?;
        if !args.is_empty() {
            self.dc.set_high().map_err(|_| OledError::Pin)?;
            self.spi.write(args).map_err(|_| OledError::Spi)?;
        }
        Ok(())
    }

    /// Setzt das Schreibfenster (Endwerte exklusiv) und startet den RAM-Zugriff
    fn window(&mut self, x0: u8, y0: u8, x1: u8, y1: u8) -> Result<(), OledError> {
        self.command(
            CMD_SET_COLUMN,
            &[COLUMN_OFFSET + x0, COLUMN_OFFSET + x1 - 1],
        )?;
        self.command(CMD_SET_ROW, &[ROW_OFFSET + y0, ROW_OFFSET + y1 - 1])?;
        self.command(CMD_WRITE_RAM, &[])?;
        self.dc.set_high().map_err(|_| OledError::Pin)
    }

    fn fill_window(&mut self, x0: u8, y0: u8, x1: u8, y1: u8, color: u16) -> Result<(), OledError> {
        if x1 > WIDTH || y1 > HEIGHT || x1 <= x0 || y1 <= y0 {
            return Ok(());
        }
        self.window(x0, y0, x1, y1)?;

        let [hi, lo] = color.to_be_bytes();
        let mut chunk = [0u8; FILL_CHUNK * 2];
        for pixel in chunk.chunks_exact_mut(2) {
            pixel[0] = hi;
            pixel[1] = lo;
        }

        let mut remaining = (x1 - x0) as usize * (y1 - y0) as usize;
        while remaining > 0 {
            let count = remaining.min(FILL_CHUNK);
            self.spi
                .write(&chunk[..count * 2])
                .map_err(|_| OledError::Spi)?;
            remaining -= count;
        }
        Ok(())
    }

    fn draw_logo(&mut self) -> Result<(), OledError> {
        self.fill_window(0, 0, WIDTH, HEIGHT, 0xFFFF)?;
        let rings = [
            (Point::new(22, 18), Rgb565::RED),
            (Point::new(40, 18), Rgb565::GREEN),
            (Point::new(31, 33), Rgb565::BLUE),
        ];
        for (top_left, color) in rings {
            Circle::new(top_left, 34)
                .into_styled(PrimitiveStyle::with_stroke(color, 3))
                .draw(self)?;
        }
        let style = MonoTextStyle::new(&FONT_6X9, Rgb565::BLACK);
        Text::with_baseline("COLOR SENSOR", Point::new(12, 76), style, Baseline::Top).draw(self)?;
        Ok(())
    }
}

// ============================================================================
// embedded-graphics Anbindung
// ============================================================================

impl<SPI, DC> OriginDimensions for Ssd1351<SPI, DC> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<SPI: SpiDevice, DC: OutputPin> DrawTarget for Ssd1351<SPI, DC> {
    type Color = Rgb565;
    type Error = OledError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 || point.x >= WIDTH as i32 || point.y >= HEIGHT as i32 {
                continue;
            }
            let (x, y) = (point.x as u8, point.y as u8);
            self.window(x, y, x + 1, y + 1)?;
            let raw = RawU16::from(color).into_inner();
            self.spi
                .write(&raw.to_be_bytes())
                .map_err(|_| OledError::Spi)?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        self.fill_window(
            area.top_left.x as u8,
            area.top_left.y as u8,
            bottom_right.x as u8 + 1,
            bottom_right.y as u8 + 1,
            RawU16::from(color).into_inner(),
        )
    }
}

// ============================================================================
// Display-Trait für das Menü
// ============================================================================

impl<SPI: SpiDevice, DC: OutputPin> Display for Ssd1351<SPI, DC> {
    fn fill_rect(&mut self, area: Rect, color: u16) {
        if let Err(e) = self.fill_window(area.x0, area.y0, area.x1, area.y1, color) {
            defmt::error!("OLED fill failed: {}", e);
        }
    }

    fn draw_bitmap(&mut self, bitmap: Bitmap, _x: u8, _y: u8) {
        let result = match bitmap {
            Bitmap::Blank => self.fill_window(0, 0, WIDTH, HEIGHT, 0xFFFF),
            Bitmap::Logo => self.draw_logo(),
        };
        if let Err(e) = result {
            defmt::error!("OLED bitmap failed: {}", e);
        }
    }

    fn draw_text(&mut self, text: &str, x: u8, y: u8) {
        let style = MonoTextStyle::new(&FONT_6X9, Rgb565::BLACK);
        let position = Point::new(x as i32, y as i32);
        if let Err(e) = Text::with_baseline(text, position, style, Baseline::Top).draw(self) {
            defmt::error!("OLED text failed: {}", e);
        }
    }
}
