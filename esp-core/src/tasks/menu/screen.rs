//! Bildschirm-Layouts des Menüs (96×96 Pixel, RGB565)
//!
//! Alle Methoden sind reine Zeichenbefehle an das `Display`.

use core::fmt::Write;

use heapless::String;

use super::machine::ColorCursor;
use crate::logic::{color_temperature, illuminance, rgb565, slider_offset};
use crate::traits::{Bitmap, Display, Rect};
use crate::types::{Choice, Color, ColorChannel, MenuItem, Sample};

pub const WHITE: u16 = 0xFFFF;
pub const BLACK: u16 = 0x0000;
/// Rahmenlinien
pub const FRAME: u16 = 0x9494;
/// Markierung des gewählten Eintrags
pub const HIGHLIGHT: u16 = 0x6B6D;
/// Balken der Scroll-Anzeige
pub const SCROLL_BAR: u16 = 0x630C;

/// Länge des Textpuffers einer Zeile
const LINE_LEN: usize = 30;

const MAIN_MENU_LINES: [Rect; 7] = [
    Rect::new(0, 12, 96, 13),
    Rect::new(88, 12, 89, 96),
    Rect::new(0, 12, 1, 96),
    Rect::new(0, 33, 89, 34),
    Rect::new(0, 54, 89, 55),
    Rect::new(0, 75, 89, 76),
    Rect::new(0, 95, 89, 96),
];

/// Oberer und unterer Rand der vier Menüzeilen
const ITEM_ROWS: [(u8, u8); 4] = [(13, 33), (34, 54), (55, 75), (76, 95)];

const ITEM_LABEL_Y: [u8; 4] = [17, 38, 59, 80];

const ITEM_MENU_LINES: [Rect; 6] = [
    Rect::new(0, 12, 96, 13),
    Rect::new(0, 72, 96, 73),
    Rect::new(0, 73, 1, 95),
    Rect::new(47, 73, 48, 95),
    Rect::new(95, 73, 96, 95),
    Rect::new(0, 95, 96, 96),
];

const REPEAT_FRAME: [Rect; 4] = [
    Rect::new(1, 73, 46, 74),
    Rect::new(1, 94, 46, 95),
    Rect::new(1, 73, 2, 95),
    Rect::new(46, 73, 47, 95),
];

const BACK_FRAME: [Rect; 4] = [
    Rect::new(48, 73, 95, 74),
    Rect::new(48, 94, 95, 95),
    Rect::new(48, 73, 49, 95),
    Rect::new(94, 73, 95, 95),
];

/// Rechter Button-Bereich (Cursor-Beschriftung)
const RIGHT_LABEL: Rect = Rect::new(50, 75, 93, 93);
/// Linker Button-Bereich
const LEFT_LABEL: Rect = Rect::new(4, 75, 44, 93);

/// Position der Schieberegler und Werte je Kanal
struct SliderLayout {
    top: u8,
    bottom: u8,
    color: u16,
    label: char,
    text_y: u8,
    value_area: Rect,
}

fn slider_layout(channel: ColorChannel) -> SliderLayout {
    match channel {
        ColorChannel::Red => SliderLayout {
            top: 20,
            bottom: 25,
            color: 0xF800,
            label: 'R',
            text_y: 17,
            value_area: Rect::new(12, 18, 29, 27),
        },
        ColorChannel::Green => SliderLayout {
            top: 39,
            bottom: 44,
            color: 0x07E0,
            label: 'G',
            text_y: 35,
            value_area: Rect::new(12, 37, 29, 46),
        },
        ColorChannel::Blue => SliderLayout {
            top: 59,
            bottom: 64,
            color: 0x001F,
            label: 'B',
            text_y: 55,
            value_area: Rect::new(12, 57, 29, 66),
        },
    }
}

const SLIDER_LEFT: u8 = 30;
const SLIDER_RIGHT: u8 = 90;

/// Zeichnet die Menü-Layouts auf ein `Display`
pub struct Screen<D> {
    display: D,
}

impl<D: Display> Screen<D> {
    pub fn new(display: D) -> Self {
        Self { display }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    fn text(&mut self, x: u8, y: u8, args: core::fmt::Arguments<'_>) {
        let mut line: String<LINE_LEN> = String::new();
        // Zu lange Zeilen werden abgeschnitten
        let _ = line.write_fmt(args);
        self.display.draw_text(&line, x, y);
    }

    fn fill_all(&mut self, areas: &[Rect], color: u16) {
        for area in areas {
            self.display.fill_rect(*area, color);
        }
    }

    pub fn blank(&mut self) {
        self.display.draw_bitmap(Bitmap::Blank, 0, 0);
    }

    pub fn loading(&mut self) {
        self.display.draw_bitmap(Bitmap::Logo, 0, 0);
    }

    /// "PRESS BUTTON / TO CONTINUE..." über das Logo
    pub fn continue_message(&mut self) {
        self.display.fill_rect(Rect::new(29, 7, 67, 24), WHITE);
        self.display.draw_text("PRESS BUTTON", 11, 5);
        self.display.draw_text("TO CONTINUE...", 8, 15);
    }

    /// Animierter dritter Punkt von "..."
    pub fn continue_dot(&mut self, on: bool) {
        let color = if on { BLACK } else { WHITE };
        self.display.fill_rect(Rect::new(85, 22, 86, 24), color);
    }

    pub fn main_menu(&mut self) {
        self.display.draw_text("MENU", 4, 1);
        self.fill_all(&MAIN_MENU_LINES, FRAME);
        for (item, y) in MenuItem::ALL.into_iter().zip(ITEM_LABEL_Y) {
            self.display.draw_text(item.label(), 4, y);
        }
    }

    /// Rahmt `item` ein und entfernt die Rahmen der anderen Einträge
    pub fn highlight_item(&mut self, item: MenuItem) {
        for (index, (top, bottom)) in ITEM_ROWS.into_iter().enumerate() {
            let color = if index == item.index() { HIGHLIGHT } else { WHITE };
            let frame = [
                Rect::new(1, top, 88, top + 1),
                Rect::new(1, bottom - 1, 88, bottom),
                Rect::new(1, top, 2, bottom),
                Rect::new(87, top, 88, bottom),
            ];
            self.fill_all(&frame, color);
        }
    }

    /// Scroll-Balken am rechten Rand, `position` ist die skalierte Position
    pub fn scroll_indicator(&mut self, position: u16) {
        let bottom = position.min(96) as u8;
        self.display.fill_rect(Rect::new(91, 14, 94, 96), WHITE);
        self.display.fill_rect(
            Rect::new(91, bottom.saturating_sub(15), 94, bottom),
            SCROLL_BAR,
        );
    }

    /// Untermenü mit Titel und zwei Buttons
    pub fn item_menu(&mut self, title: &str, left: &str, right: &str) {
        self.blank();
        self.display.draw_text(title, 4, 1);
        self.fill_all(&ITEM_MENU_LINES, FRAME);
        self.display.draw_text(left, 7, 79);
        self.display.draw_text(right, 60, 79);
    }

    pub fn highlight_choice(&mut self, choice: Choice) {
        let (active, inactive) = match choice {
            Choice::Repeat => (REPEAT_FRAME, BACK_FRAME),
            Choice::Back => (BACK_FRAME, REPEAT_FRAME),
        };
        self.fill_all(&active, HIGHLIGHT);
        self.fill_all(&inactive, WHITE);
    }

    /// Schieberegler eines Kanals
    pub fn slider(&mut self, channel: ColorChannel, level: u8) {
        let layout = slider_layout(channel);
        let (top, bottom) = (layout.top, layout.bottom);
        let knob = SLIDER_LEFT + slider_offset(level);
        self.display
            .fill_rect(Rect::new(SLIDER_LEFT, top, SLIDER_RIGHT, bottom), WHITE);
        let track = [
            Rect::new(SLIDER_LEFT, top + 2, SLIDER_RIGHT, top + 3),
            Rect::new(SLIDER_LEFT, top, SLIDER_LEFT + 1, bottom),
            Rect::new(SLIDER_RIGHT - 1, top, SLIDER_RIGHT, bottom),
        ];
        self.fill_all(&track, layout.color);
        self.display
            .fill_rect(Rect::new(knob, top, knob + 1, bottom), BLACK);
    }

    /// Zahlenwert eines Kanals links neben dem Schieberegler
    pub fn channel_value(&mut self, channel: ColorChannel, level: u8) {
        let layout = slider_layout(channel);
        self.display.fill_rect(layout.value_area, WHITE);
        self.text(4, layout.text_y, format_args!("{}:{:>3}", layout.label, level));
    }

    /// Kompletter "Set Color"-Bildschirm für die gehaltene Farbe
    pub fn set_color_menu(&mut self, color: Color) {
        self.item_menu("SET COLORS", "  SET", " RED");
        for channel in [ColorChannel::Red, ColorChannel::Green, ColorChannel::Blue] {
            let level = channel.get(color);
            self.channel_value(channel, level);
            self.slider(channel, level);
        }
    }

    /// Beschriftung nach dem Bestätigen eines Kanals
    pub fn cursor_label(&mut self, cursor: ColorCursor) {
        self.display.fill_rect(RIGHT_LABEL, WHITE);
        match cursor {
            ColorCursor::Red => self.display.draw_text(" RED", 60, 79),
            ColorCursor::Green => self.display.draw_text("GREEN", 55, 79),
            ColorCursor::Blue => self.display.draw_text("BLUE", 60, 79),
            ColorCursor::AgainBack => {
                self.display.draw_text("BACK", 60, 79);
                self.display.fill_rect(LEFT_LABEL, WHITE);
                self.display.draw_text("AGAIN", 7, 79);
            }
        }
    }

    /// Rohwerte aller fünf Kanäle
    pub fn measurement(&mut self, sample: &Sample) {
        self.text(4, 14, format_args!("Red: {}", sample.red));
        self.text(4, 25, format_args!("Green: {}", sample.green));
        self.text(4, 36, format_args!("Blue: {}", sample.blue));
        self.text(4, 47, format_args!("Clear: {}", sample.clear));
        self.text(4, 58, format_args!("Infrared: {}", sample.infrared));
    }

    /// Beleuchtungsstärke und Farbtemperatur
    pub fn lux_cct(&mut self, sample: &Sample) {
        let (lux, tenths) = illuminance(sample);
        self.text(4, 25, format_args!("Intensity: {}.{}lux", lux, tenths));
        match color_temperature(sample) {
            Some(kelvin) => self.text(4, 47, format_args!("Color Temp.: {}K", kelvin)),
            None => self.display.draw_text("Color Temp.: --", 4, 47),
        }
    }

    /// Hex-Werte und Farbfeld der gemessenen Farbe
    pub fn color_result(&mut self, color: Color) {
        self.text(52, 24, format_args!("R:0x{:02X} h", color.r));
        self.text(52, 37, format_args!("G:0x{:02X} h", color.g));
        self.text(52, 50, format_args!("B:0x{:02X} h", color.b));
        self.display
            .fill_rect(Rect::new(4, 22, 44, 62), rgb565(color));
    }

    /// Meldung statt Messwerten wenn der Sensor nicht geantwortet hat
    pub fn sensor_error(&mut self) {
        self.display.draw_text("SENSOR ERROR", 4, 36);
    }
}
