//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use crate::types::{Choice, Color, MenuItem, Sample};

/// Untere Grenze der skalierten Potentiometer-Position
pub const SCROLL_MIN: u16 = 30;

/// Obere Grenze der skalierten Potentiometer-Position
pub const SCROLL_MAX: u16 = 95;

/// Größter Rohwert des Potentiometers (8 Bit ADC)
pub const RAW_MAX: u16 = 255;

/// Grenze zwischen BACK und REPEAT in Untermenüs
const CHOICE_THRESHOLD: u16 = 63;

// ============================================================================
// Potentiometer
// ============================================================================

/// Skaliert einen Rohwert (0..=255) linear auf `min..=max`
///
/// Rechnet ganzzahlig mit Rundung, aufgeteilt in Ganz- und Restanteil
/// damit nichts überläuft. Werte über 255 werden auf 255 begrenzt.
///
/// ```
/// # use farbsensor_core::logic::scale_to_range;
/// assert_eq!(scale_to_range(30, 95, 0), 30);
/// assert_eq!(scale_to_range(30, 95, 255), 95);
/// ```
pub fn scale_to_range(min: u16, max: u16, raw: u16) -> u16 {
    let input = u32::from(raw.min(RAW_MAX));
    let range = u32::from(max.saturating_sub(min));
    let high = (range / 255) * input;
    let low = (range % 255) * input;
    let scaled = u32::from(min) + high + (high + low + 127) / 255;
    scaled.min(u32::from(max)) as u16
}

/// Menüeintrag für eine skalierte Position
///
/// Bänder: `< 45`, `45..65`, `65..85`, `>= 85`.
pub fn item_for_position(scaled: u16) -> MenuItem {
    match scaled {
        0..45 => MenuItem::Measurement,
        45..65 => MenuItem::LuxCct,
        65..85 => MenuItem::GetColor,
        _ => MenuItem::SetColor,
    }
}

/// Button-Auswahl für eine skalierte Position
pub fn choice_for_position(scaled: u16) -> Choice {
    if scaled > CHOICE_THRESHOLD {
        Choice::Repeat
    } else {
        Choice::Back
    }
}

/// Kanalwert aus dem Rohwert: Poti ist invertiert verbaut
pub fn channel_from_raw(raw: u16) -> u8 {
    RAW_MAX.saturating_sub(raw).min(RAW_MAX) as u8
}

// ============================================================================
// Auswertung der Messwerte
// ============================================================================

/// Beleuchtungsstärke in Lux, aufgeteilt in Ganzzahl und Zehntel
///
/// Faktor 0,192 lx/count gilt für Gain x1 und 100 ms Integrationszeit.
pub fn illuminance(sample: &Sample) -> (u32, u32) {
    let green = u32::from(sample.green);
    (green * 192 / 1000, (green * 192 / 100) % 10)
}

/// Farbtemperatur in Kelvin: `11179 * ((r + g) / b) ^ -0.805`
///
/// Bei `b == 0` wird `r + g + 1` als Verhältnis benutzt.
/// Liefert `None` wenn das Verhältnis 0 ist (keine sinnvolle Temperatur).
pub fn color_temperature(sample: &Sample) -> Option<u16> {
    let rg = u32::from(sample.red) + u32::from(sample.green);
    let ratio = if sample.blue < 1 {
        rg + 1
    } else {
        rg / u32::from(sample.blue)
    };
    if ratio == 0 {
        return None;
    }
    let cct = 11179.0_f32 * libm::powf(ratio as f32, -0.805);
    Some(cct as u16)
}

/// Normiert die Farbkanäle auf 8 Bit mit `clear` als Maximum
///
/// Ohne Licht (`clear == 0`) ist das Ergebnis schwarz.
pub fn color_from_sample(sample: &Sample) -> Color {
    if sample.clear == 0 {
        return crate::types::BLACK;
    }
    let clear = u32::from(sample.clear);
    let scale = |channel: u16| (u32::from(channel) * 255 / clear).min(255) as u8;
    Color {
        r: scale(sample.red),
        g: scale(sample.green),
        b: scale(sample.blue),
    }
}

/// Wandelt eine 8-Bit-Farbe ins RGB565-Format des Displays
pub fn rgb565(color: Color) -> u16 {
    let r = u16::from(color.r >> 3);
    let g = u16::from(color.g >> 2);
    let b = u16::from(color.b >> 3);
    (r << 11) | (g << 5) | b
}

/// Position des Schiebereglers (0..=59) für einen Kanalwert
pub fn slider_offset(level: u8) -> u8 {
    (u16::from(level) * 60 / 256) as u8
}

// ============================================================================
// LED Start-Animation
// ============================================================================

/// Farbverlauf beim Einschalten: R, RG, G, GB, B, RB, RGB, dann aus
///
/// Jeder Aufruf von `next()` liefert den nächsten Schritt,
/// der letzte Schritt ist immer schwarz.
#[derive(Debug, Clone)]
pub struct StartupAnimation {
    color: Color,
    brightness: u8,
    finished: bool,
}

impl StartupAnimation {
    pub fn new(brightness: u8) -> Self {
        Self {
            color: crate::types::BLACK,
            brightness,
            finished: brightness == 0,
        }
    }
}

impl Iterator for StartupAnimation {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        if self.finished {
            return None;
        }
        let max = self.brightness;
        let c = &mut self.color;
        if c.r < max && c.g == 0 && c.b == 0 {
            c.r += 1;
        } else if c.g < max && c.r == max && c.b == 0 {
            c.g += 1;
        } else if c.r > 0 && c.g == max && c.b == 0 {
            c.r -= 1;
        } else if c.b < max && c.g == max && c.r == 0 {
            c.b += 1;
        } else if c.g > 0 && c.b == max && c.r == 0 {
            c.g -= 1;
        } else if c.r < max && c.g == 0 && c.b == max {
            c.r += 1;
        } else if c.g < max && c.r == max && c.b == max {
            c.g += 1;
        } else {
            // Ausblenden, alle Kanäle sind hier gleich hell
            c.r = c.r.saturating_sub(1);
            c.g = c.g.saturating_sub(1);
            c.b = c.b.saturating_sub(1);
            if c.r <= 1 {
                *c = crate::types::BLACK;
                self.finished = true;
            }
        }
        Some(*c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BLACK;

    #[test]
    fn test_scale_bounds() {
        assert_eq!(scale_to_range(SCROLL_MIN, SCROLL_MAX, 0), 30);
        assert_eq!(scale_to_range(SCROLL_MIN, SCROLL_MAX, 255), 95);
        assert_eq!(scale_to_range(SCROLL_MIN, SCROLL_MAX, 4095), 95);
    }

    #[test]
    fn test_scale_never_leaves_range() {
        for raw in 0..=1024u16 {
            let s = scale_to_range(SCROLL_MIN, SCROLL_MAX, raw);
            assert!((SCROLL_MIN..=SCROLL_MAX).contains(&s), "raw {raw} -> {s}");
        }
    }

    #[test]
    fn test_scale_rounding() {
        // 30 + (65 * 128 + 127) / 255 = 30 + 33
        assert_eq!(scale_to_range(30, 95, 128), 63);
        // 30 + (65 * 2 + 127) / 255 = 30 + 1
        assert_eq!(scale_to_range(30, 95, 2), 31);
        assert_eq!(scale_to_range(30, 95, 1), 30);
    }

    #[test]
    fn test_item_bands() {
        assert_eq!(item_for_position(30), MenuItem::Measurement);
        assert_eq!(item_for_position(44), MenuItem::Measurement);
        assert_eq!(item_for_position(45), MenuItem::LuxCct);
        assert_eq!(item_for_position(64), MenuItem::LuxCct);
        assert_eq!(item_for_position(65), MenuItem::GetColor);
        assert_eq!(item_for_position(84), MenuItem::GetColor);
        assert_eq!(item_for_position(85), MenuItem::SetColor);
        assert_eq!(item_for_position(95), MenuItem::SetColor);
    }

    #[test]
    fn test_choice_threshold() {
        assert_eq!(choice_for_position(63), Choice::Back);
        assert_eq!(choice_for_position(64), Choice::Repeat);
        assert_eq!(choice_for_position(30), Choice::Back);
    }

    #[test]
    fn test_channel_from_raw_inverts() {
        assert_eq!(channel_from_raw(0), 255);
        assert_eq!(channel_from_raw(255), 0);
        assert_eq!(channel_from_raw(100), 155);
        assert_eq!(channel_from_raw(300), 0);
    }

    #[test]
    fn test_illuminance_tenths() {
        let sample = Sample {
            green: 1234,
            ..Default::default()
        };
        // 1234 * 0.192 = 236.928
        assert_eq!(illuminance(&sample), (236, 9));
    }

    #[test]
    fn test_color_temperature_ratio_one() {
        let sample = Sample {
            red: 50,
            green: 50,
            blue: 100,
            ..Default::default()
        };
        assert_eq!(color_temperature(&sample), Some(11179));
    }

    #[test]
    fn test_color_temperature_zero_blue() {
        let sample = Sample {
            red: 0,
            green: 0,
            blue: 0,
            ..Default::default()
        };
        // Verhältnis 0 + 0 + 1 = 1
        assert_eq!(color_temperature(&sample), Some(11179));
    }

    #[test]
    fn test_color_temperature_ratio_zero() {
        let sample = Sample {
            red: 1,
            green: 1,
            blue: 100,
            ..Default::default()
        };
        assert_eq!(color_temperature(&sample), None);
    }

    #[test]
    fn test_color_from_sample() {
        let sample = Sample {
            red: 100,
            green: 50,
            blue: 0,
            clear: 100,
            infrared: 7,
        };
        assert_eq!(color_from_sample(&sample), Color { r: 255, g: 127, b: 0 });
    }

    #[test]
    fn test_color_from_sample_dark() {
        let sample = Sample {
            red: 10,
            ..Default::default()
        };
        assert_eq!(color_from_sample(&sample), BLACK);
    }

    #[test]
    fn test_rgb565() {
        assert_eq!(rgb565(Color { r: 255, g: 0, b: 0 }), 0xF800);
        assert_eq!(rgb565(Color { r: 0, g: 255, b: 0 }), 0x07E0);
        assert_eq!(rgb565(Color { r: 0, g: 0, b: 255 }), 0x001F);
        assert_eq!(rgb565(Color { r: 255, g: 255, b: 255 }), 0xFFFF);
    }

    #[test]
    fn test_slider_offset() {
        assert_eq!(slider_offset(0), 0);
        assert_eq!(slider_offset(255), 59);
        assert_eq!(slider_offset(128), 30);
    }

    #[test]
    fn test_startup_animation_ends_black() {
        let steps: heapless::Vec<Color, 512> = StartupAnimation::new(30).collect();
        assert_eq!(steps.first(), Some(&Color { r: 1, g: 0, b: 0 }));
        assert_eq!(steps.last(), Some(&BLACK));
        assert!(steps.iter().any(|c| *c == Color { r: 30, g: 30, b: 30 }));
        assert!(steps.iter().all(|c| c.r <= 30 && c.g <= 30 && c.b <= 30));
    }

    #[test]
    fn test_startup_animation_zero_brightness() {
        assert_eq!(StartupAnimation::new(0).next(), None);
    }
}
