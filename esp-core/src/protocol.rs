//! Serielles Zeilen-Protokoll
//!
//! ASCII, Zeilen mit `\r\n` abgeschlossen, Präfixe case-sensitive:
//!
//! - `MEA:<red>,<green>,<blue>,<infrared>,<clear>` meldet eine Messung
//! - `COL:<red>,<green>,<blue>` setzt eine LED-Farbe
//!
//! Felder werden wie bei `scanf` gelesen: beim ersten Feld das nicht passt
//! bricht das Lesen ab, dieses und alle folgenden Felder bleiben 0.

use crate::types::{Color, Sample};

/// Präfix einer Messwert-Zeile
pub const MEASUREMENT_PREFIX: &[u8; 4] = b"MEA:";

/// Präfix einer Farb-Zeile
pub const COLOR_PREFIX: &[u8; 4] = b"COL:";

/// Standard-Meldung nach einem Empfangsüberlauf
pub const OVERRUN_DIAGNOSTIC: &str = "ERR:\r\n";

/// Eine erkannte Befehlszeile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Messung von der Gegenstelle
    Measurement(Sample),
    /// Neue LED-Farbe
    SetColor(Color),
}

// RGB8 hat kein defmt::Format, daher von Hand
#[cfg(feature = "defmt")]
impl defmt::Format for Command {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Command::Measurement(sample) => defmt::write!(fmt, "Measurement({})", sample),
            Command::SetColor(color) => {
                defmt::write!(fmt, "SetColor({}, {}, {})", color.r, color.g, color.b)
            }
        }
    }
}

/// Klassifiziert und parst eine empfangene Zeile
///
/// Liefert `None` für alles ohne bekanntes Präfix.
pub fn parse_line(line: &[u8]) -> Option<Command> {
    if let Some(rest) = line.strip_prefix(MEASUREMENT_PREFIX.as_slice()) {
        let mut fields = [0u16; 5];
        let mut scanner = Scanner::new(rest);
        scanner.fields(&mut fields, Scanner::unsigned);
        // Wire-Reihenfolge: red, green, blue, infrared, clear
        let [red, green, blue, infrared, clear] = fields;
        return Some(Command::Measurement(Sample {
            red,
            green,
            blue,
            clear,
            infrared,
        }));
    }

    if let Some(rest) = line.strip_prefix(COLOR_PREFIX.as_slice()) {
        let mut fields = [0u8; 3];
        let mut scanner = Scanner::new(rest);
        scanner.fields(&mut fields, Scanner::integer);
        let [r, g, b] = fields;
        return Some(Command::SetColor(Color { r, g, b }));
    }

    None
}

// ============================================================================
// Scanner (Teilmenge von scanf: %u, %i, ',')
// ============================================================================

/// Integer-Typen die durch Abschneiden aus einem `i64` entstehen
trait Truncate: Copy {
    fn truncate(value: i64) -> Self;
}

impl Truncate for u8 {
    fn truncate(value: i64) -> Self {
        value as u8
    }
}

impl Truncate for u16 {
    fn truncate(value: i64) -> Self {
        value as u16
    }
}

struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Liest kommagetrennte Felder bis zum ersten Fehler
    fn fields<T: Truncate>(&mut self, out: &mut [T], conv: fn(&mut Self) -> Option<i64>) {
        for (index, slot) in out.iter_mut().enumerate() {
            if index > 0 && !self.literal(b',') {
                return;
            }
            match conv(self) {
                Some(value) => *slot = T::truncate(value),
                None => return,
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn literal(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn sign(&mut self) -> bool {
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        }
    }

    fn digits(&mut self, radix: u32) -> Option<i64> {
        let start = self.pos;
        let mut value: i64 = 0;
        while let Some(digit) = self.peek().and_then(|b| (b as char).to_digit(radix)) {
            value = value
                .saturating_mul(i64::from(radix))
                .saturating_add(i64::from(digit));
            self.pos += 1;
        }
        (self.pos > start).then_some(value)
    }

    /// `%u`: optionales Vorzeichen, dezimal
    fn unsigned(&mut self) -> Option<i64> {
        self.skip_whitespace();
        let negative = self.sign();
        let value = self.digits(10)?;
        Some(if negative { value.wrapping_neg() } else { value })
    }

    /// `%i`: optionales Vorzeichen, `0x` hex, führende `0` oktal, sonst dezimal
    fn integer(&mut self) -> Option<i64> {
        self.skip_whitespace();
        let negative = self.sign();
        let value = if self.peek() == Some(b'0') {
            self.pos += 1;
            let hex_prefix = matches!(self.peek(), Some(b'x' | b'X'));
            let hex_digit = self
                .input
                .get(self.pos + 1)
                .is_some_and(|b| b.is_ascii_hexdigit());
            if hex_prefix && hex_digit {
                self.pos += 1;
                self.digits(16)?
            } else {
                self.digits(8).unwrap_or(0)
            }
        } else {
            self.digits(10)?
        };
        Some(if negative { value.wrapping_neg() } else { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_wire_order() {
        let cmd = parse_line(b"MEA:10,20,30,40,50\r\n");
        assert_eq!(
            cmd,
            Some(Command::Measurement(Sample {
                red: 10,
                green: 20,
                blue: 30,
                infrared: 40,
                clear: 50,
            }))
        );
    }

    #[test]
    fn test_color_line() {
        let cmd = parse_line(b"COL:255,0,128\r\n");
        assert_eq!(cmd, Some(Command::SetColor(Color { r: 255, g: 0, b: 128 })));
    }

    #[test]
    fn test_color_radix_prefixes() {
        let cmd = parse_line(b"COL:0x1F,010,+7\r\n");
        assert_eq!(cmd, Some(Command::SetColor(Color { r: 31, g: 8, b: 7 })));
    }

    #[test]
    fn test_color_truncates_to_eight_bits() {
        let cmd = parse_line(b"COL:256,-1,300\r\n");
        assert_eq!(cmd, Some(Command::SetColor(Color { r: 0, g: 255, b: 44 })));
    }

    #[test]
    fn test_partial_fields_stay_zero() {
        let cmd = parse_line(b"MEA:1,2,x,4,5\r\n");
        assert_eq!(
            cmd,
            Some(Command::Measurement(Sample {
                red: 1,
                green: 2,
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_missing_separator_stops() {
        let cmd = parse_line(b"COL:12;34,56");
        assert_eq!(cmd, Some(Command::SetColor(Color { r: 12, g: 0, b: 0 })));
    }

    #[test]
    fn test_leading_whitespace_in_field() {
        let cmd = parse_line(b"COL: 1, 2, 3\r\n");
        assert_eq!(cmd, Some(Command::SetColor(Color { r: 1, g: 2, b: 3 })));
    }

    #[test]
    fn test_unknown_prefix_ignored() {
        assert_eq!(parse_line(b"HELLO\r\n"), None);
        assert_eq!(parse_line(b"mea:1,2,3,4,5"), None);
        assert_eq!(parse_line(b"ME"), None);
        assert_eq!(parse_line(b""), None);
    }

    #[test]
    fn test_bare_prefix_yields_zeros() {
        assert_eq!(
            parse_line(b"MEA:\r\n"),
            Some(Command::Measurement(Sample::default()))
        );
    }

    #[test]
    fn test_zero_then_x_without_digits() {
        // "0x" ohne Hex-Ziffer: nur die 0 wird gelesen, dann fehlt das Komma
        let cmd = parse_line(b"COL:0xZ,5,5");
        assert_eq!(cmd, Some(Command::SetColor(Color { r: 0, g: 0, b: 0 })));
    }
}
