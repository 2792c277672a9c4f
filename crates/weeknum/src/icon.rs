//! Procedurally drawn week-number icon: two large digits on a transparent
//! background, white in dark mode and black in light mode.

use weeknum_core::Mode;

pub const ICON_SIZE: u32 = 32;

// 5x7 digit glyphs, one row per byte, low 5 bits used.
#[rustfmt::skip]
const DIGITS: [[u8; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // 2
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // 9
];

const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;
const SCALE: u32 = 2;
const GAP: u32 = 2;

/// Renders the two-digit week (leading zero kept) as a 32x32 RGBA image.
pub fn week_icon_rgba(week: u32, mode: Mode) -> Vec<u8> {
    let fg: [u8; 4] = if mode.is_dark() {
        [0xFF, 0xFF, 0xFF, 0xFF]
    } else {
        [0x00, 0x00, 0x00, 0xFF]
    };

    let mut rgba = vec![0u8; (ICON_SIZE * ICON_SIZE * 4) as usize];
    let digits = [(week / 10) % 10, week % 10];

    let text_w = 2 * GLYPH_W * SCALE + GAP;
    let text_h = GLYPH_H * SCALE;
    let x0 = (ICON_SIZE - text_w) / 2;
    let y0 = (ICON_SIZE - text_h) / 2;

    for (i, digit) in digits.into_iter().enumerate() {
        let glyph = &DIGITS[digit as usize];
        let gx = x0 + i as u32 * (GLYPH_W * SCALE + GAP);
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (1 << (GLYPH_W - 1 - col)) == 0 {
                    continue;
                }
                for dy in 0..SCALE {
                    for dx in 0..SCALE {
                        let x = gx + col * SCALE + dx;
                        let y = y0 + row as u32 * SCALE + dy;
                        let offset = ((y * ICON_SIZE + x) * 4) as usize;
                        rgba[offset..offset + 4].copy_from_slice(&fg);
                    }
                }
            }
        }
    }

    rgba
}

/// The same image as a window icon.
pub fn viewport_icon(week: u32, mode: Mode) -> egui::IconData {
    egui::IconData {
        rgba: week_icon_rgba(week, mode),
        width: ICON_SIZE,
        height: ICON_SIZE,
    }
}
