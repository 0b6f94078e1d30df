use crate::component::Addressable;

use super::{BGP, OBP0, OBP1};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

/// The four shades of the dmg lcd, lightest first
pub const SHADES: [Color; 4] = [
    Color::rgb(0x9b, 0xbc, 0x0f),
    Color::rgb(0x8b, 0xac, 0x0f),
    Color::rgb(0x30, 0x62, 0x30),
    Color::rgb(0x0f, 0x38, 0x0f),
];

/// Outline of the viewport in the debug view
pub const VIEWPORT_OUTLINE: Color = Color::rgb(0xff, 0x00, 0x00);

pub struct PaletteRegister {
    pub register_value: u8, // ff47, ff48, or ff49
}

impl PaletteRegister {
    pub fn map_index(&self, index: u8) -> Color {
        let shade = match index & 0b11 {
            0 => self.register_value & 0b11,
            1 => (self.register_value >> 2) & 0b11,
            2 => (self.register_value >> 4) & 0b11,
            _ => (self.register_value >> 6) & 0b11,
        };
        SHADES[usize::from(shade)]
    }

    pub fn palette(&self) -> Palette {
        Palette([
            self.map_index(0),
            self.map_index(1),
            self.map_index(2),
            self.map_index(3),
        ])
    }
}

/// Colour lookup for the four 2-bit colour indices of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette(pub [Color; 4]);

impl Palette {
    pub fn color(&self, index: u8) -> Color {
        self.0[usize::from(index & 0b11)]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette(SHADES)
    }
}

/// The background and both object palettes, as decoded from BGP, OBP0 and OBP1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palettes {
    pub background: Palette,
    pub object_0: Palette,
    pub object_1: Palette,
}

impl Palettes {
    pub fn from_bus(bus: &impl Addressable) -> Self {
        let decode = |address| {
            PaletteRegister {
                register_value: bus.read_u8(address),
            }
            .palette()
        };
        Self {
            background: decode(BGP),
            object_0: decode(OBP0),
            object_1: decode(OBP1),
        }
    }
}
