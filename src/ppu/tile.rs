use log::debug;

use crate::component::Addressable;

use super::palette::{Color, Palette};
use super::{TILE_COUNT, TILE_DATA_TABLE_1};

/// Each tile occupies 16 bytes: 8 rows of two bitplane bytes
pub const TILE_BYTES: usize = 16;

/// Decoded tile data baked against a palette, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile([Color; 64]);

impl Tile {
    /// Decode 16 raw bytes into 64 colour indices from 0 to 3. The first byte of each row is
    /// the low bitplane and the most significant bit is the leftmost pixel.
    pub fn decode_indices(raw: &[u8]) -> [u8; 64] {
        let mut indices = [0; 64];
        for (row, bytes) in raw.chunks_exact(2).take(8).enumerate() {
            let low_byte = bytes[0];
            let high_byte = bytes[1];
            for x in 0..8 {
                let low_bit = (low_byte >> (7 - x)) & 1;
                let high_bit = (high_byte >> (7 - x)) & 1;
                indices[row * 8 + x] = (high_bit << 1) | low_bit;
            }
        }
        indices
    }

    pub fn decode(raw: &[u8], palette: &Palette) -> Tile {
        let indices = Tile::decode_indices(raw);
        let mut pixels = [palette.color(0); 64];
        for (pixel, index) in pixels.iter_mut().zip(indices) {
            *pixel = palette.color(index);
        }
        Tile(pixels)
    }

    pub fn get_pixel(&self, x: u8, y: u8) -> Color {
        self.0[usize::from(x) + 8 * usize::from(y)]
    }
}

/// Cache of decoded tiles for the 384 slots at 0x8000-0x97ff.
///
/// The cache is rebuilt as a whole, and only when the raw tile data differs from the bytes it was
/// last built from. Tiles keep the palette that was active at that rebuild.
pub struct TileCache {
    tiles: Vec<Tile>,
    last_tile_data: Vec<u8>,
    rebuild_count: u64,
}

impl TileCache {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            last_tile_data: Vec::new(),
            rebuild_count: 0,
        }
    }

    /// Compare the tile data in memory against the last snapshot and rebuild every slot with
    /// `palette` if anything changed. Returns true if a rebuild happened.
    pub fn refresh(&mut self, bus: &impl Addressable, palette: &Palette) -> bool {
        let tile_data = bus.read_range(TILE_DATA_TABLE_1, TILE_COUNT * TILE_BYTES);
        if tile_data == self.last_tile_data {
            return false;
        }

        self.rebuild(tile_data, palette);
        true
    }

    fn rebuild(&mut self, tile_data: Vec<u8>, palette: &Palette) {
        self.tiles = tile_data
            .chunks_exact(TILE_BYTES)
            .map(|raw| Tile::decode(raw, palette))
            .collect();
        self.last_tile_data = tile_data;
        self.rebuild_count += 1;
        debug!("rebuilt tile cache ({} rebuilds)", self.rebuild_count);
    }

    pub fn get(&self, slot: usize) -> Option<&Tile> {
        self.tiles.get(slot)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }
}

impl Default for TileCache {
    fn default() -> Self {
        Self::new()
    }
}
