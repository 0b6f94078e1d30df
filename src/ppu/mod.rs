/*!
 * The PPU serves as an implementation for all the gameboy's graphics. It keeps the LCD timing in
 * step with the cpu, mirrors its state into the memory mapped registers, and once per frame
 * composites tile data into a framebuffer.
 */

pub(crate) mod base_ppu;
pub mod framebuffer;
pub mod lcd;
pub mod palette;
pub(crate) mod renderer;
pub mod tile;

pub use base_ppu::{BasePpu, PpuConfig, ViewMode};
pub use framebuffer::Framebuffer;
pub use lcd::{LcdControl, Mode};
pub use palette::Color;
pub use renderer::wrap_coordinate;

use crate::component::{Address, Addressable};

pub const LCDC: Address = 0xff40;
pub const STAT: Address = 0xff41;
pub const SCY: Address = 0xff42;
pub const SCX: Address = 0xff43;
pub const LY: Address = 0xff44;
pub const LYC: Address = 0xff45;
pub const BGP: Address = 0xff47;
pub const OBP0: Address = 0xff48;
pub const OBP1: Address = 0xff49;
pub const WY: Address = 0xff4a;
pub const WX: Address = 0xff4b;

pub const TILE_DATA_TABLE_0: Address = 0x8800;
pub const TILE_DATA_TABLE_1: Address = 0x8000;
pub const BACKGROUND_MAP_0: Address = 0x9800;
pub const BACKGROUND_MAP_1: Address = 0x9c00;
pub const WINDOW_MAP_0: Address = 0x9800;
pub const WINDOW_MAP_1: Address = 0x9c00;
pub const OAM_BASE: Address = 0xfe00;

/// The gameboy has room for 384 tiles in addresses 0x8000 to 0x97ff
pub const TILE_COUNT: usize = 384;
pub const OAM_ENTRIES: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileDataAddressingMethod {
    /// Tile ids 0..=255 starting at 0x8000
    Method8000,
    /// Signed tile ids around 0x9000, overlapping the upper half of `Method8000`
    Method8800,
}

impl TileDataAddressingMethod {
    pub fn from_lcdc(lcdc: &LcdControl) -> Self {
        if lcdc.bg_window_tile_data_area {
            TileDataAddressingMethod::Method8000
        } else {
            TileDataAddressingMethod::Method8800
        }
    }

    pub fn table(&self) -> Address {
        match self {
            TileDataAddressingMethod::Method8000 => TILE_DATA_TABLE_1,
            TileDataAddressingMethod::Method8800 => TILE_DATA_TABLE_0,
        }
    }

    pub fn tile_offset(&self) -> usize {
        match self {
            TileDataAddressingMethod::Method8000 => 0,
            TileDataAddressingMethod::Method8800 => 0xff,
        }
    }

    /// Translate a tile id read from a map (or OAM) into an index into the tile cache, which is
    /// always decoded from the 0x8000 table.
    ///
    /// With the 0x8800 method ids above 127 have 255 subtracted before the offset is added, so
    /// those ids land back on their own slot and ids 0..=127 land on slots 255..=382.
    pub fn adjust_tile_index(&self, tile_id: u8) -> usize {
        let tile_id = usize::from(tile_id);
        match self {
            TileDataAddressingMethod::Method8000 => tile_id,
            TileDataAddressingMethod::Method8800 => {
                if tile_id > 0x7f {
                    self.tile_offset() + tile_id - 0xff
                } else {
                    self.tile_offset() + tile_id
                }
            }
        }
    }
}

/// One 4 byte entry of the object attribute table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OamData {
    data: [u8; 4],
}

impl OamData {
    pub fn new(data: [u8; 4]) -> OamData {
        OamData { data }
    }

    /// Read entry `index` (0..40) of the table at OAM_BASE
    pub fn read(bus: &impl Addressable, index: usize) -> OamData {
        let base = OAM_BASE + index * 4;
        OamData::new([
            bus.read_u8(base),
            bus.read_u8(base + 1),
            bus.read_u8(base + 2),
            bus.read_u8(base + 3),
        ])
    }

    pub fn y_pos(&self) -> u8 {
        self.data[0]
    }

    pub fn x_pos(&self) -> u8 {
        self.data[1]
    }

    pub fn tile_index(&self) -> u8 {
        self.data[2]
    }

    pub fn palette_number(&self) -> u8 {
        self.data[3] >> 4 & 1
    }

    /// true iff horizontally mirrored
    pub fn x_flip(&self) -> bool {
        self.data[3] >> 5 & 1 == 1
    }

    /// true iff vertically mirrored
    pub fn y_flip(&self) -> bool {
        self.data[3] >> 6 & 1 == 1
    }

    /// false=No, true=BG and Window colors 1-3 over the OBJ
    pub fn bg_window_over_obj(&self) -> bool {
        self.data[3] >> 7 & 1 == 1
    }
}
