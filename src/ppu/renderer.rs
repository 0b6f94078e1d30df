use log::trace;

use crate::component::Addressable;

use super::base_ppu::ViewMode;
use super::framebuffer::Framebuffer;
use super::lcd::LcdControl;
use super::palette::{Palettes, VIEWPORT_OUTLINE};
use super::tile::TileCache;
use super::{
    OamData, TileDataAddressingMethod, BACKGROUND_MAP_0, BACKGROUND_MAP_1, LCDC, OAM_ENTRIES, SCX,
    SCY, WINDOW_MAP_0, WINDOW_MAP_1, WX, WY,
};

/// Visible screen size in tiles
const SCREEN_TILES_X: usize = 160 / 8;
const SCREEN_TILES_Y: usize = 144 / 8;
/// Tile maps are 32x32 tiles
const MAP_TILES: usize = 32;

/// Tile positions that scroll off the top or left by more than a tile come back in from the
/// other side of the 256 pixel background.
pub fn wrap_coordinate(position: i32) -> i32 {
    if position < -8 {
        position + 256
    } else {
        position
    }
}

/// Composites background, window and objects into a framebuffer once per frame
pub struct Renderer {
    tile_cache: TileCache,
    palettes: Palettes,
    framebuffer: Framebuffer,
    view_mode: ViewMode,
}

impl Renderer {
    pub fn new(view_mode: ViewMode) -> Self {
        let palettes = Palettes::default();
        let (width, height) = view_mode.dimensions();
        Self {
            tile_cache: TileCache::new(),
            framebuffer: Framebuffer::new(width, height, palettes.background.color(0)),
            palettes,
            view_mode,
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn tile_cache(&self) -> &TileCache {
        &self.tile_cache
    }

    pub fn palettes(&self) -> &Palettes {
        &self.palettes
    }

    /// Render a whole frame from the current contents of memory
    pub fn render(&mut self, bus: &impl Addressable) {
        self.palettes = Palettes::from_bus(bus);
        let background = self.palettes.background;

        self.tile_cache.refresh(bus, &background);
        self.framebuffer.fill(background.color(0));

        let lcdc = LcdControl::from(bus.read_u8(LCDC));
        let method = TileDataAddressingMethod::from_lcdc(&lcdc);

        match self.view_mode {
            ViewMode::Normal => self.render_normal(bus, &lcdc, method),
            ViewMode::Debug => self.render_debug(bus, &lcdc, method),
        }
    }

    fn blit_tile(&mut self, slot: usize, x: i32, y: i32) {
        if let Some(tile) = self.tile_cache.get(slot) {
            self.framebuffer.blit(tile, x, y);
        }
    }

    fn render_normal(
        &mut self,
        bus: &impl Addressable,
        lcdc: &LcdControl,
        method: TileDataAddressingMethod,
    ) {
        if !lcdc.lcd_ppu_enable {
            return;
        }

        let scroll_x = i32::from(bus.read_u8(SCX));
        let scroll_y = i32::from(bus.read_u8(SCY));
        let window_x = i32::from(bus.read_u8(WX));
        let window_y = i32::from(bus.read_u8(WY));

        if lcdc.bg_window_enable {
            let background_map = if lcdc.bg_tile_map_area {
                BACKGROUND_MAP_1
            } else {
                BACKGROUND_MAP_0
            };
            for tile_y in 0..SCREEN_TILES_Y {
                for tile_x in 0..SCREEN_TILES_X {
                    let tile_id = bus.read_u8(background_map + tile_y * MAP_TILES + tile_x);
                    let x = wrap_coordinate(tile_x as i32 * 8 - scroll_x);
                    let y = wrap_coordinate(tile_y as i32 * 8 - scroll_y);
                    self.blit_tile(method.adjust_tile_index(tile_id), x, y);
                }
            }
        }

        if lcdc.window_enable {
            let window_map = if lcdc.window_tile_map_area {
                WINDOW_MAP_1
            } else {
                WINDOW_MAP_0
            };
            for tile_y in 0..SCREEN_TILES_Y {
                for tile_x in 0..SCREEN_TILES_X {
                    let tile_id = bus.read_u8(window_map + tile_y * MAP_TILES + tile_x);
                    self.blit_tile(
                        method.adjust_tile_index(tile_id),
                        tile_x as i32 * 8 + window_x,
                        tile_y as i32 * 8 + window_y,
                    );
                }
            }
        }

        if lcdc.obj_enable {
            trace!("objects enabled, 8x{} mode", if lcdc.obj_size { 16 } else { 8 });
            // TODO: sort by x and cap at 10 objects per line, using OBP0/OBP1 and the flip flags
            for index in 0..OAM_ENTRIES {
                let object = OamData::read(bus, index);
                self.blit_tile(
                    method.adjust_tile_index(object.tile_index()),
                    i32::from(object.x_pos()),
                    i32::from(object.y_pos()),
                );
            }
        }
    }

    /// Draw the whole background map with the viewport outlined, and every cached tile to its
    /// right
    fn render_debug(
        &mut self,
        bus: &impl Addressable,
        lcdc: &LcdControl,
        method: TileDataAddressingMethod,
    ) {
        let background_map = if lcdc.bg_tile_map_area {
            BACKGROUND_MAP_1
        } else {
            BACKGROUND_MAP_0
        };
        for tile_y in 0..MAP_TILES {
            for tile_x in 0..MAP_TILES {
                let tile_id = bus.read_u8(background_map + tile_y * MAP_TILES + tile_x);
                self.blit_tile(
                    method.adjust_tile_index(tile_id),
                    tile_x as i32 * 8,
                    tile_y as i32 * 8,
                );
            }
        }

        let scroll_x = i32::from(bus.read_u8(SCX));
        let scroll_y = i32::from(bus.read_u8(SCY));
        self.framebuffer.draw_rect(scroll_x, scroll_y, 160, 144, VIEWPORT_OUTLINE);

        let map_width = (MAP_TILES * 8) as i32;
        for (slot, tile) in self.tile_cache.tiles().iter().enumerate() {
            let x = map_width + (slot % MAP_TILES) as i32 * 8;
            let y = (slot / MAP_TILES) as i32 * 8;
            self.framebuffer.blit(tile, x, y);
        }
    }
}
