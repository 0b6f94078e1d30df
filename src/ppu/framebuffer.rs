use super::palette::Color;
use super::tile::Tile;

/// A grid of pixels, row-major. Drawing positions are signed and clipped to the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Copy an 8x8 tile with its top left corner at (x, y)
    pub fn blit(&mut self, tile: &Tile, x: i32, y: i32) {
        for tile_y in 0..8u8 {
            for tile_x in 0..8u8 {
                self.set_pixel(
                    x + i32::from(tile_x),
                    y + i32::from(tile_y),
                    tile.get_pixel(tile_x, tile_y),
                );
            }
        }
    }

    /// Draw a one pixel wide outline whose outer edge covers `width` x `height` pixels
    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        if width <= 0 || height <= 0 {
            return;
        }
        let right = x + width - 1;
        let bottom = y + height - 1;
        for col in x..=right {
            self.set_pixel(col, y, color);
            self.set_pixel(col, bottom, color);
        }
        for row in y..=bottom {
            self.set_pixel(x, row, color);
            self.set_pixel(right, row, color);
        }
    }

    /// Flatten into RGBA8 bytes
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|color| color.to_rgba()).collect()
    }
}
