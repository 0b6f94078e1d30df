use log::{error, info, trace};
use strum_macros::{Display, EnumIter, EnumString};

use crate::component::{Addressable, Steppable};
use crate::error::Result;
use crate::memory::PpuBus;
use crate::screen::Screen;

use super::framebuffer::Framebuffer;
use super::lcd::{DrawFrame, Lcd};
use super::palette::Palettes;
use super::renderer::Renderer;
use super::tile::TileCache;

/// Which framebuffer the ppu composites each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ViewMode {
    /// The 160x144 lcd as the game sees it
    #[default]
    Normal,
    /// A 512x256 view of the whole background map and all tile data. Runs even with the display
    /// switched off.
    Debug,
}

impl ViewMode {
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            ViewMode::Normal => (160, 144),
            ViewMode::Debug => (512, 256),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PpuConfig {
    pub view_mode: ViewMode,
}

pub struct BasePpu {
    lcd: Lcd,
    renderer: Renderer,
    /// None when running headless
    screen: Option<Box<dyn Screen>>,
    config: PpuConfig,
    frame_count: u64,
}

impl BasePpu {
    pub fn new(config: PpuConfig, screen: Option<Box<dyn Screen>>) -> Self {
        info!(
            "creating ppu: {} view, {}",
            config.view_mode,
            if screen.is_some() { "with screen" } else { "headless" }
        );
        Self {
            lcd: Lcd::new(config.view_mode == ViewMode::Debug),
            renderer: Renderer::new(config.view_mode),
            screen,
            config,
            frame_count: 0,
        }
    }

    pub fn headless(config: PpuConfig) -> Self {
        Self::new(config, None)
    }

    /// Advance one machine cycle. Returns false if the run should stop because the frame could
    /// not be presented.
    pub fn tick<B: PpuBus>(&mut self, bus: &mut B) -> bool {
        match self.step(bus) {
            Ok(()) => true,
            Err(e) => {
                error!("halting: {}", e);
                false
            }
        }
    }

    /// Composite one frame from memory and hand it to the screen, if there is one
    pub fn draw(&mut self, bus: &impl Addressable) -> Result<()> {
        self.renderer.render(bus);
        self.frame_count += 1;
        trace!("drew frame {}", self.frame_count);

        if let Some(screen) = self.screen.as_mut() {
            screen.present(self.renderer.framebuffer())?;
        }
        Ok(())
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        self.renderer.framebuffer()
    }

    pub fn tile_cache(&self) -> &TileCache {
        self.renderer.tile_cache()
    }

    /// Palettes resolved for the most recent frame
    pub fn palettes(&self) -> &Palettes {
        self.renderer.palettes()
    }

    /// Number of frames composited since power on
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn cycle(&self) -> u32 {
        self.lcd.cycle()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.config.view_mode
    }
}

impl<B: PpuBus> Steppable<B> for BasePpu {
    fn step(&mut self, bus: &mut B) -> Result<()> {
        if let Some(DrawFrame) = self.lcd.step(bus) {
            self.draw(&*bus)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::memory::MemoryBus;
    use crate::ppu::lcd::{CYCLES_PER_FRAME, DRAWING_START};
    use crate::ppu::LCDC;
    use crate::screen::NoGuiScreen;
    use std::str::FromStr;

    struct BrokenScreen;

    impl Screen for BrokenScreen {
        fn present(&mut self, _frame: &Framebuffer) -> Result<()> {
            Err(Error::from_presentation("no display".to_string()))
        }
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!(Ok(ViewMode::Debug), ViewMode::from_str("debug"));
        assert_eq!(Ok(ViewMode::Normal), ViewMode::from_str("normal"));
        assert!(ViewMode::from_str("tiles").is_err());
        assert_eq!("debug", ViewMode::Debug.to_string());
    }

    #[test]
    fn test_framebuffer_size_follows_view_mode() {
        let ppu = BasePpu::headless(PpuConfig::default());
        assert_eq!(160, ppu.framebuffer().width());
        let ppu = BasePpu::headless(PpuConfig {
            view_mode: ViewMode::Debug,
        });
        assert_eq!((512, 256), (ppu.framebuffer().width(), ppu.framebuffer().height()));
        assert_eq!(ViewMode::Debug, ppu.view_mode());
    }

    #[test]
    fn test_presentation_failure_halts() {
        let mut bus = MemoryBus::new();
        bus.write_u8(LCDC, 0x91);
        let mut ppu = BasePpu::new(PpuConfig::default(), Some(Box::new(BrokenScreen)));
        for _ in 0..DRAWING_START {
            assert!(ppu.tick(&mut bus));
        }
        assert!(!ppu.tick(&mut bus));
        assert_eq!(1, ppu.frame_count());
    }

    #[test]
    fn test_no_gui_screen_accepts_every_frame() {
        let mut bus = MemoryBus::new();
        bus.write_u8(LCDC, 0x91);
        let mut ppu = BasePpu::new(PpuConfig::default(), Some(Box::new(NoGuiScreen::new())));
        for _ in 0..2 * CYCLES_PER_FRAME {
            assert!(ppu.tick(&mut bus));
        }
        assert_eq!(2, ppu.frame_count());
    }

    #[test]
    fn test_headless_draws_every_frame() {
        let mut bus = MemoryBus::new();
        bus.write_u8(LCDC, 0x91);
        let mut ppu = BasePpu::headless(PpuConfig::default());
        for _ in 0..3 * CYCLES_PER_FRAME {
            assert!(ppu.tick(&mut bus));
        }
        assert_eq!(3, ppu.frame_count());
        assert_eq!(1, ppu.tile_cache().rebuild_count());
    }
}
