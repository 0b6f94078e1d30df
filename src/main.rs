use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use gameboy_ppu::ppu::lcd::CYCLES_PER_FRAME;
use gameboy_ppu::ppu::{BACKGROUND_MAP_0, BGP, LCDC, TILE_DATA_TABLE_1};
use gameboy_ppu::{Addressable, BasePpu, MemoryBus, NoGuiScreen, PpuConfig, Screen, ViewMode};

/// Run the ppu against a VRAM dump (or a built in test pattern) for a number of frames
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of frames to run
    #[arg(short, long, default_value_t = 60)]
    frames: u64,

    /// Framebuffer to composite: normal or debug
    #[arg(long, default_value_t = ViewMode::Normal)]
    view: ViewMode,

    /// Raw VRAM dump loaded at 0x8000
    #[arg(long)]
    vram: Option<PathBuf>,

    /// LCDC register value
    #[arg(long, default_value = "0x91", value_parser = parse_byte)]
    lcdc: u8,

    /// BGP register value
    #[arg(long, default_value = "0xfc", value_parser = parse_byte)]
    bgp: u8,

    /// Show frames in a window
    #[arg(short, long, default_value_t = false)]
    window: bool,
}

fn parse_byte(value: &str) -> Result<u8, String> {
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("{}: {}", value, e))
}

/// Four striped tiles laid out as a checkerboard over the background map
fn load_test_pattern(memory_bus: &mut MemoryBus) {
    for tile in 1..4usize {
        let low = if tile & 1 == 1 { 0xaa } else { 0x00 };
        let high = if tile & 2 == 2 { 0x55 } else { 0x00 };
        let rows: Vec<u8> = [low, high].repeat(8);
        memory_bus.load(TILE_DATA_TABLE_1 + tile * 16, &rows);
    }
    for y in 0..32 {
        for x in 0..32 {
            memory_bus.write_u8(BACKGROUND_MAP_0 + y * 32 + x, ((x + y) % 4) as u8);
        }
    }
}

#[cfg(feature = "window")]
fn open_screen(view: ViewMode) -> Result<Box<dyn Screen>, String> {
    let (width, height) = view.dimensions();
    let screen = gameboy_ppu::screen::PixelsScreen::new(width as u32, height as u32, 2)
        .map_err(|e| e.to_string())?;
    Ok(Box::new(screen))
}

#[cfg(not(feature = "window"))]
fn open_screen(_view: ViewMode) -> Result<Box<dyn Screen>, String> {
    warn!("built without the window feature, running headless");
    Ok(Box::new(NoGuiScreen::new()))
}

fn main() -> Result<(), String> {
    env_logger::init();

    let args = Args::parse();

    let mut memory_bus = MemoryBus::new();
    match &args.vram {
        Some(path) => {
            let bytes = fs::read(path).map_err(|e| format!("{}: {}", path.display(), e))?;
            if bytes.len() > 0x2000 {
                warn!("vram dump is {} bytes, only the first 8KiB is used", bytes.len());
            }
            memory_bus.load(TILE_DATA_TABLE_1, &bytes[..bytes.len().min(0x2000)]);
        }
        None => load_test_pattern(&mut memory_bus),
    }
    memory_bus.write_u8(LCDC, args.lcdc);
    memory_bus.write_u8(BGP, args.bgp);

    let screen: Box<dyn Screen> = if args.window {
        open_screen(args.view)?
    } else {
        Box::new(NoGuiScreen::new())
    };
    let mut ppu = BasePpu::new(PpuConfig { view_mode: args.view }, Some(screen));

    let total_cycles = u64::from(CYCLES_PER_FRAME) * args.frames;
    for _ in 0..total_cycles {
        if !ppu.tick(&mut memory_bus) {
            break;
        }
    }

    info!(
        "drew {} frames, {} tile cache rebuilds",
        ppu.frame_count(),
        ppu.tile_cache().rebuild_count()
    );
    println!("{} frames drawn", ppu.frame_count());
    Ok(())
}
