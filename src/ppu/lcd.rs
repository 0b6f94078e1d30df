use log::trace;
use strum_macros::{Display, EnumIter};

use crate::interrupt::Interrupt;
use crate::memory::PpuBus;
use crate::utils::BitField;

use super::{LCDC, LY, LYC, STAT};

/// Dot-groups (machine cycles) per scanline
pub const CYCLES_PER_LINE: u32 = 114;
/// Scanlines per frame, including vblank
pub const LINES_PER_FRAME: u32 = 154;
pub const CYCLES_PER_FRAME: u32 = CYCLES_PER_LINE * LINES_PER_FRAME;
pub const VISIBLE_LINES: u32 = 144;

pub const OAM_SCAN_START: u32 = 0;
pub const DRAWING_START: u32 = 20;
pub const HBLANK_START: u32 = 63;

// STAT bits
pub const STAT_LYC_INTERRUPT: usize = 6;
pub const STAT_OAM_INTERRUPT: usize = 5;
pub const STAT_VBLANK_INTERRUPT: usize = 4;
pub const STAT_HBLANK_INTERRUPT: usize = 3;
pub const STAT_LYC_EQUAL: usize = 2;
pub const STAT_MODE_MASK: u8 = 0b11;

/// Represents the LCD Control register at 0xff40
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LcdControl {
    pub bg_window_enable: bool,
    pub obj_enable: bool,
    pub obj_size: bool,
    pub bg_tile_map_area: bool,
    pub bg_window_tile_data_area: bool,
    pub window_enable: bool,
    pub window_tile_map_area: bool,
    pub lcd_ppu_enable: bool,
}

impl LcdControl {
    pub fn read(&self) -> u8 {
        (self.bg_window_enable as u8)
            | (self.obj_enable as u8) << 1
            | (self.obj_size as u8) << 2
            | (self.bg_tile_map_area as u8) << 3
            | (self.bg_window_tile_data_area as u8) << 4
            | (self.window_enable as u8) << 5
            | (self.window_tile_map_area as u8) << 6
            | (self.lcd_ppu_enable as u8) << 7
    }

    pub fn write(&mut self, value: u8) {
        self.bg_window_enable = (value >> 0) & 1 == 1;
        self.obj_enable = (value >> 1) & 1 == 1;
        self.obj_size = (value >> 2) & 1 == 1;
        self.bg_tile_map_area = (value >> 3) & 1 == 1;
        self.bg_window_tile_data_area = (value >> 4) & 1 == 1;
        self.window_enable = (value >> 5) & 1 == 1;
        self.window_tile_map_area = (value >> 6) & 1 == 1;
        self.lcd_ppu_enable = (value >> 7) & 1 == 1;
    }
}

impl From<u8> for LcdControl {
    fn from(value: u8) -> Self {
        let mut lcdc = LcdControl::default();
        lcdc.write(value);
        lcdc
    }
}

/// The value held in the low two bits of STAT
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display, EnumIter)]
#[repr(u8)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Drawing = 3,
}

impl Mode {
    pub fn from_stat(stat: u8) -> Mode {
        match stat & STAT_MODE_MASK {
            0 => Mode::HBlank,
            1 => Mode::VBlank,
            2 => Mode::OamScan,
            _ => Mode::Drawing,
        }
    }

    /// STAT bit that enables an interrupt on entering this mode
    fn interrupt_enable_bit(&self) -> Option<usize> {
        match self {
            Mode::HBlank => Some(STAT_HBLANK_INTERRUPT),
            Mode::VBlank => Some(STAT_VBLANK_INTERRUPT),
            Mode::OamScan => Some(STAT_OAM_INTERRUPT),
            Mode::Drawing => None,
        }
    }
}

/// Returned from `Lcd::step` when the whole frame should be composited now
#[derive(Debug, PartialEq, Eq)]
pub struct DrawFrame;

/// Split a frame cycle into (lx, ly)
pub fn position(cycle: u32) -> (u32, u32) {
    (cycle % CYCLES_PER_LINE, (cycle / CYCLES_PER_LINE) % LINES_PER_FRAME)
}

pub struct Lcd {
    /// Cycle within the current frame, 0..CYCLES_PER_FRAME
    cycle: u32,
    /// Keep running while LCDC has the display switched off
    always_on: bool,
}

impl Lcd {
    pub fn new(always_on: bool) -> Lcd {
        Lcd {
            cycle: 0,
            always_on,
        }
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    fn check_ly_equals_lyc<B: PpuBus>(&self, bus: &mut B) {
        let mut stat = BitField(bus.read_u8(STAT));
        if bus.read_u8(LY) == bus.read_u8(LYC) {
            if stat.get_bit(STAT_LYC_INTERRUPT) {
                bus.interrupt(Interrupt::Stat);
            }
            stat.set_bit(STAT_LYC_EQUAL, true);
        } else {
            stat.set_bit(STAT_LYC_EQUAL, false);
        }
        bus.write_u8(STAT, stat.0);
    }

    fn change_mode<B: PpuBus>(&self, bus: &mut B, mode: Mode) {
        let mut stat = BitField(bus.read_u8(STAT));
        stat.set_masked(STAT_MODE_MASK, mode as u8);
        bus.write_u8(STAT, stat.0);
        trace!("mode {} at cycle {}", mode, self.cycle);

        if let Some(bit) = mode.interrupt_enable_bit() {
            if stat.get_bit(bit) {
                bus.interrupt(Interrupt::Stat);
            }
        }
    }

    pub fn step<B: PpuBus>(&mut self, bus: &mut B) -> Option<DrawFrame> {
        let cycle = self.cycle;
        self.cycle = (self.cycle + 1) % CYCLES_PER_FRAME;

        // STOP halts all LCD activity until the cpu wakes up
        if bus.cpu_stopped() {
            return None;
        }

        let lcdc = LcdControl::from(bus.read_u8(LCDC));
        if !lcdc.lcd_ppu_enable {
            bus.write_u8(LY, 0);
            if !self.always_on {
                return None;
            }
        }

        let (lx, ly) = position(cycle);
        bus.write_u8(LY, ly as u8);

        self.check_ly_equals_lyc(bus);

        let mut draw = None;
        if ly < VISIBLE_LINES {
            match lx {
                OAM_SCAN_START => self.change_mode(bus, Mode::OamScan),
                DRAWING_START => {
                    self.change_mode(bus, Mode::Drawing);
                    // The whole screen is drawn in one pass as line 0 starts drawing
                    if ly == 0 {
                        draw = Some(DrawFrame);
                    }
                }
                HBLANK_START => self.change_mode(bus, Mode::HBlank),
                _ => (),
            }
        } else if ly == VISIBLE_LINES && lx == 0 {
            self.change_mode(bus, Mode::VBlank);
            bus.interrupt(Interrupt::VBlank);
        }

        draw
    }
}
