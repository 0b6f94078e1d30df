mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{run_frames, CountingScreen, RecordingBus};
use gameboy_ppu::ppu::lcd::{position, CYCLES_PER_FRAME, CYCLES_PER_LINE};
use gameboy_ppu::ppu::{Mode, BGP, LCDC, LY, LYC, STAT};
use gameboy_ppu::{Addressable, BasePpu, Interrupt, PpuConfig, ViewMode};

const STAT_LYC_EQUAL: u8 = 1 << 2;

fn enabled_bus(lcdc: u8) -> RecordingBus {
    let mut bus = RecordingBus::new();
    bus.write_u8(LCDC, lcdc);
    bus
}

#[test]
fn test_ly_follows_cycle() {
    let mut bus = enabled_bus(0x91);
    let mut ppu = BasePpu::headless(PpuConfig::default());
    for _ in 0..2 * CYCLES_PER_FRAME {
        let (_, ly) = position(ppu.cycle());
        assert!(ppu.tick(&mut bus));
        assert_eq!(ly as u8, bus.read_u8(LY));
    }
    assert_eq!(0, ppu.cycle());
}

#[test]
fn test_mode_sequence() {
    let mut bus = enabled_bus(0x91);
    let mut ppu = BasePpu::headless(PpuConfig::default());
    for _ in 0..CYCLES_PER_FRAME {
        let (lx, ly) = position(ppu.cycle());
        ppu.tick(&mut bus);
        let mode = Mode::from_stat(bus.read_u8(STAT));
        let expected = match (lx, ly) {
            (_, 144..=153) => Mode::VBlank,
            (0..=19, _) => Mode::OamScan,
            (20..=62, _) => Mode::Drawing,
            _ => Mode::HBlank,
        };
        assert_eq!(expected, mode, "lx {} ly {}", lx, ly);
    }
}

#[test]
fn test_lyc_equal_bit_tracks_ly() {
    let mut bus = enabled_bus(0x91);
    bus.write_u8(LYC, 77);
    let mut ppu = BasePpu::headless(PpuConfig::default());
    for cycle in 0..CYCLES_PER_FRAME {
        if cycle == 100 * CYCLES_PER_LINE {
            bus.write_u8(LYC, 150);
        }
        ppu.tick(&mut bus);
        let equal = bus.read_u8(LY) == bus.read_u8(LYC);
        assert_eq!(equal, bus.read_u8(STAT) & STAT_LYC_EQUAL != 0);
    }
    // no interrupt without the enable bit
    assert_eq!(0, bus.count(Interrupt::Stat));
}

#[test]
fn test_lyc_interrupt_every_cycle_of_matching_line() {
    let mut bus = enabled_bus(0x91);
    bus.write_u8(LYC, 10);
    bus.write_u8(STAT, 1 << 6);
    let mut ppu = BasePpu::headless(PpuConfig::default());
    run_frames(&mut ppu, &mut bus, 1);
    assert_eq!(CYCLES_PER_LINE as usize, bus.count(Interrupt::Stat));
}

#[test]
fn test_vblank_once_per_frame_at_line_144() {
    let mut bus = enabled_bus(0x91);
    let mut ppu = BasePpu::headless(PpuConfig::default());
    let mut fired_at = Vec::new();
    for _ in 0..3 * CYCLES_PER_FRAME {
        let cycle = ppu.cycle();
        let before = bus.count(Interrupt::VBlank);
        ppu.tick(&mut bus);
        if bus.count(Interrupt::VBlank) > before {
            fired_at.push(position(cycle));
        }
    }
    assert_eq!(vec![(0, 144); 3], fired_at);
    assert_ne!(0, bus.memory.interrupt_regs().interrupt_flag & 1);
}

#[test]
fn test_mode_interrupt_enables() {
    for (stat, expected) in [(1 << 5, 144), (1 << 3, 144), (1 << 4, 1), (0, 0)] {
        let mut bus = enabled_bus(0x91);
        bus.write_u8(STAT, stat);
        bus.write_u8(LYC, 200);
        let mut ppu = BasePpu::headless(PpuConfig::default());
        run_frames(&mut ppu, &mut bus, 1);
        assert_eq!(expected, bus.count(Interrupt::Stat), "stat {:#x}", stat);
    }
}

#[test]
fn test_full_frame_draws_once() {
    let mut bus = enabled_bus(0x91);
    bus.write_u8(BGP, 0xfc);
    let frames = Rc::new(Cell::new(0));
    let screen = CountingScreen {
        frames: frames.clone(),
    };
    let mut ppu = BasePpu::new(PpuConfig::default(), Some(Box::new(screen)));
    run_frames(&mut ppu, &mut bus, 1);
    assert_eq!(1, frames.get());
    assert_eq!(1, ppu.frame_count());
    assert_eq!(1, bus.count(Interrupt::VBlank));
}

#[test]
fn test_display_disabled_is_idle() {
    let mut bus = enabled_bus(0x11);
    bus.write_u8(LY, 0x55);
    bus.write_u8(STAT, 0b0111_1000);
    let mut ppu = BasePpu::headless(PpuConfig::default());
    for _ in 0..CYCLES_PER_FRAME {
        assert!(ppu.tick(&mut bus));
        assert_eq!(0, bus.read_u8(LY));
    }
    assert!(bus.interrupts.is_empty());
    assert_eq!(0, ppu.frame_count());
    assert_eq!(0b0111_1000, bus.read_u8(STAT));
}

#[test]
fn test_debug_view_runs_with_display_disabled() {
    let mut bus = enabled_bus(0x11);
    let mut ppu = BasePpu::headless(PpuConfig {
        view_mode: ViewMode::Debug,
    });
    run_frames(&mut ppu, &mut bus, 1);
    assert_eq!(1, ppu.frame_count());
    assert_eq!(1, bus.count(Interrupt::VBlank));
}

#[test]
fn test_stopped_cpu_freezes_registers() {
    let mut bus = enabled_bus(0x91);
    bus.memory.set_stopped(true);
    bus.write_u8(LY, 0x42);
    let mut ppu = BasePpu::headless(PpuConfig::default());
    run_frames(&mut ppu, &mut bus, 1);
    assert_eq!(0x42, bus.read_u8(LY));
    assert_eq!(0, bus.read_u8(STAT));
    assert!(bus.interrupts.is_empty());
    assert_eq!(0, ppu.frame_count());

    bus.memory.set_stopped(false);
    run_frames(&mut ppu, &mut bus, 1);
    assert_eq!(1, ppu.frame_count());
}
