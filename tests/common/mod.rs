#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use gameboy_ppu::ppu::lcd::CYCLES_PER_FRAME;
use gameboy_ppu::{
    Address, Addressable, BasePpu, Framebuffer, Interrupt, InterruptSink, MemoryBus, PpuBus,
    Result, Screen,
};

/// A memory bus that remembers every interrupt requested of it
pub struct RecordingBus {
    pub memory: MemoryBus,
    pub interrupts: Vec<Interrupt>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self {
            memory: MemoryBus::new(),
            interrupts: Vec::new(),
        }
    }

    pub fn count(&self, interrupt: Interrupt) -> usize {
        self.interrupts.iter().filter(|i| **i == interrupt).count()
    }
}

impl Addressable for RecordingBus {
    fn read_u8(&self, address: Address) -> u8 {
        self.memory.read_u8(address)
    }

    fn write_u8(&mut self, address: Address, data: u8) {
        self.memory.write_u8(address, data)
    }
}

impl InterruptSink for RecordingBus {
    fn interrupt(&mut self, interrupt: Interrupt) {
        self.memory.interrupt(interrupt);
        self.interrupts.push(interrupt);
    }
}

impl PpuBus for RecordingBus {
    fn cpu_stopped(&self) -> bool {
        self.memory.cpu_stopped()
    }
}

/// Counts presented frames through a handle kept by the test
pub struct CountingScreen {
    pub frames: Rc<Cell<u64>>,
}

impl Screen for CountingScreen {
    fn present(&mut self, _frame: &Framebuffer) -> Result<()> {
        self.frames.set(self.frames.get() + 1);
        Ok(())
    }
}

pub fn run_frames(ppu: &mut BasePpu, bus: &mut RecordingBus, frames: u32) {
    for _ in 0..frames * CYCLES_PER_FRAME {
        assert!(ppu.tick(bus));
    }
}

/// Tile 1 is solid colour 3
pub fn load_solid_tile(bus: &mut impl Addressable) {
    for offset in 0..16 {
        bus.write_u8(0x8010 + offset, 0xff);
    }
}
