/*!
 * The memory bus is the storage shared by the cpu and the ppu. Registers, tile data, tile maps
 * and OAM all live in one flat address space; the ppu reads and writes it by address.
 */

use crate::component::{Address, Addressable};
use crate::interrupt::{Interrupt, InterruptRegs, InterruptSink};

pub const IF: Address = 0xff0f;

/// Everything the ppu needs from the rest of the machine during a tick.
pub trait PpuBus: Addressable + InterruptSink {
    /// True while the cpu has executed STOP and not yet been woken.
    fn cpu_stopped(&self) -> bool;
}

pub struct MemoryBus {
    pub data: Box<[u8; 0x10000]>,
    pub(crate) interrupt_regs: InterruptRegs,
    stopped: bool,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 0x10000]),
            interrupt_regs: InterruptRegs::new(),
            stopped: false,
        }
    }

    pub fn set_stopped(&mut self, stopped: bool) {
        self.stopped = stopped;
    }

    pub fn interrupt_regs(&self) -> &InterruptRegs {
        &self.interrupt_regs
    }

    /// Copy `bytes` into memory starting at `address`, dropping anything past the end of the
    /// address space.
    pub fn load(&mut self, address: Address, bytes: &[u8]) {
        for (offset, byte) in bytes.iter().enumerate() {
            if let Some(entry) = self.data.get_mut(address + offset) {
                *entry = *byte;
            }
        }
    }
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Addressable for MemoryBus {
    fn read_u8(&self, address: Address) -> u8 {
        match address {
            // IF register always has top 3 bits high
            IF => self.interrupt_regs.interrupt_flag | 0xe0,
            _ => match self.data.get(address) {
                Some(byte) => *byte,
                None => 0xff,
            },
        }
    }

    fn write_u8(&mut self, address: Address, value: u8) {
        match address {
            IF => self.interrupt_regs.interrupt_flag = value,
            _ => {
                if let Some(entry) = self.data.get_mut(address) {
                    *entry = value;
                }
            }
        }
    }
}

impl InterruptSink for MemoryBus {
    fn interrupt(&mut self, interrupt: Interrupt) {
        self.interrupt_regs.interrupt(interrupt);
    }
}

impl PpuBus for MemoryBus {
    fn cpu_stopped(&self) -> bool {
        self.stopped
    }
}
