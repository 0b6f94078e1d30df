use log::debug;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Interrupt {
    VBlank,
    Stat,
}

impl Interrupt {
    /// Bit position of this interrupt in the IF register
    pub fn bit(&self) -> u8 {
        match self {
            Interrupt::VBlank => 0,
            Interrupt::Stat => 1,
        }
    }
}

/// Anything that can have an interrupt requested of it. Requests only ever set flags.
pub trait InterruptSink {
    fn interrupt(&mut self, interrupt: Interrupt);
}

#[derive(Debug, Clone, Default)]
pub struct InterruptRegs {
    pub interrupt_flag: u8,
}

impl InterruptRegs {
    pub fn new() -> Self {
        Self { interrupt_flag: 0 }
    }

    pub fn is_requested(&self, interrupt: Interrupt) -> bool {
        self.interrupt_flag & (1 << interrupt.bit()) != 0
    }
}

impl InterruptSink for InterruptRegs {
    fn interrupt(&mut self, interrupt: Interrupt) {
        debug!("Interrupting: {}", interrupt);
        self.interrupt_flag |= 1 << interrupt.bit();
    }
}
