mod component;
mod error;

mod interrupt;
mod memory;
pub mod ppu;
pub mod screen;
mod utils;

pub use component::{Address, Addressable, Steppable};
pub use error::{Error, Result};
pub use interrupt::{Interrupt, InterruptRegs, InterruptSink};
pub use memory::{MemoryBus, PpuBus};
pub use ppu::{BasePpu, Color, Framebuffer, PpuConfig, ViewMode};
pub use screen::{NoGuiScreen, Screen};
