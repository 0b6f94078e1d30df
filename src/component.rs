use crate::error::Result;

pub type Address = usize;

pub trait Addressable {
    fn read_u8(&self, address: Address) -> u8;

    fn write_u8(&mut self, address: Address, data: u8);

    fn read_range(&self, address: Address, len: usize) -> Vec<u8> {
        (address..address + len).map(|a| self.read_u8(a)).collect()
    }
}

/// Advanced once per machine cycle against some context, usually the memory bus
pub trait Steppable<Context> {
    fn step(&mut self, context: &mut Context) -> Result<()>;
}
