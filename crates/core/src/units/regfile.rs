//! General-purpose register file.

/// Thirty-two 32-bit registers with MIPS r0 semantics: register 0 always
/// reads zero and silently drops writes.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    regs: [u32; 32],
}

impl RegisterFile {
    /// Creates a register file with every register zeroed.
    pub const fn new() -> Self {
        Self { regs: [0; 32] }
    }

    /// Reads register `index`; the index is masked to the architected
    /// 5 bits, as a hardware register field would be.
    #[inline]
    pub const fn get(&self, index: usize) -> u32 {
        self.regs[index & 0x1F]
    }

    /// Writes register `index` (masked to 5 bits); writes to register 0
    /// are dropped.
    #[inline]
    pub const fn set(&mut self, index: usize, value: u32) {
        let index = index & 0x1F;
        if index != 0 {
            self.regs[index] = value;
        }
    }

    /// Zeroes every register.
    pub const fn reset(&mut self) {
        self.regs = [0; 32];
    }

    /// Returns a snapshot of all 32 registers.
    pub const fn dump(&self) -> [u32; 32] {
        self.regs
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
