//! Opcode and function-code constants for the instruction subset.

/// Primary opcodes (bits 31..26).
pub mod opcode {
    /// R-type instructions; the function code selects the operation.
    pub const RTYPE: u32 = 0x00;
    /// Unconditional jump.
    pub const J: u32 = 0x02;
    /// Branch if equal.
    pub const BEQ: u32 = 0x04;
    /// Add immediate.
    pub const ADDI: u32 = 0x08;
    /// And immediate.
    pub const ANDI: u32 = 0x0C;
    /// Or immediate.
    pub const ORI: u32 = 0x0D;
    /// Load word.
    pub const LW: u32 = 0x23;
    /// Store word.
    pub const SW: u32 = 0x2B;
}

/// R-type function codes (bits 5..0).
pub mod funct {
    /// Signed addition.
    pub const ADD: u32 = 0x20;
    /// Signed subtraction.
    pub const SUB: u32 = 0x22;
    /// Bitwise AND.
    pub const AND: u32 = 0x24;
    /// Bitwise OR.
    pub const OR: u32 = 0x25;
    /// Signed multiply (result to `rd`, teaching-subset semantics).
    pub const MUL: u32 = 0x18;
    /// Signed divide (result to `rd`, teaching-subset semantics).
    pub const DIV: u32 = 0x1A;
}
