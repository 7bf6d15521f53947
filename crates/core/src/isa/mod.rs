//! MIPS-like instruction subset driven by the pipeline.
//!
//! This is deliberately a teaching subset, not a real ISA: R-type
//! arithmetic/logic (ADD, SUB, AND, OR, MUL, DIV), the immediate forms
//! ADDI/ANDI/ORI, LW/SW, BEQ, and J. A zero word decodes as NOP and doubles
//! as the end-of-program marker.

/// Field extraction and categorisation for 32-bit instruction words.
pub mod decode;

/// Opcode and function-code constants.
pub mod opcodes;

pub use decode::decode;

/// High-level instruction category; control signals derive from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstrKind {
    /// Register-register arithmetic/logic; `funct` selects the operation.
    RType,
    /// Register-immediate arithmetic/logic.
    IType,
    /// Memory load (LW).
    Load,
    /// Memory store (SW).
    Store,
    /// Conditional branch (BEQ).
    Branch,
    /// Unconditional jump (J).
    Jump,
    /// No operation (the zero word).
    #[default]
    Nop,
}

/// A fully decoded instruction word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Instruction {
    /// The raw 32-bit word.
    pub word: u32,
    /// Primary opcode (bits 31..26).
    pub opcode: u32,
    /// First source register (bits 25..21).
    pub rs: usize,
    /// Second source / destination register for I-type (bits 20..16).
    pub rt: usize,
    /// Destination register for R-type (bits 15..11).
    pub rd: usize,
    /// Shift amount (bits 10..6).
    pub shamt: u32,
    /// Function code for R-type (bits 5..0).
    pub funct: u32,
    /// 16-bit immediate, raw (sign-extension happens in decode stage).
    pub immediate: u16,
    /// 26-bit jump target field.
    pub jump_target: u32,
    /// Category the control unit keys on.
    pub kind: InstrKind,
}

impl Instruction {
    /// True for the zero word.
    pub const fn is_nop(&self) -> bool {
        matches!(self.kind, InstrKind::Nop)
    }
}
