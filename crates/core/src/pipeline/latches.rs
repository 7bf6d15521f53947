//! Pipeline registers.
//!
//! Four latch records separate the five stages. A cleared `valid` flag is a
//! bubble: the downstream stage produces nothing that cycle. Stage functions
//! read the latch values captured at the end of the previous cycle and
//! produce replacements that are committed together, which is what makes the
//! records behave like edge-triggered registers.

use crate::isa::Instruction;

use super::control::ControlSignals;

/// IF/ID register: the fetched word plus its address.
#[derive(Debug, Clone, Copy, Default)]
pub struct IfId {
    /// Latch carries a fetched instruction.
    pub valid: bool,
    /// Address the instruction was fetched from.
    pub pc: u32,
    /// Decoded fields of the fetched word.
    pub instruction: Instruction,
}

/// ID/EX register: decoded operands and control.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdEx {
    /// Latch carries a decoded instruction.
    pub valid: bool,
    /// Address of the instruction.
    pub pc: u32,
    /// Decoded fields, kept for EX (funct, branch displacement).
    pub instruction: Instruction,
    /// Control lines derived in ID.
    pub ctrl: ControlSignals,
    /// Register-file value of `rs`.
    pub read_data_1: u32,
    /// Register-file value of `rt`.
    pub read_data_2: u32,
    /// Sign-extended 16-bit immediate.
    pub sign_extend: u32,
    /// Source register 1 index, for forwarding comparisons.
    pub rs: usize,
    /// Source register 2 / I-type destination index.
    pub rt: usize,
    /// R-type destination index.
    pub rd: usize,
}

/// EX/MEM register: ALU outcome and store data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExMem {
    /// Latch carries an executed instruction.
    pub valid: bool,
    /// Address of the instruction.
    pub pc: u32,
    /// Control lines for MEM and WB.
    pub ctrl: ControlSignals,
    /// ALU result (memory address for loads and stores).
    pub alu_result: u32,
    /// Zero flag from the ALU, latched for branch accounting.
    pub zero: bool,
    /// Value to store (the `rt` read), for `mem_write`.
    pub write_data: u32,
    /// Destination register selected by `reg_dst`.
    pub write_register: usize,
}

/// MEM/WB register: the value heading for the register file.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemWb {
    /// Latch carries an instruction ready to retire.
    pub valid: bool,
    /// Control lines for WB.
    pub ctrl: ControlSignals,
    /// Word read from data memory, for `mem_to_reg`.
    pub read_data: u32,
    /// ALU result, written back when `mem_to_reg` is clear.
    pub alu_result: u32,
    /// Destination register index.
    pub write_register: usize,
}
