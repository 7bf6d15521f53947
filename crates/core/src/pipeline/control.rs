//! Control-signal generation, hazard detection and forwarding.
//!
//! The control unit is a pure function of the decoded instruction. Hazard
//! detection and forwarding are pure functions of the latch snapshots taken
//! at the start of a cycle, so the order stage functions run in cannot
//! change their outcome.

use crate::isa::opcodes::{funct, opcode};
use crate::isa::{Instruction, InstrKind};
use crate::units::AluOp;

use super::latches::{ExMem, IdEx, IfId, MemWb};

/// Single-bit control lines plus the ALU operation, produced in ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlSignals {
    /// Write the register file in WB.
    pub reg_write: bool,
    /// Read data memory in MEM.
    pub mem_read: bool,
    /// Write data memory in MEM.
    pub mem_write: bool,
    /// Select the memory read over the ALU result in WB.
    pub mem_to_reg: bool,
    /// Select the immediate as the second ALU operand.
    pub alu_src: bool,
    /// Select `rd` over `rt` as the destination register.
    pub reg_dst: bool,
    /// Instruction is a conditional branch.
    pub branch: bool,
    /// Instruction is an unconditional jump.
    pub jump: bool,
    /// Operation the ALU performs in EX.
    pub alu_op: AluOp,
}

impl ControlSignals {
    /// Derives the control lines for a decoded instruction.
    #[must_use]
    pub const fn derive(instruction: &Instruction) -> Self {
        let mut ctrl = Self {
            reg_write: false,
            mem_read: false,
            mem_write: false,
            mem_to_reg: false,
            alu_src: false,
            reg_dst: false,
            branch: false,
            jump: false,
            alu_op: AluOp::Add,
        };

        match instruction.kind {
            InstrKind::RType => {
                ctrl.reg_write = true;
                ctrl.reg_dst = true;
                ctrl.alu_op = match instruction.funct {
                    funct::SUB => AluOp::Sub,
                    funct::AND => AluOp::And,
                    funct::OR => AluOp::Or,
                    funct::MUL => AluOp::Mul,
                    funct::DIV => AluOp::Div,
                    _ => AluOp::Add,
                };
            }
            InstrKind::IType => {
                ctrl.reg_write = true;
                ctrl.alu_src = true;
                ctrl.alu_op = match instruction.opcode {
                    opcode::ANDI => AluOp::And,
                    opcode::ORI => AluOp::Or,
                    _ => AluOp::Add,
                };
            }
            InstrKind::Load => {
                ctrl.reg_write = true;
                ctrl.alu_src = true;
                ctrl.mem_read = true;
                ctrl.mem_to_reg = true;
            }
            InstrKind::Store => {
                ctrl.alu_src = true;
                ctrl.mem_write = true;
            }
            InstrKind::Branch => {
                ctrl.branch = true;
                ctrl.alu_op = AluOp::Sub;
            }
            InstrKind::Jump => ctrl.jump = true,
            InstrKind::Nop => {}
        }

        ctrl
    }
}

/// Reports a load-use hazard between the instruction in ID/EX and the one
/// waiting in IF/ID.
///
/// A load's destination is its `rt` field. When the next instruction reads
/// that register the value cannot be forwarded in time, so the front of the
/// pipeline must stall for one cycle.
#[must_use]
pub const fn load_use_hazard(id_ex: &IdEx, if_id: &IfId) -> bool {
    id_ex.valid
        && id_ex.ctrl.mem_read
        && id_ex.rt != 0
        && if_id.valid
        && (if_id.instruction.rs == id_ex.rt || if_id.instruction.rt == id_ex.rt)
}

/// Value the instruction in MEM/WB is about to write back.
#[must_use]
pub const fn writeback_value(mem_wb: &MemWb) -> u32 {
    if mem_wb.ctrl.mem_to_reg {
        mem_wb.read_data
    } else {
        mem_wb.alu_result
    }
}

/// Resolves the two ALU operands for the instruction in ID/EX, bypassing
/// the register file when a newer value is in flight.
///
/// EX/MEM forwarding takes priority over MEM/WB forwarding so the most
/// recent producer wins. The second operand is only forwarded for
/// register-register instructions; when `alu_src` is set the immediate is
/// used instead and `rt` carries no operand.
#[must_use]
pub fn forward_operands(id_ex: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb) -> (u32, u32) {
    let forwards_to = |source: usize| {
        if ex_mem.valid
            && ex_mem.ctrl.reg_write
            && ex_mem.write_register != 0
            && ex_mem.write_register == source
        {
            Some(ex_mem.alu_result)
        } else if mem_wb.valid
            && mem_wb.ctrl.reg_write
            && mem_wb.write_register != 0
            && mem_wb.write_register == source
        {
            Some(writeback_value(mem_wb))
        } else {
            None
        }
    };

    let operand_a = forwards_to(id_ex.rs).unwrap_or(id_ex.read_data_1);
    let operand_b = if id_ex.ctrl.alu_src {
        id_ex.sign_extend
    } else {
        forwards_to(id_ex.rt).unwrap_or(id_ex.read_data_2)
    };

    (operand_a, operand_b)
}
