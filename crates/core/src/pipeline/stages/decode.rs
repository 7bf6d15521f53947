//! Instruction decode and register read.

use tracing::trace;

use crate::pipeline::control::ControlSignals;
use crate::pipeline::latches::{IdEx, IfId};
use crate::units::RegisterFile;

/// Reads source registers, derives control signals and produces the next
/// ID/EX latch.
///
/// Register reads see writes committed by WB in the same cycle, so a value
/// three instructions old needs no forwarding path. The 16-bit immediate is
/// sign-extended here.
pub fn decode(if_id: &IfId, registers: &RegisterFile) -> IdEx {
    if !if_id.valid {
        return IdEx::default();
    }

    let instruction = if_id.instruction;
    let ctrl = ControlSignals::derive(&instruction);
    let sign_extend = i32::from(instruction.immediate as i16) as u32;

    trace!(
        pc = if_id.pc,
        kind = ?instruction.kind,
        rs = instruction.rs,
        rt = instruction.rt,
        "decode"
    );

    IdEx {
        valid: true,
        pc: if_id.pc,
        instruction,
        ctrl,
        read_data_1: registers.get(instruction.rs),
        read_data_2: registers.get(instruction.rt),
        sign_extend,
        rs: instruction.rs,
        rt: instruction.rt,
        rd: instruction.rd,
    }
}
