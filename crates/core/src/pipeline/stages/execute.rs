//! Execute: ALU, forwarding and branch resolution.

use tracing::trace;

use crate::common::error::Result;
use crate::pipeline::control;
use crate::pipeline::latches::{ExMem, IdEx, MemWb};
use crate::pipeline::predictor::BranchPredictor;
use crate::units::Alu;

/// Runs the ALU over the forwarded operands and produces the next EX/MEM
/// latch.
///
/// Branches resolve here: BEQ subtracts its operands and the zero flag is
/// the taken outcome, which trains the predictor and installs the target
/// (`pc + 4` plus the shifted displacement) in the BTB.
///
/// # Errors
///
/// Division by zero surfaces from the ALU.
pub fn execute(
    id_ex: &IdEx,
    ex_mem_prev: &ExMem,
    mem_wb_prev: &MemWb,
    alu: Alu,
    predictor: &mut BranchPredictor,
) -> Result<ExMem> {
    if !id_ex.valid {
        return Ok(ExMem::default());
    }

    let (operand_a, operand_b) = control::forward_operands(id_ex, ex_mem_prev, mem_wb_prev);
    let (alu_result, flags) = alu.execute(id_ex.ctrl.alu_op, operand_a, operand_b)?;

    if id_ex.ctrl.branch {
        let taken = flags.zero;
        let target = id_ex
            .pc
            .wrapping_add(4)
            .wrapping_add(id_ex.sign_extend << 2);
        predictor.update(id_ex.pc, taken, target);
        trace!(pc = id_ex.pc, taken, target, "branch resolved");
    }

    let write_register = if id_ex.ctrl.reg_dst {
        id_ex.rd
    } else {
        id_ex.rt
    };

    trace!(
        pc = id_ex.pc,
        op = ?id_ex.ctrl.alu_op,
        result = alu_result,
        "execute"
    );

    Ok(ExMem {
        valid: true,
        pc: id_ex.pc,
        ctrl: id_ex.ctrl,
        alu_result,
        zero: flags.zero,
        write_data: id_ex.read_data_2,
        write_register,
    })
}
