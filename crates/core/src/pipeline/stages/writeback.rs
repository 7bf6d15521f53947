//! Write-back.

use tracing::trace;

use crate::pipeline::control;
use crate::pipeline::latches::MemWb;
use crate::units::RegisterFile;

/// Commits the value in MEM/WB to the register file.
///
/// Runs before decode within a cycle, so an instruction three behind the
/// producer reads the fresh value straight from the register file.
pub fn writeback(mem_wb: &MemWb, registers: &mut RegisterFile) {
    if !mem_wb.valid || !mem_wb.ctrl.reg_write {
        return;
    }

    let value = control::writeback_value(mem_wb);
    registers.set(mem_wb.write_register, value);
    trace!(register = mem_wb.write_register, value, "writeback");
}
