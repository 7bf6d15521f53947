//! Memory access.

use tracing::trace;

use crate::common::error::Result;
use crate::pipeline::latches::{ExMem, MemWb};
use crate::units::WordMemory;

/// Performs the data-memory access for the instruction in EX/MEM and
/// produces the next MEM/WB latch.
///
/// The ALU result is the byte address for both loads and stores.
///
/// # Errors
///
/// Misaligned or out-of-range addresses surface from the data memory.
pub fn memory(ex_mem: &ExMem, data_memory: &mut WordMemory) -> Result<MemWb> {
    if !ex_mem.valid {
        return Ok(MemWb::default());
    }

    let mut read_data = 0;
    if ex_mem.ctrl.mem_read {
        read_data = data_memory.read_word(ex_mem.alu_result)?;
        trace!(addr = ex_mem.alu_result, value = read_data, "load");
    }
    if ex_mem.ctrl.mem_write {
        data_memory.write_word(ex_mem.alu_result, ex_mem.write_data)?;
        trace!(addr = ex_mem.alu_result, value = ex_mem.write_data, "store");
    }

    Ok(MemWb {
        valid: true,
        ctrl: ex_mem.ctrl,
        read_data,
        alu_result: ex_mem.alu_result,
        write_register: ex_mem.write_register,
    })
}
