//! Instruction fetch.

use tracing::trace;

use crate::isa;
use crate::isa::InstrKind;
use crate::pipeline::latches::IfId;
use crate::pipeline::predictor::BranchPredictor;
use crate::units::WordMemory;

/// Fetches the word at `pc` and produces the next IF/ID latch.
///
/// The zero word is the end-of-program marker, so fetching it produces a
/// bubble rather than a NOP in flight. Branches consult the predictor and
/// target buffer here for accounting; the teaching subset never redirects
/// fetch, so `pc` advances sequentially either way. Past the end of
/// instruction memory nothing is fetched and `pc` holds.
pub fn fetch(
    pc: &mut u32,
    instruction_memory: &WordMemory,
    predictor: &mut BranchPredictor,
) -> IfId {
    let Ok(word) = instruction_memory.read_word(*pc) else {
        return IfId::default();
    };

    let instruction = isa::decode(word);
    let if_id = IfId {
        valid: word != 0,
        pc: *pc,
        instruction,
    };

    if instruction.kind == InstrKind::Branch {
        let predicted = predictor.predict(*pc);
        let target = predictor.target(*pc);
        trace!(pc = *pc, predicted, ?target, "branch fetched");
    }

    trace!(pc = *pc, word = format_args!("{word:#010x}"), "fetch");
    *pc += 4;
    if_id
}
