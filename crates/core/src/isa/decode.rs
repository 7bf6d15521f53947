//! Instruction-word field extraction.

use super::opcodes::opcode;
use super::{InstrKind, Instruction};

/// Decodes one 32-bit instruction word.
///
/// Every field is extracted unconditionally; the category is derived from
/// the primary opcode. Unknown opcodes fall into the I-type category, which
/// matches how the control unit treats them (register-immediate ALU form).
pub const fn decode(word: u32) -> Instruction {
    let opcode_bits = word >> 26;
    let kind = if word == 0 {
        InstrKind::Nop
    } else {
        match opcode_bits {
            opcode::RTYPE => InstrKind::RType,
            opcode::LW => InstrKind::Load,
            opcode::SW => InstrKind::Store,
            opcode::BEQ => InstrKind::Branch,
            opcode::J => InstrKind::Jump,
            _ => InstrKind::IType,
        }
    };

    Instruction {
        word,
        opcode: opcode_bits,
        rs: ((word >> 21) & 0x1F) as usize,
        rt: ((word >> 16) & 0x1F) as usize,
        rd: ((word >> 11) & 0x1F) as usize,
        shamt: (word >> 6) & 0x1F,
        funct: word & 0x3F,
        immediate: (word & 0xFFFF) as u16,
        jump_target: word & 0x03FF_FFFF,
        kind,
    }
}
