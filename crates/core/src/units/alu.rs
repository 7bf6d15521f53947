//! 32-bit arithmetic logic unit.
//!
//! The ALU is a pure function from an operation and two operands to a result
//! plus condition flags. Division by zero is the only error path; everything
//! else wraps in two's complement like the hardware it stands in for.

use crate::common::error::{Result, SimError};

/// Operations the ALU implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AluOp {
    /// Two's-complement addition.
    #[default]
    Add,
    /// Two's-complement subtraction.
    Sub,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Low 32 bits of the signed product.
    Mul,
    /// Signed quotient; a zero divisor is an error.
    Div,
}

/// Condition flags produced by every ALU operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AluFlags {
    /// Result is zero.
    pub zero: bool,
    /// Result's sign bit is set.
    pub negative: bool,
    /// Unsigned carry out (add) or no-borrow (sub).
    pub carry: bool,
    /// Signed overflow.
    pub overflow: bool,
}

/// The arithmetic logic unit.
///
/// Stateless; the struct exists so callers hold a unit value the way they
/// hold the other components.
#[derive(Debug, Clone, Copy, Default)]
pub struct Alu;

impl Alu {
    /// Executes one operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to perform.
    /// * `a` - Left operand.
    /// * `b` - Right operand.
    ///
    /// # Returns
    ///
    /// The 32-bit result and the condition flags.
    ///
    /// # Errors
    ///
    /// [`SimError::DivisionByZero`] for `Div` with `b == 0`.
    pub fn execute(self, op: AluOp, a: u32, b: u32) -> Result<(u32, AluFlags)> {
        let mut flags = AluFlags::default();

        let result = match op {
            AluOp::Add => {
                let (res, carry) = a.overflowing_add(b);
                flags.carry = carry;
                flags.overflow = (a as i32).overflowing_add(b as i32).1;
                res
            }
            AluOp::Sub => {
                let (res, borrow) = a.overflowing_sub(b);
                flags.carry = !borrow;
                flags.overflow = (a as i32).overflowing_sub(b as i32).1;
                res
            }
            AluOp::And => a & b,
            AluOp::Or => a | b,
            AluOp::Mul => (a as i32).wrapping_mul(b as i32) as u32,
            AluOp::Div => {
                if b == 0 {
                    return Err(SimError::DivisionByZero);
                }
                ((a as i32).wrapping_div(b as i32)) as u32
            }
        };

        flags.zero = result == 0;
        flags.negative = (result as i32) < 0;
        Ok((result, flags))
    }
}
