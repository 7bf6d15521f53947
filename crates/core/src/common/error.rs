//! Error kinds shared across the simulators.
//!
//! Every fallible public operation returns [`SimError`] through the crate-wide
//! [`Result`] alias. Expected simulation outcomes (a cache miss, a pipeline
//! stall, a round with no bus requester) are ordinary return values, never
//! errors; the variants here cover genuine misuse or resource exhaustion.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SimError>;

/// Error kinds distinguished by the simulator cores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A configuration or operation parameter is out of range or internally
    /// inconsistent. The payload names the offending parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// An internal allocation failed at initialisation.
    #[error("out of memory during initialisation")]
    OutOfMemory,

    /// A memory access was not aligned to the word size.
    #[error("misaligned access at {0:#010x}")]
    MisalignedAddress(u32),

    /// A memory access fell outside the configured address range.
    #[error("address {0:#010x} out of range")]
    AddressOutOfRange(u32),

    /// The bus is currently serving another request.
    #[error("bus busy: device {0} holds the bus")]
    DeviceBusy(u8),

    /// A device id did not name a registered device.
    #[error("no device with id {0}")]
    NoDevice(u8),

    /// The requesting device did not win the arbitration round.
    #[error("device {0} lost arbitration")]
    ArbitrationFailed(u8),

    /// An ALU divide was issued with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,
}
