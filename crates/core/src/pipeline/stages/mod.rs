//! The five stage functions.
//!
//! Each stage is a pure function from the previous cycle's latch snapshot
//! (plus the architectural state it owns) to the next latch value. The
//! [`Pipeline`](super::Pipeline) clock collects all five results before
//! committing any of them, so every stage observes the same cycle boundary.

mod decode;
mod execute;
mod fetch;
mod memory;
mod writeback;

pub use decode::decode;
pub use execute::execute;
pub use fetch::fetch;
pub use memory::memory;
pub use writeback::writeback;
