//! Mock of the cache replacement-policy trait.

use archlab_core::cache::{CacheLine, ReplacementPolicy};
use mockall::mock;

mock! {
    /// Scripted replacement policy; set expectations on `select_victim`
    /// to force evictions onto a chosen way.
    pub Policy {}

    impl ReplacementPolicy for Policy {
        fn select_victim(&mut self, lines: &[CacheLine]) -> usize;
    }
}
