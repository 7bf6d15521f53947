//! Mock implementations of pluggable components.

/// Mock cache replacement policy.
pub mod policy;
