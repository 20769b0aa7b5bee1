//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from gridbot-domain.

pub mod in_memory;
