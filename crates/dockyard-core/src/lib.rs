//! Dockyard Core
//!
//! Shared plumbing for the Dockyard dock engine: logging setup, math types,
//! hash collections and frame profiling.

pub mod alloc;
pub mod logging;
pub mod math;
pub mod profiling;
