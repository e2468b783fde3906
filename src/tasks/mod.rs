//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Cleanup: Removes expired entries from the in-process backend

mod cleanup;

pub use cleanup::spawn_cleanup_task;
