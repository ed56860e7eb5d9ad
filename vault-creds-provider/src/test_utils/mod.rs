//! In-memory implementations for testing.
//!
//! Available behind the `test-utils` feature flag.

mod in_memory_cluster;

pub use in_memory_cluster::InMemoryClusterClient;
