pub mod cli;
pub mod cluster;
pub mod commands;
pub mod config;
pub mod export;
pub mod loader;
pub mod utils;

// Re-export the merge engine API
pub use cluster::{cluster, merge, ClusterOutcome, MergeConfig, MergeError, Position, Profile};
