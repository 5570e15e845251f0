//! notemux - notification message aggregator
//!
//! Collects per-device warnings and sticky modifier state from any number of
//! threads, merges them into a single notification body, and writes that
//! body to a well-known JSON file whenever it changes.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Device and modifier value objects, the message merge rules, errors
//! - **Application**: The serialized message manager, its dispatcher, and port traits
//! - **Infrastructure**: JSON file sink, sticky modifier registry, XDG config store
//! - **CLI**: Daemon runner, Unix socket control protocol, argument parsing

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
