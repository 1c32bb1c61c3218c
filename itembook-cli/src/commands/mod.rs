//! Command implementations for itembook CLI

pub mod serve;

pub use serve::run_serve;
