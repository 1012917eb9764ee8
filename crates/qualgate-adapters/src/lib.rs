//! Qualgate adapters: filesystem-backed implementations of the core ports.

pub mod fs;

pub use fs::FsImageSource;
