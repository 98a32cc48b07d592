//! Byte sources and sinks backed by the filesystem.

pub mod compression;
pub mod path;
