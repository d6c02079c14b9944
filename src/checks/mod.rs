//! Format-independent checks run before the type-specific validators.
//!
//! - **compression**: gzip integrity for compressible types
//! - **checksum**: companion `.md5` / `.sha256` verification and generation

pub mod checksum;
pub mod compression;
