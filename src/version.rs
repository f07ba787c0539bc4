// Build-time identity served at GET /version

/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name from Cargo.toml (`blkdev-status`).
pub const NAME: &str = env!("CARGO_PKG_NAME");
