//! Version string.

/// Crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What `--version` prints.
pub fn version_line() -> String {
    format!("wendash {}", VERSION)
}
