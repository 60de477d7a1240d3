//! <Package Name>.

/// Name of this crate, useful for diagnostics and banners.
pub fn crate_name() -> &'static str {
    "<package-name>"
}
