//! Tracing integration for Horizon Glyphrun.
//!
//! Horizon Glyphrun uses the `tracing` crate for instrumentation. To see
//! logs, install a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your rendering code...
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Library lifecycle target.
    pub const LIBRARY: &str = "horizon_glyphrun::library";
    /// Font session target.
    pub const SESSION: &str = "horizon_glyphrun::session";
    /// Glyph store target.
    pub const STORE: &str = "horizon_glyphrun::store";
    /// String layout target.
    pub const LAYOUT: &str = "horizon_glyphrun::layout";
    /// Canvas and compositing target.
    pub const CANVAS: &str = "horizon_glyphrun::canvas";
    /// Font backend target.
    pub const PROVIDER: &str = "horizon_glyphrun::provider";
}
