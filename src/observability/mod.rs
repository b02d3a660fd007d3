//! Logging and OpenTelemetry tracing.
//!
//! ```text
//! tracing macros ─┬─▶ fmt layer ─────────────▶ stderr
//!                 └─▶ tracing-opentelemetry ─▶ OTLP JSON file (optional)
//! ```
//!
//! Verbosity comes from `RUST_LOG`, then the `trace_level` setting, then
//! `info`. Span export is enabled by `trace_export` and writes to
//! `storefront-otlp.json` in the data directory, rotated at 10 MB with three
//! backups.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE};
