//! Subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::tracer;
use crate::infrastructure::paths;
use crate::Config;

/// File name of the span export inside the data directory.
pub const TRACE_FILE: &str = "storefront-otlp.json";

/// Installs the global `tracing` subscriber.
///
/// The pipeline is:
///
/// 1. An [`EnvFilter`] from `RUST_LOG`, else `config.trace_level`, else `info`
/// 2. A human-readable `fmt` layer on stderr
/// 3. With `trace_export` set, an OpenTelemetry layer writing OTLP JSON to
///    [`TRACE_FILE`] in the data directory, rotated by size
///
/// Calling it again is harmless: only the first subscriber is installed. If
/// the data directory cannot be created the export layer is skipped and a
/// warning is logged through the remaining layers.
///
/// # Example
///
/// ```no_run
/// use storefront::observability::init_tracing;
/// use storefront::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut export_error = None;
    let otel_layer = if config.trace_export {
        let data_dir = paths::data_dir(config);
        match std::fs::create_dir_all(&data_dir) {
            Ok(()) => {
                let resource = Resource::new(vec![
                    KeyValue::new("service.name", "storefront"),
                    KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
                ]);
                let provider = tracer::file_tracer_provider(data_dir.join(TRACE_FILE), resource);
                Some(OpenTelemetryLayer::new(provider.tracer("storefront")))
            }
            Err(e) => {
                export_error = Some((data_dir, e));
                None
            }
        }
    } else {
        None
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(otel_layer)
        .try_init()
        .is_ok();

    if let Some((dir, e)) = export_error {
        tracing::warn!(dir = %dir.display(), error = %e, "trace export disabled");
    }
    if installed {
        tracing::debug!(level, export = config.trace_export, "tracing initialized");
    }
}
