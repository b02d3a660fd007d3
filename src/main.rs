//! Terminal front end and entry point.
//!
//! A thin shell around the library: it builds the [`Config`] from a TOML file
//! and command-line flags, installs tracing, attaches a [`TerminalView`] to the
//! session bus and then feeds typed commands from stdin into the session.
//!
//! # Lifecycle
//!
//! 1. **Configure**: `--config` file first, then flag overrides
//! 2. **Trace**: install the subscriber (stderr, optional OTLP file export)
//! 3. **Attach**: subscribe the renderer to every change event
//! 4. **Start**: request the catalog
//! 5. **Loop**: parse each stdin line and dispatch the resulting intent
//!
//! Type `help` at the prompt for the command list.

#![allow(clippy::multiple_crate_versions)]

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use storefront::events::Delivery;
use storefront::ui::{parse_command, Command, TerminalView, HELP};
use storefront::Config;

/// Browse a catalog, fill a basket and check out from the terminal.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Backend API base URL.
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Base URL for item images.
    #[arg(long, value_name = "URL")]
    cdn_url: Option<String>,

    /// Serve the catalog from a local JSON file instead of the backend.
    #[arg(long, value_name = "FILE")]
    catalog_file: Option<String>,

    /// Order log used together with --catalog-file.
    #[arg(long, value_name = "FILE")]
    orders_file: Option<String>,

    /// Tracing filter, e.g. `debug` or `storefront=trace`.
    #[arg(long, value_name = "FILTER")]
    trace_level: Option<String>,

    /// Write spans as OTLP JSON into the data directory.
    #[arg(long)]
    trace_export: bool,
}

impl Args {
    fn into_config(self) -> storefront::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(url) = self.api_url {
            config.api_url = url;
        }
        if let Some(url) = self.cdn_url {
            config.cdn_url = url;
        }
        if self.catalog_file.is_some() {
            config.catalog_file = self.catalog_file;
        }
        if self.orders_file.is_some() {
            config.orders_file = self.orders_file;
        }
        if self.trace_level.is_some() {
            config.trace_level = self.trace_level;
        }
        config.trace_export |= self.trace_export;

        Ok(config)
    }
}

fn main() -> ExitCode {
    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("storefront: {e}");
            return ExitCode::FAILURE;
        }
    };

    storefront::observability::init_tracing(&config);

    let span = tracing::debug_span!("startup");
    let guard = span.entered();

    let mut session = match storefront::initialize(&config) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize storefront");
            eprintln!("storefront: {e}");
            return ExitCode::FAILURE;
        }
    };

    let view = TerminalView::attach(session.bus(), io::stdout());
    session.start();
    drop(guard);

    say(&view, "Type `help` for commands.");

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "failed to read stdin");
                break;
            }
        };

        let parsed = parse_command(&line, &session.state());
        match parsed {
            Ok(None) => {}
            Ok(Some(Command::Help)) => {
                say(&view, HELP);
            }
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Publish(event))) => {
                let delivery = session.dispatch(&event);
                report(&view, &delivery);
            }
            Err(e) => {
                tracing::debug!(error = %e, input = %line, "unparsable command");
                say(&view, &format!("error: {e}"));
            }
        }
    }

    tracing::info!("storefront session ended");
    ExitCode::SUCCESS
}

/// Tells the user when a command reached no handler or a handler failed.
fn report<W: io::Write + 'static>(view: &TerminalView<W>, delivery: &Delivery) {
    if delivery.failed > 0 {
        say(view, "error: command failed, see log for details");
    } else if delivery.delivered == 0 {
        say(view, "nothing happened");
    }
}

/// Prints to the terminal; a broken stdout is logged, not fatal.
fn say<W: io::Write + 'static>(view: &TerminalView<W>, text: &str) {
    if let Err(e) = view.print(text) {
        tracing::warn!(error = %e, "failed to write to terminal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront::EventBus;

    struct BrokenPipe;

    impl io::Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_do_not_abort_the_loop() {
        let bus = EventBus::new();
        let view = TerminalView::attach(&bus, BrokenPipe);
        assert!(view.print("hello").is_err());
        say(&view, "hello");
        report(&view, &Delivery { delivered: 0, failed: 1 });
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from(["storefront", "--catalog-file", "c.json", "--trace-export"]);
        let config = args.into_config().unwrap();
        assert_eq!(config.catalog_file.as_deref(), Some("c.json"));
        assert!(config.trace_export);
        assert_eq!(config.api_url, Config::default().api_url);
    }
}
