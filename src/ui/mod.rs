//! Presentation layer: view models, a text renderer and command parsing.
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready data computed from change-event payloads
//! - [`renderer`]: [`TerminalView`], which prints change events to a sink
//! - [`input`]: [`parse_command`], which turns typed lines into intents

pub mod input;
pub mod renderer;
pub mod viewmodel;

pub use input::{parse_command, Command, HELP};
pub use renderer::{render_event, TerminalView};
pub use viewmodel::{BasketLine, BasketView, ButtonView, CardView, FormView, SuccessView};
