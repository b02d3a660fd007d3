//! Infrastructure helpers for the host environment.

pub mod paths;

pub use paths::{data_dir, expand_tilde, orders_file};
