//! Filesystem locations for local data.
//!
//! The data directory holds the order log of the file-backed market and the
//! optional trace export. It is resolved in this order:
//!
//! 1. `data_dir` from configuration (with `~` expanded)
//! 2. `$XDG_DATA_HOME/storefront`
//! 3. `$HOME/.local/share/storefront`
//! 4. `.storefront` in the working directory

use std::path::PathBuf;

use crate::Config;

const APP_DIR: &str = "storefront";

/// Default order log name inside the data directory.
pub const ORDERS_FILE: &str = "orders.json";

/// Resolves the data directory for `config` from the process environment.
#[must_use]
pub fn data_dir(config: &Config) -> PathBuf {
    resolve_data_dir(
        config.data_dir.as_deref(),
        std::env::var("XDG_DATA_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

/// Location of the order log: `orders_file` if configured, else
/// [`ORDERS_FILE`] in the data directory.
#[must_use]
pub fn orders_file(config: &Config) -> PathBuf {
    config.orders_file.as_deref().map_or_else(
        || data_dir(config).join(ORDERS_FILE),
        |path| PathBuf::from(expand_tilde(path, std::env::var("HOME").ok().as_deref())),
    )
}

/// Environment-independent core of [`data_dir`].
///
/// # Examples
///
/// ```
/// use storefront::infrastructure::paths::resolve_data_dir;
/// use std::path::PathBuf;
///
/// assert_eq!(
///     resolve_data_dir(None, None, Some("/home/ann".into())),
///     PathBuf::from("/home/ann/.local/share/storefront"),
/// );
/// assert_eq!(
///     resolve_data_dir(Some("~/shop"), Some("/xdg".into()), Some("/home/ann".into())),
///     PathBuf::from("/home/ann/shop"),
/// );
/// ```
#[must_use]
pub fn resolve_data_dir(explicit: Option<&str>, xdg_data_home: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(dir) = explicit.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(expand_tilde(dir, home.as_deref()));
    }
    if let Some(xdg) = xdg_data_home.filter(|d| !d.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    home.filter(|h| !h.is_empty()).map_or_else(
        || PathBuf::from(".storefront"),
        |home| PathBuf::from(home).join(".local").join("share").join(APP_DIR),
    )
}

/// Expands a leading `~` to `home`. Paths are returned unchanged when `home`
/// is unknown or there is no leading tilde.
///
/// # Examples
///
/// ```
/// use storefront::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/shop", Some("/home/ann")), "/home/ann/shop");
/// assert_eq!(expand_tilde("~", Some("/home/ann")), "/home/ann");
/// assert_eq!(expand_tilde("/srv/shop", Some("/home/ann")), "/srv/shop");
/// assert_eq!(expand_tilde("~/shop", None), "~/shop");
/// ```
#[must_use]
pub fn expand_tilde(path: &str, home: Option<&str>) -> String {
    match (path, home) {
        ("~", Some(home)) => home.to_string(),
        (p, Some(home)) if p.starts_with("~/") => format!("{}{}", home.trim_end_matches('/'), &p[1..]),
        (p, _) => p.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_wins_over_home() {
        assert_eq!(
            resolve_data_dir(None, Some("/xdg".into()), Some("/home/ann".into())),
            PathBuf::from("/xdg/storefront")
        );
    }

    #[test]
    fn falls_back_to_working_directory() {
        assert_eq!(resolve_data_dir(Some("  "), None, None), PathBuf::from(".storefront"));
    }

    #[test]
    fn configured_orders_file_is_used_verbatim() {
        let config = Config {
            orders_file: Some("/tmp/orders.json".into()),
            ..Config::default()
        };
        assert_eq!(orders_file(&config), PathBuf::from("/tmp/orders.json"));
    }
}
