// LinkStash platform paths for Linux
// Config: ~/.config/linkstash
// Data:   ~/.local/share/linkstash

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "linkstash";

/// Resolves an XDG base directory, falling back to `$HOME/<default_rel>`.
fn xdg_dir(xdg: Option<String>, home: Option<String>, default_rel: &[&str]) -> PathBuf {
    match xdg.filter(|v| !v.is_empty()) {
        Some(base) => PathBuf::from(base).join(APP_DIR),
        None => {
            let mut path = PathBuf::from(home.unwrap_or_else(|| String::from("/tmp")));
            for part in default_rel {
                path.push(part);
            }
            path.join(APP_DIR)
        }
    }
}

/// `$XDG_CONFIG_HOME/linkstash`, or `~/.config/linkstash`.
pub fn get_config_dir() -> PathBuf {
    xdg_dir(
        env::var("XDG_CONFIG_HOME").ok(),
        env::var("HOME").ok(),
        &[".config"],
    )
}

/// `$XDG_DATA_HOME/linkstash`, or `~/.local/share/linkstash`.
pub fn get_data_dir() -> PathBuf {
    xdg_dir(
        env::var("XDG_DATA_HOME").ok(),
        env::var("HOME").ok(),
        &[".local", "share"],
    )
}
