// LinkStash platform paths for Windows
// Config and data: %APPDATA%\LinkStash

use std::env;
use std::path::PathBuf;

/// `%APPDATA%\LinkStash`
pub fn get_config_dir() -> PathBuf {
    let appdata = env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Temp"));
    PathBuf::from(appdata).join("LinkStash")
}

/// Same as the config directory on Windows.
pub fn get_data_dir() -> PathBuf {
    get_config_dir()
}
