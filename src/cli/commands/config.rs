//! Config command handlers.

use anyhow::Result;

use crate::config::Config;

pub fn init() -> Result<()> {
    let path = Config::get_default_config_path()?;
    if path.exists() {
        println!("Config file already exists: {}", path.display());
        return Ok(());
    }
    Config::generate_default_config(&path)
}

/// The file in use, or where `config init` would write one.
pub fn path() -> Result<()> {
    let path = match Config::find_config_file()? {
        Some(path) => path,
        None => Config::get_default_config_path()?,
    };
    println!("{}", path.display());
    Ok(())
}
