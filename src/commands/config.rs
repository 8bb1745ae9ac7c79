use crate::config::Config;
use anyhow::Result;
use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    if config_path.is_none() {
        if let Some(path) = Config::default_path() {
            println!("# {}", path.display());
        }
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
