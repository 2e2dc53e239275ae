use anyhow::Result;

use dragscroll_core::AppConfig;

pub fn run(config: &AppConfig, path_only: bool, init: bool) -> Result<()> {
    let path = AppConfig::config_path();

    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    if init {
        if path.exists() {
            println!("Configuration already exists at {}", path.display());
        } else {
            config.save()?;
            println!("Wrote {}", path.display());
        }
        return Ok(());
    }

    print!("{}", config.to_toml()?);
    Ok(())
}
