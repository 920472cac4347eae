use anyhow::Result;
use coachcal_core::config::CoachCalConfig;
use owo_colors::OwoColorize;

pub fn run(config: &CoachCalConfig) -> Result<()> {
    let config_path = CoachCalConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    if let Some(store) = config.source.store_path() {
        println!("  Store:   {}", store.display());
    }
    println!();

    println!("{}", "Settings".bold());
    println!("  Time zone:  {}", config.timezone()?);
    println!();
    print!("{}", toml::to_string_pretty(&config.redacted())?);

    Ok(())
}
