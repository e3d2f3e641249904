use anyhow::Result;
use log::info;

use genset_telemetry::cli::{self, commands};
use genset_telemetry::config::Config;
use genset_telemetry::services::PollService;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli::build_cli().get_matches();

    // Port enumeration needs no device connection
    if matches.subcommand_matches("listports").is_some() {
        commands::list_ports()?;
        return Ok(());
    }

    let config = Config::from_matches(&matches)?;

    if let Some(m) = matches.subcommand_matches("writeconfig") {
        let path = m
            .get_one::<String>("file")
            .map(|s| s.as_str())
            .unwrap_or("genset_telemetry.toml");
        config.save_to_file(path)?;
        info!("💾 Configuration written to {}", path);
        return Ok(());
    }

    // The only fatal failure: the serial link cannot be established
    let service = PollService::new(config)?;

    if commands::handle_subcommands(&matches, &service).await? {
        return Ok(());
    }

    service.run().await?;
    Ok(())
}
