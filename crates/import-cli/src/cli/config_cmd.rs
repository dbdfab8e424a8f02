use super::*;

pub(super) fn handle_config(
    args: ConfigArgs,
    config_path: &Path,
    effective: &AdminConfig,
) -> anyhow::Result<()> {
    match args.command {
        ConfigCommands::Init(args) => {
            let mut config = AdminConfig::load(config_path)?;
            config.api_base = args.api_base.trim().to_string();
            config.host_override = args.host_override.as_deref().and_then(optional_text);
            if let Some(heading) = args.heading.as_deref().and_then(optional_text) {
                config.heading = heading;
            }
            config.default_prefix = args.prefix.as_deref().and_then(optional_text);
            config.save(config_path)?;
            info!(path = %config_path.display(), "Config written");
            println!("Config written to {}", config_path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            println!("# {}", config_path.display());
            println!(
                "{}",
                serde_json::to_string_pretty(effective).context("serialize config")?
            );
            Ok(())
        }
    }
}
