use super::*;

pub(super) fn run(runtime: &Runtime) -> anyhow::Result<()> {
    let cli = Cli::parse();
    let tui_mode = matches!(cli.command, None | Some(Commands::Tui(_)));
    let log_path = default_data_dir()?.join("import-admin.log");
    let sink = if tui_mode {
        LogSink::File(&log_path)
    } else {
        LogSink::Stderr
    };
    let log_buffer = logging::init_tracing(sink)?;

    let audit = AuditLogger::new()?;
    audit.record(
        "app.start",
        AuditStatus::Ok,
        AuditContext::empty(),
        None,
        None,
    )?;

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = resolve_config(&config_path, cli.api.as_deref(), cli.host.as_deref())?;
    info!(
        command = command_label(cli.command.as_ref()),
        api = %config.api_base,
        host = config.host_override.as_deref().unwrap_or("-"),
        "Running command"
    );

    let result = match cli.command {
        None => tui::run_tui(config, &audit, log_buffer, runtime.handle().clone()),
        Some(Commands::Tui(args)) => {
            let mut config = config;
            if let Some(prefix) = args.prefix {
                config.default_prefix = Some(prefix);
            }
            tui::run_tui(config, &audit, log_buffer, runtime.handle().clone())
        }
        Some(Commands::List(args)) => HttpAdminClient::from_config(&config)
            .and_then(|client| runtime.block_on(handle_list(args, &config, &client, &audit))),
        Some(Commands::Create(args)) => HttpAdminClient::from_config(&config)
            .and_then(|client| runtime.block_on(handle_create(args, &config, &client, &audit))),
        Some(Commands::Delete(args)) => HttpAdminClient::from_config(&config).and_then(|client| {
            let mut input = io::stdin().lock();
            let mut output = io::stdout();
            let prompt: Prompt<'_> = if stdin_is_tty() {
                Some((&mut input as &mut dyn BufRead, &mut output as &mut dyn Write))
            } else {
                None
            };
            runtime.block_on(handle_delete(args, &config, &client, &audit, prompt))
        }),
        Some(Commands::Config(args)) => handle_config(args, &config_path, &config),
    };

    if let Err(err) = &result {
        let _ = audit.record(
            "app.error",
            AuditStatus::Failed,
            AuditContext::empty(),
            None,
            Some(&format!("{err:#}")),
        );
    }

    result
}

/// File, then environment, then flags.
pub(super) fn resolve_config(
    path: &Path,
    api: Option<&str>,
    host: Option<&str>,
) -> anyhow::Result<AdminConfig> {
    let mut config = AdminConfig::load(path)?;
    config.apply_env();
    if let Some(api) = api {
        config.api_base = api.to_string();
    }
    if let Some(host) = host {
        config.host_override = optional_text(host);
    }
    Ok(config)
}

pub(super) fn command_label(command: Option<&Commands>) -> &'static str {
    match command {
        None | Some(Commands::Tui(_)) => "tui",
        Some(Commands::List(_)) => "list",
        Some(Commands::Create(_)) => "create",
        Some(Commands::Delete(_)) => "delete",
        Some(Commands::Config(_)) => "config",
    }
}
