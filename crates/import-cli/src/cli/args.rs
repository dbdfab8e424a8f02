use super::*;

#[derive(Parser)]
#[command(
    name = "import-admin",
    author,
    version,
    about = "Manage vanity import descriptors through the admin API"
)]
pub(super) struct Cli {
    #[arg(
        long,
        global = true,
        help = "Admin server origin (overrides config and IMPORT_ADMIN_API)"
    )]
    pub(super) api: Option<String>,
    #[arg(long, global = true, help = "Host sent as X-Host-Override")]
    pub(super) host: Option<String>,
    #[arg(long, global = true, help = "Config file (defaults to the platform config dir)")]
    pub(super) config: Option<PathBuf>,
    #[command(subcommand)]
    pub(super) command: Option<Commands>,
}

#[derive(clap::Subcommand)]
pub(super) enum Commands {
    #[command(about = "List descriptors, optionally filtered by prefix")]
    List(ListArgs),
    #[command(about = "Create a descriptor")]
    Create(CreateArgs),
    #[command(about = "Delete a descriptor by import root")]
    Delete(DeleteArgs),
    #[command(about = "Manage config")]
    Config(ConfigArgs),
    #[command(about = "Launch the terminal admin page")]
    Tui(TuiArgs),
}

#[derive(Parser)]
pub(super) struct ListArgs {
    #[arg(long)]
    pub(super) prefix: Option<String>,
    #[arg(long, help = "Print the raw JSON listing")]
    pub(super) json: bool,
}

#[derive(Parser)]
pub(super) struct CreateArgs {
    #[arg(long)]
    pub(super) import_root: String,
    #[arg(long)]
    pub(super) vcs_root: String,
    #[arg(long)]
    pub(super) vcs: String,
    #[arg(long, default_value = "")]
    pub(super) suffix: String,
}

impl CreateArgs {
    pub(super) fn draft(&self) -> RepoDraft {
        RepoDraft {
            import_root: self.import_root.clone(),
            vcs_root: self.vcs_root.clone(),
            vcs: self.vcs.clone(),
            suffix: self.suffix.clone(),
        }
    }
}

#[derive(Parser)]
pub(super) struct DeleteArgs {
    pub(super) id: String,
    #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
    pub(super) yes: bool,
}

#[derive(Parser)]
pub(super) struct ConfigArgs {
    #[command(subcommand)]
    pub(super) command: ConfigCommands,
}

#[derive(clap::Subcommand)]
pub(super) enum ConfigCommands {
    #[command(about = "Write a config file")]
    Init(InitArgs),
    #[command(about = "Print the effective config")]
    Show,
}

#[derive(Parser)]
pub(super) struct InitArgs {
    #[arg(long = "api-base")]
    pub(super) api_base: String,
    #[arg(long = "host-override")]
    pub(super) host_override: Option<String>,
    #[arg(long)]
    pub(super) heading: Option<String>,
    #[arg(long)]
    pub(super) prefix: Option<String>,
}

#[derive(Parser)]
pub(super) struct TuiArgs {
    #[arg(long)]
    pub(super) prefix: Option<String>,
}
