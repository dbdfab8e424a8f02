use crate::logging::{self, LogSink};
use crate::page::AdminPage;
use crate::tui;
use anyhow::Context;
use clap::Parser;
use import_api::HttpAdminClient;
use import_api::errors::{ApiError, is_network_error, status_message};
use import_core::api::AdminApi;
use import_core::audit::{AuditContext, AuditLogger, AuditStatus};
use import_core::config::{AdminConfig, default_config_path, default_data_dir};
use import_core::model::{RepoDescriptor, RepoDraft};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;
use tracing::info;

mod app;
mod args;
mod config_cmd;
mod repo_cmd;
mod shared;

use args::*;

use config_cmd::handle_config;
use repo_cmd::{Prompt, handle_create, handle_delete, handle_list};
use shared::*;

pub fn run(runtime: &Runtime) -> anyhow::Result<()> {
    app::run(runtime)
}
