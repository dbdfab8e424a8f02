//! State behind the admin page: the last listing, the filter, the create
//! form and the `create`/`saving` flags.
//!
//! Mutations are split into `begin_*`/`finish_*` so the terminal UI can run
//! the request as a background task; the async helpers chain the two steps
//! for the one-shot CLI commands.

use import_core::api::AdminApi;
use import_core::config::AdminConfig;
use import_core::model::{RepoDescriptor, RepoDraft};
use tracing::{error, info, warn};

pub struct AdminPage {
    pub heading: String,
    pub host: Option<String>,
    pub prefix: String,
    pub repos: Vec<RepoDescriptor>,
    pub selected: usize,
    pub create: bool,
    pub saving: bool,
    pub draft: RepoDraft,
    pub status: Option<String>,
    refresh_failed: bool,
}

impl AdminPage {
    pub fn new(heading: &str, host: Option<String>, prefix: &str) -> Self {
        Self {
            heading: heading.to_string(),
            host,
            prefix: prefix.to_string(),
            repos: Vec::new(),
            selected: 0,
            create: false,
            saving: false,
            draft: RepoDraft::default(),
            status: None,
            refresh_failed: false,
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(
            &config.heading,
            config.host_override.clone(),
            config.default_prefix.as_deref().unwrap_or_default(),
        )
    }

    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix = prefix.trim().to_string();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.refresh_failed = false;
    }

    /// The error is also kept in `status`.
    pub async fn refresh(&mut self, api: &dyn AdminApi) -> anyhow::Result<()> {
        match api.list_repos(&self.prefix).await {
            Ok(repos) => {
                self.apply_listing(Ok(repos));
                Ok(())
            }
            Err(err) => {
                self.apply_listing(Err(format!("{err:#}")));
                Err(err)
            }
        }
    }

    /// A failed fetch keeps whatever was shown before. A later successful
    /// fetch clears the failure message.
    pub fn apply_listing(&mut self, result: Result<Vec<RepoDescriptor>, String>) {
        match result {
            Ok(repos) => {
                info!(prefix = %self.prefix, count = repos.len(), "Repo list refreshed");
                self.repos = repos;
                self.selected = clamp_index(self.selected, self.repos.len());
                if self.refresh_failed {
                    self.status = None;
                    self.refresh_failed = false;
                }
            }
            Err(err) => {
                error!(prefix = %self.prefix, error = %err, "Repo list refresh failed");
                self.set_status(format!("Refresh failed: {err}"));
                self.refresh_failed = true;
            }
        }
    }

    pub fn open_create(&mut self) {
        self.create = true;
    }

    pub fn cancel_create(&mut self) {
        self.create = false;
        self.draft.clear();
    }

    pub fn create_valid(&self) -> bool {
        self.draft.is_create_valid()
    }

    pub fn begin_create(&mut self) -> Option<RepoDescriptor> {
        if self.saving {
            warn!("Create ignored while a save is running");
            return None;
        }
        let repo = match self.draft.to_descriptor() {
            Ok(repo) => repo,
            Err(err) => {
                self.set_status(format!("Cannot create: {err}"));
                return None;
            }
        };
        for finding in repo.lint() {
            warn!(import_root = %repo.import_root, %finding, "Descriptor looks unusual");
        }
        self.saving = true;
        Some(repo)
    }

    /// Returns true when the listing should be refetched.
    pub fn finish_create(&mut self, import_root: &str, result: Result<(), String>) -> bool {
        self.saving = false;
        match result {
            Ok(()) => {
                self.create = false;
                self.draft.clear();
                self.set_status(format!("Created {import_root}"));
                true
            }
            Err(err) => {
                error!(import_root, error = %err, "Create failed");
                self.set_status(format!("Create failed: {err}"));
                false
            }
        }
    }

    /// `Ok(false)` when nothing was sent: the draft is not create-valid or
    /// a save is already running.
    pub async fn create(&mut self, api: &dyn AdminApi) -> anyhow::Result<bool> {
        let Some(repo) = self.begin_create() else {
            return Ok(false);
        };
        if let Err(err) = api.create_repo(&repo).await {
            self.finish_create(&repo.import_root, Err(format!("{err:#}")));
            return Err(err);
        }
        self.finish_create(&repo.import_root, Ok(()));
        // A failed refetch is already reported through `status`.
        let _ = self.refresh(api).await;
        Ok(true)
    }

    pub fn selected_repo(&self) -> Option<&RepoDescriptor> {
        self.repos.get(self.selected)
    }

    pub fn select_next(&mut self) {
        self.selected = clamp_index(self.selected.saturating_add(1), self.repos.len());
        self.status = None;
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.status = None;
    }

    pub fn begin_delete(&mut self, id: &str) -> Option<String> {
        if self.saving {
            warn!(import_root = id, "Delete ignored while a save is running");
            return None;
        }
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        self.saving = true;
        Some(id.to_string())
    }

    pub fn finish_delete(&mut self, id: &str, result: Result<(), String>) -> bool {
        self.saving = false;
        match result {
            Ok(()) => {
                self.set_status(format!("Deleted {id}"));
                true
            }
            Err(err) => {
                error!(import_root = id, error = %err, "Delete failed");
                self.set_status(format!("Delete failed: {err}"));
                false
            }
        }
    }

    /// Issues nothing unless `confirm` accepts the prompt. `Ok(false)` when
    /// the prompt was declined or nothing could be sent.
    pub async fn delete<F>(
        &mut self,
        api: &dyn AdminApi,
        id: &str,
        confirm: F,
    ) -> anyhow::Result<bool>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(&delete_prompt(id)) {
            info!(import_root = id, "Delete cancelled");
            return Ok(false);
        }
        let Some(id) = self.begin_delete(id) else {
            return Ok(false);
        };
        if let Err(err) = api.delete_repo(&id).await {
            self.finish_delete(&id, Err(format!("{err:#}")));
            return Err(err);
        }
        self.finish_delete(&id, Ok(()));
        let _ = self.refresh(api).await;
        Ok(true)
    }
}

pub fn delete_prompt(id: &str) -> String {
    format!("Delete {id}?")
}

pub fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { index.min(len - 1) }
}
