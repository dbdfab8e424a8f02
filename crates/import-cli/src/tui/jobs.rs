use super::*;

impl TuiApp {
    /// The newest listing wins. Replacing the receiver drops the result of
    /// any request still in flight, so a listing started before a filter
    /// change or a mutation never lands on the page.
    pub(super) fn start_refresh(&mut self) {
        if self.refreshing() {
            debug!("Superseding in-flight refresh");
        }
        let (tx, rx) = mpsc::channel();
        self.list_rx = Some(rx);
        let client = Arc::clone(&self.client);
        let prefix = self.page.prefix.clone();
        debug!(prefix = %prefix, "Starting refresh");
        self.runtime.spawn(async move {
            let result = client
                .list_repos(&prefix)
                .await
                .map_err(|err| format!("{err:#}"));
            let _ = tx.send(result);
        });
    }

    pub(super) fn start_create(&mut self) {
        let Some(repo) = self.page.begin_create() else {
            return;
        };
        info!(import_root = %repo.import_root, "Submitting create");
        let (tx, rx) = mpsc::channel();
        self.mutation_rx = Some(rx);
        let client = Arc::clone(&self.client);
        self.runtime.spawn(async move {
            let result = client
                .create_repo(&repo)
                .await
                .map_err(|err| format!("{err:#}"));
            let _ = tx.send(MutationOutcome::Created {
                import_root: repo.import_root,
                result,
            });
        });
    }

    pub(super) fn start_delete(&mut self, id: &str) {
        let Some(id) = self.page.begin_delete(id) else {
            return;
        };
        info!(import_root = %id, "Submitting delete");
        let (tx, rx) = mpsc::channel();
        self.mutation_rx = Some(rx);
        let client = Arc::clone(&self.client);
        self.runtime.spawn(async move {
            let result = client
                .delete_repo(&id)
                .await
                .map_err(|err| format!("{err:#}"));
            let _ = tx.send(MutationOutcome::Deleted { id, result });
        });
    }

    pub(super) fn poll_jobs(&mut self) -> anyhow::Result<()> {
        self.poll_listing();
        self.poll_mutation()
    }

    fn poll_listing(&mut self) {
        let Some(rx) = self.list_rx.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => self.page.apply_listing(result),
            Err(TryRecvError::Empty) => self.list_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                self.page
                    .apply_listing(Err("refresh task ended without a result".to_string()));
            }
        }
    }

    fn poll_mutation(&mut self) -> anyhow::Result<()> {
        let Some(rx) = self.mutation_rx.take() else {
            return Ok(());
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => {
                self.mutation_rx = Some(rx);
                return Ok(());
            }
            Err(TryRecvError::Disconnected) => {
                warn!("Save task ended without a result");
                self.page.saving = false;
                self.page.set_status("Save task ended without a result");
                return Ok(());
            }
        };

        let host = self.page.host.clone();
        let (event, import_root, refetch, error) = match outcome {
            MutationOutcome::Created {
                import_root,
                result,
            } => {
                let error = result.as_ref().err().cloned();
                let refetch = self.page.finish_create(&import_root, result);
                if refetch {
                    self.mode = Mode::Browse;
                    self.input_index = 0;
                }
                ("repo.create", import_root, refetch, error)
            }
            MutationOutcome::Deleted { id, result } => {
                let error = result.as_ref().err().cloned();
                let refetch = self.page.finish_delete(&id, result);
                ("repo.delete", id, refetch, error)
            }
        };

        let status = if error.is_some() {
            AuditStatus::Failed
        } else {
            AuditStatus::Ok
        };
        self.audit.record(
            event,
            status,
            AuditContext::for_repo(&import_root, host.as_deref()),
            Some(serde_json::json!({ "source": "tui" })),
            error.as_deref(),
        )?;
        if refetch {
            self.start_refresh();
        }
        Ok(())
    }
}
