use super::*;

impl TuiApp {
    /// The first listing is requested straight away, like the page's
    /// on-create hook.
    pub(super) fn load(
        config: &AdminConfig,
        api_base: String,
        client: Arc<dyn AdminApi>,
        runtime: Handle,
        audit: AuditLogger,
        log_buffer: LogBuffer,
    ) -> Self {
        let mut app = Self {
            page: AdminPage::from_config(config),
            api_base,
            client,
            runtime,
            audit,
            log_buffer,
            mode: Mode::Browse,
            filter_input: String::new(),
            input_index: 0,
            scroll: 0,
            list_rx: None,
            mutation_rx: None,
        };
        app.start_refresh();
        app
    }

    pub(super) fn refreshing(&self) -> bool {
        self.list_rx.is_some()
    }

    pub(super) fn form_field_mut(&mut self, index: usize) -> &mut String {
        let draft = &mut self.page.draft;
        match index {
            0 => &mut draft.import_root,
            1 => &mut draft.vcs_root,
            2 => &mut draft.vcs,
            _ => &mut draft.suffix,
        }
    }

    pub(super) fn form_field(&self, index: usize) -> &str {
        let draft = &self.page.draft;
        match index {
            0 => &draft.import_root,
            1 => &draft.vcs_root,
            2 => &draft.vcs,
            _ => &draft.suffix,
        }
    }

    pub(super) fn host_label(&self) -> &str {
        self.page.host.as_deref().unwrap_or("(request host)")
    }
}
