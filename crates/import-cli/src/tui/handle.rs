use super::*;

impl TuiApp {
    /// Returns true when the app should exit.
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
        if key.kind != KeyEventKind::Press {
            return Ok(false);
        }
        match self.mode.clone() {
            Mode::Browse => self.handle_browse(key),
            Mode::Filter => {
                self.handle_filter(key);
                Ok(false)
            }
            Mode::Create => {
                self.handle_create(key);
                Ok(false)
            }
            Mode::ConfirmDelete(id) => {
                self.handle_confirm_delete(key, &id)?;
                Ok(false)
            }
        }
    }

    fn handle_browse(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(true);
            }
            KeyCode::Up | KeyCode::Char('k') => self.page.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.page.select_next(),
            KeyCode::Char('r') => self.start_refresh(),
            KeyCode::Char('/') => {
                self.filter_input = self.page.prefix.clone();
                self.mode = Mode::Filter;
            }
            KeyCode::Char('n') => {
                self.page.open_create();
                self.input_index = 0;
                self.mode = Mode::Create;
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if self.page.saving {
                    self.page.set_status("Wait for the current save to finish");
                } else if let Some(repo) = self.page.selected_repo() {
                    self.mode = Mode::ConfirmDelete(repo.import_root.clone());
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_filter(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Enter => {
                let prefix = self.filter_input.clone();
                self.page.set_prefix(&prefix);
                self.mode = Mode::Browse;
                self.start_refresh();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter_input.clear();
            }
            KeyCode::Backspace => {
                self.filter_input.pop();
            }
            KeyCode::Char(ch) => self.filter_input.push(ch),
            _ => {}
        }
    }

    fn handle_create(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.page.cancel_create();
                self.mode = Mode::Browse;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.input_index = (self.input_index + 1) % FORM_LABELS.len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.input_index = (self.input_index + FORM_LABELS.len() - 1) % FORM_LABELS.len();
            }
            KeyCode::Enter => {
                if self.page.saving {
                    return;
                }
                match self.page.draft.missing_field() {
                    Some(field) => self.page.set_status(format!("{field} is required")),
                    None => self.start_create(),
                }
            }
            _ if self.page.saving => {}
            _ => self.handle_text_input(key),
        }
    }

    fn handle_text_input(&mut self, key: KeyEvent) {
        let field = self.form_field_mut(self.input_index);
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                field.clear();
            }
            KeyCode::Backspace => {
                field.pop();
            }
            KeyCode::Char(ch) => field.push(ch),
            _ => {}
        }
    }

    fn handle_confirm_delete(&mut self, key: KeyEvent, id: &str) -> anyhow::Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.mode = Mode::Browse;
                self.start_delete(id);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.mode = Mode::Browse;
                info!(import_root = id, "Delete cancelled");
                self.page.set_status(format!("Kept {id}"));
                self.audit.record(
                    "repo.delete",
                    AuditStatus::Skipped,
                    AuditContext::for_repo(id, self.page.host.as_deref()),
                    Some(serde_json::json!({ "source": "tui" })),
                    Some("declined"),
                )?;
            }
            _ => {}
        }
        Ok(())
    }
}
