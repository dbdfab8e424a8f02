use super::*;
use ratatui::layout::Rect;

const LOG_PANEL_BORDER_HEIGHT: u16 = 2;

impl TuiApp {
    pub(super) fn draw(&mut self, frame: &mut ratatui::Frame) {
        let form_height = if self.page.create {
            FORM_LABELS.len() as u16 + 2
        } else {
            0
        };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(form_height),
                Constraint::Length(3),
                Constraint::Length(LOG_PANEL_HEIGHT),
                Constraint::Length(3),
            ])
            .split(frame.size());

        let header = Paragraph::new(format!(
            "{} | host: {} | api: {}",
            self.page.heading,
            self.host_label(),
            self.api_base
        ))
        .block(Block::default().borders(Borders::ALL).title("Header"));
        frame.render_widget(header, layout[0]);

        self.draw_filter(frame, layout[1]);
        self.draw_repos(frame, layout[2]);
        if self.page.create {
            self.draw_form(frame, layout[3]);
        }

        let status = Paragraph::new(self.status_text())
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(status, layout[4]);

        self.draw_log_panel(frame, layout[5]);

        let footer = Paragraph::new(footer_text(&self.mode))
            .block(Block::default().borders(Borders::ALL).title("Help"));
        frame.render_widget(footer, layout[6]);
    }

    fn draw_filter(&self, frame: &mut ratatui::Frame, area: Rect) {
        let line = if self.mode == Mode::Filter {
            Line::from(vec![
                Span::styled("> Prefix: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("{}_", self.filter_input)),
            ])
        } else if self.page.prefix.is_empty() {
            Line::from("Prefix: (all repos)")
        } else {
            Line::from(format!("Prefix: {}", self.page.prefix))
        };
        let widget = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Filter"));
        frame.render_widget(widget, area);
    }

    fn draw_repos(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        let height = area.height.saturating_sub(2) as usize;
        self.scroll = adjust_scroll(self.page.selected, self.scroll, height, self.page.repos.len());

        let mut title = format!("Repos ({})", self.page.repos.len());
        if self.refreshing() {
            title.push_str(" [loading]");
        }
        if self.page.saving {
            title.push_str(" [saving]");
        }

        let items: Vec<ListItem> = if self.page.repos.is_empty() {
            vec![ListItem::new("No repos match this prefix.")]
        } else {
            self.page
                .repos
                .iter()
                .enumerate()
                .skip(self.scroll)
                .take(height)
                .map(|(index, repo)| {
                    let selected = index == self.page.selected;
                    let style = if selected {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    ListItem::new(Line::from(Span::styled(repo_row(repo, selected), style)))
                })
                .collect()
        };
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(list, area);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame, area: Rect) {
        let lines: Vec<Line> = FORM_LABELS
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let marker = if index == self.input_index { "> " } else { "  " };
                let text = format!("{marker}{label}: {}", self.form_field(index));
                if index == self.input_index {
                    Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
                } else {
                    Line::from(text)
                }
            })
            .collect();
        let title = if self.page.saving {
            "Create (saving...)"
        } else if self.page.create_valid() {
            "Create (Enter: save)"
        } else {
            "Create (import root, VCS root and VCS required)"
        };
        let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(widget, area);
    }

    fn draw_log_panel(&self, frame: &mut ratatui::Frame, area: Rect) {
        let max_lines = area.height.saturating_sub(LOG_PANEL_BORDER_HEIGHT) as usize;
        if max_lines == 0 {
            return;
        }
        let entries = self.log_buffer.tail(max_lines);
        let lines: Vec<Line> = if entries.is_empty() {
            vec![Line::from(Span::raw("No log messages yet."))]
        } else {
            entries
                .iter()
                .map(|entry| Line::from(Span::raw(entry.format_compact())))
                .collect()
        };
        let widget = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Logs"));
        frame.render_widget(widget, area);
    }

    pub(super) fn status_text(&self) -> String {
        if let Mode::ConfirmDelete(id) = &self.mode {
            return format!("{} (y/n)", delete_prompt(id));
        }
        if let Some(status) = &self.page.status {
            return status.clone();
        }
        if let Some(repo) = self.page.selected_repo() {
            return format!("{} | {}", repo.go_import_meta(), repo.docs_url());
        }
        "Ready".to_string()
    }
}

pub(super) fn footer_text(mode: &Mode) -> &'static str {
    match mode {
        Mode::Browse => "Up/Down: select | /: filter | r: refresh | n: new | d: delete | q: quit",
        Mode::Filter => "Enter: apply prefix | Ctrl+C: clear | Esc: cancel",
        Mode::Create => "Tab: next field | Enter: create | Ctrl+C: clear field | Esc: cancel",
        Mode::ConfirmDelete(_) => "y: delete | n/Esc: keep",
    }
}

pub(super) fn repo_row(repo: &RepoDescriptor, selected: bool) -> String {
    let marker = if selected { ">" } else { " " };
    let mut row = format!(
        "{marker} {:<30} {:<4} {}",
        repo.import_root, repo.vcs, repo.vcs_root
    );
    if !repo.suffix.is_empty() {
        row.push_str(&format!(" ({})", repo.suffix));
    }
    row
}

pub(super) fn adjust_scroll(selected: usize, scroll: usize, height: usize, len: usize) -> usize {
    if len == 0 || height == 0 {
        return 0;
    }
    if selected < scroll {
        return selected;
    }
    let last_visible = scroll.saturating_add(height).saturating_sub(1);
    if selected > last_visible {
        return selected.saturating_sub(height - 1);
    }
    scroll
}
