use super::draw::{adjust_scroll, footer_text, repo_row};
use super::*;
use crate::test_support::{MemoryApi, repo};
use tempfile::TempDir;
use tokio::runtime::Runtime;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut TuiApp, text: &str) {
    for ch in text.chars() {
        app.handle_key(key(KeyCode::Char(ch))).unwrap();
    }
}

fn settle(app: &mut TuiApp) {
    for _ in 0..200 {
        app.poll_jobs().unwrap();
        if !app.refreshing() && app.mutation_rx.is_none() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("background job did not finish");
}

fn test_app(runtime: &Runtime, tmp: &TempDir, api: Arc<MemoryApi>) -> TuiApp {
    let mut app = TuiApp::load(
        &AdminConfig::default(),
        "http://localhost:19980".to_string(),
        api,
        runtime.handle().clone(),
        AuditLogger::new_with_dir(tmp.path().to_path_buf(), 1024 * 1024).unwrap(),
        LogBuffer::new(50),
    );
    settle(&mut app);
    app
}

fn audit_lines(tmp: &TempDir) -> String {
    let mut out = String::new();
    for entry in std::fs::read_dir(tmp.path()).unwrap() {
        out.push_str(&std::fs::read_to_string(entry.unwrap().path()).unwrap());
    }
    out
}

#[test]
fn startup_loads_listing() {
    let runtime = Runtime::new().unwrap();
    let tmp = TempDir::new().unwrap();
    let api = Arc::new(MemoryApi::with(&["jw4.us/a", "jw4.us/b"]));

    let app = test_app(&runtime, &tmp, Arc::clone(&api));
    assert_eq!(app.page.repos.len(), 2);
    assert_eq!(api.calls(), vec!["GET "]);
    assert_eq!(
        app.status_text(),
        "jw4.us/a git https://github.com/jw4.us/a | https://godoc.org/jw4.us/a"
    );
}

#[test]
fn filter_applies_prefix_and_refetches() {
    let runtime = Runtime::new().unwrap();
    let tmp = TempDir::new().unwrap();
    let api = Arc::new(MemoryApi::with(&["jw4.us/a", "other.io/b"]));
    let mut app = test_app(&runtime, &tmp, Arc::clone(&api));

    app.handle_key(key(KeyCode::Char('/'))).unwrap();
    assert_eq!(app.mode, Mode::Filter);
    type_text(&mut app, "jw4");
    app.handle_key(key(KeyCode::Enter)).unwrap();
    settle(&mut app);

    assert_eq!(app.mode, Mode::Browse);
    assert_eq!(app.page.prefix, "jw4");
    assert_eq!(app.page.repos, vec![repo("jw4.us/a")]);
    assert_eq!(api.calls(), vec!["GET ", "GET jw4"]);
}

#[test]
fn create_form_requires_fields_then_submits() {
    let runtime = Runtime::new().unwrap();
    let tmp = TempDir::new().unwrap();
    let api = Arc::new(MemoryApi::default());
    let mut app = test_app(&runtime, &tmp, Arc::clone(&api));

    app.handle_key(key(KeyCode::Char('n'))).unwrap();
    assert_eq!(app.mode, Mode::Create);
    assert!(app.page.create);
    type_text(&mut app, "jw4.us/new");
    app.handle_key(key(KeyCode::Enter)).unwrap();
    assert_eq!(app.page.status.as_deref(), Some("vcs_root is required"));
    assert!(!app.page.saving);

    app.handle_key(key(KeyCode::Tab)).unwrap();
    type_text(&mut app, "https://github.com/jw4/new");
    app.handle_key(key(KeyCode::Tab)).unwrap();
    type_text(&mut app, "git");
    assert!(app.page.create_valid());
    app.handle_key(key(KeyCode::Enter)).unwrap();
    assert!(app.page.saving);
    settle(&mut app);

    assert_eq!(app.mode, Mode::Browse);
    assert!(!app.page.create);
    assert!(!app.page.saving);
    assert!(app.page.draft.import_root.is_empty());
    assert_eq!(app.page.repos.len(), 1);
    assert_eq!(api.calls(), vec!["GET ", "POST jw4.us/new", "GET "]);
    assert!(audit_lines(&tmp).contains("repo.create"));
}

#[test]
fn escape_cancels_create_and_clears_draft() {
    let runtime = Runtime::new().unwrap();
    let tmp = TempDir::new().unwrap();
    let mut app = test_app(&runtime, &tmp, Arc::new(MemoryApi::default()));

    app.handle_key(key(KeyCode::Char('n'))).unwrap();
    type_text(&mut app, "jw4.us/x");
    app.handle_key(key(KeyCode::Esc)).unwrap();
    assert_eq!(app.mode, Mode::Browse);
    assert!(!app.page.create);
    assert!(app.page.draft.import_root.is_empty());
}

#[test]
fn delete_waits_for_confirmation() {
    let runtime = Runtime::new().unwrap();
    let tmp = TempDir::new().unwrap();
    let api = Arc::new(MemoryApi::with(&["jw4.us/a", "jw4.us/b"]));
    let mut app = test_app(&runtime, &tmp, Arc::clone(&api));

    app.handle_key(key(KeyCode::Down)).unwrap();
    app.handle_key(key(KeyCode::Char('d'))).unwrap();
    assert_eq!(app.mode, Mode::ConfirmDelete("jw4.us/b".to_string()));
    assert_eq!(app.status_text(), "Delete jw4.us/b? (y/n)");

    app.handle_key(key(KeyCode::Char('n'))).unwrap();
    assert_eq!(app.mode, Mode::Browse);
    assert_eq!(api.calls(), vec!["GET "]);
    assert!(audit_lines(&tmp).contains("skipped"));

    app.handle_key(key(KeyCode::Char('d'))).unwrap();
    app.handle_key(key(KeyCode::Char('y'))).unwrap();
    settle(&mut app);
    assert_eq!(app.page.repos, vec![repo("jw4.us/a")]);
    assert_eq!(app.page.selected, 0);
    assert_eq!(api.calls(), vec!["GET ", "DELETE jw4.us/b", "GET "]);
}

#[test]
fn filter_change_supersedes_slow_refresh() {
    let runtime = Runtime::new().unwrap();
    let tmp = TempDir::new().unwrap();
    let api = Arc::new(MemoryApi::with(&["jw4.us/a", "other.io/b"]));
    let mut app = test_app(&runtime, &tmp, Arc::clone(&api));

    *api.slow_lists.lock().unwrap() = 1;
    app.handle_key(key(KeyCode::Char('r'))).unwrap();
    app.handle_key(key(KeyCode::Char('/'))).unwrap();
    type_text(&mut app, "jw4");
    app.handle_key(key(KeyCode::Enter)).unwrap();
    settle(&mut app);

    assert!(api.calls().contains(&"GET jw4".to_string()));
    assert_eq!(app.page.prefix, "jw4");
    assert_eq!(app.page.repos, vec![repo("jw4.us/a")]);

    std::thread::sleep(Duration::from_millis(300));
    app.poll_jobs().unwrap();
    assert_eq!(app.page.repos, vec![repo("jw4.us/a")]);
}

#[test]
fn delete_refetch_supersedes_slow_refresh() {
    let runtime = Runtime::new().unwrap();
    let tmp = TempDir::new().unwrap();
    let api = Arc::new(MemoryApi::with(&["jw4.us/a", "jw4.us/b"]));
    let mut app = test_app(&runtime, &tmp, Arc::clone(&api));

    *api.slow_lists.lock().unwrap() = 1;
    app.handle_key(key(KeyCode::Char('r'))).unwrap();
    app.handle_key(key(KeyCode::Down)).unwrap();
    app.handle_key(key(KeyCode::Char('d'))).unwrap();
    app.handle_key(key(KeyCode::Char('y'))).unwrap();
    settle(&mut app);

    assert_eq!(api.listing(""), vec![repo("jw4.us/a")]);
    assert_eq!(app.page.repos, vec![repo("jw4.us/a")]);
    assert_eq!(app.page.status.as_deref(), Some("Deleted jw4.us/b"));

    std::thread::sleep(Duration::from_millis(300));
    app.poll_jobs().unwrap();
    assert_eq!(app.page.repos, vec![repo("jw4.us/a")]);
}

#[test]
fn quit_only_from_browse() {
    let runtime = Runtime::new().unwrap();
    let tmp = TempDir::new().unwrap();
    let mut app = test_app(&runtime, &tmp, Arc::new(MemoryApi::default()));

    app.handle_key(key(KeyCode::Char('n'))).unwrap();
    assert!(!app.handle_key(key(KeyCode::Char('q'))).unwrap());
    assert_eq!(app.page.draft.import_root, "q");
    app.handle_key(key(KeyCode::Esc)).unwrap();
    assert!(app.handle_key(key(KeyCode::Char('q'))).unwrap());
}

#[test]
fn rows_and_scroll_follow_selection() {
    let mut with_suffix = repo("jw4.us/a");
    with_suffix.suffix = "/v2".to_string();
    let row = repo_row(&with_suffix, true);
    assert!(row.starts_with("> jw4.us/a"));
    assert!(row.ends_with("(/v2)"));
    assert!(repo_row(&repo("jw4.us/b"), false).starts_with("  jw4.us/b"));

    assert_eq!(adjust_scroll(0, 0, 5, 0), 0);
    assert_eq!(adjust_scroll(7, 0, 5, 10), 3);
    assert_eq!(adjust_scroll(2, 3, 5, 10), 2);
    assert_eq!(adjust_scroll(4, 1, 5, 10), 1);
    assert!(footer_text(&Mode::Browse).contains("n: new"));
}
