use import_core::api::{AdminApi, ApiFuture};
use import_core::model::RepoDescriptor;
use std::sync::Mutex;
use std::time::Duration;

const SLOW_LIST: Duration = Duration::from_millis(200);

/// In-memory `_api/` shared by the page, CLI and TUI tests.
#[derive(Default)]
pub(crate) struct MemoryApi {
    pub(crate) repos: Mutex<Vec<RepoDescriptor>>,
    pub(crate) calls: Mutex<Vec<String>>,
    pub(crate) fail_list: Mutex<bool>,
    pub(crate) fail_create: bool,
    /// Number of upcoming listings that answer late with the data they saw
    /// when the request arrived.
    pub(crate) slow_lists: Mutex<usize>,
}

impl MemoryApi {
    pub(crate) fn with(roots: &[&str]) -> Self {
        let api = Self::default();
        *api.repos.lock().unwrap() = roots.iter().map(|root| repo(root)).collect();
        api
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn listing(&self, prefix: &str) -> Vec<RepoDescriptor> {
        self.repos
            .lock()
            .unwrap()
            .iter()
            .filter(|repo| repo.import_root.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn take_slow(&self) -> bool {
        let mut slow = self.slow_lists.lock().unwrap();
        if *slow > 0 {
            *slow -= 1;
            true
        } else {
            false
        }
    }
}

impl AdminApi for MemoryApi {
    fn list_repos<'a>(&'a self, prefix: &'a str) -> ApiFuture<'a, Vec<RepoDescriptor>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(format!("GET {prefix}"));
            let fail = *self.fail_list.lock().unwrap();
            if fail {
                anyhow::bail!("connection refused");
            }
            let snapshot = self.listing(prefix);
            if self.take_slow() {
                tokio::time::sleep(SLOW_LIST).await;
            }
            Ok(snapshot)
        })
    }

    fn create_repo<'a>(&'a self, repo: &'a RepoDescriptor) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push(format!("POST {}", repo.import_root));
            if self.fail_create {
                anyhow::bail!("HTTP 409");
            }
            self.repos.lock().unwrap().push(repo.clone());
            Ok(())
        })
    }

    fn delete_repo<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(format!("DELETE {id}"));
            self.repos
                .lock()
                .unwrap()
                .retain(|repo| repo.import_root != id);
            Ok(())
        })
    }
}

pub(crate) fn repo(root: &str) -> RepoDescriptor {
    RepoDescriptor {
        import_root: root.to_string(),
        vcs_root: format!("https://github.com/{root}"),
        vcs: "git".to_string(),
        suffix: String::new(),
    }
}
