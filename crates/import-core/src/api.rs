use crate::model::RepoDescriptor;
use std::future::Future;
use std::pin::Pin;

pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = anyhow::Result<T>> + Send + 'a>>;

/// The admin endpoint under `_api/`. Implementations issue exactly one
/// request per call.
pub trait AdminApi: Send + Sync {
    fn list_repos<'a>(&'a self, prefix: &'a str) -> ApiFuture<'a, Vec<RepoDescriptor>>;
    fn create_repo<'a>(&'a self, repo: &'a RepoDescriptor) -> ApiFuture<'a, ()>;
    fn delete_repo<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()>;

    /// Host sent as `X-Host-Override`, if any.
    fn host_override(&self) -> Option<&str> {
        None
    }
}
