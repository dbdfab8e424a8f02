use crate::endpoint::{item_url, list_url, normalize_base};
use crate::http::{read_listing, send_checked};
use anyhow::Context;
use import_core::api::{AdminApi, ApiFuture};
use import_core::config::AdminConfig;
use import_core::model::RepoDescriptor;
use reqwest::{Client, Method, RequestBuilder, Url};
use std::time::Duration;
use tracing::{debug, info};

pub const HOST_OVERRIDE_HEADER: &str = "X-Host-Override";
const USER_AGENT: &str = "import-admin";

/// `AdminApi` over HTTP. Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct HttpAdminClient {
    client: Client,
    base: String,
    host_override: Option<String>,
}

impl HttpAdminClient {
    pub fn new(
        base: &str,
        host_override: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;
        let host_override = host_override
            .map(|host| host.trim().to_string())
            .filter(|host| !host.is_empty());
        Ok(Self {
            client,
            base: normalize_base(base),
            host_override,
        })
    }

    pub fn from_config(config: &AdminConfig) -> anyhow::Result<Self> {
        Self::new(
            &config.api_base,
            config.host_override.clone(),
            Duration::from_secs(config.timeout_secs.max(1)),
        )
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header("User-Agent", USER_AGENT);
        match self.host_override.as_deref() {
            Some(host) => builder.header(HOST_OVERRIDE_HEADER, host),
            None => builder,
        }
    }
}

impl AdminApi for HttpAdminClient {
    fn list_repos<'a>(&'a self, prefix: &'a str) -> ApiFuture<'a, Vec<RepoDescriptor>> {
        Box::pin(async move {
            let url = list_url(&self.base, prefix)?;
            debug!(%url, "listing repos");
            let response = send_checked(self.request(Method::GET, url), "repo list")
                .await
                .context("call admin list repos")?;
            let repos = read_listing(response)
                .await
                .context("decode repos response")?;
            info!(prefix, count = repos.len(), "Listed repos");
            Ok(repos)
        })
    }

    fn create_repo<'a>(&'a self, repo: &'a RepoDescriptor) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let url = list_url(&self.base, "")?;
            let builder = self.request(Method::POST, url).json(repo);
            send_checked(builder, &repo.import_root)
                .await
                .context("call admin create repo")?;
            info!(import_root = %repo.import_root, vcs = %repo.vcs, "Created repo");
            Ok(())
        })
    }

    fn delete_repo<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let url = item_url(&self.base, id)?;
            send_checked(self.request(Method::DELETE, url), id)
                .await
                .context("call admin delete repo")?;
            info!(import_root = id, "Deleted repo");
            Ok(())
        })
    }

    fn host_override(&self) -> Option<&str> {
        self.host_override.as_deref()
    }
}
