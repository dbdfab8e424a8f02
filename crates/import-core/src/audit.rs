use crate::config::default_data_dir;
use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

const MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Append-only JSONL record of what the admin client did.
#[derive(Clone)]
pub struct AuditLogger {
    session_id: String,
    base_dir: PathBuf,
    max_bytes: u64,
}

impl AuditLogger {
    pub fn new() -> anyhow::Result<Self> {
        Self::new_with_dir(default_data_dir()?.join("audit"), MAX_BYTES)
    }

    pub fn new_with_dir(base_dir: PathBuf, max_bytes: u64) -> anyhow::Result<Self> {
        fs::create_dir_all(&base_dir).context("create audit dir")?;
        Ok(Self {
            session_id: Uuid::new_v4().to_string(),
            base_dir,
            max_bytes,
        })
    }

    pub fn record(
        &self,
        event: &str,
        status: AuditStatus,
        context: AuditContext,
        details: Option<Value>,
        error: Option<&str>,
    ) -> anyhow::Result<String> {
        let ts = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("format timestamp")?;
        let audit_id = Uuid::new_v4().to_string();
        let entry = AuditEvent {
            ts,
            level: status.level(),
            event: event.to_string(),
            audit_id: audit_id.clone(),
            session_id: self.session_id.clone(),
            status: status.as_str(),
            import_root: context.import_root,
            host: context.host,
            prefix: context.prefix,
            error: error.map(|value| value.to_string()),
            details,
        };
        self.write_entry(&entry)?;
        Ok(audit_id)
    }

    fn write_entry(&self, entry: &AuditEvent) -> anyhow::Result<()> {
        let date = OffsetDateTime::now_utc()
            .format(&time::format_description::parse("[year][month][day]")?)
            .context("format date")?;
        let path = next_audit_path(&self.base_dir, &date, self.max_bytes);
        let line = serde_json::to_string(entry).context("serialize audit entry")?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open audit log {}", path.display()))?;
        writeln!(file, "{line}").context("write audit entry")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStatus {
    Ok,
    Failed,
    Skipped,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditStatus::Ok => "ok",
            AuditStatus::Failed => "failed",
            AuditStatus::Skipped => "skipped",
        }
    }

    fn level(&self) -> &'static str {
        match self {
            AuditStatus::Ok => "INFO",
            AuditStatus::Failed => "ERROR",
            AuditStatus::Skipped => "WARN",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditContext {
    pub import_root: Option<String>,
    pub host: Option<String>,
    pub prefix: Option<String>,
}

impl AuditContext {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn for_repo(import_root: &str, host: Option<&str>) -> Self {
        Self {
            import_root: Some(import_root.to_string()),
            host: host.map(|value| value.to_string()),
            prefix: None,
        }
    }

    pub fn for_listing(prefix: &str, host: Option<&str>) -> Self {
        Self {
            import_root: None,
            host: host.map(|value| value.to_string()),
            prefix: Some(prefix.to_string()),
        }
    }
}

#[derive(Serialize)]
struct AuditEvent {
    ts: String,
    level: &'static str,
    event: String,
    audit_id: String,
    session_id: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    import_root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

fn next_audit_path(base_dir: &Path, date: &str, max_bytes: u64) -> PathBuf {
    let mut suffix = 0;
    loop {
        let name = if suffix == 0 {
            format!("audit-{date}.jsonl")
        } else {
            format!("audit-{date}-{suffix}.jsonl")
        };
        let path = base_dir.join(name);
        if let Ok(metadata) = fs::metadata(&path)
            && metadata.len() >= max_bytes
        {
            suffix += 1;
            continue;
        }
        return path;
    }
}
