use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One import mapping as the admin API stores it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RepoDescriptor {
    pub import_root: String,
    pub vcs_root: String,
    pub vcs: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub suffix: String,
}

impl RepoDescriptor {
    pub fn summary(&self) -> String {
        format!(
            "Name: {:<20} VCS: {} ({})",
            self.import_root, self.vcs_root, self.vcs
        )
    }

    pub fn go_import_meta(&self) -> String {
        format!("{} {} {}", self.import_root, self.vcs, self.vcs_root)
    }

    pub fn docs_url(&self) -> String {
        format!("https://godoc.org/{}{}", self.import_root, self.suffix)
    }

    /// Advisory findings only; the server decides what it accepts.
    pub fn lint(&self) -> Vec<LintFinding> {
        let mut findings = Vec::new();
        let (host, path) = split_import_root(&self.import_root);
        if host.split('.').count() < 2 {
            findings.push(LintFinding::HostWithoutDot(host));
        }
        if path.len() < 2 {
            findings.push(LintFinding::PathTooShort(path));
        }
        findings
    }
}

impl fmt::Display for RepoDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.import_root)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LintFinding {
    HostWithoutDot(String),
    PathTooShort(String),
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintFinding::HostWithoutDot(host) => write!(f, "host {host:?} has no dot"),
            LintFinding::PathTooShort(path) => write!(f, "import path {path:?} is too short"),
        }
    }
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum DraftError {
    #[error("missing {0}")]
    MissingField(&'static str),
}

/// Contents of the create form. Every field starts out empty.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RepoDraft {
    pub import_root: String,
    pub vcs_root: String,
    pub vcs: String,
    pub suffix: String,
}

impl RepoDraft {
    pub fn is_create_valid(&self) -> bool {
        self.missing_field().is_none()
    }

    pub fn missing_field(&self) -> Option<&'static str> {
        if self.import_root.trim().is_empty() {
            Some("import_root")
        } else if self.vcs_root.trim().is_empty() {
            Some("vcs_root")
        } else if self.vcs.trim().is_empty() {
            Some("vcs")
        } else {
            None
        }
    }

    pub fn to_descriptor(&self) -> Result<RepoDescriptor, DraftError> {
        if let Some(field) = self.missing_field() {
            return Err(DraftError::MissingField(field));
        }
        Ok(RepoDescriptor {
            import_root: self.import_root.trim().to_string(),
            vcs_root: self.vcs_root.trim().to_string(),
            vcs: self.vcs.trim().to_string(),
            suffix: self.suffix.trim().to_string(),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Splits `host/some/path` into the host and a cleaned `/some/path`.
/// The path is empty when nothing follows the host.
pub fn split_import_root(name: &str) -> (String, String) {
    let mut parts = name.splitn(2, '/');
    let host = parts.next().unwrap_or_default().to_string();
    let path = parts.next().map(clean_path).unwrap_or_default();
    (host, path)
}

fn clean_path(raw: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    if segments.is_empty() {
        String::new()
    } else {
        format!("/{}", segments.join("/"))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
