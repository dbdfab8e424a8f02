use crate::errors::ApiError;
use import_core::model::RepoDescriptor;
use reqwest::{RequestBuilder, Response};
use tracing::debug;

/// Sends once and turns any non-2xx status into an [`ApiError`].
pub async fn send_checked(builder: RequestBuilder, context: &str) -> Result<Response, ApiError> {
    let response = builder.send().await.map_err(ApiError::Transport)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), context, body = %body.trim(), "Admin API error response");
    Err(ApiError::from_status(status, context, body.trim()))
}

pub async fn read_listing(response: Response) -> Result<Vec<RepoDescriptor>, ApiError> {
    let bytes = response.bytes().await.map_err(ApiError::Transport)?;
    parse_listing(&bytes)
}

/// The server encodes an empty result set as `null`.
pub fn parse_listing(bytes: &[u8]) -> Result<Vec<RepoDescriptor>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let payload: Option<Vec<RepoDescriptor>> =
        serde_json::from_slice(bytes).map_err(ApiError::Decode)?;
    Ok(payload.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_listing_accepts_null_and_empty() {
        assert!(parse_listing(b"null").unwrap().is_empty());
        assert!(parse_listing(b"  \n").unwrap().is_empty());
        assert!(parse_listing(b"[]").unwrap().is_empty());
    }

    #[test]
    fn parse_listing_reads_descriptors() {
        let body = br#"[{"import_root":"jw4.us/import","vcs_root":"https://github.com/jw4/import","vcs":"git","suffix":""}]"#;
        let repos = parse_listing(body).unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].import_root, "jw4.us/import");
    }

    #[test]
    fn parse_listing_rejects_html() {
        let err = parse_listing(b"<!DOCTYPE html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
