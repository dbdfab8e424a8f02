use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid admin API base url {0:?}")]
    InvalidBase(String),
    #[error("descriptor id must not be empty")]
    InvalidId,
    #[error("admin API refused {context} (HTTP {status})")]
    Unauthorized { status: StatusCode, context: String },
    #[error("admin API has no {context} (HTTP 404)")]
    NotFound { context: String },
    #[error("admin API reports {context} already exists (HTTP 409)")]
    Conflict { context: String },
    #[error("admin API returned HTTP {status} for {context}: {body}")]
    Rejected {
        status: StatusCode,
        context: String,
        body: String,
    },
    #[error("send request to admin API")]
    Transport(#[source] reqwest::Error),
    #[error("decode admin API response")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    pub fn from_status(status: StatusCode, context: &str, body: &str) -> Self {
        let context = context.to_string();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ApiError::Unauthorized { status, context }
            }
            StatusCode::NOT_FOUND => ApiError::NotFound { context },
            StatusCode::CONFLICT => ApiError::Conflict { context },
            _ => ApiError::Rejected {
                status,
                context,
                body: body.to_string(),
            },
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { status, .. } | ApiError::Rejected { status, .. } => {
                Some(*status)
            }
            ApiError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            ApiError::Conflict { .. } => Some(StatusCode::CONFLICT),
            ApiError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

/// Operator-facing hint for the statuses the admin API is known to return.
pub fn status_message(status: StatusCode, context: &str) -> Option<String> {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Some(format!(
            "Admin API refused {context} (HTTP {status}). The server only accepts admin calls from its safe IP list.",
        )),
        StatusCode::NOT_FOUND => Some(format!(
            "Admin API has no {context} (HTTP {status}). Check the import root and host override.",
        )),
        StatusCode::CONFLICT => Some(format!(
            "Admin API already has {context} (HTTP {status}). Delete it first to replace it.",
        )),
        _ => None,
    }
}

pub fn is_network_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if let Some(reqwest_err) = cause.downcast_ref::<reqwest::Error>() {
            return reqwest_err.is_timeout() || reqwest_err.is_connect();
        }
        false
    })
}
