use crate::errors::ApiError;
use reqwest::Url;

pub fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

/// `<base>/_api/`, unless the base already points at the admin mount.
pub fn api_root(base: &str) -> Result<Url, ApiError> {
    let base = normalize_base(base);
    let root = if base.ends_with("/_api") {
        format!("{base}/")
    } else {
        format!("{base}/_api/")
    };
    let url = Url::parse(&root).map_err(|_| ApiError::InvalidBase(base.clone()))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidBase(base));
    }
    Ok(url)
}

pub fn list_url(base: &str, prefix: &str) -> Result<Url, ApiError> {
    let mut url = api_root(base)?;
    if !prefix.is_empty() {
        url.query_pairs_mut().append_pair("prefix", prefix);
    }
    Ok(url)
}

pub fn item_url(base: &str, id: &str) -> Result<Url, ApiError> {
    let id = id.trim().trim_matches('/');
    if id.is_empty() {
        return Err(ApiError::InvalidId);
    }
    let mut url = api_root(base)?;
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidBase(base.to_string()))?
        .pop_if_empty()
        .extend(id.split('/').filter(|segment| !segment.is_empty()));
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_root_appends_mount_once() {
        assert_eq!(
            api_root("http://localhost:19980/").unwrap().as_str(),
            "http://localhost:19980/_api/"
        );
        assert_eq!(
            api_root("https://jw4.us/_api").unwrap().as_str(),
            "https://jw4.us/_api/"
        );
        assert_eq!(
            api_root("https://jw4.us/admin").unwrap().as_str(),
            "https://jw4.us/admin/_api/"
        );
        assert!(matches!(
            api_root("not a url"),
            Err(ApiError::InvalidBase(_))
        ));
    }

    #[test]
    fn list_url_only_sends_non_empty_prefix() {
        assert_eq!(
            list_url("http://h", "").unwrap().as_str(),
            "http://h/_api/"
        );
        assert_eq!(
            list_url("http://h", "jw4.us/i").unwrap().as_str(),
            "http://h/_api/?prefix=jw4.us%2Fi"
        );
    }

    #[test]
    fn item_url_keeps_slashes_and_encodes_segments() {
        assert_eq!(
            item_url("http://h", "jw4.us/import").unwrap().as_str(),
            "http://h/_api/jw4.us/import"
        );
        assert_eq!(
            item_url("http://h", "/jw4.us/a b/").unwrap().as_str(),
            "http://h/_api/jw4.us/a%20b"
        );
        assert!(matches!(item_url("http://h", " / "), Err(ApiError::InvalidId)));
    }
}
