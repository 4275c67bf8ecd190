// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

use crate::error::{AppError, Result};

/// Parse the artifact base URL, making sure keys resolve inside it.
///
/// A base without a trailing slash gets one, so that joining `bug-1-x.java`
/// onto `https://host/files` yields `https://host/files/bug-1-x.java`.
pub fn parse_base(base: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    if url.cannot_be_a_base() {
        return Err(AppError::config(format!("'{base}' cannot be used as a base URL")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Whether a retrieval key is a single plain path segment.
///
/// A `:` is refused as well, since `Url::join` would read the part before it
/// as a scheme.
///
/// # Examples
/// ```
/// use leakview::utils::url::is_plain_key;
///
/// assert!(is_plain_key("bug-42-abc123.java"));
/// assert!(!is_plain_key("../secret"));
/// assert!(!is_plain_key("bug-1-ab:cd.java"));
/// ```
pub fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\', '?', '#', ':'])
}

/// Resolve a retrieval key against the artifact base URL.
pub fn artifact_url(base: &Url, key: &str) -> Result<Url> {
    if !is_plain_key(key) {
        return Err(AppError::validation(format!(
            "retrieval key '{key}' is not a plain file name"
        )));
    }
    Ok(base.join(key)?)
}
