use thiserror::Error;
use url::Url;

/// Reasons a link is refused before it reaches the system opener.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    #[error("URL contains whitespace or control characters")]
    UnsafeCharacters,
}

/// Validate an article link before handing it to `open::that`.
///
/// Feed content is untrusted: a `file://` link or one smuggling shell
/// metacharacters through whitespace must never reach the platform opener.
pub fn validate_url_for_open(raw: &str) -> Result<Url, UrlValidationError> {
    let trimmed = raw.trim();
    if trimmed
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(UrlValidationError::UnsafeCharacters);
    }

    let url = Url::parse(trimmed)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }
}
