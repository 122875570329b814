use crate::UrlError;
use url::Url;

/// Canonicalizes a raw hyperlink found on a page
///
/// Resolves the (possibly relative) reference against the URL of the page it
/// was found on, then strips the fragment. The canonical form is the dedup
/// and lookup key everywhere else in the crate, so two links differing only
/// by fragment must canonicalize identically.
///
/// # Arguments
///
/// * `raw` - The hyperlink as it appeared in the page
/// * `base` - The URL of the page the link was found on
///
/// # Returns
///
/// * `Ok(Url)` - Canonical absolute URL
/// * `Err(UrlError)` - The reference could not be parsed
///
/// # Examples
///
/// ```
/// use page_sieve::url::canonicalize;
/// use url::Url;
///
/// let base = Url::parse("https://ics.uci.edu/research/").unwrap();
/// let url = canonicalize("../people#faculty", &base).unwrap();
/// assert_eq!(url.as_str(), "https://ics.uci.edu/people");
/// ```
pub fn canonicalize(raw: &str, base: &Url) -> Result<Url, UrlError> {
    let mut url = base
        .join(raw)
        .map_err(|e| UrlError::Malformed(format!("{}: {}", raw, e)))?;
    url.set_fragment(None);
    Ok(url)
}

/// Canonicalizes an already-absolute URL string
///
/// Used for response effective URLs, which arrive as strings from the fetch
/// layer. Same fragment-stripping rule as [`canonicalize`].
pub fn canonicalize_absolute(raw: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(raw).map_err(|e| UrlError::Malformed(format!("{}: {}", raw, e)))?;
    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }
    url.set_fragment(None);
    Ok(url)
}
