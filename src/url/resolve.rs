use crate::url::is_http;
use crate::UrlError;
use url::Url;

/// Parses the starting URL of a crawl
///
/// Inputs carrying an explicit scheme are parsed as-is. Scheme-less input
/// (`shop.example/list`, `//shop.example/list`) is treated as an HTTPS
/// address.
///
/// # Examples
///
/// ```
/// use listing_trawler::url::parse_start_url;
///
/// let url = parse_start_url("shop.example/list?page=1").unwrap();
/// assert_eq!(url.as_str(), "https://shop.example/list?page=1");
/// ```
pub fn parse_start_url(input: &str) -> Result<Url, UrlError> {
    let input = input.trim();

    let candidate = if has_scheme(input) {
        input.to_string()
    } else if let Some(rest) = input.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&candidate).map_err(|e| UrlError::Parse(format!("{}: {}", input, e)))?;

    if !is_http(&url) {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::Malformed(format!("missing host in {}", input)));
    }

    Ok(url)
}

/// Returns true if `input` starts with `scheme://`
///
/// A `://` later in the string (inside a query, say) does not count.
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolves an href attribute against the URL of the page it was found on
///
/// Absolute hrefs are returned unchanged (after parsing); relative ones are
/// joined onto `base`.
pub fn resolve_href(href: &str, base: &Url) -> Result<Url, UrlError> {
    base.join(href.trim())
        .map_err(|e| UrlError::Malformed(format!("cannot resolve '{}' against {}: {}", href, base, e)))
}
