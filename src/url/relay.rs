use crate::config::URL_PLACEHOLDER;
use crate::url::is_http;
use crate::UrlError;
use url::Url;

/// Builds the outbound request URL for a relay endpoint
///
/// The target URL is percent-encoded as a single query component and
/// substituted for `{url}` in the relay template.
///
/// # Examples
///
/// ```
/// use listing_trawler::url::build_relay_url;
/// use url::Url;
///
/// let target = Url::parse("https://site.example/list?page=2").unwrap();
/// let relay = build_relay_url("https://corsproxy.io/?{url}", &target).unwrap();
/// assert_eq!(
///     relay.as_str(),
///     "https://corsproxy.io/?https%3A%2F%2Fsite.example%2Flist%3Fpage%3D2"
/// );
/// ```
pub fn build_relay_url(template: &str, target: &Url) -> Result<Url, UrlError> {
    let encoded = urlencoding::encode(target.as_str());
    let expanded = template.replace(URL_PLACEHOLDER, &encoded);

    let url = Url::parse(&expanded).map_err(|e| UrlError::Parse(format!("{}: {}", expanded, e)))?;

    if !is_http(&url) {
        return Err(UrlError::InvalidScheme(format!(
            "relay must use HTTP or HTTPS, got: {}",
            url.scheme()
        )));
    }

    Ok(url)
}
