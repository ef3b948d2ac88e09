use url::Url;

fn is_localhost(url: &Url) -> bool {
    url.host_str() == Some("localhost")
}

/// Rewrites `https://localhost...` to `http://localhost...`; AAD only accepts
/// plain http for localhost reply URLs.
///
/// Everything after the scheme is kept as written, so ports, paths and
/// trailing slashes survive untouched. Anything else, including strings that
/// are not URLs at all, is returned unchanged.
pub fn normalize_redirect_uri(uri: &str) -> String {
    let trimmed = uri.trim();
    let Ok(parsed) = Url::parse(trimmed) else {
        return uri.to_string();
    };
    if parsed.scheme() != "https" || !is_localhost(&parsed) {
        return uri.to_string();
    }
    match trimmed.find(':') {
        Some(idx) => format!("http{}", &trimmed[idx..]),
        None => uri.to_string(),
    }
}

/// Redirect URI used when no build-time value is configured.
pub fn default_redirect_uri(origin: &str, dev_port: u16) -> String {
    match Url::parse(origin) {
        Ok(parsed) if is_localhost(&parsed) => format!("http://localhost:{dev_port}"),
        _ => origin.trim_end_matches('/').to_string(),
    }
}
