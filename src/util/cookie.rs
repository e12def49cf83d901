//! Cookie header helpers.
//!
//! A `Cookie` header value has the same shape as `document.cookie` in a
//! browser: `name=value` pairs joined by `;`.

/// Splits a cookie header into trimmed `(name, value)` pairs, skipping
/// fragments without a `=`.
pub fn split_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Looks up `name` in a cookie header and percent-decodes its value.
///
/// The first matching cookie wins. A value that is not valid percent-encoding
/// is returned as-is.
pub fn get_cookie(header: &str, name: &str) -> Option<String> {
    if header.is_empty() {
        return None;
    }

    let prefix = format!("{}=", name);
    header
        .split(';')
        .map(str::trim)
        .find(|cookie| cookie.starts_with(&prefix))
        .map(|cookie| {
            let raw = &cookie[prefix.len()..];
            urlencoding::decode(raw)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| raw.to_string())
        })
}
