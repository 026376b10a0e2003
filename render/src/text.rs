//! Cell text helpers: sanitizing, shortening, fixed-width fitting.

/// Default display length for long URLs.
pub const URL_DISPLAY_LEN: usize = 40;

/// Display length for public key previews.
pub const KEY_DISPLAY_LEN: usize = 40;

/// Strip control characters so user-supplied text cannot break table layout.
pub fn sanitize(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}

/// Truncate a long URL for display, appending `...`.
pub fn shorten_url(url: &str, max_len: usize) -> String {
    let url = sanitize(url);
    if url.chars().count() > max_len {
        let cut: String = url.chars().take(max_len).collect();
        format!("{cut}...")
    } else {
        url
    }
}

/// Public key preview: the first characters plus `...`.
pub fn shorten_key(key: &str) -> String {
    shorten_url(key, KEY_DISPLAY_LEN)
}

/// Fit a string into a fixed-width cell: pad with spaces or truncate.
pub fn fit(s: &str, width: usize) -> String {
    let s = sanitize(s);
    let len = s.chars().count();
    if len > width {
        s.chars().take(width).collect()
    } else {
        format!("{s}{}", " ".repeat(width - len))
    }
}
