//! Text and URL normalization for untrusted input.
//!
//! These are not general HTML sanitizers. They strip bidirectional override
//! controls (display spoofing) and angle brackets (trivial markup injection),
//! and restrict links to http/https or same-origin-shaped paths.

use url::Url;

/// Unicode bidirectional embedding/override controls, U+202A..=U+202E.
const BIDI_CONTROLS: &[char] = &['\u{202A}', '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}'];

/// Origin used to resolve relative links. Only the path part of the result
/// is ever returned, so the host is irrelevant.
const PLACEHOLDER_ORIGIN: &str = "https://placeholder.invalid/";

/// Normalize free text. Missing input becomes the empty string.
pub fn sanitize_text(input: Option<&str>) -> String {
    let Some(raw) = input else {
        return String::new();
    };
    let stripped: String = raw
        .chars()
        .filter(|c| !BIDI_CONTROLS.contains(c) && *c != '<' && *c != '>')
        .collect();
    stripped.trim().to_string()
}

/// Normalize a link. Returns the empty string for anything that is not an
/// http/https absolute URL or a relative reference.
///
/// - absolute http/https: returned as sanitized
/// - absolute with another scheme (`javascript:`, `data:`, ...): empty
/// - starts with `/`: returned as sanitized
/// - other relative references: resolved against a placeholder origin,
///   returning path + query + fragment
pub fn sanitize_url(input: Option<&str>) -> String {
    let text = sanitize_text(input);
    if text.is_empty() {
        return text;
    }

    match Url::parse(&text) {
        Ok(parsed) => {
            return match parsed.scheme() {
                "http" | "https" => text,
                _ => String::new(),
            };
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {}
        Err(_) => return String::new(),
    }

    if text.starts_with('/') {
        return text;
    }

    resolve_relative(&text).unwrap_or_default()
}

fn resolve_relative(text: &str) -> Option<String> {
    let base = Url::parse(PLACEHOLDER_ORIGIN).ok()?;
    let resolved = base.join(text).ok()?;
    let mut out = resolved.path().to_string();
    if let Some(query) = resolved.query() {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = resolved.fragment() {
        out.push('#');
        out.push_str(fragment);
    }
    Some(out)
}
