//! Link-header pagination.
//!
//! GitHub advertises the continuation of a listing through the `Link`
//! response header rather than a body field; the listing is exhausted
//! when no `rel="next"` relation is present.

/// Parse a `Link` header and return the `rel="next"` URL, if any.
///
/// GitHub Link headers look like:
/// `<https://api.github.com/user/repos?page=2>; rel="next", <...&page=9>; rel="last"`
#[must_use]
pub fn parse_next_link(link_header: &str) -> Option<String> {
    for part in link_header.split(',') {
        let part = part.trim();

        // Extract URL and rel type
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(rel_value) = segment.strip_prefix("rel=") {
                rel = Some(rel_value.trim_matches('"'));
            }
        }

        if rel == Some("next")
            && let Some(url) = url
        {
            return Some(url.to_string());
        }
    }

    None
}
