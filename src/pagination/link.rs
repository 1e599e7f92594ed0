//! RFC 5988 `Link` header parsing
//!
//! Format: `<https://api.github.com/...?page=2>; rel="next", <...>; rel="last"`
//!
//! Link values are separated by commas that sit outside `<...>` and outside
//! quoted strings. A `rel` may carry several space-separated relation types
//! and is compared case-insensitively.

/// One link value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Target URI, exactly as written between the angle brackets
    pub uri: String,
    /// Relation types, lowercased
    pub rels: Vec<String>,
    /// All parameters in order, names lowercased
    pub params: Vec<(String, String)>,
}

impl Link {
    /// Check if this link carries a relation type
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rels.iter().any(|r| r.eq_ignore_ascii_case(rel))
    }

    /// The value of a parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Parse one `Link` header value into its links.
///
/// Malformed link values are skipped rather than failing the whole header.
pub fn parse_links(header: &str) -> Vec<Link> {
    let mut links = Vec::new();
    let mut rest = header;

    loop {
        rest = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        if rest.is_empty() {
            break;
        }

        let Some(after_open) = rest.strip_prefix('<') else {
            rest = skip_link_value(rest);
            continue;
        };
        let Some(close) = after_open.find('>') else {
            break;
        };
        let uri = after_open[..close].trim().to_string();
        rest = &after_open[close + 1..];

        let mut params = Vec::new();
        while let Some(after_semi) = rest.trim_start().strip_prefix(';') {
            let (param, remaining) = parse_param(after_semi);
            if let Some(param) = param {
                params.push(param);
            }
            rest = remaining;
        }

        // Anything other than a separator here is garbage up to the next link
        let trimmed = rest.trim_start();
        if !trimmed.is_empty() && !trimmed.starts_with(',') {
            rest = skip_link_value(trimmed);
        }

        // RFC 5988: occurrences of "rel" after the first are ignored
        let rels = params
            .iter()
            .find(|(name, _)| name == "rel")
            .map(|(_, value)| {
                value
                    .split_whitespace()
                    .map(str::to_ascii_lowercase)
                    .collect()
            })
            .unwrap_or_default();

        links.push(Link { uri, rels, params });
    }

    links
}

/// Find the URI for a relation type across any number of `Link` header values
pub fn find_rel<'a, I>(headers: I, rel: &str) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    headers
        .into_iter()
        .flat_map(parse_links)
        .find(|link| link.has_rel(rel))
        .map(|link| link.uri)
}

/// Parse `name[=value]` after a `;`, returning the rest of the input
fn parse_param(input: &str) -> (Option<(String, String)>, &str) {
    let input = input.trim_start();
    let name_end = input
        .find(|c: char| c == '=' || c == ';' || c == ',' || c.is_whitespace())
        .unwrap_or(input.len());
    let name = input[..name_end].to_ascii_lowercase();
    let rest = input[name_end..].trim_start();

    let (value, rest) = match rest.strip_prefix('=') {
        Some(after_eq) => {
            let after_eq = after_eq.trim_start();
            match after_eq.strip_prefix('"') {
                Some(quoted) => parse_quoted(quoted),
                None => {
                    let end = after_eq
                        .find(|c: char| c == ';' || c == ',')
                        .unwrap_or(after_eq.len());
                    (after_eq[..end].trim().to_string(), &after_eq[end..])
                }
            }
        }
        None => (String::new(), rest),
    };

    if name.is_empty() {
        (None, rest)
    } else {
        (Some((name, value)), rest)
    }
}

/// Read a quoted string body (opening quote already consumed)
fn parse_quoted(input: &str) -> (String, &str) {
    let mut value = String::new();
    let mut chars = input.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    value.push(escaped);
                }
            }
            '"' => return (value, &input[i + 1..]),
            _ => value.push(c),
        }
    }

    // Unterminated: take everything
    (value, "")
}

/// Skip to the comma ending the current link value, honoring quotes
fn skip_link_value(input: &str) -> &str {
    let mut quoted = false;
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            ',' if !quoted => return &input[i..],
            _ => {}
        }
    }

    ""
}
