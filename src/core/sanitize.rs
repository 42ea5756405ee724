//! Title and body sanitization for imported pages.
//!
//! Titles become plain text. Bodies keep a small allow-list of formatting
//! markup; anything that can execute script is removed.

use regex::{Captures, Regex};
use std::sync::LazyLock;

const SCRIPT_STYLE_PATTERN: &str =
    r"<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>";

static SCRIPT_STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?is){}", SCRIPT_STYLE_PATTERN)).unwrap());

static DANGEROUS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?is){}|<iframe\b[^>]*>.*?</iframe\s*>|<object\b[^>]*>.*?</object\s*>|<embed\b[^>]*>.*?</embed\s*>",
        SCRIPT_STYLE_PATTERN
    ))
    .unwrap()
});

static HTML_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[a-zA-Z/!?][^>]*>").unwrap());

static ELEMENT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<(/?)([a-zA-Z][a-zA-Z0-9]*)([^>]*)>").unwrap());

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .unwrap()
});

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\r\n\t ]+").unwrap());

static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&#(x[0-9a-f]+|[0-9]+);?").unwrap());

static NAMED_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)&(colon|tab|newline);?").unwrap());

static PERCENT_OCTET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)%[a-f0-9]{2}").unwrap());

// removing one tag can join the text around it into a new tag
const MAX_SANITIZE_PASSES: usize = 8;

const ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "b", "blockquote", "br", "code", "div", "em", "h1", "h2", "h3", "h4", "h5", "h6",
    "hr", "i", "img", "li", "ol", "p", "pre", "s", "span", "strong", "sub", "sup", "table",
    "tbody", "td", "th", "thead", "tr", "u", "ul",
];

const COMMON_ATTRIBUTES: &[&str] = &["title", "class", "id"];

const URL_ATTRIBUTES: &[&str] = &["href", "src"];

const ALLOWED_PROTOCOLS: &[&str] = &["http", "https", "mailto"];

fn tag_attributes(tag: &str) -> &'static [&'static str] {
    match tag {
        "a" => &["href", "target", "rel"],
        "img" => &["src", "alt", "width", "height"],
        _ => &[],
    }
}

/// Plain-text sanitization for a page title.
pub fn sanitize_text_field(input: &str) -> String {
    let without_blocks = SCRIPT_STYLE_BLOCK.replace_all(input, "");
    let without_tags = ANY_TAG.replace_all(&without_blocks, "");
    let escaped = without_tags.replace('<', "&lt;");

    let no_controls: String = escaped
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\r' | '\n' | '\t'))
        .collect();
    let mut filtered = WHITESPACE_RUN
        .replace_all(&no_controls, " ")
        .trim()
        .to_string();

    if PERCENT_OCTET.is_match(&filtered) {
        // removing one octet can expose another, e.g. "%%4141"
        while PERCENT_OCTET.is_match(&filtered) {
            filtered = PERCENT_OCTET.replace_all(&filtered, "").into_owned();
        }
        filtered = WHITESPACE_RUN.replace_all(&filtered, " ").trim().to_string();
    }

    filtered
}

/// Rich-text sanitization for a page body.
///
/// Passes repeat until the output is stable; input that never settles has
/// every `<` escaped.
pub fn sanitize_post_content(input: &str) -> String {
    let mut current = input.to_string();
    for _ in 0..MAX_SANITIZE_PASSES {
        let next = sanitize_post_content_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }

    tracing::warn!("Body markup did not settle, escaping all tags");
    current.replace('<', "&lt;")
}

fn sanitize_post_content_once(input: &str) -> String {
    let no_comments = HTML_COMMENT.replace_all(input, "");
    let no_blocks = DANGEROUS_BLOCK.replace_all(&no_comments, "");

    ELEMENT_TAG
        .replace_all(&no_blocks, |caps: &Captures| {
            let closing = !caps[1].is_empty();
            let name = caps[2].to_ascii_lowercase();

            if !ALLOWED_TAGS.contains(&name.as_str()) {
                return String::new();
            }
            if closing {
                return format!("</{}>", name);
            }

            let raw_attributes = caps[3].trim_end();
            let self_closing = raw_attributes.ends_with('/');
            let raw_attributes = raw_attributes.trim_end_matches('/');

            let mut tag = format!("<{}", name);
            for attribute in ATTRIBUTE.captures_iter(raw_attributes) {
                if let Some(rendered) = render_attribute(&name, &attribute) {
                    tag.push(' ');
                    tag.push_str(&rendered);
                }
            }
            if self_closing {
                tag.push_str(" /");
            }
            tag.push('>');
            tag
        })
        .into_owned()
}

fn render_attribute(tag: &str, attribute: &Captures) -> Option<String> {
    let name = attribute[1].to_ascii_lowercase();
    let allowed =
        COMMON_ATTRIBUTES.contains(&name.as_str()) || tag_attributes(tag).contains(&name.as_str());
    if !allowed {
        return None;
    }

    let value = attribute
        .get(2)
        .or_else(|| attribute.get(3))
        .or_else(|| attribute.get(4))
        .map(|m| m.as_str());

    match value {
        None => Some(name),
        Some(value) => {
            if URL_ATTRIBUTES.contains(&name.as_str()) && !is_allowed_url(value) {
                return None;
            }
            Some(format!("{}=\"{}\"", name, value.replace('"', "&quot;")))
        }
    }
}

/// Relative URLs pass; absolute ones need an allow-listed scheme.
fn is_allowed_url(value: &str) -> bool {
    let decoded = NUMERIC_ENTITY.replace_all(value, |caps: &Captures| {
        let digits = &caps[1];
        let code = match digits.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => digits.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });
    let decoded = NAMED_ENTITY.replace_all(&decoded, |caps: &Captures| {
        match caps[1].to_ascii_lowercase().as_str() {
            "colon" => ":",
            "tab" => "\t",
            _ => "\n",
        }
        .to_string()
    });
    let compact: String = decoded
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    let Some(colon) = compact.find(':') else {
        return true;
    };
    let candidate = &compact[..colon];
    if candidate.contains(['/', '?', '#']) {
        return true;
    }

    let scheme: String = candidate
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    ALLOWED_PROTOCOLS.contains(&scheme.as_str())
}
