//! Escaping of user-controlled text embedded in markup.

use std::borrow::Cow;

/// Turns raw text into a form that is safe to embed in markup.
///
/// Implementations must neutralize at least `&`, `<`, `>` and `"`.
pub trait Escape {
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str>;
}

/// Default escaper for HTML text and attribute values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HtmlEscaper;

impl Escape for HtmlEscaper {
    fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        escape_html(raw)
    }
}

/// Escape `&`, `<`, `>`, `"` and `'`.
///
/// Borrows the input when nothing needs replacing.
pub fn escape_html(raw: &str) -> Cow<'_, str> {
    let Some(first) = raw.find(['&', '<', '>', '"', '\'']) else {
        return Cow::Borrowed(raw);
    };

    let mut out = String::with_capacity(raw.len() + 16);
    out.push_str(&raw[..first]);
    for ch in raw[first..].chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
