use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

// Any character except a line terminator (\n, \r, U+2028, U+2029).
macro_rules! line_char {
    () => {
        r"[^\n\r\x{2028}\x{2029}]"
    };
}

// ECMAScript whitespace: unlike Unicode White_Space it has U+FEFF and lacks U+0085.
macro_rules! space_char {
    () => {
        r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]"
    };
}

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(concat!(r"\*\*(", line_char!(), r"*?)\*\*")).unwrap());

// The trailing group stands in for a lookahead: it marks where the item body
// stops and where scanning resumes.
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"([0-9]+)\.",
        space_char!(),
        r"+(",
        line_char!(),
        r"*?)(?:[0-9]+\.|\z)"
    ))
    .unwrap()
});

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\[(",
        line_char!(),
        r"*?)\]\((",
        line_char!(),
        r"*?)\)"
    ))
    .unwrap()
});

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(concat!(r"`(", line_char!(), r"*?)`")).unwrap());

const LINK_COLOR: &str = "#007AFF";
const CODE_STYLE: &str = "background-color: #f0f0f0; padding: 2px 4px; border-radius: 3px;";

/// Converts optional markdown text into an inline HTML fragment.
///
/// Absent and empty input both produce an empty string.
pub fn convert(markdown: Option<&str>) -> String {
    markdown.map(markdown_to_html).unwrap_or_default()
}

/// Applies the bold, line break, ordered list, link and inline code
/// substitutions in that order, each over the previous result.
///
/// Nothing in the input is escaped: labels, URLs and code are copied into the
/// markup as they are.
pub fn markdown_to_html(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let html = BOLD.replace_all(markdown, "<b>$1</b>");

    // Literal backslash + 'n', not a newline character
    let html = html.replace(r"\n", "<br>");

    let html = wrap_list_items(&html);

    let link = format!(r#"<a href="$2" style="color: {LINK_COLOR};">$1</a>"#);
    let html = LINK.replace_all(&html, link.as_str());

    let code = format!(r#"<code style="{CODE_STYLE}">$1</code>"#);
    INLINE_CODE
        .replace_all(&html, code.as_str())
        .into_owned()
}

fn wrap_list_items(text: &str) -> Cow<'_, str> {
    let mut out = String::new();
    let mut copied = 0;
    let mut pos = 0;

    while let Some(caps) = LIST_ITEM.captures_at(text, pos) {
        let start = caps.get(0).map_or(pos, |m| m.start());
        let body_end = caps.get(2).map_or(text.len(), |m| m.end());

        out.push_str(&text[copied..start]);
        out.push_str("<p>");
        out.push_str(&caps[1]);
        out.push_str(". ");
        out.push_str(&caps[2]);
        out.push_str("</p>");

        // The next marker belongs to the following item
        copied = body_end;
        pos = body_end;
    }

    if copied == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[copied..]);
    Cow::Owned(out)
}
