//! Safe inline markup for rich-text bot messages.
//!
//! Only three constructs are emitted: hyperlinks, line breaks, and bold.
//! Every piece of text is escaped before it is wrapped, so the output can be
//! rendered as HTML without letting remote data inject tags.

/// Line break between rich-text lines.
pub const LINE_BREAK: &str = "<br/>";

/// Escape the five HTML-significant characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Hyperlink opening in a new tab.
pub fn link(text: &str, href: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\">{}</a>",
        escape(href),
        escape(text)
    )
}

pub fn bold(text: &str) -> String {
    format!("<b>{}</b>", escape(text))
}

/// Render markup as terminal-friendly plain text.
///
/// Line breaks become newlines, tags are dropped, and entities produced by
/// [`escape`] are decoded.
pub fn to_plain_text(markup: &str) -> String {
    let with_newlines = markup.replace(LINE_BREAK, "\n").replace("<br>", "\n");

    let mut stripped = String::with_capacity(with_newlines.len());
    let mut in_tag = false;
    for c in with_newlines.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => stripped.push(c),
            _ => {}
        }
    }

    unescape(&stripped)
}

fn unescape(text: &str) -> String {
    // `&amp;` last so that "&amp;lt;" decodes to "&lt;", not "<".
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape("Sin descripción 🚀"), "Sin descripción 🚀");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            link("site", "https://example.com/?a=1&b=2"),
            "<a href=\"https://example.com/?a=1&amp;b=2\" target=\"_blank\">site</a>"
        );
    }

    #[test]
    fn test_link_escapes_attribute_breakout() {
        let out = link("x", "\" onclick=\"evil()");
        assert!(!out.contains("\" onclick"));
        assert!(out.contains("&quot; onclick=&quot;evil()"));
    }

    #[test]
    fn test_bold() {
        assert_eq!(bold("Ana & Luis"), "<b>Ana &amp; Luis</b>");
    }

    #[test]
    fn test_to_plain_text_strips_tags_and_breaks() {
        let markup = format!("{}{}{}", link("Email", "mailto:a@b.c"), LINE_BREAK, bold("hi"));
        assert_eq!(to_plain_text(&markup), "Email\nhi");
    }

    #[test]
    fn test_to_plain_text_round_trips_escaped_text() {
        let text = "a < b && \"c\" > 'd'";
        assert_eq!(to_plain_text(&bold(text)), text);
    }

    #[test]
    fn test_to_plain_text_double_escaped_entity() {
        assert_eq!(to_plain_text(&escape("&lt;")), "&lt;");
    }

    #[test]
    fn test_to_plain_text_keeps_newlines() {
        assert_eq!(to_plain_text("line1\nline2"), "line1\nline2");
    }
}
