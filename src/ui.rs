use ratatui::{prelude::*, widgets::*};

/// Spinner frames for the splash overlay
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Pick a spinner frame from the UI tick counter
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Reduce an HTML document to displayable lines
///
/// Good enough for a form page: tags and comments go away, script/style
/// bodies go away, block tags break the line, entities get decoded.
pub fn page_lines(html: &str) -> Vec<Line<'static>> {
    let text = strip_tags(html);
    let mut lines: Vec<Line> = Vec::new();
    let mut blank_run = true;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !blank_run {
                lines.push(Line::raw(""));
                blank_run = true;
            }
        } else {
            lines.push(Line::from(trimmed.to_string()));
            blank_run = false;
        }
    }

    if blank_run && !lines.is_empty() {
        lines.pop();
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "(blank page)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len() / 2);
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        if let Some(stripped) = tail.strip_prefix("<!--") {
            rest = match stripped.find("-->") {
                Some(i) => &stripped[i + 3..],
                None => "",
            };
            continue;
        }

        // script/style bodies are not content
        if let Some(next) =
            skip_raw_element(tail, "script").or_else(|| skip_raw_element(tail, "style"))
        {
            out.push('\n');
            rest = next;
            continue;
        }

        match tail.find('>') {
            Some(close) => {
                if is_block_tag(tail) {
                    out.push('\n');
                }
                rest = &tail[close + 1..];
            }
            None => {
                rest = "";
            }
        }
    }

    out.push_str(rest);
    decode_entities(&out)
}

/// Skip `<script ...>...</script>`-style elements whose bodies are raw text
fn skip_raw_element<'a>(tail: &'a str, name: &str) -> Option<&'a str> {
    if !tag_name_is(tail, name) {
        return None;
    }

    let lower = tail.to_ascii_lowercase();
    let closing = format!("</{}", name);
    match lower.find(&closing) {
        Some(at) => {
            let after = &tail[at..];
            match after.find('>') {
                Some(i) => Some(&after[i + 1..]),
                None => Some(""),
            }
        }
        // unterminated: nothing after it is content either
        None => Some(""),
    }
}

/// True when `tail` (starting at '<') opens the named tag
fn tag_name_is(tail: &str, name: &str) -> bool {
    let bytes = tail.as_bytes();
    if bytes.len() <= name.len() || !bytes[1..=name.len()].eq_ignore_ascii_case(name.as_bytes()) {
        return false;
    }
    matches!(
        bytes.get(name.len() + 1),
        None | Some(b'>' | b' ' | b'\t' | b'\n' | b'\r' | b'/')
    )
}

/// Tags that should break the line so the page keeps its shape
fn is_block_tag(tail: &str) -> bool {
    const BLOCK: &[&str] = &[
        "br", "p", "div", "li", "ul", "ol", "tr", "table", "form", "h1", "h2", "h3", "h4", "h5",
        "h6", "section", "header", "footer", "nav", "button", "label", "body",
    ];

    let body = tail[1..].trim_start_matches('/').as_bytes();
    BLOCK.iter().any(|t| {
        body.len() >= t.len()
            && body[..t.len()].eq_ignore_ascii_case(t.as_bytes())
            && !body.get(t.len()).map_or(false, |b| b.is_ascii_alphanumeric())
    })
}

/// Decode the entities that actually show up on the page
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Centered sub-rectangle for popups and splash content
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_tags_stripped_and_blocks_break_lines() {
        let lines = page_lines("<html><body><p>User</p><p>Pass</p></body></html>");
        assert_eq!(rendered(&lines), vec!["User", "", "Pass"]);
    }

    #[test]
    fn test_script_and_style_bodies_dropped() {
        let html = "<p>Hi</p><script>var x = '<p>no</p>';</script><style>.a{color:red}</style><p>Bye</p>";
        let text = rendered(&page_lines(html));
        assert!(text.contains(&String::from("Hi")));
        assert!(text.contains(&String::from("Bye")));
        assert!(!text.iter().any(|l| l.contains("var x")));
        assert!(!text.iter().any(|l| l.contains("color")));
    }

    #[test]
    fn test_entities_decoded() {
        let lines = page_lines("<p>Tom &amp; Jerry&nbsp;&lt;3</p>");
        assert_eq!(rendered(&lines), vec!["Tom & Jerry <3"]);
    }

    #[test]
    fn test_comments_dropped() {
        let lines = page_lines("<!-- x > y --><p>ok</p>");
        assert_eq!(rendered(&lines), vec!["ok"]);
    }

    #[test]
    fn test_empty_page_gets_placeholder() {
        let lines = page_lines("<div></div>");
        assert_eq!(rendered(&lines), vec!["(blank page)"]);
    }

    #[test]
    fn test_spinner_cycles() {
        assert_ne!(spinner_frame(0), spinner_frame(1));
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER_FRAMES.len()));
    }
}
