//! Description transcoding: catalog descriptions are HTML snippets, schema
//! descriptions are markdown.

use scraper::{ElementRef, Html};

/// Turns a raw catalog description into the text stored on a fragment.
pub trait DescriptionTranscoder {
    fn transcode(&self, raw: &str) -> String;
}

impl<F> DescriptionTranscoder for F
where
    F: Fn(&str) -> String,
{
    fn transcode(&self, raw: &str) -> String {
        self(raw)
    }
}

/// Leaves descriptions exactly as they are in the catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl DescriptionTranscoder for Verbatim {
    fn transcode(&self, raw: &str) -> String {
        raw.to_string()
    }
}

/// Converts HTML descriptions to markdown.
///
/// Handles the markup found in the GTFS reference: paragraphs, line breaks,
/// emphasis, inline code, links, lists and headings. Unknown elements
/// contribute their text. Markdown metacharacters in text are escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlToMarkdown;

impl DescriptionTranscoder for HtmlToMarkdown {
    fn transcode(&self, raw: &str) -> String {
        let fragment = Html::parse_fragment(raw);
        let mut writer = Writer::default();
        render_children(fragment.root_element(), &mut writer);
        writer.finish()
    }
}

#[derive(Default)]
struct Writer {
    out: String,
}

impl Writer {
    fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n')
    }

    fn trim_trailing_spaces(&mut self) {
        let kept = self.out.trim_end_matches(' ').len();
        self.out.truncate(kept);
    }

    fn block_break(&mut self) {
        self.trim_trailing_spaces();
        if self.out.is_empty() {
            return;
        }
        while !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn hard_break(&mut self) {
        self.trim_trailing_spaces();
        self.out.push_str("  \n");
    }

    fn text(&mut self, raw: &str) {
        let mut collapsed = collapse_whitespace(raw);
        if self.at_line_start() || self.out.ends_with(' ') {
            collapsed = collapsed.trim_start().to_string();
        }
        if collapsed.is_empty() {
            return;
        }
        let escaped = escape(&collapsed, self.at_line_start());
        self.out.push_str(&escaped);
    }

    fn raw(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn finish(self) -> String {
        let mut lines: Vec<&str> = Vec::new();
        let mut blank_run = 0;
        for line in self.out.trim().lines() {
            if line.trim().is_empty() {
                blank_run += 1;
                if blank_run > 1 {
                    continue;
                }
                lines.push("");
            } else {
                blank_run = 0;
                lines.push(line);
            }
        }
        lines.join("\n")
    }
}

fn render_children(element: ElementRef<'_>, writer: &mut Writer) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            render_element(child_element, writer);
        } else if let Some(text) = child.value().as_text() {
            writer.text(text);
        }
    }
}

fn render_element(element: ElementRef<'_>, writer: &mut Writer) {
    let name = element.value().name();
    match name {
        "p" | "div" | "section" => {
            writer.block_break();
            render_children(element, writer);
            writer.block_break();
        }
        "br" => writer.hard_break(),
        "strong" | "b" => wrap(element, writer, "**"),
        "em" | "i" => wrap(element, writer, "_"),
        "code" | "kbd" | "samp" => {
            let code: String = element.text().collect();
            writer.raw("`");
            writer.raw(&code);
            writer.raw("`");
        }
        "a" => match element.value().attr("href") {
            Some(href) => {
                writer.raw("[");
                render_children(element, writer);
                writer.raw("](");
                writer.raw(&href.replace('(', "\\(").replace(')', "\\)"));
                writer.raw(")");
            }
            None => render_children(element, writer),
        },
        "ul" | "ol" => render_list(element, writer, name == "ol"),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = name[1..].parse::<usize>().unwrap_or(1);
            writer.block_break();
            writer.raw(&"#".repeat(level));
            writer.raw(" ");
            render_children(element, writer);
            writer.block_break();
        }
        "script" | "style" => {}
        _ => render_children(element, writer),
    }
}

/// Emphasis delimiters must hug their content: flanking spaces move outside
/// and an element with no content emits no delimiters.
fn wrap(element: ElementRef<'_>, writer: &mut Writer, delimiter: &str) {
    let start = writer.out.len();
    render_children(element, writer);
    let inner = writer.out.split_off(start);
    let content = inner.trim_matches(' ');
    if content.is_empty() {
        if !inner.is_empty() {
            writer.raw(" ");
        }
        return;
    }
    if inner.starts_with(' ') {
        writer.raw(" ");
    }
    writer.raw(delimiter);
    writer.raw(content);
    writer.raw(delimiter);
    if inner.ends_with(' ') {
        writer.raw(" ");
    }
}

fn render_list(element: ElementRef<'_>, writer: &mut Writer, ordered: bool) {
    writer.block_break();
    let items = element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li");
    for (index, item) in items.enumerate() {
        let mut inner = Writer::default();
        render_children(item, &mut inner);
        let content = inner.finish().replace('\n', "\n    ");
        let marker = if ordered {
            format!("{}.  ", index + 1)
        } else {
            "*   ".to_string()
        };
        writer.raw(&marker);
        writer.raw(&content);
        writer.raw("\n");
    }
    writer.block_break();
}

fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Escape markdown metacharacters so text renders literally.
fn escape(text: &str, line_start: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '*' | '`' | '[' | ']' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    if !line_start {
        return out;
    }

    let hashes = out.chars().take_while(|&c| c == '#').count();
    let block_marker = out.starts_with('-')
        || out.starts_with("+ ")
        || out.starts_with('=')
        || out.starts_with('>')
        || out.starts_with("~~~")
        || ((1..=6).contains(&hashes) && out[hashes..].starts_with(' '));
    if block_marker {
        out.insert(0, '\\');
        return out;
    }

    let digits = out.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 && out[digits..].starts_with(". ") {
        out.insert(digits, '\\');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md(html: &str) -> String {
        HtmlToMarkdown.transcode(html)
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(md("The stop."), "The stop.");
        assert_eq!(md(""), "");
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(md("  Identifies\n   a   stop. "), "Identifies a stop.");
    }

    #[test]
    fn underscores_are_escaped() {
        assert_eq!(md("References stop_id."), "References stop\\_id.");
    }

    #[test]
    fn leading_markers_are_escaped() {
        assert_eq!(md("- not a list"), "\\- not a list");
        assert_eq!(md("1. not a list"), "1\\. not a list");
        assert_eq!(md("# not a heading"), "\\# not a heading");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(md("Fares &amp; rules"), "Fares & rules");
    }

    #[test]
    fn inline_markup() {
        assert_eq!(
            md("Use <b>0</b> or <i>1</i>, see <code>stop_id</code>."),
            "Use **0** or _1_, see `stop_id`."
        );
    }

    #[test]
    fn links() {
        assert_eq!(
            md(r#"See <a href="https://gtfs.org">the reference</a>."#),
            "See [the reference](https://gtfs.org)."
        );
    }

    #[test]
    fn emphasis_whitespace_moves_outside_delimiters() {
        assert_eq!(md("Text <b>bold </b>next"), "Text **bold** next");
        assert_eq!(md("Text<b> bold</b> next"), "Text **bold** next");
        assert_eq!(md("Text <i> soft </i> next"), "Text _soft_ next");
        assert_eq!(md("<b>Bold</b> start"), "**Bold** start");
    }

    #[test]
    fn empty_emphasis_is_dropped() {
        assert_eq!(md("Use <b></b>nothing"), "Use nothing");
        assert_eq!(md("Use<i> </i>space"), "Use space");
    }

    #[test]
    fn link_targets_escape_parentheses() {
        assert_eq!(
            md(r#"See <a href="https://x.org/a_(b)">here</a>."#),
            "See [here](https://x.org/a_\\(b\\))."
        );
    }

    #[test]
    fn paragraphs_and_breaks() {
        assert_eq!(md("<p>First.</p><p>Second.</p>"), "First.\n\nSecond.");
        assert_eq!(md("Line one<br>Line two"), "Line one  \nLine two");
    }

    #[test]
    fn lists() {
        assert_eq!(
            md("Valid options are:<ul><li>0 - Stop</li><li>1 - Station</li></ul>"),
            "Valid options are:\n\n*   0 - Stop\n*   1 - Station"
        );
        assert_eq!(
            md("<ol><li>First</li><li>Second</li></ol>"),
            "1.  First\n2.  Second"
        );
    }

    #[test]
    fn verbatim_keeps_markup() {
        assert_eq!(Verbatim.transcode("<b>x</b>"), "<b>x</b>");
    }

    #[test]
    fn closures_are_transcoders() {
        let upper = |s: &str| s.to_uppercase();
        assert_eq!(upper.transcode("abc"), "ABC");
    }
}
