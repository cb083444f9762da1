//! Match highlighting.
//!
//! [`HighlightedContent`] keeps the raw content together with the byte ranges of
//! every emphasis span. Matching always runs on the raw text; escaping for a
//! markup target happens per segment while rendering, so markup-significant
//! characters in the content can neither corrupt the output nor shift a span.

use crate::error::Result;
use crate::search::matcher::ContentMatcher;
use crate::search::options::MatchMode;
use std::ops::Range;

/// A markup target for rendering emphasis spans.
pub trait Markup {
    /// Append `text` to `out`, escaped for this markup
    fn escape_into(&self, text: &str, out: &mut String);

    /// Marker opening an emphasis span
    fn open_emphasis(&self) -> &str;

    /// Marker closing an emphasis span
    fn close_emphasis(&self) -> &str;

    /// Escape `text` on its own
    fn escape(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.escape_into(text, &mut out);
        out
    }
}

/// HTML fragments with dark red emphasis spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlMarkup;

impl HtmlMarkup {
    pub const OPEN: &'static str = r#"<span style="color: #8B0000;">"#;
    pub const CLOSE: &'static str = "</span>";
}

impl Markup for HtmlMarkup {
    fn escape_into(&self, text: &str, out: &mut String) {
        for ch in text.chars() {
            match ch {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#39;"),
                _ => out.push(ch),
            }
        }
    }

    fn open_emphasis(&self) -> &str {
        Self::OPEN
    }

    fn close_emphasis(&self) -> &str {
        Self::CLOSE
    }
}

/// A run of content that is either emphasized or plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub emphasized: bool,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            emphasized: false,
        }
    }

    fn emphasized(text: &'a str) -> Self {
        Self {
            text,
            emphasized: true,
        }
    }
}

/// Content plus the ranges of its emphasis spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedContent {
    content: String,
    /// Sorted, non-overlapping, non-empty, on char boundaries
    spans: Vec<Range<usize>>,
}

impl HighlightedContent {
    /// Highlight every match of `matcher` in `content`
    pub fn new(content: String, matcher: &ContentMatcher) -> Self {
        let spans = matcher
            .find_ranges(&content)
            .into_iter()
            .filter(|range| content.get(range.clone()).is_some())
            .collect();
        Self { content, spans }
    }

    /// Content without any emphasis
    pub fn plain(content: String) -> Self {
        Self {
            content,
            spans: Vec::new(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn spans(&self) -> &[Range<usize>] {
        &self.spans
    }

    pub fn match_count(&self) -> usize {
        self.spans.len()
    }

    /// Number of display lines produced by [`lines`](Self::lines)
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }

    /// Alternating plain/emphasized runs covering the whole content
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let mut segments = Vec::with_capacity(self.spans.len() * 2 + 1);
        let mut last_end = 0;

        for span in &self.spans {
            if span.start > last_end {
                segments.push(Segment::plain(&self.content[last_end..span.start]));
            }
            segments.push(Segment::emphasized(&self.content[span.clone()]));
            last_end = span.end;
        }

        if last_end < self.content.len() {
            segments.push(Segment::plain(&self.content[last_end..]));
        }

        segments
    }

    /// Segments split into display lines; spans crossing a newline are split too.
    ///
    /// A carriage return right before a newline is dropped.
    pub fn lines(&self) -> Vec<Vec<Segment<'_>>> {
        let mut lines = vec![Vec::new()];

        for segment in self.segments() {
            let mut pieces = segment.text.split('\n').peekable();
            while let Some(piece) = pieces.next() {
                let ends_line = pieces.peek().is_some();
                let piece = if ends_line {
                    piece.strip_suffix('\r').unwrap_or(piece)
                } else {
                    piece
                };

                if !piece.is_empty() {
                    if let Some(line) = lines.last_mut() {
                        line.push(Segment {
                            text: piece,
                            emphasized: segment.emphasized,
                        });
                    }
                }

                if ends_line {
                    lines.push(Vec::new());
                }
            }
        }

        lines
    }

    /// Render escaped content with emphasis markers around each span
    pub fn render<M: Markup + ?Sized>(&self, markup: &M) -> String {
        let mut out = String::with_capacity(self.content.len() + self.spans.len() * 32);
        for segment in self.segments() {
            if segment.emphasized {
                out.push_str(markup.open_emphasis());
                markup.escape_into(segment.text, &mut out);
                out.push_str(markup.close_emphasis());
            } else {
                markup.escape_into(segment.text, &mut out);
            }
        }
        out
    }

    pub fn to_html(&self) -> String {
        self.render(&HtmlMarkup)
    }
}

/// Highlight `keyword` in `content` as an HTML fragment.
///
/// An empty keyword produces the escaped content without spans.
///
/// # Errors
/// * `InvalidPattern` for a regex keyword that does not compile
pub fn highlight(content: &str, keyword: &str, mode: MatchMode) -> Result<String> {
    if keyword.is_empty() {
        return Ok(HtmlMarkup.escape(content));
    }
    let matcher = ContentMatcher::new(keyword, mode)?;
    Ok(HighlightedContent::new(content.to_string(), &matcher).to_html())
}
