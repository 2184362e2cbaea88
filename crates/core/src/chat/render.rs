//! # Answer Rendering
//!
//! Typewriter reveal, superscript rewriting and a small inline-markdown
//! segmenter for model answers.

use futures::stream::{self, Stream, StreamExt};
use regex::Regex;
use serde::Serialize;
use std::pin::Pin;
use std::sync::OnceLock;
use std::time::Duration;
use tokio_stream::wrappers::IntervalStream;

/// Characters revealed per tick
pub const TYPEWRITER_STEP: usize = 3;
/// Delay between ticks
pub const TYPEWRITER_TICK: Duration = Duration::from_millis(15);

/// Progressive prefixes of `text`, `step` characters at a time. The last
/// frame is always the full text; empty input yields no frames.
pub fn typewriter_frames(text: &str, step: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let step = step.max(1);
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = boundaries.len() - 1;

    let mut frames = Vec::with_capacity(char_count / step + 2);
    let mut shown = step.min(char_count);
    loop {
        frames.push(text[..boundaries[shown]].to_string());
        if shown == char_count {
            break;
        }
        shown = (shown + step).min(char_count);
    }
    frames
}

fn paced(items: Vec<String>, tick: Duration) -> Pin<Box<dyn Stream<Item = String> + Send>> {
    let ticks = IntervalStream::new(tokio::time::interval(tick));
    Box::pin(stream::iter(items).zip(ticks).map(|(item, _)| item))
}

/// The same frames, paced by a tokio interval
pub fn typewriter_stream(
    text: &str,
    step: usize,
    tick: Duration,
) -> Pin<Box<dyn Stream<Item = String> + Send>> {
    paced(typewriter_frames(text, step), tick)
}

fn superscript_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\^([0-9+\-=()]+)").expect("valid superscript regex"))
}

fn superscript_char(c: char) -> char {
    match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        other => other,
    }
}

/// `x^2` -> `x²`, `10^(-3)` -> `10⁽⁻³⁾`
pub fn format_superscripts(text: &str) -> String {
    superscript_regex()
        .replace_all(text, |caps: &regex::Captures| {
            caps[1].chars().map(superscript_char).collect::<String>()
        })
        .into_owned()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Text { value: String },
    Bold { value: String },
    Italic { value: String },
    Code { value: String },
    Link { text: String, href: String },
}

fn code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`]+)`").expect("valid code regex"))
}

fn link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"))
}

fn emphasis_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*|\*([^*]+)\*").expect("valid emphasis regex"))
}

/// Split `text` on every match of `re`, handing gaps to `gap` and matches
/// to `hit`.
fn split_matches(
    text: &str,
    re: &Regex,
    out: &mut Vec<Segment>,
    mut gap: impl FnMut(&str, &mut Vec<Segment>),
    mut hit: impl FnMut(&regex::Captures, &mut Vec<Segment>),
) {
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        if m.start() > last {
            gap(&text[last..m.start()], out);
        }
        hit(&caps, out);
        last = m.end();
    }
    if last < text.len() {
        gap(&text[last..], out);
    }
}

fn push_emphasis(text: &str, out: &mut Vec<Segment>) {
    split_matches(
        text,
        emphasis_regex(),
        out,
        |gap, out| {
            out.push(Segment::Text {
                value: gap.to_string(),
            })
        },
        |caps, out| {
            if let Some(bold) = caps.get(1) {
                out.push(Segment::Bold {
                    value: bold.as_str().to_string(),
                });
            } else if let Some(italic) = caps.get(2) {
                out.push(Segment::Italic {
                    value: italic.as_str().to_string(),
                });
            }
        },
    );
}

fn push_links(text: &str, out: &mut Vec<Segment>) {
    split_matches(text, link_regex(), out, push_emphasis, |caps, out| {
        out.push(Segment::Link {
            text: caps[1].to_string(),
            href: caps[2].to_string(),
        })
    });
}

/// Inline segmentation: code spans first, then links, then bold/italic
pub fn segment_inline(text: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    split_matches(text, code_regex(), &mut out, push_links, |caps, out| {
        out.push(Segment::Code {
            value: caps[1].to_string(),
        })
    });
    out
}

/// Visible text with the ANSI codes that open and close its style
struct AnsiPiece {
    open: &'static str,
    text: String,
    close: &'static str,
}

impl AnsiPiece {
    fn styled(open: &'static str, text: &str, close: &'static str) -> Self {
        Self {
            open,
            text: text.to_string(),
            close,
        }
    }

    fn plain(text: String) -> Self {
        Self {
            open: "",
            text,
            close: "",
        }
    }
}

fn ansi_pieces(segments: &[Segment]) -> Vec<AnsiPiece> {
    let mut pieces = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            Segment::Text { value } => pieces.push(AnsiPiece::plain(value.clone())),
            Segment::Bold { value } => {
                pieces.push(AnsiPiece::styled("\x1b[1m", value, "\x1b[22m"))
            }
            Segment::Italic { value } => {
                pieces.push(AnsiPiece::styled("\x1b[3m", value, "\x1b[23m"))
            }
            Segment::Code { value } => {
                pieces.push(AnsiPiece::styled("\x1b[36m", value, "\x1b[39m"))
            }
            Segment::Link { text, href } => {
                pieces.push(AnsiPiece::styled("\x1b[4m", text, "\x1b[24m"));
                pieces.push(AnsiPiece::plain(format!(" <{}>", href)));
            }
        }
    }
    pieces
}

/// Terminal rendering of the segments with ANSI styles
pub fn to_ansi(segments: &[Segment]) -> String {
    ansi_pieces(segments)
        .into_iter()
        .map(|p| format!("{}{}{}", p.open, p.text, p.close))
        .collect()
}

/// Superscripts, segmentation and ANSI in one go
pub fn render_answer(text: &str) -> String {
    to_ansi(&segment_inline(&format_superscripts(text)))
}

/// Typewriter reveal of the rendered answer for terminals: each item is what
/// to append on one tick, `step` visible characters at a time. Joined, the
/// items equal [`render_answer`].
pub fn styled_deltas(text: &str, step: usize) -> Vec<String> {
    let step = step.max(1);
    let mut deltas = Vec::new();
    let mut pending = String::new();
    let mut shown = 0;

    for piece in ansi_pieces(&segment_inline(&format_superscripts(text))) {
        pending.push_str(piece.open);
        for c in piece.text.chars() {
            pending.push(c);
            shown += 1;
            if shown % step == 0 {
                deltas.push(std::mem::take(&mut pending));
            }
        }
        pending.push_str(piece.close);
    }
    if !pending.is_empty() {
        deltas.push(pending);
    }
    deltas
}

/// [`styled_deltas`], paced by a tokio interval
pub fn styled_stream(
    text: &str,
    step: usize,
    tick: Duration,
) -> Pin<Box<dyn Stream<Item = String> + Send>> {
    paced(styled_deltas(text, step), tick)
}
