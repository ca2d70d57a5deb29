//! Line-level reading of the assistant's lightweight markup.
//!
//! Only used to render a turn. The classifier always works on the raw text.

/// Inline run of text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Bold(String),
}

/// One rendered line of assistant content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    /// Trimmed line ending in `:`, e.g. `When to Seek Care:`.
    Header(Vec<Span>),
    /// `- item` or `• item`, marker stripped.
    Bullet(Vec<Span>),
    /// `2. item`, keeping the number.
    Numbered { number: String, spans: Vec<Span> },
    Paragraph(Vec<Span>),
    Blank,
}

const MIN_HEADER_LEN: usize = 6;

/// Split `content` into classified lines.
#[must_use]
pub fn parse(content: &str) -> Vec<Line> {
    content.lines().map(parse_line).collect()
}

fn parse_line(raw: &str) -> Line {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("• "))
    {
        return Line::Bullet(spans(rest.trim_start()));
    }
    if let Some((number, rest)) = split_numbered(line) {
        return Line::Numbered { number: number.to_string(), spans: spans(rest) };
    }
    if line.ends_with(':') && line.chars().count() >= MIN_HEADER_LEN {
        return Line::Header(spans(line));
    }
    Line::Paragraph(spans(line))
}

fn split_numbered(line: &str) -> Option<(&str, &str)> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    Some((&line[..digits], rest.trim_start()))
}

/// Split on `**` pairs. An unpaired trailing `**` is kept as plain text.
fn spans(text: &str) -> Vec<Span> {
    let parts: Vec<&str> = text.split("**").collect();
    let paired = parts.len() % 2 == 1;
    let mut out = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        let last = i == parts.len() - 1;
        if i % 2 == 1 && (paired || !last) {
            if !part.is_empty() {
                out.push(Span::Bold((*part).to_string()));
            }
        } else if i % 2 == 1 {
            out.push(Span::Plain(format!("**{part}")));
        } else if !part.is_empty() {
            out.push(Span::Plain((*part).to_string()));
        }
    }
    out
}

#[cfg(test)]
#[path = "markup_test.rs"]
mod tests;
