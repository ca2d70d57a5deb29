//! Plain-terminal rendering of a checker transcript.

use triage::markup::{self, Line, Span};
use triage::{ConversationTurn, Notice, Role, TriageLevel, User};

/// `[RED] High Risk - Seek Immediate Care`
#[must_use]
pub fn badge(level: TriageLevel) -> String {
    format!("[{}] {}", level.wire_name().to_uppercase(), level.badge())
}

#[must_use]
pub fn render_turn(turn: &ConversationTurn) -> String {
    match turn.role() {
        Role::User => format!("you> {}", turn.content()),
        Role::Assistant => match turn.triage_level() {
            Some(level) => format!("{}\n{}", badge(level), render_markup(turn.content())),
            None => render_markup(turn.content()),
        },
    }
}

/// Creation time of a turn as `HH:MM UTC`.
#[must_use]
pub fn stamp(turn: &ConversationTurn) -> String {
    let at = turn.created_at();
    format!("{:02}:{:02} UTC", at.hour(), at.minute())
}

#[must_use]
pub fn render_user(user: Option<&User>) -> String {
    match user {
        Some(User { id, email: Some(email) }) => format!("signed in as {id} <{email}>"),
        Some(User { id, email: None }) => format!("signed in as {id}"),
        None => "anonymous".to_string(),
    }
}

#[must_use]
pub fn render_notice(notice: Notice) -> String {
    if notice.is_error() {
        format!("! {}", notice.message())
    } else {
        format!("* {}", notice.message())
    }
}

/// Headers are underlined, bullets use `•`, bold markers are dropped.
#[must_use]
pub fn render_markup(content: &str) -> String {
    let mut out = Vec::new();
    for line in markup::parse(content) {
        match line {
            Line::Header(spans) => {
                let text = flatten(&spans);
                let underline = "-".repeat(text.chars().count());
                out.push(text);
                out.push(underline);
            }
            Line::Bullet(spans) => out.push(format!("  • {}", flatten(&spans))),
            Line::Numbered { number, spans } => out.push(format!("  {number}. {}", flatten(&spans))),
            Line::Paragraph(spans) => out.push(flatten(&spans)),
            Line::Blank => out.push(String::new()),
        }
    }
    out.join("\n")
}

fn flatten(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Plain(text) | Span::Bold(text) => text.as_str(),
        })
        .collect()
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
