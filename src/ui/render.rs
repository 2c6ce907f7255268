//! Server-side page rendering.
//!
//! The page is a pure function of the [`Session`] and an optional one-shot
//! [`Notice`]. Stored turns are decoded by their recorded kind, so a
//! transcript renders the same way on every request.

use serde_json::Value;
use tracing::debug;

use crate::core::classify::{cell_text, decode_turn, Classified, JsonView, Table};
use crate::core::dispatch::Notice;
use crate::core::message::Turn;
use crate::core::session::{Conversation, Session};
use crate::ui::html::escape_html;
use crate::ui::markdown::render_markdown;

const CHAT_PAGE_TEMPLATE: &str = include_str!("../builtins/chat-page.html");

pub const APP_TITLE: &str = "Notebook Chat";

pub fn page_title(session: &Session) -> String {
    format!("{APP_TITLE} - {}", session.active().name)
}

/// Render the whole chat page.
pub fn render_session(session: &Session, notice: Option<&Notice>) -> String {
    let title = escape_html(&page_title(session));
    let active_name = escape_html(&session.active().name);
    let notice_html = notice.map(render_notice).unwrap_or_default();

    fill_template(
        CHAT_PAGE_TEMPLATE,
        &[
            ("TITLE", title.as_str()),
            ("ACTIVE_NAME", active_name.as_str()),
            ("SIDEBAR", render_sidebar(session).as_str()),
            ("NOTICE", notice_html.as_str()),
            ("TRANSCRIPT", render_transcript(session.active()).as_str()),
        ],
    )
}

/// Substitute `{{NAME}}` slots in a single pass. Substituted text is never
/// scanned again, so placeholders inside user content stay literal.
fn fill_template(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("}}").and_then(|end| {
            let name = &after[..end];
            slots
                .iter()
                .find(|(slot, _)| *slot == name)
                .map(|(_, value)| (*value, end))
        });
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_notice(notice: &Notice) -> String {
    format!(
        "<div class=\"notice\" role=\"alert\">{}</div>\n",
        escape_html(&notice.message())
    )
}

fn render_sidebar(session: &Session) -> String {
    let mut out = String::new();
    for (index, conversation) in session.archive().iter().enumerate() {
        let in_use = session.is_in_use(index);
        let name = escape_html(&conversation.name);
        let marker = if in_use { " (in use)" } else { "" };
        let open = if in_use { " open" } else { "" };

        out.push_str(&format!(
            "<details class=\"chat-element\"{open}>\n<summary>{name}{marker}</summary>\n"
        ));
        out.push_str(&format!(
            "<form method=\"post\" action=\"/chats/{index}/select\"><button type=\"submit\">Select</button></form>\n"
        ));
        out.push_str(&format!(
            "<form method=\"post\" action=\"/chats/{index}/delete\"><button type=\"submit\">Delete</button></form>\n"
        ));
        out.push_str(&format!(
            "<form method=\"post\" action=\"/chats/{index}/rename\"><input type=\"text\" name=\"name\" value=\"{name}\" aria-label=\"Rename chat\"><button type=\"submit\">Rename</button></form>\n"
        ));
        out.push_str("</details>\n");
    }
    out
}

fn render_transcript(conversation: &Conversation) -> String {
    let mut out = String::new();
    for turn in &conversation.turns {
        let (class, avatar) = if turn.is_user() {
            ("user", "You")
        } else {
            ("bot", "Bot")
        };
        out.push_str(&format!(
            "<div class=\"turn {class}\"><div class=\"avatar\">{avatar}</div><div class=\"body\">"
        ));
        out.push_str(&render_turn_body(turn));
        out.push_str("</div></div>\n");
    }
    out
}

/// Render the inside of one message bubble.
pub fn render_turn_body(turn: &Turn) -> String {
    if turn.is_user() {
        return render_markdown(&turn.content);
    }

    match decode_turn(turn) {
        Ok(Classified::Text(text)) => render_markdown(&text),
        // Decoding succeeded, so the stored URI is a usable image source.
        Ok(Classified::Image(payload)) => format!(
            "<img src=\"{}\" alt=\"{} image\">",
            escape_html(turn.content.trim()),
            payload.format.as_str()
        ),
        Ok(Classified::Table(table)) => render_table(&table),
        Ok(Classified::Json(JsonView::Tree(value))) => render_json_tree(&value),
        Ok(Classified::Json(JsonView::Raw(raw))) => render_preformatted(&raw),
        Err(err) => {
            debug!(kind = %turn.kind.as_str(), error = %err, "stored turn no longer decodes");
            render_preformatted(&turn.content)
        }
    }
}

fn render_preformatted(text: &str) -> String {
    format!("<pre>{}</pre>", escape_html(text))
}

pub fn render_table(table: &Table) -> String {
    let mut out = String::from("<table>\n<thead><tr><th class=\"index\"></th>");
    for column in &table.columns {
        out.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for (label, row) in table.index.iter().zip(&table.rows) {
        out.push_str(&format!("<tr><th class=\"index\">{}</th>", escape_html(label)));
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape_html(&cell_text(cell))));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>");
    out
}

pub fn render_json_tree(value: &Value) -> String {
    let mut out = String::from("<div class=\"json\">");
    push_json_value(&mut out, value);
    out.push_str("</div>");
    out
}

fn push_json_value(out: &mut String, value: &Value) {
    match value {
        Value::Object(map) => {
            let summary = match map.len() {
                1 => "{1 key}".to_string(),
                n => format!("{{{n} keys}}"),
            };
            out.push_str(&format!("<details open><summary>{summary}</summary><ul>"));
            for (key, child) in map {
                out.push_str(&format!(
                    "<li><span class=\"key\">{}</span>: ",
                    escape_html(&Value::String(key.clone()).to_string())
                ));
                push_json_value(out, child);
                out.push_str("</li>");
            }
            out.push_str("</ul></details>");
        }
        Value::Array(items) => {
            let summary = match items.len() {
                1 => "[1 item]".to_string(),
                n => format!("[{n} items]"),
            };
            out.push_str(&format!("<details open><summary>{summary}</summary><ul>"));
            for (position, child) in items.iter().enumerate() {
                out.push_str(&format!("<li><span class=\"key\">{position}</span>: "));
                push_json_value(out, child);
                out.push_str("</li>");
            }
            out.push_str("</ul></details>");
        }
        Value::String(_) => out.push_str(&format!(
            "<span class=\"string\">{}</span>",
            escape_html(&value.to_string())
        )),
        scalar => out.push_str(&format!("<span>{}</span>", escape_html(&scalar.to_string()))),
    }
}
