//! HTML rendering of the board.
//!
//! Rendering is a pure transform of a store snapshot and the node identity;
//! it holds no state and never touches the store itself.

use crate::board::Entry;
use crate::types::NodeId;

const PAGE_HEADER: &str = "<!DOCTYPE html>\n\
<html>\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<title>Blackboard</title>\n\
</head>\n\
<body>\n\
<h1>Distributed blackboard</h1>\n\
<form action=\"/board\" method=\"post\">\n\
<input type=\"text\" name=\"entry\" size=\"60\">\n\
<input type=\"submit\" value=\"Post\">\n\
</form>\n";

/// Escapes text for inclusion in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders one entry with its modify and delete controls.
pub fn render_entry(entry: &Entry) -> String {
    let content = escape_html(&entry.content);
    format!(
        "<form class=\"entry\" action=\"/board\" method=\"post\">\n\
         <input type=\"hidden\" name=\"key\" value=\"{id}\">\n\
         <span class=\"entry-id\">{id}</span>\n\
         <input type=\"text\" name=\"value\" value=\"{content}\" size=\"60\">\n\
         <button type=\"submit\" name=\"delete\" value=\"0\">Modify</button>\n\
         <button type=\"submit\" name=\"delete\" value=\"1\">X</button>\n\
         </form>\n",
        id = entry.id,
    )
}

/// Renders the board fragment served by `GET /board`.
pub fn render_board(entries: &[Entry], identity: NodeId) -> String {
    let body: String = entries.iter().map(render_entry).collect();
    format!(
        "<div id=\"boardcontents\">\n\
         <h2>Board @ vessel {identity}</h2>\n\
         {body}</div>\n"
    )
}

/// Renders the full page: header, board and a footer listing the vessels.
pub fn render_page(entries: &[Entry], identity: NodeId, peers: &[String]) -> String {
    let vessels = peers
        .iter()
        .map(|peer| escape_html(peer))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{PAGE_HEADER}{board}<footer>\n\
         <p>Other vessels: [{vessels}]</p>\n\
         </footer>\n\
         </body>\n\
         </html>\n",
        board = render_board(entries, identity),
    )
}
