//! HTML markup for permission tables.
//!
//! Produces the markup a form submission expects: each `<tr>` carries the
//! row tag in its `name` attribute and each checkbox is named `[item]`.
//! Ids and attribute values are escaped, so an id like `<b>x</b>` shows as
//! literal text.

use crate::config::MatrixConfig;
use crate::constants::ROW_TAG_ATTRIBUTE;
use crate::table::{Checkbox, PermissionTable, TableRow};

/// Escape text for element content and quoted attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn render_checkbox(c: &Checkbox) -> String {
    format!(
        "<input class=\"\" type=\"checkbox\" name=\"{}\"{}></input>",
        escape_html(&c.name),
        if c.checked { " checked" } else { "" }
    )
}

pub fn render_row(row: &TableRow) -> String {
    let mut out = format!(
        "<tr {}=\"{}\"><td>{}</td>",
        ROW_TAG_ATTRIBUTE,
        escape_html(&row.tag()),
        escape_html(row.id_cell())
    );
    for c in &row.checkboxes {
        out.push_str(&format!("<td>{}</td>", render_checkbox(c)));
    }
    out.push_str("</tr>");
    out
}

/// Whole table element, one line per row
pub fn render_table(table: &PermissionTable, config: &MatrixConfig) -> String {
    let mut out = format!("<table id=\"{}\">\n", escape_html(&config.table_id));
    for row in table.rows() {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str("</table>");
    out
}
