//! Form data as serialized from the rendered table.

use serde_json::{Map, Value};

use crate::table::PermissionTable;

/// `{ "TYPE:id": { "item": checked, ... }, ... }`
///
/// Rows sharing a tag collapse into one entry; the later row wins.
pub fn form_data(table: &PermissionTable) -> Value {
    let mut rows = Map::new();
    for row in table.rows() {
        let items: Map<String, Value> = row
            .checkboxes
            .iter()
            .map(|c| (c.item.clone(), Value::Bool(c.checked)))
            .collect();
        rows.insert(row.tag(), Value::Object(items));
    }
    Value::Object(rows)
}
