//! Runtime configuration loaded from environment variables.
//!
//! - `PERMTABLE_INPUT_ID`: id of the identifier input (default `addUserGroupText`)
//! - `PERMTABLE_TABLE_ID`: id of the permission table (default `permissionTable`)
//! - `PERMTABLE_DATA_DIR`: grant store directory (default `permtable_data`)

use std::env;

use crate::constants::{DEFAULT_DATA_DIR, INPUT_ELEMENT_ID, TABLE_ELEMENT_ID};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixConfig {
    pub input_id: String,
    pub table_id: String,
    pub data_dir: String,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            input_id: INPUT_ELEMENT_ID.to_string(),
            table_id: TABLE_ELEMENT_ID.to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
        }
    }
}

impl MatrixConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Build from any key lookup; blank values fall back to defaults
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let d = Self::default();
        let get = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };
        Self {
            input_id: get("PERMTABLE_INPUT_ID", d.input_id),
            table_id: get("PERMTABLE_TABLE_ID", d.table_id),
            data_dir: get("PERMTABLE_DATA_DIR", d.data_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_contract() {
        let c = MatrixConfig::from_lookup(|_| None);
        assert_eq!(c.input_id, "addUserGroupText");
        assert_eq!(c.table_id, "permissionTable");
        assert_eq!(c.data_dir, "permtable_data");
    }

    #[test]
    fn overrides_and_blank_values() {
        let c = MatrixConfig::from_lookup(|k| match k {
            "PERMTABLE_TABLE_ID" => Some(" grants ".into()),
            "PERMTABLE_INPUT_ID" => Some("   ".into()),
            _ => None,
        });
        assert_eq!(c.table_id, "grants");
        assert_eq!(c.input_id, "addUserGroupText");
    }
}
