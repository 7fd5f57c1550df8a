//! Fixed strings of the page contract

/// Id of the text input holding the user or group name
pub const INPUT_ELEMENT_ID: &str = "addUserGroupText";

/// Id of the table receiving principal rows
pub const TABLE_ELEMENT_ID: &str = "permissionTable";

/// Notification shown when a row is requested without an identifier
pub const MISSING_IDENTIFIER_MESSAGE: &str = "Please enter a username or a group name";

/// Attribute carrying the row tag
pub const ROW_TAG_ATTRIBUTE: &str = "name";

/// Separator between principal type and id in a row tag
pub const TAG_SEPARATOR: char = ':';

/// Default directory of the grant store
pub const DEFAULT_DATA_DIR: &str = "permtable_data";

/// Checkbox field name for a permission item: `[item]`
pub fn checkbox_name(item: &str) -> String {
    format!("[{}]", item)
}

/// Jenkins access levels, highest first
pub const JENKINS_ACCESS_LEVELS: [&str; 3] = ["ADMIN", "LOGGED_IN", "ANONYMOUS"];

/// GitLab access levels, highest first
pub const GITLAB_ACCESS_LEVELS: [&str; 5] = ["OWNER", "MASTER", "DEVELOPER", "REPORTER", "GUEST"];
