//! Table rows and the handles a row builder works against.
//!
//! The three traits stand in for the page elements the builder touches: the
//! identifier input, the permission table and the blocking notification.
//! `TextField`, `PermissionTable` and `Notifications` are the in-memory
//! implementations; the browser ones live in `web`.

use crate::constants::checkbox_name;
use crate::error::Result;
use crate::grants::GrantedPermissions;
use crate::principal::Principal;
use crate::registry::ItemRegistry;

/// One checkbox cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub item: String,
    /// Field name, `[item]`
    pub name: String,
    pub checked: bool,
}

impl Checkbox {
    pub fn new(item: impl Into<String>) -> Self {
        let item = item.into();
        Self { name: checkbox_name(&item), item, checked: false }
    }
}

/// One principal row: the id cell followed by one checkbox per item.
///
/// The checkbox set is fixed when the row is built. Items registered later
/// do not reach rows that already exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub principal: Principal,
    pub checkboxes: Vec<Checkbox>,
}

impl TableRow {
    pub fn new(principal: Principal, items: &[String]) -> Self {
        Self {
            principal,
            checkboxes: items.iter().map(Checkbox::new).collect(),
        }
    }

    /// Row tag attribute, `TYPE:id`
    pub fn tag(&self) -> String {
        self.principal.tag()
    }

    /// Text of the first cell
    pub fn id_cell(&self) -> &str {
        &self.principal.id
    }

    /// Number of cells including the id cell
    pub fn cell_count(&self) -> usize {
        1 + self.checkboxes.len()
    }

    /// Tick or clear every box for `item`; returns how many boxes matched
    pub fn set_checked(&mut self, item: &str, checked: bool) -> usize {
        let mut n = 0;
        for c in self.checkboxes.iter_mut().filter(|c| c.item == item) {
            c.checked = checked;
            n += 1;
        }
        n
    }

    pub fn checked_items(&self) -> Vec<&str> {
        self.checkboxes
            .iter()
            .filter(|c| c.checked)
            .map(|c| c.item.as_str())
            .collect()
    }
}

/// Source of the typed identifier (the text input)
pub trait IdentifierSource {
    fn read_identifier(&self) -> String;
}

/// Destination of new rows (the table)
pub trait RowSink {
    fn append_row(&mut self, row: &TableRow) -> Result<()>;
}

/// Blocking user notification (an alert)
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// In-memory text input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
}

impl TextField {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl IdentifierSource for TextField {
    fn read_identifier(&self) -> String {
        self.value.clone()
    }
}

/// In-memory permission table. Rows stay in append order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionTable {
    rows: Vec<TableRow>,
}

impl PermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// One row per granted principal, boxes ticked for granted items.
    ///
    /// Columns follow `registry`; granted items missing from it get no box.
    pub fn from_grants(registry: &ItemRegistry, grants: &GrantedPermissions) -> Self {
        Self::with_principals(registry, grants, grants.principals())
    }

    /// Like [`from_grants`](Self::from_grants), but led by the static
    /// identities, which get a row even without grants
    pub fn from_identities(registry: &ItemRegistry, grants: &GrantedPermissions, include_gitlab: bool) -> Self {
        Self::with_principals(registry, grants, grants.permission_identities(include_gitlab).iter())
    }

    fn with_principals<'a, I>(registry: &ItemRegistry, grants: &GrantedPermissions, principals: I) -> Self
    where
        I: Iterator<Item = &'a Principal>,
    {
        let rows = principals
            .map(|p| {
                let mut row = TableRow::new(p.clone(), registry.items());
                for c in row.checkboxes.iter_mut() {
                    c.checked = grants.is_permission_set(p, &c.item);
                }
                row
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [TableRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&TableRow> {
        self.rows.last()
    }

    /// Rows carrying `tag`, in table order
    pub fn find_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TableRow> + 'a {
        self.rows.iter().filter(move |r| r.tag() == tag)
    }
}

impl RowSink for PermissionTable {
    fn append_row(&mut self, row: &TableRow) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }
}

/// Records notifications instead of showing them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifications {
    messages: Vec<String>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Notifier for Notifications {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

impl<T: IdentifierSource + ?Sized> IdentifierSource for &T {
    fn read_identifier(&self) -> String {
        (**self).read_identifier()
    }
}

impl<T: RowSink + ?Sized> RowSink for &mut T {
    fn append_row(&mut self, row: &TableRow) -> Result<()> {
        (**self).append_row(row)
    }
}

impl<T: Notifier + ?Sized> Notifier for &mut T {
    fn notify(&mut self, message: &str) {
        (**self).notify(message)
    }
}
