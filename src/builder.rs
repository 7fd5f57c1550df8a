//! Row builder: turns "add user" / "add group" actions into table rows.

use tracing::{debug, warn};

use crate::constants::MISSING_IDENTIFIER_MESSAGE;
use crate::error::{MatrixError, Result};
use crate::principal::{Principal, PrincipalType};
use crate::registry::ItemRegistry;
use crate::table::{IdentifierSource, Notifier, RowSink, TableRow};

/// Builds principal rows against injected page handles.
///
/// Owns the item registry; every row snapshots it at build time.
pub struct RowBuilder<S, T, N> {
    registry: ItemRegistry,
    input: S,
    table: T,
    notifier: N,
}

impl<S, T, N> RowBuilder<S, T, N>
where
    S: IdentifierSource,
    T: RowSink,
    N: Notifier,
{
    pub fn new(registry: ItemRegistry, input: S, table: T, notifier: N) -> Self {
        Self { registry, input, table, notifier }
    }

    pub fn register(&mut self, item: impl Into<String>) {
        self.registry.register(item);
    }

    /// Build the row the current input would produce, without appending it.
    ///
    /// Empty and whitespace-only ids are rejected. Anything else is kept verbatim.
    pub fn build_row(&self, kind: PrincipalType) -> Result<TableRow> {
        let id = self.input.read_identifier();
        if id.trim().is_empty() {
            return Err(MatrixError::MissingIdentifier);
        }
        Ok(TableRow::new(Principal::new(kind, id), self.registry.items()))
    }

    /// Append a row for `kind` using the current input.
    ///
    /// A missing id shows one notification and adds nothing. Errors never
    /// reach the caller.
    pub fn add_principal_row(&mut self, kind: PrincipalType) {
        let row = match self.build_row(kind) {
            Ok(row) => row,
            Err(_) => {
                self.notifier.notify(MISSING_IDENTIFIER_MESSAGE);
                return;
            }
        };
        match self.table.append_row(&row) {
            Ok(()) => debug!(tag = %row.tag(), columns = row.checkboxes.len(), "added principal row"),
            Err(e) => warn!(tag = %row.tag(), error = %e, "could not append principal row"),
        }
    }

    pub fn add_group_row(&mut self) {
        self.add_principal_row(PrincipalType::Group)
    }

    pub fn add_user_row(&mut self) {
        self.add_principal_row(PrincipalType::User)
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn input(&self) -> &S {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut S {
        &mut self.input
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut T {
        &mut self.table
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
