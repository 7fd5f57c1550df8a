//! Permtable - permission matrix editor
//!
//! Rows for users and groups, one checkbox column per registered permission
//! item. A [`RowBuilder`] reads an id from an input, appends a tagged row to a
//! table, and shows a notification when the id is missing. The handles are
//! traits so the same builder drives the in-memory [`PermissionTable`] and,
//! with the `web` feature, real DOM elements.
//!
//! ```
//! use permtable::*;
//!
//! let mut b = RowBuilder::new(
//!     ["read", "write"].into_iter().collect(),
//!     TextField::new("alice"),
//!     PermissionTable::new(),
//!     Notifications::new(),
//! );
//! b.add_user_row();
//! assert_eq!(b.table().rows()[0].tag(), "USER:alice");
//! ```

pub mod builder;
pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod grants;
pub mod keys;
pub mod principal;
pub mod registry;
pub mod render;
#[cfg(not(target_arch = "wasm32"))]
pub mod store;
pub mod table;
#[cfg(feature = "web")]
pub mod web;

pub use builder::RowBuilder;
pub use config::MatrixConfig;
pub use constants::*;
pub use error::{MatrixError, Result};
pub use form::form_data;
pub use grants::{Grant, GrantedPermissions};
pub use principal::{Principal, PrincipalType};
pub use registry::ItemRegistry;
pub use render::{escape_html, render_row, render_table};
#[cfg(not(target_arch = "wasm32"))]
pub use store::GrantStore;
pub use table::{
    Checkbox, IdentifierSource, Notifications, Notifier, PermissionTable, RowSink, TableRow,
    TextField,
};
#[cfg(feature = "web")]
pub use web::PermissionMatrix;
