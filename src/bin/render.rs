//! Permtable renderer
//!
//! Prints the permission table for the grants held in the store.
//!
//! Run with: cargo run --features cli --bin permtable-render
//!
//! Environment:
//!   PERMTABLE_DATA_DIR  - store directory (default: permtable_data)
//!   PERMTABLE_TABLE_ID  - id of the rendered table (default: permissionTable)
//!   RUST_LOG            - log filter (default: info)

use std::process::ExitCode;

use permtable::{render_table, GrantStore, MatrixConfig, PermissionTable};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn run(config: &MatrixConfig) -> permtable::Result<String> {
    let store = GrantStore::open(&config.data_dir)?;
    let items = store.load_items()?;
    let grants = store.load_grants()?;
    info!(items = items.len(), grants = grants.len(), "loaded store");
    let table = PermissionTable::from_grants(&items, &grants);
    Ok(render_table(&table, config))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = MatrixConfig::from_env();
    match run(&config) {
        Ok(html) => {
            println!("{html}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, data_dir = %config.data_dir, "render failed");
            ExitCode::FAILURE
        }
    }
}
