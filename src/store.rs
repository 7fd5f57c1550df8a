//! LMDB-backed store for registered items and granted permissions

use std::path::Path;

use heed::types::{Bytes, Str, U64};
use heed::{Database, Env, EnvOpenOptions, RoTxn, RwTxn};
use tracing::{debug, warn};

use crate::error::{err, Result};
use crate::grants::GrantedPermissions;
use crate::keys::{grant_key, parse_grant};
use crate::principal::{Principal, PrincipalType};
use crate::registry::ItemRegistry;

/// position -> item name
type ItemDb = Database<U64<byteorder::BigEndian>, Str>;
/// grant sequence number -> [type][id][item]
type GrantDb = Database<U64<byteorder::BigEndian>, Bytes>;

struct Dbs {
    items: ItemDb,
    grants: GrantDb,
}

pub struct GrantStore {
    env: Env,
    dbs: Dbs,
}

impl GrantStore {
    /// Open (creating if needed) the store at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        std::fs::create_dir_all(path).map_err(err)?;
        // SAFETY: LMDB requires no other processes access this path concurrently during open.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(1 << 26)
                .max_dbs(2)
                .open(path)
                .map_err(err)?
        };
        let mut tx = env.write_txn().map_err(err)?;
        let dbs = Dbs {
            items: env.create_database(&mut tx, Some("items")).map_err(err)?,
            grants: env.create_database(&mut tx, Some("grants")).map_err(err)?,
        };
        tx.commit().map_err(err)?;
        debug!(path = %path.display(), "opened grant store");
        Ok(Self { env, dbs })
    }

    fn read<T, F: FnOnce(&Dbs, &RoTxn) -> Result<T>>(&self, f: F) -> Result<T> {
        f(&self.dbs, &self.env.read_txn().map_err(err)?)
    }

    fn write<T, F: FnOnce(&Dbs, &mut RwTxn) -> Result<T>>(&self, f: F) -> Result<T> {
        let mut txn = self.env.write_txn().map_err(err)?;
        let r = f(&self.dbs, &mut txn)?;
        txn.commit().map_err(err)?;
        Ok(r)
    }

    /// Replace the stored items with `registry`, keeping its order
    pub fn save_items(&self, registry: &ItemRegistry) -> Result<()> {
        self.write(|d, tx| {
            d.items.clear(tx).map_err(err)?;
            for (i, item) in registry.iter().enumerate() {
                d.items.put(tx, &(i as u64), item).map_err(err)?;
            }
            Ok(())
        })
    }

    pub fn load_items(&self) -> Result<ItemRegistry> {
        self.read(|d, tx| {
            let mut r = ItemRegistry::new();
            for entry in d.items.iter(tx).map_err(err)? {
                let (_, item) = entry.map_err(err)?;
                r.register(item);
            }
            Ok(r)
        })
    }

    /// Replace all stored grants with `grants` in one transaction
    pub fn save_grants(&self, grants: &GrantedPermissions) -> Result<()> {
        self.write(|d, tx| {
            d.grants.clear(tx).map_err(err)?;
            for (seq, (p, item)) in grants.iter().enumerate() {
                let record = grant_key(p.kind.as_str(), &p.id, item)?;
                d.grants.put(tx, &(seq as u64), &record).map_err(err)?;
            }
            Ok(())
        })
    }

    pub fn load_grants(&self) -> Result<GrantedPermissions> {
        self.read(|d, tx| {
            let mut out = GrantedPermissions::new();
            for entry in d.grants.iter(tx).map_err(err)? {
                let (seq, record) = entry.map_err(err)?;
                let Some((kind, id, item)) = parse_grant(record) else {
                    warn!(seq, len = record.len(), "skipping undecodable grant record");
                    continue;
                };
                let kind: PrincipalType = match kind.parse() {
                    Ok(kind) => kind,
                    Err(e) => {
                        warn!(error = %e, "skipping stored grant");
                        continue;
                    }
                };
                out.add_permission(Principal::new(kind, id), item);
            }
            Ok(out)
        })
    }

    pub fn clear(&self) -> Result<()> {
        self.write(|d, tx| {
            d.items.clear(tx).map_err(err)?;
            d.grants.clear(tx).map_err(err)
        })
    }
}
