//! Granted permissions: which principal holds which items.
//!
//! Text form, one grant per line: `TYPE:id:item`. The type ends at the first
//! `:` and the item starts after the last one, so ids may contain colons but
//! items written as lines may not.
//!
//! Serialized form is a flat list of `{ principal, item }` entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::constants::TAG_SEPARATOR;
use crate::error::{MatrixError, Result};
use crate::principal::{Principal, PrincipalType};

/// One granted item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub principal: Principal,
    pub item: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Grant>", from = "Vec<Grant>")]
pub struct GrantedPermissions {
    granted: BTreeMap<Principal, Vec<String>>,
}

impl GrantedPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `item` to `principal`. Granting twice is a no-op.
    pub fn add_permission(&mut self, principal: Principal, item: impl Into<String>) {
        let item = item.into();
        let items = self.granted.entry(principal).or_default();
        if !items.contains(&item) {
            items.push(item);
        }
    }

    pub fn is_permission_set(&self, principal: &Principal, item: &str) -> bool {
        self.granted
            .get(principal)
            .is_some_and(|items| items.iter().any(|i| i == item))
    }

    /// Granted items of `principal` in grant order
    pub fn permissions_of(&self, principal: &Principal) -> &[String] {
        self.granted.get(principal).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Principals holding at least one item, in principal order
    pub fn principals(&self) -> impl Iterator<Item = &Principal> {
        self.granted.keys()
    }

    /// Static identities (GitLab ones only if asked), then every other
    /// principal holding a grant
    pub fn permission_identities(&self, include_gitlab: bool) -> Vec<Principal> {
        let mut list = Principal::static_identities(include_gitlab);
        for p in self.granted.keys() {
            if !list.contains(p) {
                list.push(p.clone());
            }
        }
        list
    }

    pub fn group_principals(&self) -> Vec<&Principal> {
        self.principals_of_kind(PrincipalType::Group)
    }

    pub fn user_principals(&self) -> Vec<&Principal> {
        self.principals_of_kind(PrincipalType::User)
    }

    fn principals_of_kind(&self, kind: PrincipalType) -> Vec<&Principal> {
        self.granted.keys().filter(|p| p.kind == kind).collect()
    }

    pub fn len(&self) -> usize {
        self.granted.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Principal, &str)> {
        self.granted
            .iter()
            .flat_map(|(p, items)| items.iter().map(move |i| (p, i.as_str())))
    }

    /// Collect grants from submitted form data (see [`crate::form_data`]).
    ///
    /// Keys that are not row tags are skipped. Item keys are taken verbatim;
    /// only `true` grants.
    pub fn from_form_data(data: &Value) -> Result<Self> {
        let rows = data
            .as_object()
            .ok_or_else(|| MatrixError::MalformedGrant(data.to_string()))?;
        let mut out = Self::new();
        for (tag, items) in rows {
            let principal = match Principal::parse_tag(tag) {
                Ok(p) => p,
                Err(e) => {
                    warn!(tag = %tag, error = %e, "skipping form row");
                    continue;
                }
            };
            let Some(items) = items.as_object() else {
                warn!(tag = %tag, "skipping form row without item object");
                continue;
            };
            for (item, checked) in items {
                if checked.as_bool() == Some(true) {
                    out.add_permission(principal.clone(), item.as_str());
                }
            }
        }
        Ok(out)
    }

    /// Parse one `TYPE:id:item` line
    pub fn parse_line(line: &str) -> Result<(Principal, String)> {
        let bad = || MatrixError::MalformedGrant(line.to_string());
        let (tag, item) = line.rsplit_once(TAG_SEPARATOR).ok_or_else(bad)?;
        if item.is_empty() {
            return Err(bad());
        }
        let principal = Principal::parse_tag(tag).map_err(|e| match e {
            MatrixError::InvalidTag(_) => bad(),
            other => other,
        })?;
        Ok((principal, item.to_string()))
    }

    /// Read grants from lines; malformed lines are logged and skipped
    pub fn from_lines<'a, I: IntoIterator<Item = &'a str>>(lines: I) -> Self {
        let mut out = Self::new();
        for line in lines.into_iter().map(str::trim).filter(|l| !l.is_empty()) {
            match Self::parse_line(line) {
                Ok((p, item)) => out.add_permission(p, item),
                Err(e) => warn!(line = %line, error = %e, "couldn't parse identity/permission"),
            }
        }
        out
    }

    /// One line per grant.
    ///
    /// Fails on an item that is empty or contains `:`, since the line could
    /// not be read back as the same grant.
    pub fn to_lines(&self) -> Result<Vec<String>> {
        self.iter()
            .map(|(p, item)| {
                if item.is_empty() || item.contains(TAG_SEPARATOR) {
                    return Err(MatrixError::MalformedGrant(format!("{}{}{}", p.tag(), TAG_SEPARATOR, item)));
                }
                Ok(format!("{}{}{}", p.tag(), TAG_SEPARATOR, item))
            })
            .collect()
    }
}

impl FromIterator<(Principal, String)> for GrantedPermissions {
    fn from_iter<I: IntoIterator<Item = (Principal, String)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (p, item) in iter {
            out.add_permission(p, item);
        }
        out
    }
}

impl From<GrantedPermissions> for Vec<Grant> {
    fn from(g: GrantedPermissions) -> Self {
        g.granted
            .into_iter()
            .flat_map(|(principal, items)| {
                items.into_iter().map(move |item| Grant { principal: principal.clone(), item })
            })
            .collect()
    }
}

impl From<Vec<Grant>> for GrantedPermissions {
    fn from(grants: Vec<Grant>) -> Self {
        grants.into_iter().map(|g| (g.principal, g.item)).collect()
    }
}
