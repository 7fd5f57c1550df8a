//! Principals and their row tags.
//!
//! A row tag is the `TYPE:id` label a table row carries, e.g. `USER:alice`.
//! It is the only link between a rendered row and the principal it grants to.
//!
//! Besides users and groups there are static identities, one per Jenkins or
//! GitLab access level (`JENKINS:ADMIN`, `GITLAB:OWNER`, ...). They are never
//! added by hand but can hold grants like any other principal.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{GITLAB_ACCESS_LEVELS, JENKINS_ACCESS_LEVELS, TAG_SEPARATOR};
use crate::error::{MatrixError, Result};

/// Kind of principal a row represents.
///
/// Declaration order is display order: static identities first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrincipalType {
    Jenkins,
    Gitlab,
    Group,
    User,
}

impl PrincipalType {
    /// Tag prefix: `JENKINS`, `GITLAB`, `GROUP` or `USER`
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalType::Jenkins => "JENKINS",
            PrincipalType::Gitlab => "GITLAB",
            PrincipalType::Group => "GROUP",
            PrincipalType::User => "USER",
        }
    }

    /// Access levels of a static kind, highest first; `None` for users and groups
    pub fn access_levels(&self) -> Option<&'static [&'static str]> {
        match self {
            PrincipalType::Jenkins => Some(&JENKINS_ACCESS_LEVELS),
            PrincipalType::Gitlab => Some(&GITLAB_ACCESS_LEVELS),
            PrincipalType::Group | PrincipalType::User => None,
        }
    }
}

impl fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrincipalType {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "JENKINS" => Ok(PrincipalType::Jenkins),
            "GITLAB" => Ok(PrincipalType::Gitlab),
            "GROUP" => Ok(PrincipalType::Group),
            "USER" => Ok(PrincipalType::User),
            other => Err(MatrixError::UnknownPrincipalType(other.to_string())),
        }
    }
}

/// A principal that can be granted permission items.
///
/// Ordering is by kind, then by access level (highest first) for static
/// identities and by id for users and groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    pub kind: PrincipalType,
    pub id: String,
}

impl Principal {
    pub fn new(kind: PrincipalType, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }

    pub fn user(id: impl Into<String>) -> Self {
        Self::new(PrincipalType::User, id)
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self::new(PrincipalType::Group, id)
    }

    /// Static identity for an access level of `kind`
    pub fn access_level(kind: PrincipalType, level: &str) -> Result<Self> {
        match kind.access_levels() {
            Some(levels) if levels.iter().any(|l| *l == level) => Ok(Self::new(kind, level)),
            Some(_) => Err(MatrixError::UnknownAccessLevel(format!("{}{}{}", kind, TAG_SEPARATOR, level))),
            None => Err(MatrixError::UnknownPrincipalType(kind.to_string())),
        }
    }

    /// Jenkins identities, then (if asked) GitLab ones, highest level first
    pub fn static_identities(include_gitlab: bool) -> Vec<Principal> {
        let mut v: Vec<Principal> = JENKINS_ACCESS_LEVELS
            .iter()
            .map(|l| Self::new(PrincipalType::Jenkins, *l))
            .collect();
        if include_gitlab {
            v.extend(GITLAB_ACCESS_LEVELS.iter().map(|l| Self::new(PrincipalType::Gitlab, *l)));
        }
        v
    }

    pub fn is_static(&self) -> bool {
        self.kind.access_levels().is_some()
    }

    /// Row tag: `TYPE:id`
    pub fn tag(&self) -> String {
        format!("{}{}{}", self.kind, TAG_SEPARATOR, self.id)
    }

    /// Parse a row tag.
    ///
    /// Splits at the first `:` so the id may itself contain colons. Static
    /// kinds only accept their known access levels.
    ///
    /// # Example
    /// ```
    /// use permtable::{Principal, PrincipalType};
    /// let p = Principal::parse_tag("GROUP:dev:ops").unwrap();
    /// assert_eq!(p.kind, PrincipalType::Group);
    /// assert_eq!(p.id, "dev:ops");
    /// ```
    pub fn parse_tag(tag: &str) -> Result<Self> {
        let (kind, id) = tag
            .split_once(TAG_SEPARATOR)
            .ok_or_else(|| MatrixError::InvalidTag(tag.to_string()))?;
        if id.is_empty() {
            return Err(MatrixError::InvalidTag(tag.to_string()));
        }
        let kind: PrincipalType = kind.parse()?;
        if kind.access_levels().is_some() {
            return Self::access_level(kind, id);
        }
        Ok(Self::new(kind, id))
    }

    fn level_rank(&self) -> usize {
        self.kind
            .access_levels()
            .and_then(|levels| levels.iter().position(|l| *l == self.id))
            .unwrap_or(0)
    }
}

impl Ord for Principal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.level_rank().cmp(&other.level_rank()))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Principal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.kind, TAG_SEPARATOR, self.id)
    }
}

impl FromStr for Principal {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_tag(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_roundtrip() {
        let p = Principal::user("alice");
        assert_eq!(p.tag(), "USER:alice");
        assert_eq!(p.to_string(), "USER:alice");
        assert_eq!(Principal::parse_tag("USER:alice").unwrap(), p);
        assert_eq!("USER:alice".parse::<Principal>().unwrap(), p);
    }

    #[test]
    fn parse_rejects_bad_tags() {
        assert_eq!(
            Principal::parse_tag("alice"),
            Err(MatrixError::InvalidTag("alice".into()))
        );
        assert_eq!(
            Principal::parse_tag("USER:"),
            Err(MatrixError::InvalidTag("USER:".into()))
        );
        assert_eq!(
            Principal::parse_tag("ROBOT:r2"),
            Err(MatrixError::UnknownPrincipalType("ROBOT".into()))
        );
        // type names are case sensitive
        assert!(Principal::parse_tag("user:alice").is_err());
    }

    #[test]
    fn static_tags_need_known_levels() {
        let admin = Principal::parse_tag("JENKINS:ADMIN").unwrap();
        assert_eq!(admin.kind, PrincipalType::Jenkins);
        assert!(admin.is_static());
        assert!(Principal::parse_tag("GITLAB:OWNER").unwrap().is_static());
        assert_eq!(
            Principal::parse_tag("JENKINS:root"),
            Err(MatrixError::UnknownAccessLevel("JENKINS:root".into()))
        );
        assert!(Principal::access_level(PrincipalType::User, "ADMIN").is_err());
        assert!(!Principal::user("ADMIN").is_static());
    }

    #[test]
    fn static_identities_in_level_order() {
        let tags: Vec<String> = Principal::static_identities(false).iter().map(Principal::tag).collect();
        assert_eq!(tags, ["JENKINS:ADMIN", "JENKINS:LOGGED_IN", "JENKINS:ANONYMOUS"]);
        let all = Principal::static_identities(true);
        assert_eq!(all.len(), 8);
        assert_eq!(all[3].tag(), "GITLAB:OWNER");
        assert_eq!(all[7].tag(), "GITLAB:GUEST");
    }

    #[test]
    fn ordering_follows_kind_then_level() {
        let mut v = vec![
            Principal::user("a"),
            Principal::group("z"),
            Principal::new(PrincipalType::Jenkins, "ANONYMOUS"),
            Principal::group("b"),
            Principal::new(PrincipalType::Jenkins, "ADMIN"),
            Principal::new(PrincipalType::Gitlab, "GUEST"),
        ];
        v.sort();
        let tags: Vec<String> = v.iter().map(Principal::tag).collect();
        assert_eq!(
            tags,
            ["JENKINS:ADMIN", "JENKINS:ANONYMOUS", "GITLAB:GUEST", "GROUP:b", "GROUP:z", "USER:a"]
        );
    }
}
