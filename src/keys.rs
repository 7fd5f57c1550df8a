//! Length-prefixed multi-part encoding for LMDB records.
//!
//! Encoded as: [len1: u32 BE][bytes1][len2: u32 BE][bytes2]...
//! - No delimiters, no escaping, any bytes allowed
//! - Parts are stored as values, so LMDB's key size limit does not apply

use byteorder::{BigEndian, ByteOrder};

use crate::error::{MatrixError, Result};

const LEN: usize = 4;

/// Encode parts with a length prefix each
///
/// # Example
/// ```
/// use permtable::keys::{build_key, parse_key};
/// let key = build_key(&["USER", "alice", "read"]).unwrap();
/// assert_eq!(parse_key(&key), Some(vec!["USER", "alice", "read"]));
/// ```
pub fn build_key(parts: &[&str]) -> Result<Vec<u8>> {
    let total_len: usize = parts.iter().map(|p| LEN + p.len()).sum();
    let mut key = Vec::with_capacity(total_len);
    for part in parts {
        let n = u32::try_from(part.len())
            .map_err(|_| MatrixError::Storage(format!("record part too long: {} bytes", part.len())))?;
        let mut len = [0u8; LEN];
        BigEndian::write_u32(&mut len, n);
        key.extend_from_slice(&len);
        key.extend_from_slice(part.as_bytes());
    }
    Ok(key)
}

/// Parse length-prefixed parts; `None` on truncation or bad UTF-8
pub fn parse_key(bytes: &[u8]) -> Option<Vec<&str>> {
    let mut parts = Vec::with_capacity(3);
    let mut i = 0;
    while i < bytes.len() {
        if i + LEN > bytes.len() {
            return None;
        }
        let len = BigEndian::read_u32(&bytes[i..i + LEN]) as usize;
        let start = i + LEN;
        let end = start.checked_add(len)?;
        if end > bytes.len() {
            return None;
        }
        parts.push(std::str::from_utf8(&bytes[start..end]).ok()?);
        i = end;
    }
    Some(parts)
}

/// Grant record: [type][id][item]
#[inline]
pub fn grant_key(kind: &str, id: &str, item: &str) -> Result<Vec<u8>> {
    build_key(&[kind, id, item])
}

/// Parse grant record into (type, id, item)
pub fn parse_grant(bytes: &[u8]) -> Option<(&str, &str, &str)> {
    let parts = parse_key(bytes)?;
    match parts[..] {
        [kind, id, item] => Some((kind, id, item)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colons_and_empty_parts_survive() {
        let k = grant_key("GROUP", "dev:ops", "").unwrap();
        assert_eq!(parse_grant(&k), Some(("GROUP", "dev:ops", "")));
    }

    #[test]
    fn long_parts_keep_their_length() {
        let id = "x".repeat(70_000);
        let k = grant_key("USER", &id, "read").unwrap();
        assert_eq!(parse_grant(&k), Some(("USER", id.as_str(), "read")));
    }

    #[test]
    fn truncated_key_rejected() {
        let k = grant_key("USER", "alice", "read").unwrap();
        assert_eq!(parse_key(&k[..k.len() - 1]), None);
        assert_eq!(parse_key(&k[..1]), None);
        assert_eq!(parse_grant(&build_key(&["USER", "alice"]).unwrap()), None);
    }
}
