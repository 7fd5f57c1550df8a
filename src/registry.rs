//! Ordered registry of permission items

use tracing::debug;

/// Permission item names in registration order.
///
/// Append-only. Order decides left-to-right checkbox columns. No deduplication
/// and no validation: empty names and repeats are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemRegistry {
    items: Vec<String>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, item: impl Into<String>) {
        let item = item.into();
        debug!(item = %item, position = self.items.len(), "registered permission item");
        self.items.push(item);
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of the current items, as captured by a new row
    pub fn snapshot(&self) -> Vec<String> {
        self.items.clone()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.items.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for ItemRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut r = Self::new();
        for item in iter {
            r.register(item);
        }
        r
    }
}

impl<'a> IntoIterator for &'a ItemRegistry {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
