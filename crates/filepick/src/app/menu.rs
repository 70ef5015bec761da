//! Snapshot of the options offered by the current menu.

use std::collections::HashSet;

use crate::domain::errors::QueryError;
use crate::domain::model::MenuOption;

/// Ordered, immutable collection of [`MenuOption`]s answering id and name lookups.
///
/// Pages rebuild the set from scratch on every render, so there is no update API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOptionSet<V> {
    options: Vec<MenuOption<V>>,
}

impl<V> Default for MenuOptionSet<V> {
    fn default() -> Self {
        Self {
            options: Vec::new(),
        }
    }
}

impl<V> MenuOptionSet<V> {
    /// Build a set from options with caller-assigned ids.
    pub fn new(options: Vec<MenuOption<V>>) -> Result<Self, QueryError> {
        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if option.id == 0 || !seen.insert(option.id) {
                return Err(QueryError::InvalidOption { id: option.id });
            }
        }
        Ok(Self { options })
    }

    /// Build a set numbering entries `1..=n` in the order given.
    ///
    /// Each entry is `(name, label, value, is_selected)`.
    pub fn from_entries<I, N, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, L, V, bool)>,
        N: Into<String>,
        L: Into<String>,
    {
        let options = entries
            .into_iter()
            .zip(1u32..)
            .map(|((name, label, value, is_selected), id)| {
                MenuOption::new(id, name, value)
                    .with_label(label)
                    .selected(is_selected)
            })
            .collect();
        Self { options }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuOption<V>> {
        self.options.iter()
    }

    pub fn get(&self, id: u32) -> Option<&MenuOption<V>> {
        self.options.iter().find(|option| option.id == id)
    }

    pub fn has_id(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    /// All ids in display order.
    pub fn ids_in_order(&self) -> Vec<u32> {
        self.options.iter().map(|option| option.id).collect()
    }

    /// Payload of the option with `id`.
    pub fn value_of(&self, id: u32) -> Result<&V, QueryError> {
        self.get(id)
            .map(|option| &option.value)
            .ok_or(QueryError::NotFound { id })
    }

    /// Ids of every option whose name starts with `prefix`, ignoring case.
    ///
    /// Exclusivity is the caller's concern; all matches are returned in display order.
    pub fn find_ids_by_name_prefix(&self, prefix: &str) -> Vec<u32> {
        let prefix = prefix.to_lowercase();
        self.options
            .iter()
            .filter(|option| option.name.to_lowercase().starts_with(&prefix))
            .map(|option| option.id)
            .collect()
    }
}
