//! Domain models for menu options, queries, and resolution results.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One selectable entry of a displayed menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption<V> {
    pub id: u32,
    pub name: String,
    pub label: String,
    pub value: V,
    pub is_selected: bool,
}

impl<V> MenuOption<V> {
    pub fn new(id: u32, name: impl Into<String>, value: V) -> Self {
        let name = name.into();
        Self {
            id,
            label: name.clone(),
            name,
            value,
            is_selected: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }
}

/// Whether a query adds to or removes from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Select,
    Unselect,
}

/// Shape of a classified query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Id,
    Range,
    All,
    Name,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Id => "id",
            Self::Range => "range",
            Self::All => "all",
            Self::Name => "string",
        };
        f.write_str(label)
    }
}

/// Typed payload of a classified query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Id(u32),
    /// Bounds in the order they were typed; `min > max` is left for the resolver to reject.
    Range { min: u32, max: u32 },
    All,
    /// Lowercased name prefix.
    Name(String),
}

/// One classified sub-query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub raw: String,
    pub action: Action,
    pub value: QueryValue,
}

impl Query {
    pub fn kind(&self) -> QueryKind {
        match self.value {
            QueryValue::Id(_) => QueryKind::Id,
            QueryValue::Range { .. } => QueryKind::Range,
            QueryValue::All => QueryKind::All,
            QueryValue::Name(_) => QueryKind::Name,
        }
    }
}

/// Per-menu rules on which queries are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub can_unselect: bool,
    pub accepts_many: bool,
}

impl Policy {
    /// Exactly one option per line, no removals. Used by navigation menus.
    pub const fn single() -> Self {
        Self {
            can_unselect: false,
            accepts_many: false,
        }
    }

    /// Any number of options per line, removals allowed. Used by file lists.
    pub const fn many() -> Self {
        Self {
            can_unselect: true,
            accepts_many: true,
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::single()
    }
}

/// A single option matched by a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem<V> {
    pub id: u32,
    pub action: Action,
    pub kind: QueryKind,
    pub value: V,
}

/// Operations produced from one non-blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionBatch<V> {
    pub items: Vec<ResolvedItem<V>>,
    pub query_count: usize,
}

/// Result of resolving one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<V> {
    /// Nothing was typed. Callers treat this as "go back" or "submit".
    Blank,
    Batch(ResolutionBatch<V>),
}

impl<V> Resolution<V> {
    pub fn query_count(&self) -> usize {
        match self {
            Self::Blank => 1,
            Self::Batch(batch) => batch.query_count,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    pub fn items(&self) -> &[ResolvedItem<V>] {
        match self {
            Self::Blank => &[],
            Self::Batch(batch) => &batch.items,
        }
    }
}

/// Screens of the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Main,
    Directories,
    Files,
    Glob,
    Changed,
    Review,
}

impl Page {
    /// Name used to match the page from the main menu.
    pub fn name(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Directories => "directories",
            Self::Files => "files",
            Self::Glob => "glob",
            Self::Changed => "changed",
            Self::Review => "review",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Main => "What now",
            Self::Directories => "Browse directories",
            Self::Files => "All files",
            Self::Glob => "Search by glob",
            Self::Changed => "Changed files",
            Self::Review => "Review selection",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
