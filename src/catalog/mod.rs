use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

mod data;
pub mod filter;

pub use filter::{visible, FilterMode};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Category {
    Common,
    Unique,
}

impl Category {
    pub fn tag(self) -> char {
        match self {
            Category::Common => 'c',
            Category::Unique => 'u',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        Category::iter().find(|category| category.tag() == tag)
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Common => "Common Questions (Both Papers & Units)",
            Category::Unique => "Unique Questions (Only Units)",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            Category::Common => "Both",
            Category::Unique => "Units",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Common => "📚",
            Category::Unique => "⭐",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Category::Common => Category::Unique,
            Category::Unique => Category::Common,
        }
    }
}

/// Category tag plus zero-based position, e.g. `c0` or `u5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId {
    pub category: Category,
    pub index: usize,
}

impl ItemId {
    pub const fn new(category: Category, index: usize) -> Self {
        Self { category, index }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.category.tag(), self.index)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemIdError {
    #[error("item identifier cannot be empty")]
    Empty,
    #[error("unknown category tag '{0}' (expected 'c' or 'u')")]
    UnknownTag(char),
    #[error("invalid item index in '{0}'")]
    InvalidIndex(String),
}

impl FromStr for ItemId {
    type Err = ItemIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let mut chars = trimmed.chars();
        let tag = chars.next().ok_or(ItemIdError::Empty)?;
        let category =
            Category::from_tag(tag.to_ascii_lowercase()).ok_or(ItemIdError::UnknownTag(tag))?;
        let digits = chars.as_str();
        // Canonical decimal only: "c0" parses, "c00" and "c007" do not.
        let non_canonical = digits.len() > 1 && digits.starts_with('0');
        if digits.is_empty() || non_canonical || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ItemIdError::InvalidIndex(trimmed.to_string()));
        }
        let index = digits
            .parse::<usize>()
            .map_err(|_| ItemIdError::InvalidIndex(trimmed.to_string()))?;
        Ok(ItemId::new(category, index))
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("reading catalog {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing catalog toml")]
    Parse(#[from] toml::de::Error),
    #[error("catalog section '{0}' has no questions")]
    EmptySection(Category),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    common: Vec<String>,
    unique: Vec<String>,
}

/// The two fixed question lists. Position in a list is display order and
/// the source of every [`ItemId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    common: Vec<String>,
    unique: Vec<String>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            common: data::COMMON_QUESTIONS.iter().map(|q| q.to_string()).collect(),
            unique: data::UNIQUE_QUESTIONS.iter().map(|q| q.to_string()).collect(),
        }
    }

    /// Both lists must be non-empty so that `total()` is never zero.
    pub fn new(common: Vec<String>, unique: Vec<String>) -> Result<Self, CatalogError> {
        if common.is_empty() {
            return Err(CatalogError::EmptySection(Category::Common));
        }
        if unique.is_empty() {
            return Err(CatalogError::EmptySection(Category::Unique));
        }
        Ok(Self { common, unique })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::new(file.common, file.unique)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            common = catalog.common.len(),
            unique = catalog.unique.len(),
            "loaded custom catalog"
        );
        Ok(catalog)
    }

    pub fn entries(&self, category: Category) -> &[String] {
        match category {
            Category::Common => &self.common,
            Category::Unique => &self.unique,
        }
    }

    pub fn len(&self, category: Category) -> usize {
        self.entries(category).len()
    }

    pub fn total(&self) -> usize {
        self.common.len() + self.unique.len()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        id.index < self.len(id.category)
    }

    pub fn text(&self, id: ItemId) -> Option<&str> {
        self.entries(id.category).get(id.index).map(String::as_str)
    }

    pub fn ids_in(&self, category: Category) -> impl Iterator<Item = ItemId> + '_ {
        (0..self.len(category)).map(move |index| ItemId::new(category, index))
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        Category::iter().flat_map(move |category| self.ids_in(category))
    }

    pub fn items(&self, category: Category) -> impl Iterator<Item = (ItemId, &str)> + '_ {
        self.entries(category)
            .iter()
            .enumerate()
            .map(move |(index, text)| (ItemId::new(category, index), text.as_str()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
