//! Category and power registry.
//!
//! A category is a named set of candidate symbols plus exactly one power.
//! Categories are static configuration: loaded once, validated at load, and
//! immutable for the process lifetime. Both players may pick the same one.
//!
//! `CategoryRegistry::standard()` carries the built-in set (Animals, Food,
//! Sports, Nature); custom sets go through `CategoryRegistry::from_defs`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// An emoji glyph drawn onto the board.
///
/// Stored as a string because emoji are frequently multi-codepoint
/// (variation selectors, modifiers).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol from a glyph.
    #[must_use]
    pub fn new(glyph: impl Into<String>) -> Self {
        Self(glyph.into())
    }

    /// The glyph text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The one-time special power a category grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerKind {
    /// Place two tokens in a row without the turn changing.
    DoubleDrop,
    /// Exchange the positions of two of your own tokens.
    Swap,
    /// Make one empty cell unplaceable for the next two turns.
    Block,
}

impl std::fmt::Display for PowerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowerKind::DoubleDrop => write!(f, "Double Drop"),
            PowerKind::Swap => write!(f, "Swap"),
            PowerKind::Block => write!(f, "Block"),
        }
    }
}

/// A category definition: name, candidate symbols, and the mapped power.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    /// Display name, also the lookup key.
    pub name: String,
    /// Candidate symbols drawn uniformly at random on placement.
    pub symbols: Vec<Symbol>,
    /// The power this category grants, once per round.
    pub power: PowerKind,
}

impl CategoryDef {
    /// Create a category definition.
    pub fn new(
        name: impl Into<String>,
        symbols: impl IntoIterator<Item = impl Into<String>>,
        power: PowerKind,
    ) -> Self {
        Self {
            name: name.into(),
            symbols: symbols.into_iter().map(Symbol::new).collect(),
            power,
        }
    }
}

/// Configuration errors surfaced at registry load time.
///
/// These are the only fatal-class errors in the engine; everything at play
/// time is a recoverable rejection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Two categories share a name.
    DuplicateCategory(String),
    /// A category has no symbols to draw from.
    EmptySymbolSet(String),
    /// No categories were provided at all.
    NoCategories,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::DuplicateCategory(name) => {
                write!(f, "category {name:?} registered twice")
            }
            ConfigError::EmptySymbolSet(name) => {
                write!(f, "category {name:?} has an empty symbol set")
            }
            ConfigError::NoCategories => write!(f, "no categories configured"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Registry of category definitions with lookup by name.
#[derive(Clone, Debug)]
pub struct CategoryRegistry {
    categories: FxHashMap<String, CategoryDef>,
    /// Names in registration order, for stable presentation listings.
    order: Vec<String>,
}

impl CategoryRegistry {
    /// Build a registry from definitions, validating the configuration.
    pub fn from_defs(defs: impl IntoIterator<Item = CategoryDef>) -> Result<Self, ConfigError> {
        let mut categories = FxHashMap::default();
        let mut order = Vec::new();

        for def in defs {
            if def.symbols.is_empty() {
                return Err(ConfigError::EmptySymbolSet(def.name));
            }
            if categories.contains_key(&def.name) {
                return Err(ConfigError::DuplicateCategory(def.name));
            }
            order.push(def.name.clone());
            categories.insert(def.name.clone(), def);
        }

        if categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }

        Ok(Self { categories, order })
    }

    /// The built-in category set.
    ///
    /// Infallible: the built-in data is validated by test.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_defs([
            CategoryDef::new(
                "Animals",
                ["🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼"],
                PowerKind::DoubleDrop,
            ),
            CategoryDef::new(
                "Food",
                ["🍎", "🍕", "🍔", "🍣", "🍦", "🍩", "🍪", "🍓"],
                PowerKind::Swap,
            ),
            CategoryDef::new(
                "Sports",
                ["⚽", "🏀", "🏈", "⚾", "🎾", "🏐", "🎱", "🎳"],
                PowerKind::Block,
            ),
            CategoryDef::new(
                "Nature",
                ["🌳", "🌸", "☀️", "🌈", "🌊", "🍂", "🌧️", "⚡"],
                PowerKind::DoubleDrop,
            ),
        ])
        .expect("built-in categories are valid")
    }

    /// Get a category definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CategoryDef> {
        self.categories.get(name)
    }

    /// Check if a category name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.categories.contains_key(name)
    }

    /// Number of registered categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the registry is empty. Always false for a built registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterate definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryDef> {
        self.order.iter().filter_map(|name| self.categories.get(name))
    }

    /// Category names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
