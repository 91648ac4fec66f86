//! Catalog of named recurrences
//!
//! Recurrences register themselves as [`RecurrencePlugin`]s through
//! `inventory::submit!`; a [`CatalogBuilder`] collects them into an immutable
//! [`Catalog`] used for lookup by name.
//!
//! All catalog sequences use [`Term`] (`u128`) elements. Each plugin declares
//! `limit`, the largest index whose value still fits in a `u128`.
//!
//! # Example
//!
//! ```
//! use autoseq::catalog::CatalogBuilder;
//!
//! let catalog = CatalogBuilder::new().register_all_plugins().unwrap().build();
//!
//! let pell = catalog.create("pell").unwrap();
//! assert_eq!(&*pell.slice(0, 6), &[0, 1, 2, 5, 12, 29]);
//!
//! assert!(catalog.create_checked("factorial", 35).is_err());
//! ```

mod builtin;

use std::collections::BTreeMap;

use crate::error::CatalogError;
use crate::seq::AutoSeq;

/// Element type of catalog sequences
pub type Term = u128;

/// Plugin information for automatic recurrence registration
///
/// # Example
///
/// ```
/// use autoseq::AutoSeq;
/// use autoseq::catalog::{CatalogBuilder, RecurrencePlugin, Term};
///
/// fn evens() -> AutoSeq<'static, Term> {
///     AutoSeq::from_raw(|n, _| 2 * n as Term, [])
/// }
///
/// autoseq::inventory::submit! {
///     RecurrencePlugin {
///         name: "evens",
///         description: "Even numbers, a(n) = 2n",
///         limit: u32::MAX as usize,
///         tags: &["polynomial"],
///         build: evens,
///     }
/// }
///
/// let catalog = CatalogBuilder::new()
///     .register_plugins(|plugin| plugin.name == "evens")
///     .unwrap()
///     .build();
/// assert_eq!(catalog.create("evens").unwrap().get(21), 42);
/// ```
#[derive(Debug)]
pub struct RecurrencePlugin {
    /// Unique lookup name (kebab-case)
    pub name: &'static str,
    /// One-line description, shown by listings
    pub description: &'static str,
    /// Largest index representable as a [`Term`]
    pub limit: usize,
    /// Tags for filtering (e.g. "classic", "linear", "convolution")
    pub tags: &'static [&'static str],
    /// Builds a fresh sequence with an empty (seeded) cache
    pub build: fn() -> AutoSeq<'static, Term>,
}

impl RecurrencePlugin {
    /// Builds a fresh sequence
    pub fn create(&self) -> AutoSeq<'static, Term> {
        (self.build)()
    }

    /// Checks that `index` does not exceed [`limit`](Self::limit)
    pub fn check_index(&self, index: usize) -> Result<(), CatalogError> {
        if index > self.limit {
            return Err(CatalogError::LimitExceeded {
                name: self.name,
                requested: index,
                limit: self.limit,
            });
        }
        Ok(())
    }

    /// Whether the plugin carries every tag in `tags`
    pub fn has_tags<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().all(|tag| self.tags.contains(&tag.as_ref()))
    }
}

// Enable plugin collection via inventory
inventory::collect!(RecurrencePlugin);

/// Builder for constructing a [`Catalog`]
///
/// Rejects duplicate names at registration time.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: BTreeMap<&'static str, &'static RecurrencePlugin>,
}

impl CatalogBuilder {
    /// Create a new empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single plugin
    ///
    /// # Errors
    ///
    /// [`CatalogError::Duplicate`] if a plugin with the same name is already registered.
    pub fn register(mut self, plugin: &'static RecurrencePlugin) -> Result<Self, CatalogError> {
        if self.entries.contains_key(plugin.name) {
            return Err(CatalogError::Duplicate(plugin.name));
        }
        self.entries.insert(plugin.name, plugin);
        Ok(self)
    }

    /// Register every plugin submitted via `inventory::submit!`
    pub fn register_all_plugins(self) -> Result<Self, CatalogError> {
        self.register_plugins(|_| true)
    }

    /// Register the submitted plugins for which `filter` returns `true`
    pub fn register_plugins<F>(mut self, filter: F) -> Result<Self, CatalogError>
    where
        F: Fn(&RecurrencePlugin) -> bool,
    {
        for plugin in inventory::iter::<RecurrencePlugin>() {
            if filter(plugin) {
                self = self.register(plugin)?;
            }
        }
        Ok(self)
    }

    /// Finalize the builder
    pub fn build(self) -> Catalog {
        Catalog {
            entries: self.entries,
        }
    }
}

/// Immutable name → recurrence lookup, iterated in name order
#[derive(Debug)]
pub struct Catalog {
    entries: BTreeMap<&'static str, &'static RecurrencePlugin>,
}

impl Catalog {
    /// Look up a plugin by name
    pub fn get(&self, name: &str) -> Option<&'static RecurrencePlugin> {
        self.entries.get(name).copied()
    }

    /// Build a fresh sequence for `name`
    pub fn create(&self, name: &str) -> Result<AutoSeq<'static, Term>, CatalogError> {
        self.get(name)
            .map(RecurrencePlugin::create)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// Build a fresh sequence for `name`, checking that `last_index` is within its limit
    pub fn create_checked(
        &self,
        name: &str,
        last_index: usize,
    ) -> Result<AutoSeq<'static, Term>, CatalogError> {
        let plugin = self
            .get(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;
        plugin.check_index(last_index)?;
        Ok(plugin.create())
    }

    /// All registered plugins in name order
    pub fn iter(&self) -> impl Iterator<Item = &'static RecurrencePlugin> + '_ {
        self.entries.values().copied()
    }

    /// Number of registered plugins
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no plugin is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ones() -> AutoSeq<'static, Term> {
        AutoSeq::from_raw(|_, _| 1, [])
    }

    static ONES: RecurrencePlugin = RecurrencePlugin {
        name: "ones",
        description: "All ones",
        limit: 10,
        tags: &["constant"],
        build: ones,
    };

    static ONES_AGAIN: RecurrencePlugin = RecurrencePlugin {
        name: "ones",
        description: "All ones, registered twice",
        limit: 10,
        tags: &[],
        build: ones,
    };

    #[test]
    fn test_register_and_lookup() {
        let catalog = CatalogBuilder::new().register(&ONES).unwrap().build();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("ones").is_some());
        assert!(catalog.get("twos").is_none());
        assert_eq!(catalog.create("ones").unwrap().get(3), 1);
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = CatalogBuilder::new()
            .register(&ONES)
            .unwrap()
            .register(&ONES_AGAIN);
        assert!(matches!(result, Err(CatalogError::Duplicate("ones"))));
    }

    #[test]
    fn test_not_found() {
        let catalog = CatalogBuilder::new().build();
        assert!(catalog.is_empty());
        assert_eq!(
            catalog.create("ones").unwrap_err(),
            CatalogError::NotFound("ones".to_string())
        );
    }

    #[test]
    fn test_limit_checked() {
        let catalog = CatalogBuilder::new().register(&ONES).unwrap().build();
        assert!(catalog.create_checked("ones", 10).is_ok());
        assert_eq!(
            catalog.create_checked("ones", 11).unwrap_err(),
            CatalogError::LimitExceeded {
                name: "ones",
                requested: 11,
                limit: 10
            }
        );
    }

    #[test]
    fn test_tag_matching() {
        assert!(ONES.has_tags(&["constant"]));
        assert!(ONES.has_tags::<&str>(&[]));
        assert!(!ONES.has_tags(&["constant", "linear"]));
    }

    #[test]
    fn test_builtins_are_collected() {
        let catalog = CatalogBuilder::new().register_all_plugins().unwrap().build();
        for name in ["fibonacci", "lucas", "catalan", "fibonacci-sum", "triangular"] {
            assert!(catalog.get(name).is_some(), "missing {}", name);
        }
        let names: Vec<_> = catalog.iter().map(|p| p.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
