//! Component registry
//!
//! Maps `ick-` tag names to component constructors. Entries are added at
//! start-up and only their counters change afterwards.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

use ick_dom::{is_valid_name, AttributeMap};

use crate::{BindError, Component, Composer, RegistryError, RequiredAssets};

/// Reserved prefix of every component tag name
pub const TAG_PREFIX: &str = "ick-";

/// Prefix used by [`Registry::unique_id`] when none is given
const DEFAULT_ID_PREFIX: &str = "ick";

type Factory = dyn Fn(&[(String, String)]) -> Result<Box<dyn Composer>, BindError> + Send + Sync;

/// A registered component
pub struct RegistryEntry {
    name: String,
    type_id: TypeId,
    type_name: &'static str,
    factory: Box<Factory>,
    counter: AtomicUsize,
}

impl RegistryEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rust type of the component
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Number of ids and instances handed out so far
    pub fn count(&self) -> usize {
        self.counter.load(Ordering::Relaxed)
    }

    fn next(&self) -> usize {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Construct a fresh instance and bind `attributes` onto it, in order
    pub fn instantiate(&self, attributes: &[(String, String)]) -> Result<Box<dyn Composer>, BindError> {
        self.next();
        (self.factory)(attributes)
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("count", &self.count())
            .finish()
    }
}

/// Name to constructor table
#[derive(Default)]
pub struct Registry {
    entries: RwLock<HashMap<String, Arc<RegistryEntry>>>,
    /// Counters of prefixes that are not registered names
    counters: Mutex<HashMap<String, usize>>,
    assets: RequiredAssets,
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry behind the convenience functions
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    /// Register component `T` under `name`.
    ///
    /// Registering the same type again under the same name returns the
    /// existing entry.
    pub fn register<T, F>(&self, name: &str, constructor: F) -> Result<Arc<RegistryEntry>, RegistryError>
    where
        T: Component,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let name = name.trim().to_lowercase();
        let Some(rest) = name.strip_prefix(TAG_PREFIX) else {
            return Err(RegistryError::MissingPrefix(name));
        };
        if rest.is_empty() {
            return Err(RegistryError::MissingName(name));
        }
        if !is_valid_name(&name) {
            return Err(RegistryError::InvalidName(name));
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.get(&name) {
            if existing.type_id == TypeId::of::<T>() {
                tracing::debug!("{} already registered", name);
                return Ok(Arc::clone(existing));
            }
            return Err(RegistryError::AlreadyRegistered {
                name,
                existing: existing.type_name,
            });
        }

        let bindings = T::bindings();
        let factory = move |attributes: &[(String, String)]| -> Result<Box<dyn Composer>, BindError> {
            let mut instance = constructor();
            for (attribute, value) in attributes {
                bindings.apply(&mut instance, attribute, value)?;
            }
            Ok(Box::new(instance))
        };
        let entry = Arc::new(RegistryEntry {
            name: name.clone(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            factory: Box::new(factory),
            counter: AtomicUsize::new(0),
        });
        entries.insert(name, Arc::clone(&entry));
        drop(entries);

        T::require_assets(&self.assets);
        tracing::debug!("registered {} as {}", entry.name, entry.type_name);
        Ok(entry)
    }

    /// Resolve a tag name
    pub fn lookup(&self, name: &str) -> Option<Arc<RegistryEntry>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&name.trim().to_lowercase()).cloned()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Next id for `prefix`, as `(n, "{prefix}-{n}")`.
    ///
    /// The prefix is lowercased, an empty one becomes `ick`.
    pub fn unique_id(&self, prefix: &str) -> (usize, String) {
        let mut prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            prefix = DEFAULT_ID_PREFIX.to_string();
        }

        let n = match self.lookup(&prefix) {
            Some(entry) => entry.next(),
            None => {
                let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
                let counter = counters.entry(prefix.clone()).or_insert(0);
                *counter += 1;
                *counter
            }
        };
        let id = format!("{prefix}-{n}");
        (n, id)
    }

    /// Give `attrs` a fresh `{prefix}-{n}` id, returns the id
    pub fn set_unique_id(&self, attrs: &mut AttributeMap, prefix: &str) -> String {
        let (_, id) = self.unique_id(prefix);
        attrs.set_id(&id);
        id
    }

    /// Assets required by registered components
    pub fn assets(&self) -> &RequiredAssets {
        &self.assets
    }

    /// Forget every entry, counter and asset. For test isolation.
    pub fn reset(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
        self.counters.lock().unwrap_or_else(PoisonError::into_inner).clear();
        self.assets.clear();
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names())
            .finish()
    }
}
