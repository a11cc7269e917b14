use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use krt_debug_error::{Error, Result};

use crate::collection::DebugCollection;
use crate::dump::{CollectionDump, DumpedState, NamedState};

/// Zero-argument snapshot function supplied by a collection at registration.
pub type SnapshotFn = Arc<dyn Fn() -> CollectionDump + Send + Sync>;

static GLOBAL_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// One registration: a name and the function that snapshots the collection.
///
/// Never mutated after creation.
#[derive(Clone)]
pub struct RegisteredCollection {
    name: String,
    snapshot: SnapshotFn,
}

impl RegisteredCollection {
    pub fn new(name: impl Into<String>, snapshot: SnapshotFn) -> Self {
        Self {
            name: name.into(),
            snapshot,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the collection's snapshot function.
    pub fn snapshot(&self) -> CollectionDump {
        (self.snapshot)()
    }

    pub fn to_named_state(&self) -> NamedState {
        NamedState::new(self.name.clone(), self.snapshot())
    }
}

impl fmt::Debug for RegisteredCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredCollection")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Serialize for RegisteredCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NamedState", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("state", &self.snapshot())?;
        state.end()
    }
}

/// Append-only, thread-safe list of registered collections.
///
/// Collections register themselves while they are being constructed, possibly
/// from many threads at once. The registry can be dumped at any time.
#[derive(Default)]
pub struct Registry {
    collections: RwLock<Vec<RegisteredCollection>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry for hosts that do not pass one explicitly.
    pub fn global() -> &'static Registry {
        &GLOBAL_REGISTRY
    }

    /// Append a collection. Duplicate names are kept.
    pub fn register<F>(&self, name: impl Into<String>, snapshot: F)
    where
        F: Fn() -> CollectionDump + Send + Sync + 'static,
    {
        let entry = RegisteredCollection::new(name, Arc::new(snapshot));
        tracing::trace!(name = entry.name(), "registering collection");
        self.collections.write().push(entry);
    }

    /// Register a collection through its [`DebugCollection`] capability.
    pub fn register_collection<C>(&self, collection: Arc<C>)
    where
        C: DebugCollection + 'static,
    {
        let name = collection.name();
        self.register(name, move || collection.dump());
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.collections.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.collections
            .read()
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    /// Snapshot every registered collection, in registration order.
    ///
    /// The lock is held only while copying the list; each snapshot function
    /// then runs unlocked, so a slow collection never blocks registration.
    pub fn dump(&self) -> DumpedState {
        let entries = self.collections.read().clone();
        let state: DumpedState = entries.iter().map(|c| c.to_named_state()).collect();
        tracing::debug!(collections = state.len(), "dumped registry");
        state
    }

    /// Serialize the live registry to the wire format.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| {
            Error::serialization_failed(err.to_string())
                .with_operation("registry::to_json")
                .set_source(err)
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            Error::serialization_failed(err.to_string())
                .with_operation("registry::to_json_pretty")
                .set_source(err)
        })
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("collections", &*self.collections.read())
            .finish()
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let collections = self.collections.read().clone();
        serializer.collect_seq(collections.iter())
    }
}

/// Register `collection` if a registry is configured; otherwise do nothing.
pub fn maybe_register<C>(registry: Option<&Registry>, collection: Arc<C>)
where
    C: DebugCollection + 'static,
{
    if let Some(registry) = registry {
        registry.register_collection(collection);
    }
}
