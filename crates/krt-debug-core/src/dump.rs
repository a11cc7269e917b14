//! Serializable snapshot types produced by the registry and consumed by the
//! graph renderer.
//!
//! The JSON shape is the wire contract: every optional field is omitted when
//! empty, and on the way back in an absent field, an explicit `null` and an
//! empty container all mean the same thing.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use krt_debug_error::{Error, Result};

/// Decode `null` as the type's default, so producers that emit `null` for
/// empty containers are accepted.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Snapshot of one collection at dump time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDump {
    /// Output key -> opaque output value
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub outputs: BTreeMap<String, Value>,
    /// Name of the upstream collection; empty for root collections
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "String::is_empty"
    )]
    pub input_collection: String,
    /// Input key -> what that input produced and read
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub inputs: BTreeMap<String, InputDump>,
}

impl CollectionDump {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary (whole-collection) dependency.
    pub fn with_input_collection(mut self, name: impl Into<String>) -> Self {
        self.input_collection = name.into();
        self
    }

    pub fn with_output(mut self, key: impl Into<String>, value: Value) -> Self {
        self.outputs.insert(key.into(), value);
        self
    }

    pub fn with_input(mut self, key: impl Into<String>, input: InputDump) -> Self {
        self.inputs.insert(key.into(), input);
        self
    }

    /// True when the collection has a primary dependency and therefore
    /// takes part in graph construction.
    pub fn has_input_collection(&self) -> bool {
        !self.input_collection.is_empty()
    }

    /// True when every field is empty, i.e. it serializes as `{}`.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty() && self.input_collection.is_empty() && self.inputs.is_empty()
    }
}

/// For one input item: the output keys it produced and the collections it
/// read while being computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDump {
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub outputs: Vec<String>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub dependencies: Vec<String>,
}

impl InputDump {
    pub fn new<O, D>(outputs: O, dependencies: D) -> Self
    where
        O: IntoIterator,
        O::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            outputs: outputs.into_iter().map(Into::into).collect(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        }
    }
}

/// A collection dump tagged with the collection's registered name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedState {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub state: CollectionDump,
}

impl NamedState {
    pub fn new(name: impl Into<String>, state: CollectionDump) -> Self {
        Self {
            name: name.into(),
            state,
        }
    }
}

/// Every registered collection's snapshot, in registration order.
///
/// Serializes as a bare JSON array. A top-level `null` decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DumpedState(Vec<NamedState>);

impl<'de> Deserialize<'de> for DumpedState {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        nullable(deserializer).map(DumpedState)
    }
}

impl DumpedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NamedState> {
        self.0.iter()
    }

    pub fn push(&mut self, state: NamedState) {
        self.0.push(state);
    }

    /// Collection names in order, duplicates included.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn as_slice(&self) -> &[NamedState] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<NamedState> {
        self.0
    }

    /// Decode a dumped state from JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|err| {
            Error::deserialization_failed(err.to_string())
                .with_operation("dump::from_json")
                .set_source(err)
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| {
            Error::serialization_failed(err.to_string())
                .with_operation("dump::to_json")
                .set_source(err)
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            Error::serialization_failed(err.to_string())
                .with_operation("dump::to_json_pretty")
                .set_source(err)
        })
    }
}

impl From<Vec<NamedState>> for DumpedState {
    fn from(states: Vec<NamedState>) -> Self {
        Self(states)
    }
}

impl FromIterator<NamedState> for DumpedState {
    fn from_iter<I: IntoIterator<Item = NamedState>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for DumpedState {
    type Item = NamedState;
    type IntoIter = std::vec::IntoIter<NamedState>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DumpedState {
    type Item = &'a NamedState;
    type IntoIter = std::slice::Iter<'a, NamedState>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
