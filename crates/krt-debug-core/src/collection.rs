use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::dump::CollectionDump;

/// The only thing the registry needs from a collection: a name and a way to
/// snapshot its current state.
///
/// Implementations must make `dump` safe to call concurrently with the
/// collection's own processing, and must return a self-consistent snapshot
/// without blocking indefinitely.
pub trait DebugCollection: Send + Sync {
    fn name(&self) -> String;

    fn dump(&self) -> CollectionDump;
}

/// Convert typed, keyed outputs into the opaque output map of a
/// [`CollectionDump`].
///
/// A value that cannot be represented as JSON is recorded as `null` so that a
/// snapshot never fails.
pub fn erase_outputs<K, V, I>(outputs: I) -> BTreeMap<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Serialize,
{
    outputs
        .into_iter()
        .map(|(key, value)| {
            let key = key.as_ref().to_string();
            let value = serde_json::to_value(value).unwrap_or_else(|err| {
                tracing::warn!(key = %key, error = %err, "output is not serializable");
                Value::Null
            });
            (key, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serializer;
    use serde_json::json;

    #[derive(Serialize)]
    struct Port {
        name: &'static str,
        number: u16,
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    #[test]
    fn erase_outputs_keeps_keys_and_values() {
        let erased = erase_outputs(vec![
            ("default/http", Port { name: "http", number: 80 }),
            ("default/https", Port { name: "https", number: 443 }),
        ]);

        assert_eq!(erased.len(), 2);
        assert_eq!(erased["default/http"], json!({"name": "http", "number": 80}));
        assert_eq!(erased["default/https"]["number"], json!(443));
    }

    #[test]
    fn erase_outputs_replaces_failures_with_null() {
        let erased = erase_outputs([("bad", Unserializable)]);
        assert_eq!(erased["bad"], Value::Null);
    }

    #[test]
    fn erase_outputs_accepts_owned_keys() {
        let outputs: BTreeMap<String, u32> = [("b".to_string(), 2), ("a".to_string(), 1)].into();
        let erased = erase_outputs(outputs);
        assert_eq!(erased.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
