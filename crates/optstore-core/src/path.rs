//! Dot-separated key paths and the walks that read and write them.

use crate::StoreError;
use optstore_persist::Mapping;
use serde_json::Value;

/// Separator between key segments.
pub const SEGMENT_SEPARATOR: char = '.';

/// A borrowed, non-empty dot-separated key such as `"site.theme.color"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPath<'a> {
    key: &'a str,
}

impl<'a> KeyPath<'a> {
    /// Parse a key, rejecting the empty string.
    pub fn parse(key: &'a str) -> Result<Self, StoreError> {
        if key.is_empty() {
            return Err(StoreError::InvalidArgument(
                "key must be a non-empty string".to_string(),
            ));
        }
        Ok(Self { key })
    }

    /// The full key.
    pub fn as_str(&self) -> &'a str {
        self.key
    }

    /// Segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.key.split(SEGMENT_SEPARATOR)
    }

    /// The top-level segment, which also names the defaults file.
    pub fn root(&self) -> &'a str {
        self.key
            .split_once(SEGMENT_SEPARATOR)
            .map_or(self.key, |(root, _)| root)
    }

    /// Whether the key addresses something below the top level.
    pub fn is_nested(&self) -> bool {
        self.key.contains(SEGMENT_SEPARATOR)
    }
}

/// Look a key up in a mapping. Missing keys, nulls, and walks through
/// scalars all resolve to `None`.
pub fn resolve<'m>(map: &'m Mapping, path: &KeyPath<'_>) -> Option<&'m Value> {
    let mut segments = path.segments();
    let mut current = present(map.get(segments.next()?))?;
    for segment in segments {
        current = present(child(current, segment))?;
    }
    Some(current)
}

/// Write `value` at `path`, creating intermediate mappings as needed.
///
/// Fails with `NotTraversable` when an existing non-mapping value sits in the
/// middle of the path. The path is checked before anything is written, so a
/// failed call leaves the mapping untouched.
pub fn set_path(map: &mut Mapping, path: &KeyPath<'_>, value: Value) -> Result<(), StoreError> {
    if !path.is_nested() {
        map.insert(path.as_str().to_string(), value);
        return Ok(());
    }
    let segments: Vec<&str> = path.segments().collect();
    let Some((root, rest)) = segments.split_first() else {
        return Ok(());
    };

    check_walk(map.get(*root), root, rest, path)?;
    let slot = map.entry((*root).to_string()).or_insert(Value::Null);
    assign(slot, rest, value);
    Ok(())
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

fn child<'v>(value: &'v Value, segment: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index)),
        _ => None,
    }
}

/// Verify that `current`, found at `segment`, can be descended into along `rest`.
fn check_walk(
    current: Option<&Value>,
    segment: &str,
    rest: &[&str],
    path: &KeyPath<'_>,
) -> Result<(), StoreError> {
    let Some((next, tail)) = rest.split_first() else {
        return Ok(());
    };
    match present(current) {
        None => Ok(()),
        Some(value @ (Value::Object(_) | Value::Array(_))) => {
            if let Value::Array(items) = value {
                let in_bounds = next
                    .parse::<usize>()
                    .is_ok_and(|index| index < items.len());
                if !in_bounds {
                    return Err(not_traversable(path, segment));
                }
            }
            if tail.is_empty() {
                return Ok(());
            }
            check_walk(child(value, next), next, tail, path)
        }
        Some(_) => Err(not_traversable(path, segment)),
    }
}

/// Write along a walk that `check_walk` accepted.
fn assign(slot: &mut Value, rest: &[&str], value: Value) {
    let Some((next, tail)) = rest.split_first() else {
        *slot = value;
        return;
    };
    if slot.is_null() {
        *slot = Value::Object(Mapping::new());
    }
    let child = match slot {
        Value::Object(map) => Some(map.entry((*next).to_string()).or_insert(Value::Null)),
        Value::Array(items) => next
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get_mut(index)),
        _ => None,
    };
    if let Some(child) = child {
        assign(child, tail, value);
    }
}

fn not_traversable(path: &KeyPath<'_>, segment: &str) -> StoreError {
    StoreError::NotTraversable {
        key: path.as_str().to_string(),
        segment: segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyPath, resolve, set_path};
    use crate::{ErrorKind, StoreError};
    use optstore_persist::Mapping;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn mapping(value: Value) -> Mapping {
        value.as_object().cloned().expect("object")
    }

    fn key(raw: &str) -> KeyPath<'_> {
        KeyPath::parse(raw).expect("key")
    }

    #[test]
    fn empty_key_is_invalid() {
        let err = KeyPath::parse("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn key_path_parts() {
        let path = key("sample.two_level.a");
        assert_eq!(path.root(), "sample");
        assert!(path.is_nested());
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            vec!["sample", "two_level", "a"]
        );
        assert!(!key("sample").is_nested());
        assert_eq!(key("sample").root(), "sample");
    }

    #[test]
    fn resolve_walks_mappings_and_sequences() {
        let map = mapping(json!({
            "foo": { "bar": "Bar", "list": ["x", { "y": "Y" }], "none": null }
        }));
        assert_eq!(resolve(&map, &key("foo.bar")), Some(&json!("Bar")));
        assert_eq!(resolve(&map, &key("foo.list.1.y")), Some(&json!("Y")));
        assert_eq!(resolve(&map, &key("foo.bar.baz")), None);
        assert_eq!(resolve(&map, &key("foo.list.9")), None);
        assert_eq!(resolve(&map, &key("foo.none")), None);
        assert_eq!(resolve(&map, &key("missing")), None);
    }

    #[test]
    fn set_without_separator_replaces_segment() {
        let mut map = mapping(json!({ "foo": { "bar": "Bar" } }));
        set_path(&mut map, &key("foo"), json!("flat")).expect("set");
        assert_eq!(map, mapping(json!({ "foo": "flat" })));
    }

    #[test]
    fn set_creates_intermediate_mappings() {
        let mut map = Mapping::new();
        set_path(&mut map, &key("a.b.c"), json!("v")).expect("set");
        assert_eq!(map, mapping(json!({ "a": { "b": { "c": "v" } } })));
    }

    #[test]
    fn set_replaces_terminal_leaf() {
        let mut map = mapping(json!({ "foo": { "bar": "Bar", "baz": "Baz" } }));
        set_path(&mut map, &key("foo.bar"), json!({ "nested": true })).expect("set");
        assert_eq!(
            map,
            mapping(json!({ "foo": { "bar": { "nested": true }, "baz": "Baz" } }))
        );
    }

    #[test]
    fn set_through_leaf_fails_without_mutation() {
        let mut map = mapping(json!({ "foo": { "bar": "Bar" } }));
        let before = map.clone();
        let err = set_path(&mut map, &key("foo.bar.baz"), json!("X")).unwrap_err();
        match err {
            StoreError::NotTraversable { key, segment } => {
                assert_eq!(key, "foo.bar.baz");
                assert_eq!(segment, "bar");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(map, before);
    }

    #[test]
    fn set_through_top_level_scalar_fails() {
        let mut map = mapping(json!({ "foo": 1 }));
        let err = set_path(&mut map, &key("foo.bar"), json!("X")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Logic);
    }

    #[test]
    fn set_replaces_null_with_mapping() {
        let mut map = mapping(json!({ "foo": null }));
        set_path(&mut map, &key("foo.bar"), json!(1)).expect("set");
        assert_eq!(map, mapping(json!({ "foo": { "bar": 1 } })));
    }

    #[test]
    fn set_indexes_into_sequences() {
        let mut map = mapping(json!({ "list": [{ "a": 1 }, "b"] }));
        set_path(&mut map, &key("list.0.a"), json!(2)).expect("set");
        set_path(&mut map, &key("list.1"), json!("B")).expect("set");
        assert_eq!(map, mapping(json!({ "list": [{ "a": 2 }, "B"] })));

        let err = set_path(&mut map, &key("list.5"), json!("X")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Logic);
    }
}
