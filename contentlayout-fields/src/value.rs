//! Single-vs-sequence normalization and typed field views.
//!
//! Multi-value content fields arrive as JSON arrays, single-value fields as a
//! bare value. [`OneOrMany`] models that duality as one tagged variant and
//! normalizes it immediately: every transform iterates [`OneOrMany::iter_mut`]
//! and never branches on arity. Writing the value back preserves the original
//! shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FieldsError, Result};
use crate::types::DIGITAL_ASSET_TYPE_CATEGORY;

/// A field value that is either a single entry or an ordered sequence.
///
/// Serializes transparently: `One` as the bare value, `Many` as an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Normalized view: a single entry is a one-element slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::One(v) => std::slice::from_ref(v),
            OneOrMany::Many(v) => v.as_slice(),
        }
    }

    /// Mutable normalized view.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            OneOrMany::One(v) => std::slice::from_mut(v),
            OneOrMany::Many(v) => v.as_mut_slice(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl<'a, T> IntoIterator for &'a OneOrMany<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut OneOrMany<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Read a typed view of a declared field.
///
/// Absent or null fields yield `Ok(None)` and are skipped by every transform.
/// Multi-value fields may carry null elements; use `Option<T>` as the entry
/// type to view them sparsely — null slots deserialize to `None` and
/// serialize back to null, so [`set_entries`] preserves them. A present
/// value that does not match the expected entry shape is a
/// [`FieldsError::MalformedField`]; the raw field is left untouched.
pub fn get_entries<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    name: &str,
) -> Result<Option<OneOrMany<T>>> {
    let Some(raw) = fields.get(name) else {
        return Ok(None);
    };
    if raw.is_null() {
        return Ok(None);
    }
    serde_json::from_value(raw.clone())
        .map(Some)
        .map_err(|source| FieldsError::MalformedField {
            field: name.to_string(),
            source,
        })
}

/// Write a typed view back onto the field map, preserving the single-vs-array
/// shape the caller supplied.
pub fn set_entries<T: Serialize>(
    fields: &mut Map<String, Value>,
    name: &str,
    entries: &OneOrMany<T>,
) -> Result<()> {
    fields.insert(name.to_string(), serde_json::to_value(entries)?);
    Ok(())
}

/// Discover the digital-asset field names of a field map by its category
/// tags: object values carrying `typeCategory == "DigitalAssetType"`.
///
/// Used on fetched referenced items, whose declared field lists are unknown
/// to the caller.
pub fn digital_asset_field_names(fields: &Map<String, Value>) -> Vec<String> {
    fields
        .iter()
        .filter(|(_, value)| {
            value
                .as_object()
                .and_then(|o| o.get("typeCategory"))
                .and_then(Value::as_str)
                == Some(DIGITAL_ASSET_TYPE_CATEGORY)
        })
        .map(|(name, _)| name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReferenceEntry;
    use serde_json::json;

    #[test]
    fn one_or_many_normalizes_single() {
        let one: OneOrMany<String> = serde_json::from_value(json!("hello")).unwrap();
        assert_eq!(one.as_slice(), ["hello".to_string()]);
        assert_eq!(serde_json::to_value(&one).unwrap(), json!("hello"));
    }

    #[test]
    fn one_or_many_normalizes_sequence() {
        let many: OneOrMany<String> = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(serde_json::to_value(&many).unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn iter_mut_covers_both_shapes() {
        let mut one: OneOrMany<i64> = OneOrMany::One(1);
        for v in one.iter_mut() {
            *v += 10;
        }
        assert_eq!(one, OneOrMany::One(11));

        let mut many: OneOrMany<i64> = OneOrMany::Many(vec![1, 2]);
        for v in &mut many {
            *v += 10;
        }
        assert_eq!(many, OneOrMany::Many(vec![11, 12]));
    }

    #[test]
    fn get_entries_skips_absent_and_null() {
        let mut fields = Map::new();
        fields.insert("gone".into(), Value::Null);
        assert!(get_entries::<ReferenceEntry>(&fields, "missing")
            .unwrap()
            .is_none());
        assert!(get_entries::<ReferenceEntry>(&fields, "gone")
            .unwrap()
            .is_none());
    }

    #[test]
    fn get_entries_rejects_wrong_shape() {
        let mut fields = Map::new();
        fields.insert("authors".into(), json!(42));
        let err = get_entries::<ReferenceEntry>(&fields, "authors").unwrap_err();
        assert!(matches!(err, FieldsError::MalformedField { ref field, .. } if field == "authors"));
    }

    #[test]
    fn null_sequence_elements_view_sparsely() {
        let mut fields = Map::new();
        fields.insert("authors".into(), json!([{ "id": "A1" }, null]));

        let view = get_entries::<Option<ReferenceEntry>>(&fields, "authors")
            .unwrap()
            .unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view.as_slice()[0].as_ref().unwrap().id, "A1");
        assert!(view.as_slice()[1].is_none());

        // The null slot survives the write-back.
        set_entries(&mut fields, "authors", &view).unwrap();
        assert_eq!(fields["authors"][1], Value::Null);
    }

    #[test]
    fn set_entries_preserves_shape() {
        let mut fields = Map::new();
        fields.insert("author".into(), json!({ "id": "A1" }));
        let mut view = get_entries::<ReferenceEntry>(&fields, "author")
            .unwrap()
            .unwrap();
        for entry in view.iter_mut() {
            entry.reference_inaccessible = Some("denied".into());
        }
        set_entries(&mut fields, "author", &view).unwrap();
        // Single stays single, not a one-element array.
        assert!(fields["author"].is_object());
        assert_eq!(fields["author"]["referenceInaccessible"], "denied");
    }

    #[test]
    fn digital_asset_discovery_by_category_tag() {
        let mut fields = Map::new();
        fields.insert(
            "hero_image".into(),
            json!({ "id": "D1", "typeCategory": "DigitalAssetType" }),
        );
        fields.insert("title".into(), json!("plain text"));
        fields.insert(
            "author".into(),
            json!({ "id": "A1", "typeCategory": "ContentType" }),
        );
        // Arrays carry no category tag of their own and are not discovered.
        fields.insert(
            "gallery".into(),
            json!([{ "id": "D2", "typeCategory": "DigitalAssetType" }]),
        );
        assert_eq!(digital_asset_field_names(&fields), vec!["hero_image"]);
    }
}
