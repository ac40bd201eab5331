//! Form serialization
//!
//! Turns an urlencoded body into a record. Plain keys map to strings;
//! `name[index][field]` keys build an array of records:
//!
//! `a=1&b[0][x]=foo&b[1][x]=bar` -> `{"a": "1", "b": [{"x": "foo"}, {"x": "bar"}]}`

use crate::value::Record;
use fieldbind_dom::url::decode_pair;
use fieldbind_dom::{DomTree, NodeId};
use serde_json::Value;
use tracing::debug;

/// Largest array index accepted in a field name
pub const MAX_ARRAY_INDEX: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("unsupported array field `{0}`: nesting deeper than name[index][field]")]
    UnsupportedArrayKey(String),

    #[error("malformed array field `{0}`: expected name[index][field]")]
    MalformedArrayKey(String),

    #[error("invalid index in array field `{0}`")]
    InvalidIndex(String),

    #[error("field `{0}` is used both as a value and as an array")]
    ShapeConflict(String),
}

/// `name[index][field]`, split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayKey<'a> {
    pub name: &'a str,
    pub index: usize,
    pub field: &'a str,
}

/// Split a bracketed key; `Ok(None)` for a plain key
pub fn parse_array_key(key: &str) -> Result<Option<ArrayKey<'_>>, FormError> {
    let Some(open) = key.find('[') else {
        return Ok(None);
    };
    let name = &key[..open];
    let malformed = || FormError::MalformedArrayKey(key.to_string());
    if name.is_empty() {
        return Err(malformed());
    }

    let mut groups = Vec::new();
    let mut rest = &key[open..];
    while let Some(inner) = rest.strip_prefix('[') {
        let close = inner.find(']').ok_or_else(malformed)?;
        groups.push(&inner[..close]);
        rest = &inner[close + 1..];
    }
    if !rest.is_empty() {
        return Err(malformed());
    }
    if groups.len() > 2 {
        return Err(FormError::UnsupportedArrayKey(key.to_string()));
    }
    let [index, field] = groups.as_slice() else {
        return Err(malformed());
    };

    let index = index
        .parse::<usize>()
        .ok()
        .filter(|&i| i <= MAX_ARRAY_INDEX)
        .ok_or_else(|| FormError::InvalidIndex(key.to_string()))?;
    Ok(Some(ArrayKey { name, index, field }))
}

/// Parse an urlencoded body into a record
///
/// Pairs that do not decode to exactly `key=value`, and bracket keys that
/// are not `name[index][field]`, are skipped. Nesting deeper than two
/// levels is an error.
pub fn parse_form_body(body: &str) -> Result<Record, FormError> {
    let mut data = Record::new();

    for fragment in body.split('&').filter(|f| !f.is_empty()) {
        let Some((key, value)) = decode_pair(fragment) else {
            debug!("dropping malformed form pair {:?}", fragment);
            continue;
        };
        let value = value.trim().to_string();

        match parse_array_key(&key) {
            Ok(Some(array_key)) => insert_array_field(&mut data, &key, array_key, value)?,
            Ok(None) => {
                if data.get(&key).is_some_and(Value::is_array) {
                    return Err(FormError::ShapeConflict(key.clone()));
                }
                data.insert(key.clone(), Value::String(value));
            }
            Err(err @ FormError::UnsupportedArrayKey(_)) => return Err(err),
            Err(err) => debug!("dropping form pair: {}", err),
        }
    }

    Ok(data)
}

fn insert_array_field(
    data: &mut Record,
    key: &str,
    array_key: ArrayKey<'_>,
    value: String,
) -> Result<(), FormError> {
    let conflict = || FormError::ShapeConflict(array_key.name.to_string());

    let slots = data
        .entry(array_key.name)
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(conflict)?;
    if slots.len() <= array_key.index {
        slots.resize(array_key.index + 1, Value::Null);
    }

    let slot = &mut slots[array_key.index];
    if slot.is_null() {
        *slot = Value::Object(Record::new());
    }
    let record = slot.as_object_mut().ok_or_else(conflict)?;
    record.insert(array_key.field.to_string(), Value::String(value));
    tracing::trace!("form field {} -> {}[{}]", key, array_key.name, array_key.index);
    Ok(())
}

/// Serialize the successful controls of `form` into a record
pub fn serialize_form(tree: &DomTree, form: NodeId) -> Result<Record, FormError> {
    parse_form_body(&tree.encode_form(form))
}
