use mongodb::bson::{Bson, Document};

use super::StoreError;

/// Evaluate a query filter against a document the way the server would for
/// the supported subset: every top-level key must match, either by equality
/// or by membership in an `$in` list.
pub(crate) fn matches(document: &Document, filter: &Document) -> Result<bool, StoreError> {
    for (key, expected) in filter {
        if key.starts_with('$') {
            return Err(StoreError::UnsupportedFilter(format!(
                "top-level operator {key}"
            )));
        }

        let actual = document.get(key);
        let hit = match expected {
            Bson::Document(ops) if is_operator_document(ops) => eval_operators(actual, ops)?,
            value => actual == Some(value),
        };

        if !hit {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Apply `$set` semantics. Returns whether anything changed.
pub(crate) fn apply_set(document: &mut Document, set: &Document) -> bool {
    let mut modified = false;
    for (key, value) in set {
        if document.get(key) != Some(value) {
            document.insert(key.clone(), value.clone());
            modified = true;
        }
    }
    modified
}

pub(crate) fn is_operator_document(doc: &Document) -> bool {
    doc.keys().next().is_some_and(|k| k.starts_with('$'))
}

fn eval_operators(actual: Option<&Bson>, ops: &Document) -> Result<bool, StoreError> {
    for (op, arg) in ops {
        let hit = match op.as_str() {
            "$in" => {
                let candidates = arg.as_array().ok_or_else(|| {
                    StoreError::UnsupportedFilter("$in expects an array".to_string())
                })?;
                actual.is_some_and(|value| candidates.contains(value))
            }
            other => {
                return Err(StoreError::UnsupportedFilter(format!("operator {other}")));
            }
        };
        if !hit {
            return Ok(false);
        }
    }
    Ok(true)
}
