//! Operation-ID normalization for client-code generation.
//!
//! The server names every operation `{tag}-{handler}` so that IDs stay unique
//! across tags. Client generators turn operation IDs into function names, where
//! the tag prefix is redundant (the tag already selects the service class).
//! This module strips it again.

use serde_json::Value;

use crate::error::AppError;

/// Remove the `{tag}-` prefix from an operation ID.
///
/// Returns the remainder when `operation_id` starts with exactly `tag` followed
/// by a hyphen, `None` otherwise. The match is case-sensitive and only one
/// prefix is removed.
pub fn strip_tag_prefix<'a>(operation_id: &'a str, tag: &str) -> Option<&'a str> {
    operation_id
        .strip_prefix(tag)
        .and_then(|rest| rest.strip_prefix('-'))
}

/// Strip tag prefixes from every operation ID in `schema` and return it.
pub fn normalize(mut schema: Value) -> Result<Value, AppError> {
    normalize_in_place(&mut schema)?;
    Ok(schema)
}

/// Strip tag prefixes from every operation ID in `schema`.
///
/// Returns the number of operations that were renamed. Path-item members that
/// are not objects (`parameters`, `summary`, ...) and operations without
/// `tags` or `operationId` are left untouched. An operation whose `tags` list
/// is empty is rejected.
pub fn normalize_in_place(schema: &mut Value) -> Result<usize, AppError> {
    let paths = schema
        .get_mut("paths")
        .ok_or_else(|| AppError::SchemaError("document has no `paths` member".into()))?
        .as_object_mut()
        .ok_or_else(|| AppError::SchemaError("`paths` is not an object".into()))?;

    let mut renamed = 0;
    for (path, item) in paths.iter_mut() {
        let item = item.as_object_mut().ok_or_else(|| {
            AppError::SchemaError(format!("path item `{path}` is not an object"))
        })?;

        for (method, operation) in item.iter_mut() {
            let Some(operation) = operation.as_object_mut() else {
                continue;
            };
            let Some(tags) = operation.get("tags").and_then(Value::as_array) else {
                continue;
            };
            let Some(first) = tags.first() else {
                return Err(AppError::MalformedOperation {
                    path: path.clone(),
                    method: method.clone(),
                    reason: "`tags` is empty".into(),
                });
            };
            let Some(tag) = first.as_str() else {
                continue;
            };
            let Some(operation_id) = operation.get("operationId").and_then(Value::as_str) else {
                continue;
            };

            if let Some(stripped) = strip_tag_prefix(operation_id, tag) {
                tracing::debug!(%path, %method, from = operation_id, to = stripped, "Renaming operation");
                let stripped = stripped.to_string();
                operation.insert("operationId".into(), Value::String(stripped));
                renamed += 1;
            }
        }
    }

    Ok(renamed)
}
