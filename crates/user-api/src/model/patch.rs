//! Field-level patching of a [`User`].
//!
//! A [`PatchDocument`] is an RFC 6902 JSON Patch, applied with the
//! `json-patch` crate:
//!
//! ```json
//! [
//!   { "op": "replace", "path": "/name", "value": "Villa Royal" },
//!   { "op": "remove", "path": "/details" }
//! ]
//! ```
//!
//! On top of RFC 6902, paths must name a top-level field and match it
//! case-insensitively (`/sqft` is accepted for `/area`). `remove` resets a
//! field to its empty value, since every field of a user always exists. The
//! `id` field cannot be targeted.

use crate::model::{User, ValidationErrors};
use json_patch::{Patch, PatchOperation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Legacy field name accepted in paths, and the field it stands for.
const LEGACY_AREA_FIELD: &str = "sqft";

/// An ordered list of JSON Patch operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(Patch);

impl PatchDocument {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self(Patch(operations))
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.0 .0
    }

    /// Applies every operation, in order, to a copy of `user` and validates the
    /// result.
    ///
    /// After each operation the document is read back into a [`User`], so a
    /// value of the wrong type fails that operation and removed fields come
    /// back with their default. The first failure aborts the patch; its
    /// message is keyed by the operation's path. `user` itself is never
    /// modified.
    pub fn apply_to(&self, user: &User) -> Result<User, ValidationErrors> {
        let fields = field_names()?;
        let mut current = user.clone();

        for operation in self.operations() {
            let (path, operation) = normalize(operation, &fields)?;
            let fail = |message: String| ValidationErrors::single(path.as_str(), message);

            let mut doc = serde_json::to_value(&current).map_err(|e| fail(e.to_string()))?;
            json_patch::patch(&mut doc, std::slice::from_ref(&operation))
                .map_err(|e| fail(e.to_string()))?;
            current = serde_json::from_value(doc).map_err(|e| fail(e.to_string()))?;
        }

        current.validate()?;
        Ok(current)
    }
}

/// Serialized names of every user field.
fn field_names() -> Result<Vec<String>, ValidationErrors> {
    match serde_json::to_value(User::default()) {
        Ok(Value::Object(map)) => Ok(map.into_iter().map(|(key, _)| key).collect()),
        Ok(other) => Err(ValidationErrors::single(
            "user",
            format!("expected an object, found {other}"),
        )),
        Err(e) => Err(ValidationErrors::single("user", e.to_string())),
    }
}

/// Rewrites `path` and `from` to the fields' own names.
///
/// Returns the operation's original path, used as the error key.
fn normalize(
    operation: &PatchOperation,
    fields: &[String],
) -> Result<(String, PatchOperation), ValidationErrors> {
    let mut raw =
        serde_json::to_value(operation).map_err(|e| ValidationErrors::single("patch", e.to_string()))?;
    let path = raw
        .get("path")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    for key in ["path", "from"] {
        if let Some(Value::String(pointer)) = raw.get_mut(key) {
            *pointer = resolve(pointer, fields)
                .map_err(|message| ValidationErrors::single(path.as_str(), message))?;
        }
    }

    let operation =
        serde_json::from_value(raw).map_err(|e| ValidationErrors::single(path.as_str(), e.to_string()))?;
    Ok((path, operation))
}

/// Maps a `/field` path onto the field's own pointer.
fn resolve(path: &str, fields: &[String]) -> Result<String, String> {
    let segment = path
        .strip_prefix('/')
        .ok_or_else(|| format!("The path '{path}' must start with '/'."))?;
    if segment.contains('/') {
        return Err(format!("The path '{path}' addresses a nested location, which users do not have."));
    }
    let segment = if segment.eq_ignore_ascii_case(LEGACY_AREA_FIELD) {
        "area"
    } else {
        segment
    };
    let field = fields
        .iter()
        .find(|field| field.eq_ignore_ascii_case(segment))
        .ok_or_else(|| format!("The target location specified by path segment '{segment}' was not found."))?;
    if field == "id" {
        return Err("The id field cannot be patched.".to_string());
    }
    Ok(format!("/{field}"))
}
