//! Post-processing of exported API definitions
//!
//! The exported document describes the whole deployed stage, including the
//! routes that serve the documentation viewer itself. Before it is handed to
//! the viewer:
//!
//! - every `servers[*].variables.basePath.default` loses one leading `/`, so
//!   joining it with a mount prefix never yields `//`
//! - the viewer's own routes are removed from `paths`

use serde_json::Value;

use super::types::ResolverError;

/// Path entries describing the documentation viewer's mount point
///
/// Matched exactly; `/API-DOC` is a different path and is kept.
pub const SELF_REFERENTIAL_PATHS: [&str; 2] = ["/api-doc/{proxy+}", "/api-doc"];

/// Decode an export payload into a JSON document
///
/// # Errors
///
/// Returns [`ResolverError::Resolution`] if the payload is not UTF-8 JSON.
pub fn decode_document(body: &[u8]) -> Result<Value, ResolverError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| ResolverError::resolution(format!("Export body is not UTF-8: {}", e)))?;

    serde_json::from_str(text)
        .map_err(|e| ResolverError::resolution(format!("Export body is not valid JSON: {}", e)))
}

/// Apply both normalization rules to a decoded document
///
/// Documents without `servers` or `paths` (Swagger 2.0 exports, for example)
/// pass through. Exactly one leading `/` is stripped per call, so a second
/// call changes nothing only while no `basePath` default starts with `//`.
///
/// # Errors
///
/// Returns [`ResolverError::Resolution`] if the document is not a JSON object.
pub fn normalize_document(mut document: Value) -> Result<Value, ResolverError> {
    let root = document.as_object_mut().ok_or_else(|| {
        ResolverError::resolution("Exported API definition is not a JSON object")
    })?;

    if let Some(servers) = root.get_mut("servers").and_then(Value::as_array_mut) {
        for server in servers.iter_mut() {
            strip_base_path_separator(server);
        }
    }

    if let Some(paths) = root.get_mut("paths").and_then(Value::as_object_mut) {
        for path in SELF_REFERENTIAL_PATHS {
            if paths.remove(path).is_some() {
                tracing::debug!(path, "Removed documentation route from exported paths");
            }
        }
    }

    Ok(document)
}

fn strip_base_path_separator(server: &mut Value) {
    let Some(default) = server.pointer_mut("/variables/basePath/default") else {
        return;
    };

    let stripped = default
        .as_str()
        .and_then(|path| path.strip_prefix('/'))
        .map(str::to_owned);

    if let Some(stripped) = stripped {
        *default = Value::String(stripped);
    }
}
