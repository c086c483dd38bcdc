use crate::error::RouteError;
use crate::table::RouteTable;

/// Compile a JSON route table document into a [`RouteTable`].
///
/// Malformed documents, invalid patterns, and duplicate pattern keys are all
/// mapped into `RouteError::ParseError`.
///
/// Example:
/// ```rust
/// use routegate_core::compile_table;
/// let table_json = r#"
///     {
///         "/login": {"title": "Login"},
///         "/admin/*": {
///             "allow": {
///                 "when": {"conditions": [{"label": "auth", "rule": "authenticated"}]},
///                 "redirectOnDeny": "/login"
///             }
///         }
///     }
/// "#;
/// let table = compile_table(table_json).unwrap();
/// assert_eq!(table.len(), 2);
/// ```
pub fn compile_table(text: &str) -> Result<RouteTable, RouteError> {
    serde_json::from_str(text).map_err(|e| RouteError::ParseError(e.to_string()))
}
