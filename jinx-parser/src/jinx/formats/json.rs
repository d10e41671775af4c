//! JSON output over snapshots

use super::FormatError;
use crate::jinx::ast::AstSnapshot;

pub fn to_json_str(snapshot: &AstSnapshot) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}
