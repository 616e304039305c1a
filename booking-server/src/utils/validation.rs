//! Input validation helpers
//!
//! Request DTOs derive [`validator::Validate`]; handlers call [`check`] before
//! touching any state so bad input never reaches the database.

use shared::error::AppError;
use validator::Validate;

/// Run derive-based validation and map failures to a single validation error.
///
/// Field names are sorted so the message is deterministic.
pub fn check(dto: &impl Validate) -> Result<(), AppError> {
    if let Err(errors) = dto.validate() {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort_unstable();
        return Err(
            AppError::validation(format!("Invalid fields: {}", fields.join(", ")))
                .with_detail("fields", fields.join(",")),
        );
    }
    Ok(())
}

/// Parse an ISO-8601 (RFC 3339) timestamp into UTC milliseconds.
///
/// Offsets are honored; storage is always UTC millis.
pub fn parse_rfc3339_millis(value: &str, field: &str) -> Result<i64, AppError> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| AppError::validation(format!("{field} must be an ISO-8601 timestamp")))
}
