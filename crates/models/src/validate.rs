use crate::errors::ModelError;

/// Trim `value` and check its character count lies in `min..=max`.
pub(crate) fn bounded(field: &str, value: &str, min: usize, max: usize) -> Result<String, ModelError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Err(ModelError::Validation(format!("{field} must be {min}..={max} characters")));
    }
    Ok(trimmed.to_string())
}
