use crate::error::{AppError, AppResult};

pub fn normalize_name(requested: &str) -> AppResult<String> {
    let trimmed = requested.trim();
    if trimmed.is_empty() {
        return Err(AppError::EmptyProfileName);
    }

    Ok(trimmed.to_string())
}
