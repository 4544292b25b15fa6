use serde_json::Value;

use crate::category::CategorySet;
use crate::model::{Game, GameCreateRequest, GameName, GamePatch, GameUpdateRequest, Language};
/// Reasons a create/update request is rejected. The display strings are
/// returned to HTTP clients verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Game id, category, and name are required")]
    MissingFields,
    #[error("Game ID is required")]
    MissingId,
    #[error("Name must be a non-empty array")]
    EmptyName,
    #[error("Each name entry must have language and value")]
    IncompleteNameEntry,
    #[error("Language must be EN, KO, or JA")]
    UnknownLanguage(String),
    #[error("Category must not be empty")]
    EmptyCategory,
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// A non-empty JSON string, or `None` for anything else.
fn text(field: Option<Value>) -> Option<String> {
    match field {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Reject an empty path id.
pub fn require_id(id: &str) -> Result<&str, ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::MissingId);
    }
    Ok(id)
}

fn validate_entry(entry: Value) -> Result<GameName, ValidationError> {
    let Value::Object(mut fields) = entry else {
        return Err(ValidationError::IncompleteNameEntry);
    };
    let (Some(language), Some(value)) = (text(fields.remove("language")), text(fields.remove("value")))
    else {
        return Err(ValidationError::IncompleteNameEntry);
    };
    let language =
        Language::from_code(&language).ok_or(ValidationError::UnknownLanguage(language))?;
    Ok(GameName { language, value })
}

/// Validate a `name` value. Anything but a non-empty array is rejected.
/// Duplicate languages are allowed.
pub fn validate_names(name: Value) -> Result<Vec<GameName>, ValidationError> {
    match name {
        Value::Array(entries) if !entries.is_empty() => {
            entries.into_iter().map(validate_entry).collect()
        },
        _ => Err(ValidationError::EmptyName),
    }
}

fn validate_category(category: String, categories: &CategorySet) -> Result<String, ValidationError> {
    if category.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    if !categories.contains(&category) {
        return Err(ValidationError::UnknownCategory(category));
    }
    Ok(category)
}

/// Turn a create request into a complete [`Game`].
pub fn validate_create(
    req: GameCreateRequest,
    categories: &CategorySet,
) -> Result<Game, ValidationError> {
    let (Some(id), Some(category), Some(name @ Value::Array(_))) =
        (text(req.id), text(req.category), req.name)
    else {
        return Err(ValidationError::MissingFields);
    };
    let name = validate_names(name)?;
    let category = validate_category(category, categories)?;
    Ok(Game { id, category, name })
}

/// Turn an update request into a [`GamePatch`]. Only supplied fields are checked.
pub fn validate_update(
    req: GameUpdateRequest,
    categories: &CategorySet,
) -> Result<GamePatch, ValidationError> {
    let name = req.name.map(validate_names).transpose()?;
    let category = req
        .category
        .map(|c| match c {
            Value::String(c) => validate_category(c, categories),
            other => Err(ValidationError::UnknownCategory(other.to_string())),
        })
        .transpose()?;
    Ok(GamePatch { category, name })
}
