use dataset::Update;

use crate::error::AppletError;

/// Looks up a key the applet explicitly depends on. Absence is an error;
/// only keys that were never configured may be skipped.
pub fn require_array<'a>(update: &'a Update, key: &str) -> Result<&'a [f64], AppletError> {
    match update.get(key) {
        None => Err(AppletError::MissingDataset(key.to_string())),
        Some(value) => value.as_array().ok_or_else(|| AppletError::WrongKind {
            key: key.to_string(),
            expected: "array",
        }),
    }
}

pub fn require_scalar(update: &Update, key: &str) -> Result<f64, AppletError> {
    match update.get(key) {
        None => Err(AppletError::MissingDataset(key.to_string())),
        Some(value) => value.as_scalar().ok_or_else(|| AppletError::WrongKind {
            key: key.to_string(),
            expected: "scalar",
        }),
    }
}
