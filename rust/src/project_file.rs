//! JSON project files: an ordered array of activity records.

use thiserror::Error;

use crate::models::Activity;

#[derive(Error, Debug)]
pub enum ProjectFileError {
    #[error("No activities to save")]
    NothingToSave,
    #[error("Invalid project file: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ProjectFileError> for pyo3::PyErr {
    fn from(err: ProjectFileError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

/// Serialize activities as a pretty-printed JSON array of
/// `{id, name, predecessors, a, m, b}` records.
pub fn to_json(activities: &[Activity]) -> Result<String, ProjectFileError> {
    if activities.is_empty() {
        return Err(ProjectFileError::NothingToSave);
    }
    Ok(serde_json::to_string_pretty(activities)?)
}

/// Parse a project file. The top level must be an array; missing
/// `predecessors` and estimates take the new-activity defaults.
pub fn from_json(content: &str) -> Result<Vec<Activity>, ProjectFileError> {
    Ok(serde_json::from_str(content)?)
}
