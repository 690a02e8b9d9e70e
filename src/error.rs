use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Failures while reading the element table. Both are fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("input table not found: {}", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `row` is the 1-based data row (header excluded) when the problem is row-specific.
    #[error("malformed input{}: field '{field}': {reason}", .row.map(|r| format!(" at row {r}")).unwrap_or_default())]
    MalformedInput {
        row: Option<usize>,
        field: String,
        reason: String,
    },
}

impl LoadError {
    pub fn malformed(row: Option<usize>, field: &str, reason: impl Into<String>) -> Self {
        LoadError::MalformedInput {
            row,
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failures while drawing or writing the chart.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("writing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("chart backend: {0}")]
    Backend(String),

    #[error("nothing to draw: dataset is empty")]
    EmptyDataset,
}
