use page::HookError;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PermalinkError {
    /// A required marker element was absent from the document at
    /// initialization time. `marker` is the class that was not found.
    MissingMarker { marker: &'static str },
    /// An element resolved at initialization has since left the tree.
    Detached { what: &'static str },
}

impl fmt::Display for PermalinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermalinkError::MissingMarker { marker } => {
                write!(f, "missing required element: no \".{marker}\" in the document")
            }
            PermalinkError::Detached { what } => {
                write!(f, "the {what} element is no longer in the document tree")
            }
        }
    }
}

impl std::error::Error for PermalinkError {}

impl From<PermalinkError> for HookError {
    fn from(err: PermalinkError) -> Self {
        HookError::new("permalink", err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_marker_names_the_marker() {
        let err = PermalinkError::MissingMarker { marker: "permalink-path" };
        assert!(
            err.to_string().contains("permalink-path"),
            "expected the marker name in: {err}"
        );
    }
}
