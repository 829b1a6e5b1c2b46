//! Store-specific error types.

/// Errors returned by store mutators.
///
/// A failed mutator leaves the snapshot untouched and notifies nobody.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No issue with the given id exists in the current snapshot
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let error = StoreError::IssueNotFound {
            id: "issue-42".to_string(),
        };
        assert!(error.to_string().contains("Issue not found"));
        assert!(error.to_string().contains("issue-42"));
    }
}
