/// Failure reported by a [`CaptureStore`](crate::store::CaptureStore).
///
/// The persistence layer classifies its driver errors into these buckets so
/// the pipeline never has to look at SQL-specific types.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (pool exhausted, socket closed, TLS...).
    #[error("Store unreachable: {0}")]
    Connectivity(String),

    /// A constraint (NOT NULL, CHECK, unique...) rejected the row.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A value could not be encoded for, or decoded from, the store.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Any other query failure.
    #[error("Query failed: {0}")]
    Query(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Errors surfaced by the capture pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// Inserting the request row failed. The failure has already been
    /// handed to the `app_log` fallback by the time this is returned.
    #[error("Failed to persist request: {0}")]
    RequestPersist(#[source] StoreError),

    /// Inserting the fallback `app_log` row failed. Only ever logged.
    #[error("Failed to persist log entry: {0}")]
    LogPersist(#[source] StoreError),
}

impl CaptureError {
    /// Render the error together with its source chain, one cause per line.
    ///
    /// Stored as the `detail` column of a log entry.
    pub fn detail(&self) -> String {
        let mut detail = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            detail.push_str("\ncaused by: ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        detail
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_connectivity() {
        let err = StoreError::Connectivity("pool timed out".to_string());
        assert_eq!(err.to_string(), "Store unreachable: pool timed out");
    }

    #[test]
    fn display_request_persist_wraps_store_error() {
        let err = CaptureError::RequestPersist(StoreError::Constraint("not null".into()));
        assert_eq!(
            err.to_string(),
            "Failed to persist request: Constraint violation: not null"
        );
    }

    #[test]
    fn detail_includes_source_chain() {
        let err = CaptureError::RequestPersist(StoreError::Query("syntax".into()));
        let detail = err.detail();
        assert!(detail.starts_with("Failed to persist request"));
        assert!(detail.contains("caused by: Query failed: syntax"));
    }

    #[test]
    fn serde_json_error_maps_to_serialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StoreError::from(json_err);
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
