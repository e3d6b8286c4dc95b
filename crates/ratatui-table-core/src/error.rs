use crate::record::RecordId;

/// Errors raised while loading records from JSON.
///
/// The table view itself never fails; this only covers turning external data into
/// [`Record`](crate::record::Record)s.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of records")]
    NotAnArray,
    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },
    #[error("record {index} has no `id` field")]
    MissingId { index: usize },
    #[error("record {index} has an `id` that is neither an integer nor a string")]
    InvalidId { index: usize },
    #[error("duplicate record id `{id}`")]
    DuplicateId { id: RecordId },
}
