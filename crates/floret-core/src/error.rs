use serde_json::Value;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("grouping value appears more than once: {value}")]
    DuplicateGroupValue { value: Value },

    #[error("record id must be non-negative, got {id}")]
    NegativeRecordId { id: f64 },

    #[error("cannot allocate {count} point ids after {last_id} without passing u64::MAX")]
    IdOverflow { last_id: u64, count: usize },
}
