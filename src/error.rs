use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParcelError>;

#[derive(Error, Debug)]
pub enum ParcelError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("parcel {0} not found")]
    NotFound(i64),

    #[error("unknown parcel status: {0:?}")]
    UnknownStatus(String),

    #[error("parcel {number} cannot advance from status {status:?}")]
    InvalidTransition { number: i64, status: String },
}

impl ParcelError {
    /// True for the "no rows" condition raised by [`crate::ParcelStore::get`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, ParcelError::NotFound(_))
    }
}
