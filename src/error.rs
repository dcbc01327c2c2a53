//! Error types shared by the storage backends, the ledger and garden construction.

use thiserror::Error;

/// Failure reported by a [`KeyValueStore`](crate::kv_store::KeyValueStore) backend.
///
/// These never reach the UI: [`JsonStore`](crate::json_store::JsonStore) logs them
/// and falls back to the caller's default.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("LMDB error: {0}")]
    Lmdb(#[from] lmdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("quota exceeded writing '{key}': {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    #[error("store is closed")]
    Closed,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A points operation the user asked for and the ledger refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("you must be signed in to make a purchase")]
    NotSignedIn,

    #[error("insufficient points: balance is {balance}, price is {price}")]
    InsufficientPoints { balance: i64, price: u32 },
}

/// A garden record that breaks its construction invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GardenError {
    #[error("rental terms must be present exactly when the garden is for rent (forRent = {for_rent})")]
    RentalTermsMismatch { for_rent: bool },

    #[error("harvest share must be between 0 and 100, got {0}")]
    HarvestShareOutOfRange(u32),

    #[error("garden area must be positive, got {0}")]
    NonPositiveArea(f64),

    #[error("garden area must be a finite number, got {0}")]
    NonFiniteArea(f64),
}

/// A helper record whose rating cannot be shown or stored.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HelperError {
    #[error("helper rating must be a finite number between 0 and 5, got {0}")]
    RatingOutOfRange(f64),
}
