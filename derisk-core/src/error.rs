use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("quantity is empty")]
    Empty,
    #[error("quantity {0:?} is not a hex or decimal integer")]
    Invalid(String),
    #[error("quantity {0:?} is too large to convert")]
    Overflow(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeriskError {
    #[error("fees total {total_pct}%, cannot compute a break-even price")]
    FeesExceedSalePrice { total_pct: Decimal },
    #[error("sale price must not be negative, got {0}")]
    NegativeSalePrice(Decimal),
    #[error("arithmetic overflow computing {0}")]
    Overflow(&'static str),
    #[error(transparent)]
    Quantity(#[from] QuantityError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnresolvedAddress {
    #[error("address not resolved: no receipt log has an empty payload")]
    NoCandidate,
    #[error("address not resolved: {} logs with an empty payload disagree", candidates.len())]
    Ambiguous { candidates: Vec<String> },
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    TxHash(#[from] field_blockchain_data::TxHashError),
    #[error(transparent)]
    Derisk(#[from] DeriskError),
    #[error("no transaction has been loaded")]
    NothingLoaded,
    #[error("no collection has been resolved for the current transaction")]
    NoCollection,
}
