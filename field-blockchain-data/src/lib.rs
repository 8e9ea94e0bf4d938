pub mod data_structures;
pub mod tx_hash;

pub use data_structures::{
    CollectionMetadata, CollectionRef, CollectionStats, ContractType, Log, StatsEnvelope,
    Transaction, TransactionReceipt,
};
pub use tx_hash::{TxHash, TxHashError};

/// Display symbol of the chain's native currency.
pub const ETH_SYMBOL: &str = "\u{039e}";
