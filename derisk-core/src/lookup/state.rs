use field_blockchain_data::{
    CollectionMetadata, CollectionStats, Transaction, TransactionReceipt, TxHash,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    derisk_apis::{
        fees::{FeeSchedule, FeeStatus},
        profit::ProfitProjection,
    },
    error::UnresolvedAddress,
    view::{format_eth, format_stats, DeriskView},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum StageStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl StageStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, StageStatus::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StageStatus::Failed(_))
    }
}

/// Per-fetch flags for spinners and toasts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageFlags {
    pub transaction: StageStatus,
    pub receipt: StageStatus,
    pub collection: StageStatus,
    pub stats: StageStatus,
}

impl StageFlags {
    pub fn any_failed(&self) -> bool {
        [&self.transaction, &self.receipt, &self.collection, &self.stats]
            .into_iter()
            .any(StageStatus::is_failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transaction,
    Receipt,
    CollectionAddress,
    Marketplace,
    Stats,
    Fees,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupEvent {
    Submitted { tx_hash: TxHash },
    Error { kind: ErrorKind, message: String },
}

/// Everything fetched for the current hash. Replaced wholesale on every new submission;
/// `generation` goes up with each replacement so a pipeline can tell its own state apart from
/// a later lookup of the same hash.
#[derive(Debug, Default)]
pub(crate) struct LookupState {
    pub generation: u64,
    pub tx_hash: Option<TxHash>,
    pub transaction: Option<Transaction>,
    pub receipt: Option<TransactionReceipt>,
    pub collection_address: Option<Result<String, UnresolvedAddress>>,
    pub collection: Option<CollectionMetadata>,
    pub stats: Option<CollectionStats>,
    /// last sale price the user projected; the projection itself is recomputed on read
    pub sale_price: Option<Decimal>,
    pub stages: StageFlags,
}

impl LookupState {
    pub fn for_hash(tx_hash: TxHash, generation: u64) -> Self {
        LookupState {
            generation,
            tx_hash: Some(tx_hash),
            stages: StageFlags {
                transaction: StageStatus::Loading,
                receipt: StageStatus::Loading,
                ..StageFlags::default()
            },
            ..LookupState::default()
        }
    }

    pub fn holds(&self, tx_hash: &TxHash) -> bool {
        self.tx_hash.as_ref() == Some(tx_hash)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn resolved_address(&self) -> Option<&str> {
        match &self.collection_address {
            Some(Ok(address)) => Some(address),
            _ => None,
        }
    }

    pub fn slug(&self) -> Option<&str> {
        self.collection.as_ref().and_then(CollectionMetadata::slug)
    }

    pub fn fees(&self) -> FeeSchedule {
        if let Some(metadata) = &self.collection {
            return FeeSchedule::from_metadata(metadata);
        }
        let status = match (&self.collection_address, &self.stages.collection) {
            (Some(Ok(_)), StageStatus::Failed(_)) => FeeStatus::MarketplaceUnavailable,
            (Some(Ok(_)), _) => FeeStatus::Pending,
            (None, _) if self.stages.receipt.is_loading() => FeeStatus::Pending,
            _ => FeeStatus::AddressUnresolved,
        };
        FeeSchedule::zero(status)
    }

    pub fn view(&self) -> DeriskView {
        DeriskView::derive(self.transaction.as_ref(), self.receipt.as_ref(), &self.fees())
    }

    pub fn snapshot(&self) -> LookupSnapshot {
        let view = self.view();
        let profit = self
            .sale_price
            .and_then(|sale_price| view.project_profit(sale_price).ok());
        LookupSnapshot {
            tx_hash: self.tx_hash.clone(),
            stages: self.stages.clone(),
            display: DisplayFields::new(&view, self.stats.as_ref()),
            view,
            collection_address: self.resolved_address().map(str::to_string),
            address_error: match &self.collection_address {
                Some(Err(err)) => Some(err.to_string()),
                _ => None,
            },
            collection: self.collection.clone(),
            stats: self.stats.clone(),
            profit,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupSnapshot {
    pub tx_hash: Option<TxHash>,
    pub stages: StageFlags,
    pub view: DeriskView,
    pub display: DisplayFields,
    pub collection_address: Option<String>,
    pub address_error: Option<String>,
    pub collection: Option<CollectionMetadata>,
    pub stats: Option<CollectionStats>,
    pub profit: Option<ProfitProjection>,
}

/// Render-ready strings. Substituted fees read `--`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayFields {
    pub tx_value: String,
    pub tx_fee: String,
    pub royalty: String,
    pub platform_fee: String,
    pub derisk_price: String,
    pub item_count: Option<String>,
    pub floor_price: Option<String>,
    pub total_volume: Option<String>,
}

impl DisplayFields {
    fn new(view: &DeriskView, stats: Option<&CollectionStats>) -> Self {
        let (item_count, floor_price, total_volume) = match stats.map(format_stats) {
            Some((count, floor, volume)) => (Some(count), Some(floor), Some(volume)),
            None => (None, None, None),
        };
        DisplayFields {
            tx_value: format_eth(view.tx_value),
            tx_fee: format_eth(view.tx_fee),
            royalty: view.display_royalty(),
            platform_fee: view.display_platform_fee(),
            derisk_price: view
                .derisk_price
                .map(format_eth)
                .unwrap_or_else(|| "--".to_string()),
            item_count,
            floor_price,
            total_volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash() -> TxHash {
        "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060"
            .parse()
            .unwrap()
    }

    #[test]
    fn fee_status_follows_the_collection_stage() {
        let mut state = LookupState::for_hash(hash(), 1);
        assert_eq!(state.fees().status, FeeStatus::Pending);

        state.stages.receipt = StageStatus::Ready;
        state.collection_address = Some(Err(UnresolvedAddress::NoCandidate));
        assert_eq!(state.fees().status, FeeStatus::AddressUnresolved);

        state.collection_address = Some(Ok("0xabc".to_string()));
        state.stages.collection = StageStatus::Loading;
        assert_eq!(state.fees().status, FeeStatus::Pending);

        state.stages.collection = StageStatus::Failed("down".to_string());
        assert_eq!(state.fees().status, FeeStatus::MarketplaceUnavailable);
    }

    #[test]
    fn any_failed_stage_is_detected() {
        let mut stages = StageFlags::default();
        assert!(!stages.any_failed());
        stages.stats = StageStatus::Failed("timed out".to_string());
        assert!(stages.any_failed());
    }

    #[test]
    fn flagged_fees_display_as_dashes() {
        let mut state = LookupState::for_hash(hash(), 1);
        state.stages.receipt = StageStatus::Ready;
        state.collection_address = Some(Err(UnresolvedAddress::NoCandidate));
        state.stats = Some(CollectionStats {
            count: 9999.0,
            floor_price: Some(0.9),
            total_volume: 51234.9,
            fetched_at: Default::default(),
        });

        let display = state.snapshot().display;
        assert_eq!(display.royalty, "--");
        assert_eq!(display.platform_fee, "--");
        assert_eq!(display.derisk_price, "0.0000 \u{039e}");
        assert_eq!(display.floor_price.as_deref(), Some("0.9 \u{039e}"));
        assert_eq!(display.item_count.as_deref(), Some("9999"));
    }

    #[test]
    fn stage_status_serializes_with_message() {
        let json = serde_json::to_value(StageStatus::Failed("timed out".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "failed", "message": "timed out" }));
    }
}
