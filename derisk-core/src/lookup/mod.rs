//! Keyed lookup session.
//!
//! A submitted hash starts a chain of fetches: transaction and receipt together, then the
//! collection metadata once the receipt names a contract, then the collection stats once the
//! metadata names a slug. Every response is applied only if the lookup it was requested for is
//! still the current one, so a slow answer for an old hash never overwrites a newer lookup, even
//! a newer lookup of the same hash.

pub mod source;
pub mod state;

use std::sync::Arc;

use field_blockchain_data::TxHash;
use rust_decimal::Decimal;
use tokio::{
    sync::{mpsc::UnboundedSender, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    derisk_apis::{collection_address::resolve_collection_address, profit::ProfitProjection},
    error::{DeriskError, LookupError},
};
pub use source::ChainDataSource;
pub use state::{DisplayFields, ErrorKind, LookupEvent, LookupSnapshot, StageFlags, StageStatus};
use state::LookupState;

pub struct DeriskLookup<S> {
    source: Arc<S>,
    state: Arc<Mutex<LookupState>>,
    events: Option<UnboundedSender<LookupEvent>>,
}

impl<S> Clone for DeriskLookup<S> {
    fn clone(&self) -> Self {
        DeriskLookup {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
            events: self.events.clone(),
        }
    }
}

impl<S: ChainDataSource + 'static> DeriskLookup<S> {
    pub fn new(source: Arc<S>) -> Self {
        DeriskLookup {
            source,
            state: Arc::new(Mutex::new(LookupState::default())),
            events: None,
        }
    }

    /// Errors and submissions are reported here for the ui to present.
    pub fn with_events(mut self, events: UnboundedSender<LookupEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Starts a lookup for `raw_hash`. Resubmitting the current hash is a no-op and returns
    /// `None` unless one of its fetches failed, in which case it is retried from scratch.
    /// Otherwise all state (including the last profit projection) is reset and the handle of the
    /// spawned pipeline is returned.
    pub async fn submit(&self, raw_hash: &str) -> Result<Option<JoinHandle<()>>, LookupError> {
        let tx_hash: TxHash = match raw_hash.parse() {
            Ok(tx_hash) => tx_hash,
            Err(err) => {
                emit(&self.events, ErrorKind::Transaction, &err);
                return Err(err.into());
            }
        };

        let generation = {
            let mut state = self.state.lock().await;
            if state.holds(&tx_hash) && !state.stages.any_failed() {
                debug!(%tx_hash, "hash already current");
                return Ok(None);
            }
            let generation = state.generation + 1;
            *state = LookupState::for_hash(tx_hash.clone(), generation);
            generation
        };

        info!(%tx_hash, generation, "lookup submitted");
        if let Some(events) = &self.events {
            let _ = events.send(LookupEvent::Submitted {
                tx_hash: tx_hash.clone(),
            });
        }

        let lookup = self.clone();
        Ok(Some(tokio::spawn(async move { lookup.run(tx_hash, generation).await })))
    }

    /// Refetches stats for the current collection.
    pub async fn refresh_stats(&self) -> Result<(), LookupError> {
        let (generation, slug) = {
            let mut state = self.state.lock().await;
            if state.tx_hash.is_none() {
                return Err(LookupError::NothingLoaded);
            }
            let slug = state.slug().map(str::to_string).ok_or(LookupError::NoCollection)?;
            state.stages.stats = StageStatus::Loading;
            (state.generation, slug)
        };
        self.fetch_stats(generation, slug).await;
        Ok(())
    }

    /// Projects a sale at `sale_price` and remembers the price; later snapshots recompute the
    /// projection against whatever fees have loaded since.
    pub async fn project_profit(
        &self,
        sale_price: Decimal,
    ) -> Result<ProfitProjection, LookupError> {
        let mut state = self.state.lock().await;
        if state.transaction.is_none() || state.receipt.is_none() {
            return Err(LookupError::NothingLoaded);
        }
        let projection = state.view().project_profit(sale_price)?;
        state.sale_price = Some(sale_price);
        Ok(projection)
    }

    pub async fn snapshot(&self) -> LookupSnapshot {
        self.state.lock().await.snapshot()
    }

    async fn run(&self, tx_hash: TxHash, generation: u64) {
        let (transaction, receipt) = tokio::join!(
            self.source.transaction(&tx_hash),
            self.source.receipt(&tx_hash)
        );

        let address = {
            let mut state = self.state.lock().await;
            if !state.is_current(generation) {
                debug!(%tx_hash, generation, "dropping stale transaction data");
                return;
            }

            match transaction {
                Ok(transaction) => {
                    state.transaction = Some(transaction);
                    state.stages.transaction = StageStatus::Ready;
                }
                Err(err) => {
                    warn!(%tx_hash, error = %err, "transaction fetch failed");
                    state.stages.transaction = StageStatus::Failed(err.to_string());
                    emit(&self.events, ErrorKind::Transaction, &err);
                }
            }

            match receipt {
                Ok(receipt) => {
                    let resolution = resolve_collection_address(&receipt.logs);
                    state.receipt = Some(receipt);
                    state.stages.receipt = StageStatus::Ready;
                    if let Err(err) = &resolution {
                        warn!(%tx_hash, error = %err, "collection address not resolved");
                        emit(&self.events, ErrorKind::CollectionAddress, err);
                    } else {
                        state.stages.collection = StageStatus::Loading;
                    }
                    state.collection_address = Some(resolution.clone());
                    resolution.ok()
                }
                Err(err) => {
                    warn!(%tx_hash, error = %err, "receipt fetch failed");
                    state.stages.receipt = StageStatus::Failed(err.to_string());
                    emit(&self.events, ErrorKind::Receipt, &err);
                    None
                }
            }
        };

        let Some(address) = address else {
            self.report_derivation(generation).await;
            return;
        };

        let metadata = self.source.collection(&address).await;
        let slug = {
            let mut state = self.state.lock().await;
            if !state.is_current(generation) || state.resolved_address() != Some(address.as_str()) {
                debug!(%tx_hash, %address, generation, "dropping stale collection metadata");
                return;
            }

            match metadata {
                Ok(metadata) => {
                    debug!(
                        %address,
                        contract_type = ?metadata.asset_contract_type,
                        "collection resolved"
                    );
                    let slug = metadata.slug().map(str::to_string);
                    state.collection = Some(metadata);
                    state.stages.collection = StageStatus::Ready;
                    if slug.is_some() {
                        state.stages.stats = StageStatus::Loading;
                    }
                    slug
                }
                Err(err) => {
                    warn!(
                        %address,
                        error = %err,
                        "collection metadata unavailable, fees default to zero"
                    );
                    state.stages.collection = StageStatus::Failed(err.to_string());
                    emit(&self.events, ErrorKind::Marketplace, &err);
                    None
                }
            }
        };

        self.report_derivation(generation).await;

        if let Some(slug) = slug {
            self.fetch_stats(generation, slug).await;
        }
    }

    async fn fetch_stats(&self, generation: u64, slug: String) {
        let stats = self.source.collection_stats(&slug).await;

        let mut state = self.state.lock().await;
        if !state.is_current(generation) || state.slug() != Some(slug.as_str()) {
            debug!(%slug, generation, "dropping stale collection stats");
            return;
        }

        match stats {
            Ok(stats) => {
                state.stats = Some(stats);
                state.stages.stats = StageStatus::Ready;
            }
            Err(err) => {
                warn!(%slug, error = %err, "collection stats fetch failed");
                state.stages.stats = StageStatus::Failed(err.to_string());
                emit(&self.events, ErrorKind::Stats, &err);
            }
        }
    }

    /// Reports a derisk price that could not be computed once its inputs have settled.
    async fn report_derivation(&self, generation: u64) {
        let state = self.state.lock().await;
        if !state.is_current(generation) {
            return;
        }
        match state.view().error {
            Some(err @ DeriskError::FeesExceedSalePrice { .. }) => {
                emit(&self.events, ErrorKind::Fees, &err)
            }
            Some(err) => emit(&self.events, ErrorKind::Transaction, &err),
            None => {}
        }
    }
}

fn emit(
    events: &Option<UnboundedSender<LookupEvent>>,
    kind: ErrorKind,
    err: &dyn std::fmt::Display,
) {
    if let Some(events) = events {
        let _ = events.send(LookupEvent::Error {
            kind,
            message: err.to_string(),
        });
    }
}
