use field_blockchain_data::{CollectionStats, Transaction, TransactionReceipt, ETH_SYMBOL};
use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde::{Serialize, Serializer};

use crate::{
    derisk_apis::{
        calculator::{derisk_price, round_display, tx_fee},
        fees::{FeeSchedule, FeeStatus},
        profit::{project_profit, ProfitProjection},
        quantity::{parse_gas, wei_to_ether},
    },
    error::DeriskError,
};

/// Everything the ui renders about a purchase, derived from the loaded chain data and the fee
/// schedule. Amounts are exact; `derisk_price` is rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeriskView {
    pub tx_value: Decimal,
    pub tx_fee: Decimal,
    pub royalty_pct: Decimal,
    pub platform_pct: Decimal,
    pub fee_status: FeeStatus,
    pub derisk_price: Option<Decimal>,
    pub is_resolvable: bool,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<DeriskError>,
}

impl DeriskView {
    pub fn derive(
        transaction: Option<&Transaction>,
        receipt: Option<&TransactionReceipt>,
        fees: &FeeSchedule,
    ) -> Self {
        let mut view = DeriskView {
            tx_value: Decimal::ZERO,
            tx_fee: Decimal::ZERO,
            royalty_pct: fees.royalty_pct,
            platform_pct: fees.platform_pct,
            fee_status: fees.status,
            derisk_price: Some(Decimal::ZERO),
            is_resolvable: false,
            error: None,
        };

        let (Some(transaction), Some(receipt)) = (transaction, receipt) else {
            return view;
        };

        match amounts(transaction, receipt) {
            Ok((value, fee)) => {
                view.tx_value = value;
                view.tx_fee = fee;
            }
            Err(err) => {
                view.derisk_price = None;
                view.error = Some(err);
                return view;
            }
        }

        match derisk_price(view.tx_value, view.tx_fee, fees) {
            Ok(price) => {
                view.derisk_price = Some(round_display(price));
                view.is_resolvable = true;
            }
            Err(err) => {
                view.derisk_price = None;
                view.error = Some(err);
            }
        }
        view
    }

    pub fn fees(&self) -> FeeSchedule {
        FeeSchedule {
            royalty_pct: self.royalty_pct,
            platform_pct: self.platform_pct,
            status: self.fee_status,
        }
    }

    /// Fails with the derivation error when the purchase amounts themselves could not be read.
    pub fn project_profit(&self, sale_price: Decimal) -> Result<ProfitProjection, DeriskError> {
        if let Some(err @ (DeriskError::Quantity(_) | DeriskError::Overflow(_))) = &self.error {
            return Err(err.clone());
        }
        project_profit(sale_price, self.tx_value, self.tx_fee, &self.fees())
    }

    /// `--` in place of a substituted zero.
    pub fn display_royalty(&self) -> String {
        display_pct(self.royalty_pct, &self.fees())
    }

    pub fn display_platform_fee(&self) -> String {
        display_pct(self.platform_pct, &self.fees())
    }
}

fn amounts(
    transaction: &Transaction,
    receipt: &TransactionReceipt,
) -> Result<(Decimal, Decimal), DeriskError> {
    let value = wei_to_ether(&transaction.value)?;
    let gas_used = parse_gas(&receipt.gas_used)?;
    let gas_price = wei_to_ether(&receipt.effective_gas_price)?;
    Ok((value, tx_fee(gas_used, gas_price)?))
}

fn display_pct(pct: Decimal, fees: &FeeSchedule) -> String {
    if fees.is_flagged() {
        "--".to_string()
    } else {
        format!("{}%", pct.normalize())
    }
}

fn serialize_error<S: Serializer>(
    error: &Option<DeriskError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(err) => serializer.serialize_some(&err.to_string()),
        None => serializer.serialize_none(),
    }
}

pub fn format_eth(amount: Decimal) -> String {
    format!("{:.4} {}", round_display(amount), ETH_SYMBOL)
}

/// Count, floor and volume. The floor is rounded to four places without trailing zeros,
/// volume truncated to whole units.
pub fn format_stats(stats: &CollectionStats) -> (String, String, String) {
    let floor = stats
        .floor_price
        .and_then(Decimal::from_f64)
        .map(|floor| format!("{} {}", round_display(floor).normalize(), ETH_SYMBOL))
        .unwrap_or_else(|| "--".to_string());
    let volume = Decimal::from_f64(stats.total_volume)
        .map(|volume| format!("{} {}", volume.trunc(), ETH_SYMBOL))
        .unwrap_or_else(|| "--".to_string());
    (format!("{}", stats.count), floor, volume)
}
