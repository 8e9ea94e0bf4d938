use rust_decimal::{Decimal, RoundingStrategy};

use super::fees::FeeSchedule;
use crate::error::DeriskError;

pub const DISPLAY_DECIMALS: u32 = 4;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Fixed four-place rounding used for every displayed amount.
pub fn round_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// `gas_used * gas_price`, gas price in whole currency per gas unit.
pub fn tx_fee(gas_used: u64, gas_price: Decimal) -> Result<Decimal, DeriskError> {
    Decimal::from(gas_used)
        .checked_mul(gas_price)
        .ok_or(DeriskError::Overflow("transaction fee"))
}

pub fn acquisition_cost(tx_value: Decimal, tx_fee: Decimal) -> Result<Decimal, DeriskError> {
    tx_value
        .checked_add(tx_fee)
        .ok_or(DeriskError::Overflow("acquisition cost"))
}

/// Listing price that recovers purchase value and gas once platform fee and royalty are taken
/// out of the sale. Unrounded; callers round for display.
pub fn derisk_price(
    tx_value: Decimal,
    tx_fee: Decimal,
    fees: &FeeSchedule,
) -> Result<Decimal, DeriskError> {
    let cost = acquisition_cost(tx_value, tx_fee)?;
    if cost.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let total_pct = fees.total_pct();
    if total_pct >= HUNDRED {
        return Err(DeriskError::FeesExceedSalePrice { total_pct });
    }

    let kept_share = (HUNDRED - total_pct) / HUNDRED;
    cost.checked_div(kept_share).ok_or(DeriskError::Overflow("derisk price"))
}
