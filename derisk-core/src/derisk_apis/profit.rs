use rust_decimal::Decimal;
use serde::Serialize;

use super::{
    calculator::{acquisition_cost, round_display},
    fees::FeeSchedule,
};
use crate::error::DeriskError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitProjection {
    pub sale_price: Decimal,
    pub sale_fee: Decimal,
    /// negative when the sale is a loss
    pub profit: Decimal,
}

/// What-if projection: net profit of selling at `sale_price` after platform fee and royalty,
/// against the full acquisition cost.
pub fn project_profit(
    sale_price: Decimal,
    tx_value: Decimal,
    tx_fee: Decimal,
    fees: &FeeSchedule,
) -> Result<ProfitProjection, DeriskError> {
    if sale_price.is_sign_negative() && !sale_price.is_zero() {
        return Err(DeriskError::NegativeSalePrice(sale_price));
    }

    let cost = acquisition_cost(tx_value, tx_fee)?;
    let sale_fee = sale_price
        .checked_mul(fees.total_pct() / Decimal::ONE_HUNDRED)
        .ok_or(DeriskError::Overflow("sale fee"))?;
    let profit = sale_price
        .checked_sub(sale_fee)
        .and_then(|net| net.checked_sub(cost))
        .ok_or(DeriskError::Overflow("profit"))?;

    Ok(ProfitProjection {
        sale_price,
        sale_fee: round_display(sale_fee),
        profit: round_display(profit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derisk_apis::{calculator::derisk_price, fees::FeeStatus};
    use rust_decimal_macros::dec;

    fn fees() -> FeeSchedule {
        FeeSchedule {
            royalty_pct: dec!(5),
            platform_pct: dec!(2.5),
            status: FeeStatus::Resolved,
        }
    }

    #[test]
    fn selling_at_the_derisk_price_breaks_even() {
        let price = derisk_price(dec!(2.0), dec!(0.00105), &fees()).unwrap();

        let exact = project_profit(price, dec!(2.0), dec!(0.00105), &fees()).unwrap();
        assert!(exact.profit.abs() <= dec!(0.0001));

        let displayed =
            project_profit(round_display(price), dec!(2.0), dec!(0.00105), &fees()).unwrap();
        assert!(displayed.profit.abs() <= dec!(0.0001));
    }

    #[test]
    fn losses_are_reported_not_clamped() {
        let projection = project_profit(dec!(1.5), dec!(2.0), dec!(0.00105), &fees()).unwrap();
        assert_eq!(projection.sale_fee, dec!(0.1125));
        assert_eq!(projection.profit, dec!(-0.6136));
    }

    #[test]
    fn zero_sale_loses_the_whole_cost() {
        let projection = project_profit(Decimal::ZERO, dec!(2.0), dec!(0.00105), &fees()).unwrap();
        assert_eq!(projection.sale_fee, Decimal::ZERO);
        assert_eq!(projection.profit, dec!(-2.0011));
    }

    #[test]
    fn negative_sale_price_is_rejected() {
        let err = project_profit(dec!(-1), dec!(2.0), dec!(0.00105), &fees()).unwrap_err();
        assert_eq!(err, DeriskError::NegativeSalePrice(dec!(-1)));
    }
}
