use field_blockchain_data::CollectionMetadata;
use rust_decimal::Decimal;
use serde::Serialize;

/// Where the fee percentages came from. Anything but `Resolved` means zero fees were
/// substituted and the ui should flag them instead of showing `0%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeStatus {
    Resolved,
    Pending,
    UnknownContract,
    AddressUnresolved,
    MarketplaceUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeSchedule {
    pub royalty_pct: Decimal,
    pub platform_pct: Decimal,
    pub status: FeeStatus,
}

impl FeeSchedule {
    pub fn zero(status: FeeStatus) -> Self {
        FeeSchedule {
            royalty_pct: Decimal::ZERO,
            platform_pct: Decimal::ZERO,
            status,
        }
    }

    pub fn from_metadata(metadata: &CollectionMetadata) -> Self {
        if metadata.is_unknown_contract() {
            return FeeSchedule::zero(FeeStatus::UnknownContract);
        }
        FeeSchedule {
            royalty_pct: bps_to_pct(metadata.royalty_bps()),
            platform_pct: bps_to_pct(metadata.platform_fee_bps()),
            status: FeeStatus::Resolved,
        }
    }

    pub fn total_pct(&self) -> Decimal {
        self.royalty_pct + self.platform_pct
    }

    pub fn is_flagged(&self) -> bool {
        self.status != FeeStatus::Resolved
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule::zero(FeeStatus::AddressUnresolved)
    }
}

pub fn bps_to_pct(bps: u32) -> Decimal {
    Decimal::new(i64::from(bps), 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use field_blockchain_data::{CollectionRef, ContractType};
    use rust_decimal_macros::dec;

    fn metadata(
        contract_type: ContractType,
        royalty: Option<u32>,
        platform: Option<u32>,
    ) -> CollectionMetadata {
        CollectionMetadata {
            address: "0xfe8c6d19365453d26af321d0e8c910428c23873f".to_string(),
            name: Some("CREEPZ".to_string()),
            dev_seller_fee_basis_points: royalty,
            opensea_seller_fee_basis_points: platform,
            asset_contract_type: contract_type,
            collection: Some(CollectionRef {
                slug: "genesis-creepz".to_string(),
                name: None,
                image_url: None,
            }),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn basis_points_become_percent() {
        let fees =
            FeeSchedule::from_metadata(&metadata(ContractType::NonFungible, Some(500), Some(250)));
        assert_eq!(fees.royalty_pct, dec!(5));
        assert_eq!(fees.platform_pct, dec!(2.5));
        assert_eq!(fees.total_pct(), dec!(7.5));
        assert!(!fees.is_flagged());
    }

    #[test]
    fn unknown_contract_zeroes_and_flags() {
        let fees =
            FeeSchedule::from_metadata(&metadata(ContractType::Unknown, Some(1000), Some(250)));
        assert_eq!(fees.total_pct(), Decimal::ZERO);
        assert_eq!(fees.status, FeeStatus::UnknownContract);
        assert!(fees.is_flagged());
    }

    #[test]
    fn missing_basis_points_default_to_zero() {
        let fees =
            FeeSchedule::from_metadata(&metadata(ContractType::SemiFungible, None, Some(250)));
        assert_eq!(fees.royalty_pct, Decimal::ZERO);
        assert_eq!(fees.platform_pct, dec!(2.5));
    }
}
