use rust_decimal::Decimal;

use crate::error::QuantityError;

/// Subunit exponent of the native currency (wei per ether).
pub const WEI_DECIMALS: u32 = 18;

fn strip_0x(raw: &str) -> Option<&str> {
    raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X"))
}

/// Parses an integer quantity, hex when `0x`-prefixed and decimal otherwise.
pub fn parse_quantity(raw: &str) -> Result<u128, QuantityError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QuantityError::Empty);
    }

    let (digits, radix) = match strip_0x(trimmed) {
        Some(hex) => (hex, 16),
        None => (trimmed, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(QuantityError::Invalid(raw.to_string()));
    }

    u128::from_str_radix(digits, radix).map_err(|_| QuantityError::Overflow(raw.to_string()))
}

pub fn parse_gas(raw: &str) -> Result<u64, QuantityError> {
    let value = parse_quantity(raw)?;
    u64::try_from(value).map_err(|_| QuantityError::Overflow(raw.to_string()))
}

/// Converts a subunit amount into whole-currency units.
pub fn wei_to_ether(raw: &str) -> Result<Decimal, QuantityError> {
    let wei = parse_quantity(raw)?;
    let wei = i128::try_from(wei).map_err(|_| QuantityError::Overflow(raw.to_string()))?;
    Decimal::try_from_i128_with_scale(wei, WEI_DECIMALS)
        .map(|ether| ether.normalize())
        .map_err(|_| QuantityError::Overflow(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn one_ether_in_wei_is_one() {
        assert_eq!(wei_to_ether("1000000000000000000").unwrap(), Decimal::ONE);
        assert_eq!(wei_to_ether("0xde0b6b3a7640000").unwrap(), Decimal::ONE);
    }

    #[test]
    fn fractional_amounts_are_exact() {
        // 50 gwei
        assert_eq!(wei_to_ether("0xba43b7400").unwrap(), dec!(0.00000005));
        assert_eq!(wei_to_ether("0x0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn gas_accepts_both_radixes() {
        assert_eq!(parse_gas("0x5208").unwrap(), 21000);
        assert_eq!(parse_gas("21000").unwrap(), 21000);
        assert!(matches!(
            parse_gas("0x10000000000000000"),
            Err(QuantityError::Overflow(_))
        ));
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert_eq!(parse_quantity("   "), Err(QuantityError::Empty));
        assert!(matches!(parse_quantity("0x"), Err(QuantityError::Invalid(_))));
        assert!(matches!(parse_quantity("12ab"), Err(QuantityError::Invalid(_))));
        assert!(matches!(parse_quantity("-5"), Err(QuantityError::Invalid(_))));
    }

    #[test]
    fn amounts_beyond_decimal_precision_overflow() {
        let huge = format!("0x{}", "f".repeat(30));
        assert!(matches!(wei_to_ether(&huge), Err(QuantityError::Overflow(_))));
    }
}
