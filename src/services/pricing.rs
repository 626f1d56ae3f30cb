use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::utils::money::{Money, MoneyError};

/// Parse a hotel or flight component. Missing and non-numeric values count as
/// zero; negative or sub-paisa values are rejected.
pub fn lenient_component(raw: Option<&Value>, field: &str) -> AppResult<Money> {
    match raw {
        None | Some(Value::Null) => Ok(Money::ZERO),
        Some(value) => match Money::from_json(value) {
            Ok(amount) => Ok(amount),
            Err(MoneyError::NotANumber) => Ok(Money::ZERO),
            Err(e) => Err(AppError::Validation(format!("Invalid {}: {}", field, e))),
        },
    }
}

/// Parse a required amount; anything but a valid amount is a validation error.
pub fn required_amount(raw: Option<&Value>, field: &str) -> AppResult<Money> {
    match raw {
        None | Some(Value::Null) => Err(AppError::Validation(format!(
            "Missing required field: {}",
            field
        ))),
        Some(Value::String(s)) if s.trim().is_empty() => Err(AppError::Validation(format!(
            "Missing required field: {}",
            field
        ))),
        Some(value) => Money::from_json(value)
            .map_err(|e| AppError::Validation(format!("Invalid {}: {}", field, e))),
    }
}

/// Destination base price converted at `fx_rate` and rounded to a whole unit.
/// Shown to the traveller, never added to the booking total.
pub fn reference_price(base_price: Money, fx_rate: Decimal) -> AppResult<Money> {
    base_price
        .convert_rounded(fx_rate)
        .ok_or_else(|| AppError::Internal("Reference price overflow".to_string()))
}

/// The binding booking total.
pub fn expected_total(hotel_price: Money, flight_price: Money) -> AppResult<Money> {
    hotel_price
        .checked_add(flight_price)
        .ok_or_else(|| AppError::Validation("Total amount out of range".to_string()))
}

/// Exact comparison of a submitted total against the expected one.
pub fn reconcile(received: Money, expected: Money) -> AppResult<()> {
    if received != expected {
        tracing::warn!(%expected, %received, "Amount reconciliation failed");
        return Err(AppError::AmountMismatch { expected, received });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_components_default_to_zero() {
        assert_eq!(lenient_component(None, "hotel_price").unwrap(), Money::ZERO);
        assert_eq!(
            lenient_component(Some(&json!(null)), "hotel_price").unwrap(),
            Money::ZERO
        );
        assert_eq!(
            lenient_component(Some(&json!("n/a")), "hotel_price").unwrap(),
            Money::ZERO
        );
        assert_eq!(
            lenient_component(Some(&json!("1000")), "hotel_price").unwrap(),
            Money::from_minor(100_000)
        );
    }

    #[test]
    fn test_component_precision_is_rejected() {
        assert!(matches!(
            lenient_component(Some(&json!("10.001")), "flight_price"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_oversized_component_is_rejected_not_zeroed() {
        for raw in [json!("1e40"), json!("1e30"), json!(1e40)] {
            assert!(
                matches!(
                    lenient_component(Some(&raw), "hotel_price"),
                    Err(AppError::Validation(_))
                ),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_required_amount() {
        assert!(matches!(
            required_amount(None, "amount_paid"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            required_amount(Some(&json!("")), "amount_paid"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            required_amount(Some(&json!("lots")), "amount_paid"),
            Err(AppError::Validation(_))
        ));
        assert_eq!(
            required_amount(Some(&json!(2000)), "amount_paid").unwrap(),
            Money::from_minor(200_000)
        );
    }

    #[test]
    fn test_reference_price_is_informational() {
        let base = Money::from_major(1000).unwrap();
        assert_eq!(
            reference_price(base, Decimal::from(83)).unwrap(),
            Money::from_major(83_000).unwrap()
        );
    }

    #[test]
    fn test_reconcile_exact() {
        let hotel = Money::from_major(1000).unwrap();
        let flight = Money::from_major(1000).unwrap();
        let expected = expected_total(hotel, flight).unwrap();

        assert!(reconcile(Money::from_major(2000).unwrap(), expected).is_ok());

        match reconcile(Money::from_major(1500).unwrap(), expected) {
            Err(AppError::AmountMismatch { expected, received }) => {
                assert_eq!(expected, Money::from_major(2000).unwrap());
                assert_eq!(received, Money::from_major(1500).unwrap());
            }
            other => panic!("expected mismatch, got {:?}", other),
        }

        // One paisa off is still a mismatch
        assert!(reconcile(Money::from_minor(199_999), expected).is_err());
    }
}
