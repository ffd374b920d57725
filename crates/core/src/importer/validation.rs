use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::import::ValidationError;
use crate::models::transaction::{CashDirection, NormalizedTransaction};

/// Check every data-model invariant of `tx` and report all violations at once.
///
/// `today` is the import date; pass `None` to skip the future-date rule.
pub fn validate_transaction(
    tx: &NormalizedTransaction,
    today: Option<NaiveDate>,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let kind = tx.transaction_type;

    if let Some(q) = tx.quantity {
        if q < Decimal::ZERO {
            errors.push(ValidationError::NegativeQuantity(q));
        }
    }
    if let Some(p) = tx.price {
        if p < Decimal::ZERO {
            errors.push(ValidationError::NegativePrice(p));
        }
    }
    if tx.commission < Decimal::ZERO {
        errors.push(ValidationError::NegativeCommission(tx.commission));
    }

    if !tx.has_paired_trade_details() {
        errors.push(ValidationError::UnpairedTradeDetails);
    } else if kind.is_trade() && tx.quantity.is_none() {
        errors.push(ValidationError::MissingTradeDetails(kind));
    } else if !kind.is_trade() && tx.quantity.is_some() {
        errors.push(ValidationError::UnexpectedTradeDetails(kind));
    }

    if tx.ticker.is_some() && !kind.carries_ticker() {
        errors.push(ValidationError::UnexpectedTicker(kind));
    }

    let wrong_sign = match kind.direction() {
        CashDirection::Inflow => tx.total_amount < Decimal::ZERO,
        CashDirection::Outflow => tx.total_amount > Decimal::ZERO,
        CashDirection::AsReported => false,
    };
    if wrong_sign {
        errors.push(ValidationError::WrongSign {
            transaction_type: kind,
            amount: tx.total_amount,
        });
    }

    if let Some(today) = today {
        if tx.transaction_date > today {
            errors.push(ValidationError::FutureDate {
                date: tx.transaction_date,
                today,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::TransactionType;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn tx(kind: TransactionType, amount: Decimal) -> NormalizedTransaction {
        NormalizedTransaction {
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            transaction_type: kind,
            ticker: None,
            quantity: None,
            price: None,
            total_amount: amount,
            commission: Decimal::ZERO,
            notes: None,
            import_batch_id: Uuid::new_v4(),
            source_label: kind.to_string(),
            source_id: None,
            row_number: 1,
        }
    }

    #[test]
    fn valid_withdrawal() {
        assert!(validate_transaction(&tx(TransactionType::Withdrawal, dec!(-500)), None).is_ok());
    }

    #[test]
    fn collects_all_violations() {
        let mut t = tx(TransactionType::Deposit, dec!(-10));
        t.ticker = Some("AAPL.US".into());
        t.quantity = Some(dec!(-1));
        t.commission = dec!(-2);
        let errors = validate_transaction(&t, None).unwrap_err();
        assert!(errors.contains(&ValidationError::NegativeQuantity(dec!(-1))));
        assert!(errors.contains(&ValidationError::NegativeCommission(dec!(-2))));
        assert!(errors.contains(&ValidationError::UnpairedTradeDetails));
        assert!(errors.contains(&ValidationError::UnexpectedTicker(TransactionType::Deposit)));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::WrongSign { .. })));
    }

    #[test]
    fn trade_needs_details() {
        let t = tx(TransactionType::Buy, dec!(-1500));
        assert_eq!(
            validate_transaction(&t, None).unwrap_err(),
            vec![ValidationError::MissingTradeDetails(TransactionType::Buy)]
        );
    }

    #[test]
    fn future_date_only_checked_with_today() {
        let t = tx(TransactionType::Deposit, dec!(100));
        let yesterday = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        assert!(validate_transaction(&t, None).is_ok());
        assert!(matches!(
            validate_transaction(&t, Some(yesterday)).unwrap_err()[0],
            ValidationError::FutureDate { .. }
        ));
    }

    #[test]
    fn other_keeps_any_sign() {
        assert!(validate_transaction(&tx(TransactionType::Other, dec!(-3)), None).is_ok());
        assert!(validate_transaction(&tx(TransactionType::Other, dec!(3)), None).is_ok());
    }
}
