//! Field and schema validators used by the form schemas

use std::borrow::Cow;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::ValidationError;

use crate::forms::MovementForm;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Reject empty or whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "Este campo es obligatorio"));
    }
    Ok(())
}

/// Buying prices may be zero (donations) but never negative
pub fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(error("negative_price", "El precio no puede ser negativo"));
    }
    Ok(())
}

/// Copy fields reach custom validators by value
pub fn positive_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity < 1 {
        return Err(error("quantity", "La cantidad debe ser mayor a 0"));
    }
    Ok(())
}

pub fn percentage(value: u8) -> Result<(), ValidationError> {
    if value > 100 {
        return Err(error("percentage", "El avance debe estar entre 0 y 100"));
    }
    Ok(())
}

/// A movement list must hold at least one line and each product at most once
pub fn validate_movement_list(movements: &[MovementForm]) -> Result<(), ValidationError> {
    if movements.is_empty() {
        return Err(error("movements_required", "Agregue al menos un producto"));
    }
    for (idx, movement) in movements.iter().enumerate() {
        if movements[..idx]
            .iter()
            .any(|earlier| earlier.product_id == movement.product_id)
        {
            return Err(error("duplicate_product", "Un producto aparece más de una vez"));
        }
    }
    Ok(())
}

/// Origin and destination of a transference must differ
pub fn validate_distinct_storages(origin: &str, destination: &str) -> Result<(), ValidationError> {
    if origin == destination {
        return Err(error(
            "same_storage",
            "El almacén de destino debe ser distinto al de origen",
        ));
    }
    Ok(())
}

/// An end date may not precede the start date
pub fn validate_date_range(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), ValidationError> {
    match end {
        Some(end) if end < start => Err(error(
            "invalid_date_range",
            "La fecha de fin no puede ser anterior a la de inicio",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str) -> MovementForm {
        MovementForm {
            product_id: product_id.to_string(),
            quantity: 1,
            buying_price: None,
            date: None,
        }
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("wh-1").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_non_negative_price() {
        assert!(non_negative_price(&Decimal::ZERO).is_ok());
        assert!(non_negative_price(&Decimal::new(1999, 2)).is_ok());
        assert!(non_negative_price(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_numeric_bounds() {
        assert!(positive_quantity(1).is_ok());
        assert_eq!(positive_quantity(0).unwrap_err().code, "quantity");
        assert!(positive_quantity(-3).is_err());
        assert!(percentage(100).is_ok());
        assert_eq!(percentage(101).unwrap_err().code, "percentage");
    }

    #[test]
    fn test_movement_list_rules() {
        assert_eq!(
            validate_movement_list(&[]).unwrap_err().code,
            "movements_required"
        );
        assert!(validate_movement_list(&[line("a"), line("b")]).is_ok());
        assert_eq!(
            validate_movement_list(&[line("a"), line("b"), line("a")])
                .unwrap_err()
                .code,
            "duplicate_product"
        );
    }

    #[test]
    fn test_distinct_storages() {
        assert!(validate_distinct_storages("wh-1", "wh-2").is_ok());
        assert!(validate_distinct_storages("wh-1", "wh-1").is_err());
    }

    #[test]
    fn test_date_range() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert!(validate_date_range(start, None).is_ok());
        assert!(validate_date_range(start, Some(start)).is_ok());
        assert!(validate_date_range(start, NaiveDate::from_ymd_opt(2024, 3, 9)).is_err());
    }
}
