//! Validation helpers shared by the back-office write paths

use rust_decimal::Decimal;

/// Validate a client name: required, non-blank, bounded.
pub fn validate_client_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Client name is required");
    }
    if trimmed.len() > 200 {
        return Err("Client name must be at most 200 characters");
    }
    Ok(())
}

/// Validate a line quantity (cart line, import row).
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity < 1 {
        return Err("Quantity must be at least 1");
    }
    Ok(())
}

/// Validate a unit price or cost.
pub fn validate_unit_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

/// Validate that a sale quantity does not exceed on-hand stock.
pub fn validate_sale_quantity(quantity: i32, on_hand: i32) -> Result<(), &'static str> {
    validate_quantity(quantity)?;
    if quantity > on_hand {
        return Err("Sale quantity exceeds on-hand stock");
    }
    Ok(())
}

/// Validate a French postal code (5 digits) when provided.
pub fn validate_postal_code(code: &str) -> Result<(), &'static str> {
    if code.len() != 5 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err("Postal code must be 5 digits");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn client_name_rejects_blank() {
        assert!(validate_client_name("").is_err());
        assert!(validate_client_name("   ").is_err());
        assert!(validate_client_name("Garage Dupont").is_ok());
    }

    #[test]
    fn quantity_bounds() {
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1).is_ok());
    }

    #[test]
    fn sale_quantity_capped_by_stock() {
        assert!(validate_sale_quantity(2, 4).is_ok());
        assert!(validate_sale_quantity(4, 4).is_ok());
        assert!(validate_sale_quantity(5, 4).is_err());
    }

    #[test]
    fn price_cannot_be_negative() {
        assert!(validate_unit_price(Decimal::ZERO).is_ok());
        assert!(validate_unit_price(Decimal::from(-1)).is_err());
    }

    #[test]
    fn postal_code_format() {
        assert!(validate_postal_code("57000").is_ok());
        assert!(validate_postal_code("5700").is_err());
        assert!(validate_postal_code("5700A").is_err());
    }
}
