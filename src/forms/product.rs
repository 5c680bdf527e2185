use crate::models::{Product, ProductInput};

use super::{require, FieldErrors};

pub const DEFAULT_PREP_TIME_MINUTES: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub prep_time_minutes: String,
    pub is_available: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            prep_time_minutes: DEFAULT_PREP_TIME_MINUTES.to_string(),
            is_available: true,
        }
    }
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.clone(),
            prep_time_minutes: product.prep_time_minutes.to_string(),
            is_available: product.is_available,
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require(&mut errors, "price", &self.price, "Price is required");
        errors.into_result()
    }

    pub fn submit(&self) -> Result<ProductInput, FieldErrors> {
        self.validate()?;

        Ok(ProductInput {
            name: self.name.clone(),
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
            price: self.price.clone(),
            prep_time_minutes: parse_prep_time(&self.prep_time_minutes)
                .filter(|minutes| *minutes != 0)
                .unwrap_or(DEFAULT_PREP_TIME_MINUTES),
            is_available: self.is_available,
        })
    }
}

/// Leading-integer parse: skips leading whitespace, takes an optional sign and
/// the digits that follow, ignores whatever comes after. `None` when no digit
/// is found. Digit runs past `i64` saturate, so the backend sees an
/// out-of-range value instead of the default.
pub fn parse_prep_time(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    // Only overflow can fail here: the slice is a non-empty run of ASCII digits.
    let value: i64 = rest[..digits_end].parse().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ProductForm {
        ProductForm {
            name: "Lentil soup".to_string(),
            price: "5.25".to_string(),
            ..ProductForm::default()
        }
    }

    #[test]
    fn defaults_match_add_dialog() {
        let form = ProductForm::default();
        assert_eq!(form.prep_time_minutes, "10");
        assert!(form.is_available);
        assert!(form.name.is_empty());
    }

    #[test]
    fn missing_name_and_price_are_reported_together() {
        let errors = ProductForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("price"), Some("Price is required"));
    }

    #[test]
    fn unparsable_prep_time_falls_back_to_ten() {
        for raw in ["", "abc", "  ", "-", "zero"] {
            let form = ProductForm {
                prep_time_minutes: raw.to_string(),
                ..filled()
            };
            assert_eq!(form.submit().unwrap().prep_time_minutes, 10, "input {:?}", raw);
        }
    }

    #[test]
    fn zero_prep_time_also_falls_back_to_ten() {
        let form = ProductForm {
            prep_time_minutes: "0".to_string(),
            ..filled()
        };
        assert_eq!(form.submit().unwrap().prep_time_minutes, 10);
    }

    #[test]
    fn prep_time_takes_leading_integer() {
        assert_eq!(parse_prep_time("25"), Some(25));
        assert_eq!(parse_prep_time(" 7 minutes"), Some(7));
        assert_eq!(parse_prep_time("12.9"), Some(12));
        assert_eq!(parse_prep_time("-3"), Some(-3));
        assert_eq!(parse_prep_time("+4"), Some(4));
        assert_eq!(parse_prep_time("x12"), None);
    }

    #[test]
    fn oversized_prep_time_saturates_instead_of_defaulting() {
        assert_eq!(parse_prep_time("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_prep_time("-99999999999999999999999"), Some(-i64::MAX));

        let form = ProductForm {
            prep_time_minutes: "123456789012345678901234567890 min".to_string(),
            ..filled()
        };
        assert_eq!(form.submit().unwrap().prep_time_minutes, i64::MAX);
    }

    #[test]
    fn omitted_description_is_submitted_as_none() {
        let input = filled().submit().unwrap();
        assert_eq!(input.description, None);

        let input = ProductForm {
            description: "Red lentils, cumin".to_string(),
            ..filled()
        }
        .submit()
        .unwrap();
        assert_eq!(input.description.as_deref(), Some("Red lentils, cumin"));
    }

    #[test]
    fn edit_prefill_round_trips_product_fields() {
        let product = Product {
            id: 4,
            name: "Tea".to_string(),
            description: None,
            price: "1.20".to_string(),
            prep_time_minutes: 3,
            is_available: false,
        };

        let form = ProductForm::from_product(&product);
        assert_eq!(form.description, "");
        assert_eq!(form.prep_time_minutes, "3");
        assert!(!form.is_available);

        let input = form.submit().unwrap();
        assert_eq!(input.prep_time_minutes, 3);
        assert_eq!(input.price, "1.20");
    }
}
