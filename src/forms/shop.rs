use crate::models::{ShopUpdate, Vendor};

use super::{require, FieldErrors};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopForm {
    pub name: String,
    pub description: String,
    pub location: String,
    pub delivery_time: String,
}

impl ShopForm {
    pub fn from_vendor(vendor: &Vendor) -> Self {
        Self {
            name: vendor.name.clone(),
            description: vendor.description.clone().unwrap_or_default(),
            location: vendor.location.clone(),
            delivery_time: vendor.delivery_time.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Shop name is required");
        require(&mut errors, "location", &self.location, "Location is required");
        errors.into_result()
    }

    /// Full-form update; text is sent exactly as entered.
    pub fn submit(&self) -> Result<ShopUpdate, FieldErrors> {
        self.validate()?;

        Ok(ShopUpdate {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            location: Some(self.location.clone()),
            delivery_time: Some(self.delivery_time.clone()),
            is_open: None,
        })
    }
}
