//! Dish model

use crate::core::error::BistroResult;
use crate::core::id::RecordId;
use crate::core::payload::{validated_integer, validated_text};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A dish on the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image_url: String,
}

impl_record!(Dish, "Dish", "dishes");

/// Dish fields taken from a validated payload
#[derive(Debug, Clone, PartialEq)]
pub struct DishDraft {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image_url: String,
}

impl DishDraft {
    pub fn from_payload(data: &Map<String, Value>) -> BistroResult<Self> {
        Ok(Self {
            name: validated_text(data, "name")?,
            description: validated_text(data, "description")?,
            price: validated_integer(data.get("price"), "price")?,
            image_url: validated_text(data, "image_url")?,
        })
    }

    pub fn into_dish(self, id: RecordId) -> Dish {
        Dish {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
        }
    }

    /// Overwrite every editable field; the id stays
    pub fn apply_to(self, dish: &mut Dish) {
        dish.name = self.name;
        dish.description = self.description;
        dish.price = self.price;
        dish.image_url = self.image_url;
    }
}
