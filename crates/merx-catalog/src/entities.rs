//! # Catalog Entities
//!
//! Domain entities exchanged between the services and their repository
//! collaborators. Every entity carries a UUID v4 primary key (unique
//! without coordination) and a creation timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::data_access::Keyed;

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,

    /// Disabled categories do not count toward the category floor rule.
    pub enabled: bool,

    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            id: Uuid::new_v4(),
            name: name.into(),
            enabled: true,
            created_at: Utc::now(),
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,

    /// Price in cents (smallest currency unit, no floating point).
    pub unit_price_cents: i64,

    pub units_in_stock: i64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(category_id: Uuid, name: impl Into<String>, unit_price_cents: i64) -> Self {
        Product {
            id: Uuid::new_v4(),
            category_id,
            name: name.into(),
            unit_price_cents,
            units_in_stock: 0,
            created_at: Utc::now(),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        User {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}

impl Keyed for Category {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for Product {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for User {
    fn key(&self) -> Uuid {
        self.id
    }
}
