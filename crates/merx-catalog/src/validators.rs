//! # Entity Validators
//!
//! `Validate` implementations surfaced by the validation aspect.
//!
//! Violations are reported in rule-declaration order; the aspect shows
//! only the first one, so order the cheap structural rules before the
//! cosmetic ones.

use merx_core::validation::Validate;

use crate::entities::{Product, User};

impl Validate for Product {
    fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            violations.push("Product name must not be empty".to_string());
        } else if name.chars().count() < 2 {
            violations.push("Product name must be at least 2 characters".to_string());
        }

        if self.unit_price_cents <= 0 {
            violations.push("Unit price must be greater than zero".to_string());
        }

        if self.units_in_stock < 0 {
            violations.push("Units in stock must not be negative".to_string());
        }

        violations
    }
}

impl Validate for User {
    fn violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if self.first_name.trim().is_empty() {
            violations.push("First name must not be empty".to_string());
        }

        if self.last_name.trim().is_empty() {
            violations.push("Last name must not be empty".to_string());
        }

        // Structural check only; deliverability is the mail system's problem
        let email = self.email.trim();
        let well_formed = match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.'),
            None => false,
        };
        if !well_formed {
            violations.push("Email address is not well formed".to_string());
        }

        violations
    }
}
