//! Customer records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use choco_shelf_core::{CustomerId, Email};

/// A stored customer.
///
/// Customers are unique by email: writing details for an email that already
/// exists merges into the stored record instead of appending a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Email address, the natural dedup key.
    pub email: Email,
    /// Display name, if given.
    pub name: Option<String>,
    /// Phone number, if given.
    pub phone: Option<String>,
    /// Whether the customer opted into marketing mail.
    pub accepts_marketing: bool,
    /// When the record was first created.
    pub created_at: DateTime<Utc>,
    /// When the record was last merged into.
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Merge `input` into this record, overwriting only the fields the input
    /// actually carries, and touch `updated_at`.
    pub fn merge(&mut self, input: CustomerInput, at: DateTime<Utc>) {
        self.email = input.email;
        if input.name.is_some() {
            self.name = input.name;
        }
        if input.phone.is_some() {
            self.phone = input.phone;
        }
        if let Some(accepts) = input.accepts_marketing {
            self.accepts_marketing = accepts;
        }
        self.updated_at = at;
    }
}

/// Incoming customer details, e.g. from a checkout form.
///
/// Optional fields left as `None` leave the stored value untouched on merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInput {
    /// Email address (required - it is the dedup key).
    pub email: Email,
    /// Display name.
    pub name: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Marketing opt-in; `None` keeps the stored choice.
    pub accepts_marketing: Option<bool>,
}

impl CustomerInput {
    /// Input carrying only an email.
    #[must_use]
    pub const fn from_email(email: Email) -> Self {
        Self {
            email,
            name: None,
            phone: None,
            accepts_marketing: None,
        }
    }
}
