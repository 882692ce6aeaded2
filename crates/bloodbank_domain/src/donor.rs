//! Donor records

use chrono::{DateTime, NaiveDate, Utc};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

use crate::dates::timestamp;
use crate::error::Result;
use crate::record::{FieldCheck, Record};

/// A registered blood donor
#[derive(Debug, Clone, Serialize, Deserialize, Setters, PartialEq)]
#[serde(rename_all = "camelCase")]
#[setters(strip_option, into)]
pub struct Donor {
    /// Store-assigned identifier
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub blood_type: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Collection date of the donor's most recent recorded unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_donation: Option<NaiveDate>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Record for Donor {
    const COLLECTION: &'static str = "donors";
    const ORDER_FIELD: &'static str = "createdAt";
    const NAME: &'static str = "Donor";

    fn document_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn with_id(self, id: String) -> Self {
        Self { id: Some(id), ..self }
    }

    fn ordered_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Body of a donor creation request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl NewDonor {
    /// Check required fields and build the donor to persist
    pub fn into_donor(self, created_at: DateTime<Utc>) -> Result<Donor> {
        let mut check = FieldCheck::new(Donor::NAME);
        let name = check.text("name", self.name);
        let blood_type = check.text("bloodType", self.blood_type);
        let phone = check.text("phone", self.phone);
        let email = check.text("email", self.email);
        let address = check.text("address", self.address);

        let (Some(name), Some(blood_type), Some(phone), Some(email), Some(address)) =
            (name, blood_type, phone, email, address)
        else {
            return Err(check.into_error());
        };

        Ok(Donor {
            id: None,
            name,
            blood_type,
            phone,
            email,
            address,
            last_donation: None,
            created_at,
        })
    }
}
