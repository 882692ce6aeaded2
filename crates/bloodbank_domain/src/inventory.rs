//! Blood units held in inventory

use chrono::{DateTime, NaiveDate, Utc};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::dates::{self, timestamp};
use crate::error::Result;
use crate::record::{FieldCheck, Record};

/// Availability of a unit. Nothing moves a unit between states
/// automatically; in particular a unit past its expiry date stays
/// `Available` until someone changes it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Display, PartialEq, Eq)]
pub enum UnitStatus {
    #[default]
    Available,
    Used,
    Expired,
}

/// A single collected blood unit
#[derive(Debug, Clone, Serialize, Deserialize, Setters, PartialEq)]
#[serde(rename_all = "camelCase")]
#[setters(strip_option, into)]
pub struct InventoryUnit {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub blood_type: String,
    /// Identifier of the donor the unit came from. Not checked against the
    /// donor collection and left dangling if the donor is deleted.
    pub donor_id: String,
    pub collection_date: NaiveDate,
    /// Always `collection_date` plus the shelf life, fixed at creation
    pub expiry_date: NaiveDate,
    #[serde(default)]
    pub status: UnitStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Record for InventoryUnit {
    const COLLECTION: &'static str = "inventory";
    const ORDER_FIELD: &'static str = "createdAt";
    const NAME: &'static str = "Blood unit";

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

/// Body of a unit creation request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryUnit {
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub donor_id: Option<String>,
    #[serde(default, deserialize_with = "dates::deserialize_lenient_date")]
    pub collection_date: Option<NaiveDate>,
}

impl NewInventoryUnit {
    /// Check required fields, derive the expiry date and build the unit to
    /// persist. New units are always `Available`.
    pub fn into_unit(self, created_at: DateTime<Utc>) -> Result<InventoryUnit> {
        let mut check = FieldCheck::new(InventoryUnit::NAME);
        let blood_type = check.text("bloodType", self.blood_type);
        let donor_id = check.text("donorId", self.donor_id);
        let collection_date = check.present("collectionDate", self.collection_date);
        let expiry_date = collection_date.and_then(|collected| {
            let expiry = dates::expiry_date(collected);
            if expiry.is_none() {
                check.issue("`collectionDate` is out of range");
            }
            expiry
        });

        let (Some(blood_type), Some(donor_id), Some(collection_date), Some(expiry_date)) =
            (blood_type, donor_id, collection_date, expiry_date)
        else {
            return Err(check.into_error());
        };

        Ok(InventoryUnit {
            id: None,
            blood_type,
            donor_id,
            collection_date,
            expiry_date,
            status: UnitStatus::Available,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_into_unit_derives_expiry_across_month_boundary() {
        let fixture: NewInventoryUnit = serde_json::from_value(json!({
            "bloodType": "A+",
            "donorId": "d-1",
            "collectionDate": "2024-01-01"
        }))
        .unwrap();

        let actual = fixture.into_unit(Utc::now()).unwrap();

        assert_eq!(actual.expiry_date, NaiveDate::from_ymd_opt(2024, 2, 5).unwrap());
        assert_eq!(actual.status, UnitStatus::Available);
    }

    #[test]
    fn test_collection_date_accepts_timestamp() {
        let fixture: NewInventoryUnit = serde_json::from_value(json!({
            "bloodType": "A+",
            "donorId": "d-1",
            "collectionDate": "2024-12-31T10:00:00.000Z"
        }))
        .unwrap();

        let actual = fixture.collection_date;
        let expected = NaiveDate::from_ymd_opt(2024, 12, 31);

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_invalid_collection_date_is_rejected() {
        let actual = serde_json::from_value::<NewInventoryUnit>(json!({
            "bloodType": "A+",
            "donorId": "d-1",
            "collectionDate": "yesterday"
        }));

        assert!(actual.is_err());
    }

    #[test]
    fn test_into_unit_requires_collection_date() {
        let fixture = NewInventoryUnit {
            blood_type: Some("A+".to_string()),
            donor_id: Some("d-1".to_string()),
            collection_date: None,
        };

        let actual = fixture.into_unit(Utc::now()).unwrap_err().to_string();
        let expected = "Blood unit validation failed: `collectionDate` is required";

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_status_defaults_to_available_when_absent() {
        let actual: InventoryUnit = serde_json::from_value(json!({
            "_id": "u-1",
            "bloodType": "B+",
            "donorId": "d-1",
            "collectionDate": "2024-01-01",
            "expiryDate": "2024-02-05",
            "createdAt": "2024-01-01T09:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(actual.status, UnitStatus::Available);
        assert_eq!(actual.id.as_deref(), Some("u-1"));
    }
}
