//! Core data models for the parts service.
//!
//! [`Part`] is the persisted entity. [`NewPart`] and [`PartUpdate`] are the
//! creation and partial-update payloads; both are validated here so every
//! store enforces the same field constraints before persisting anything.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const NAME_MAX_LEN: usize = 150;
pub const SKU_MAX_LEN: usize = 30;
pub const DESCRIPTION_MAX_LEN: usize = 1024;

/// A part record as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub weight_ounces: i64,
    pub is_active: bool,
}

/// Payload for creating a part. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPart {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub description: Option<String>,
    pub weight_ounces: i64,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

/// Partial update. `None` leaves the stored value untouched, so a JSON
/// `null` and an omitted key behave the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub weight_ounces: Option<i64>,
    pub is_active: Option<bool>,
}

/// One entry of the most-common-words report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: i64,
}

impl NewPart {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_sku(&self.sku)?;
        if let Some(ref description) = self.description {
            validate_description(description)?;
        }
        validate_weight(self.weight_ounces)
    }
}

impl PartUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref name) = self.name {
            validate_name(name)?;
        }
        if let Some(ref sku) = self.sku {
            validate_sku(sku)?;
        }
        if let Some(ref description) = self.description {
            validate_description(description)?;
        }
        if let Some(weight) = self.weight_ounces {
            validate_weight(weight)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sku.is_none()
            && self.description.is_none()
            && self.weight_ounces.is_none()
            && self.is_active.is_none()
    }
}

impl Part {
    pub fn from_new(id: i64, new: NewPart) -> Self {
        Self {
            id,
            name: new.name,
            sku: new.sku,
            description: new.description,
            weight_ounces: new.weight_ounces,
            is_active: new.is_active,
        }
    }

    /// Overwrite every field that is present in `update`.
    pub fn apply(&mut self, update: PartUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(sku) = update.sku {
            self.sku = sku;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(weight) = update.weight_ounces {
            self.weight_ounces = weight;
        }
        if let Some(active) = update.is_active {
            self.is_active = active;
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Name must not be empty."));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(Error::validation(format!(
            "Name must be at most {} characters.",
            NAME_MAX_LEN
        )));
    }
    Ok(())
}

fn validate_sku(sku: &str) -> Result<()> {
    if sku.trim().is_empty() {
        return Err(Error::validation("SKU must not be empty."));
    }
    if sku.chars().count() > SKU_MAX_LEN {
        return Err(Error::validation(format!(
            "SKU must be at most {} characters.",
            SKU_MAX_LEN
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(Error::validation(format!(
            "Description must be at most {} characters.",
            DESCRIPTION_MAX_LEN
        )));
    }
    Ok(())
}

fn validate_weight(weight: i64) -> Result<()> {
    if weight < 0 {
        return Err(Error::validation("Weight must be non-negative."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewPart {
        NewPart {
            name: "Bracket".to_string(),
            sku: "BRK-001".to_string(),
            description: Some("Steel mounting bracket".to_string()),
            weight_ounces: 12,
            is_active: true,
        }
    }

    #[test]
    fn test_valid_part_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut part = sample();
        part.weight_ounces = -1;
        let err = part.validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.to_string(), "Weight must be non-negative.");
    }

    #[test]
    fn test_zero_weight_allowed() {
        let mut part = sample();
        part.weight_ounces = 0;
        assert!(part.validate().is_ok());
    }

    #[test]
    fn test_blank_name_and_sku_rejected() {
        let mut part = sample();
        part.name = "   ".to_string();
        assert!(part.validate().is_err());

        let mut part = sample();
        part.sku = String::new();
        assert!(part.validate().is_err());
    }

    #[test]
    fn test_length_limits() {
        let mut part = sample();
        part.sku = "X".repeat(SKU_MAX_LEN + 1);
        assert!(part.validate().is_err());

        let mut part = sample();
        part.name = "n".repeat(NAME_MAX_LEN);
        assert!(part.validate().is_ok());
        part.description = Some("d".repeat(DESCRIPTION_MAX_LEN + 1));
        assert!(part.validate().is_err());
    }

    #[test]
    fn test_new_part_defaults_from_json() {
        let part: NewPart =
            serde_json::from_str(r#"{"name":"A","sku":"S1","weight_ounces":3}"#).unwrap();
        assert!(part.is_active);
        assert_eq!(part.description, None);
    }

    #[test]
    fn test_update_null_and_missing_are_none() {
        let update: PartUpdate =
            serde_json::from_str(r#"{"name":"New","description":null}"#).unwrap();
        assert_eq!(update.name.as_deref(), Some("New"));
        assert!(update.description.is_none());
        assert!(update.sku.is_none());
        assert!(!update.is_empty());
        assert!(PartUpdate::default().is_empty());
    }

    #[test]
    fn test_apply_only_touches_present_fields() {
        let mut part = Part::from_new(7, sample());
        part.apply(PartUpdate {
            weight_ounces: Some(40),
            is_active: Some(false),
            ..Default::default()
        });
        assert_eq!(part.id, 7);
        assert_eq!(part.name, "Bracket");
        assert_eq!(part.sku, "BRK-001");
        assert_eq!(part.description.as_deref(), Some("Steel mounting bracket"));
        assert_eq!(part.weight_ounces, 40);
        assert!(!part.is_active);
    }

    #[test]
    fn test_update_validation() {
        let update = PartUpdate {
            weight_ounces: Some(-5),
            ..Default::default()
        };
        assert!(update.validate().is_err());
        assert!(PartUpdate::default().validate().is_ok());
    }
}
