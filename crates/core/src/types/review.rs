//! Customer review record and submission payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ReviewId, ValidationError, sanitize};

/// Maximum length of a reviewer name or city.
pub const REVIEWER_MAX: usize = 120;
/// Review text length bounds.
pub const TEXT_MIN: usize = 5;
pub const TEXT_MAX: usize = 1000;

/// A published review. Append-only; immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub name: String,
    #[serde(default)]
    pub city: String,
    /// Star rating, 1..=5.
    pub rating: u8,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for submitting a review (`POST /api/reviews`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub text: String,
    pub rating: u8,
}

impl ReviewDraft {
    /// Strip angle brackets and surrounding whitespace from the free-text
    /// fields before validation or submission.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.name = sanitize(&self.name);
        self.city = self.city.as_deref().map(sanitize);
        self.text = sanitize(&self.text);
        self
    }

    /// Validate the submission.
    ///
    /// # Errors
    ///
    /// Returns the first failing field: name 1..=120 characters, city at
    /// most 120, text 5..=1000, rating 1..=5.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }
        if self.name.len() > REVIEWER_MAX {
            return Err(ValidationError::new(
                "name",
                format!("must be at most {REVIEWER_MAX} characters"),
            ));
        }
        if self.city.as_deref().is_some_and(|c| c.len() > REVIEWER_MAX) {
            return Err(ValidationError::new(
                "city",
                format!("must be at most {REVIEWER_MAX} characters"),
            ));
        }
        let text_len = self.text.trim().len();
        if text_len < TEXT_MIN || text_len > TEXT_MAX {
            return Err(ValidationError::new(
                "text",
                format!("must be {TEXT_MIN}..={TEXT_MAX} characters"),
            ));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::new("rating", "must be between 1 and 5"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> ReviewDraft {
        ReviewDraft {
            name: "Ayu".to_owned(),
            city: Some("Jakarta".to_owned()),
            text: "Flavors are balanced and not too sweet.".to_owned(),
            rating: 5,
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_missing_city_is_fine() {
        let mut d = draft();
        d.city = None;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_short_text_rejected() {
        let mut d = draft();
        d.text = "ok".to_owned();
        assert_eq!(d.validate().unwrap_err().field, "text");
    }

    #[test]
    fn test_rating_bounds() {
        for rating in [0, 6] {
            let mut d = draft();
            d.rating = rating;
            assert_eq!(d.validate().unwrap_err().field, "rating");
        }
        for rating in 1..=5 {
            let mut d = draft();
            d.rating = rating;
            assert!(d.validate().is_ok());
        }
    }
}
