//! Item input validation
//!
//! `category` must be non-blank on create and update. No text field may
//! contain a NUL character, which PostgreSQL `TEXT` cannot store. Everything
//! else is stored as supplied.

use super::ValidationError;

const NUL_REASON: &str = "must not contain NUL characters";

fn reject_nul(field: &'static str, s: &str) -> Result<(), ValidationError> {
    if s.contains('\0') {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: NUL_REASON,
        });
    }
    Ok(())
}

/// Free-text item field; absent becomes empty.
pub fn text_field(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = value.unwrap_or_default();
    reject_nul(field, &value)?;
    Ok(value)
}

/// Validated item category (non-blank)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category(String);

impl Category {
    /// Create a category, rejecting empty, whitespace-only or NUL-bearing
    /// input.
    ///
    /// The value is stored exactly as given; surrounding whitespace is not
    /// trimmed.
    ///
    /// # Example
    /// ```
    /// use itembook_server::models::Category;
    ///
    /// assert!(Category::new("math").is_ok());
    /// assert!(Category::new("").is_err());
    /// assert!(Category::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "category" });
        }
        reject_nul("category", s)?;

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Caller-writable item fields, validated.
///
/// Used for both insert and full replacement. `id` and `updated_day` are
/// owned by the store and never appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub category: Category,
    pub curriculum: String,
    pub title: String,
    pub link: String,
    pub summary: String,
    pub made_day: String,
}
