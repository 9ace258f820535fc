//! Company code validation and derivation
//!
//! Codes are slugs: lowercase alphanumeric with hyphens/underscores.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for a company code
pub const MAX_CODE_LEN: usize = 64;

/// Slug pattern: starts with alphanumeric, allows hyphens/underscores
static SLUG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9_-]{0,63}$").expect("invalid slug regex")
});

/// Turn a display name into a code: transliterate to ASCII, lowercase,
/// and collapse every run of non-alphanumeric characters into a single `-`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::new();
    let mut last_was_dash = false;

    for ch in deunicode::deunicode(input).chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_dash = false;
        } else if !slug.is_empty() && !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.len() > MAX_CODE_LEN {
        slug.truncate(MAX_CODE_LEN);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    slug
}

/// Validated company code (slug format)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompanyCode(String);

impl CompanyCode {
    /// Validate a caller-supplied code.
    ///
    /// # Example
    /// ```
    /// use biztime_server::models::CompanyCode;
    ///
    /// assert!(CompanyCode::new("test-co").is_ok());
    /// assert!(CompanyCode::new("Test Co").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if !SLUG_RE.is_match(s) {
            return Err(ValidationError::InvalidCode(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }

    /// Derive a code from a company name.
    ///
    /// Fails when nothing alphanumeric survives transliteration.
    pub fn from_name(name: &str) -> Result<Self, ValidationError> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(ValidationError::UnsluggableName(name.to_owned()));
        }
        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for CompanyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
