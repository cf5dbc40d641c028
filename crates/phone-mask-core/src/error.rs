//! Error types for mask table loading and formatter construction.
//!
//! Editing operations never fail: they degrade to a no-op instead. Errors are
//! limited to the configuration surfaces that accept untrusted data.

use thiserror::Error;

/// Errors that can occur while loading masks or building a formatter.
#[derive(Debug, Error)]
pub enum MaskError {
    /// A formatter needs at least one template.
    #[error("No mask variants supplied")]
    NoVariants,

    /// The mask table is not valid JSON or has the wrong shape.
    #[error("Invalid mask table: {0}")]
    InvalidTable(#[from] serde_json::Error),

    /// A table entry lists no masks at all.
    #[error("Country '{id}' has no masks")]
    EmptyEntry { id: String },

    /// A country id is not an ISO 3166-1 alpha-2 code.
    #[error("Country id must be an ISO 3166-1 alpha-2 code, got '{0}'")]
    InvalidCountryId(String),

    /// The requested country is not in the table.
    #[error("Unknown country '{0}'")]
    UnknownCountry(String),
}

impl MaskError {
    /// Create an invalid country id error.
    pub fn invalid_country_id(id: &str) -> Self {
        MaskError::InvalidCountryId(id.to_string())
    }

    /// Create an unknown country error.
    pub fn unknown_country(id: &str) -> Self {
        MaskError::UnknownCountry(id.to_string())
    }
}

/// Result type for fallible mask operations.
pub type MaskResult<T> = Result<T, MaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(MaskError::NoVariants.to_string(), "No mask variants supplied");
        assert_eq!(
            MaskError::invalid_country_id("USA").to_string(),
            "Country id must be an ISO 3166-1 alpha-2 code, got 'USA'"
        );
        assert_eq!(
            MaskError::EmptyEntry { id: "XX".into() }.to_string(),
            "Country 'XX' has no masks"
        );
        assert_eq!(
            MaskError::unknown_country("ZZ").to_string(),
            "Unknown country 'ZZ'"
        );
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let mask_err: MaskError = err.into();
        assert!(matches!(mask_err, MaskError::InvalidTable(_)));
        assert!(mask_err.to_string().starts_with("Invalid mask table:"));
    }
}
