//! Errors raised while constructing distributions.
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DistributionError>;

/// Everything that can go wrong when building a distribution. Once a distribution exists, sampling
/// and evaluation cannot fail.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DistributionError {
    /// A construction-time violation of a domain precondition.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// A factory encountered a law or form flag it does not know how to handle.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    /// An error raised while building a distribution from a named table.
    #[error("table '{table_name}': {source}")]
    Table {
        /// Name of the table the raw data came from.
        table_name: String,
        /// The underlying failure.
        source: Box<DistributionError>,
    },
}

impl DistributionError {
    pub(crate) fn invalid<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub(crate) fn unsupported<S: Into<String>>(message: S) -> Self {
        Self::UnsupportedFormat(message.into())
    }

    /// Tags this error with the name of the table it originated from. Errors that already carry a
    /// table name are left untouched.
    pub fn in_table(self, table_name: &str) -> Self {
        match self {
            Self::Table { .. } => self,
            other => Self::Table {
                table_name: table_name.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Returns the error without any table tags.
    pub fn root(&self) -> &Self {
        match self {
            Self::Table { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns `true` if the underlying error is an `InvalidParameter`.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self.root(), Self::InvalidParameter(_))
    }

    /// Returns `true` if the underlying error is an `UnsupportedFormat`.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self.root(), Self::UnsupportedFormat(_))
    }
}

/// Fails with `InvalidParameter` unless `value` is finite.
pub(crate) fn require_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DistributionError::invalid(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

/// Fails with `InvalidParameter` unless `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<()> {
    require_finite(name, value)?;

    if value > 0.0 {
        Ok(())
    } else {
        Err(DistributionError::invalid(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_tag_is_applied_once() {
        let error = DistributionError::unsupported("law 44")
            .in_table("1001.70c")
            .in_table("ignored");

        assert_eq!(
            error.to_string(),
            "table '1001.70c': unsupported format: law 44"
        );
        assert!(error.is_unsupported_format());
        assert!(!error.is_invalid_parameter());
        assert_eq!(error.root(), &DistributionError::unsupported("law 44"));
    }

    #[test]
    fn parameter_checks() {
        assert!(require_finite("x", 1.0).is_ok());
        assert!(require_finite("x", f64::NAN).is_err());
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", f64::INFINITY).is_err());
        assert!(require_positive("x", 1e-300).is_ok());
    }
}
