use std::fmt;

use crate::parse::NumberError;

/// `EX_USAGE` from sysexits.h, the status `argp_usage` style tools exit with.
pub const EX_USAGE: i32 = 64;

/// Why resolving a command line failed. All of these end resolution.
#[derive(Debug)]
pub enum ResolveError {
    /// A numeric argument had no digits.
    InvalidNumber { option: &'static str, value: String },
    /// A numeric argument does not fit its domain.
    NumericOverflow { option: &'static str, value: String },
    /// A token that is not an argument to any flag.
    UsageViolation { token: String },
    /// Raised by the command line parser: unknown flags, missing values,
    /// and the `--help` / `--version` displays.
    Cli(clap::Error),
}

impl ResolveError {
    pub(crate) fn from_number(option: &'static str, value: &str, err: NumberError) -> Self {
        let value = value.to_string();
        match err {
            NumberError::NoDigits => ResolveError::InvalidNumber { option, value },
            NumberError::OutOfRange => ResolveError::NumericOverflow { option, value },
        }
    }

    /// Whether the user should be shown usage help alongside the error.
    pub fn is_usage(&self) -> bool {
        match self {
            ResolveError::InvalidNumber { .. } | ResolveError::UsageViolation { .. } => true,
            ResolveError::NumericOverflow { .. } => false,
            ResolveError::Cli(e) => e.use_stderr(),
        }
    }

    /// Process exit status for this failure. Help and version output are
    /// not failures and exit with 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            ResolveError::InvalidNumber { .. } | ResolveError::UsageViolation { .. } => EX_USAGE,
            ResolveError::NumericOverflow { .. } => libc::ERANGE,
            ResolveError::Cli(e) if e.use_stderr() => EX_USAGE,
            ResolveError::Cli(_) => 0,
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::InvalidNumber { option, value } => {
                write!(f, "{option}: no digits were found in '{value}'")
            }
            ResolveError::NumericOverflow { option, value } => {
                write!(f, "Unsupported {option} value '{value}': out of range")
            }
            ResolveError::UsageViolation { token } => {
                write!(f, "unexpected argument '{token}'")
            }
            ResolveError::Cli(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::Cli(e) => Some(e),
            _ => None,
        }
    }
}

impl From<clap::Error> for ResolveError {
    fn from(e: clap::Error) -> Self {
        ResolveError::Cli(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_errors_map_to_taxonomy() {
        let e = ResolveError::from_number("max_size", "abc", NumberError::NoDigits);
        assert!(matches!(e, ResolveError::InvalidNumber { option: "max_size", .. }));
        assert!(e.is_usage());
        assert_eq!(e.exit_code(), EX_USAGE);

        let e = ResolveError::from_number("pid", "99999999999", NumberError::OutOfRange);
        assert!(matches!(e, ResolveError::NumericOverflow { option: "pid", .. }));
        assert!(!e.is_usage());
        assert_eq!(e.exit_code(), libc::ERANGE);
    }

    #[test]
    fn test_display() {
        let e = ResolveError::UsageViolation {
            token: "extra_token".to_string(),
        };
        assert_eq!(e.to_string(), "unexpected argument 'extra_token'");
        assert_ne!(e.exit_code(), 0);

        let e = ResolveError::from_number("max_size", "abc", NumberError::NoDigits);
        assert_eq!(e.to_string(), "max_size: no digits were found in 'abc'");
    }
}
