//! Operator-facing outcome messages.
//!
//! Every operation's result is reported as a [`Notice`]: a human-readable
//! message tagged with a [`Severity`]. Errors are never shown raw; the
//! persisted state before the failed operation is what the operator sees next.

use crate::errors::Error;
use std::fmt;

/// How an outcome should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The operation changed something as requested
    Success,
    /// Informational, nothing went wrong
    Info,
    /// The operation failed and nothing was changed
    Error,
}

impl Severity {
    /// Marker shown in front of the message.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Info => "ℹ️",
            Self::Error => "❌",
        }
    }
}

/// A severity-tagged message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// How to present it
    pub severity: Severity,
    /// What happened
    pub message: String,
}

impl Notice {
    /// A success message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    /// An informational message.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// An error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Turns a core error into something the operator can act on.
    ///
    /// Persistence failures get a generic message; the details go to the log.
    #[must_use]
    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::Database(_) | Error::Io(_) | Error::FrameworkError(_) => {
                Self::error("Something went wrong while saving. Nothing was changed.")
            }
            other => Self::error(other.to_string()),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.icon(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::AppointmentStatus;

    #[test]
    fn test_display_includes_icon() {
        assert_eq!(Notice::success("Saved").to_string(), "✅ Saved");
        assert_eq!(Notice::error("Nope").to_string(), "❌ Nope");
    }

    #[test]
    fn test_not_found_keeps_detail() {
        let notice = Notice::from_error(&Error::AppointmentNotFound {
            id: "12".to_string(),
        });
        assert_eq!(notice.severity, Severity::Error);
        assert!(notice.message.contains("12"));
    }

    #[test]
    fn test_database_error_is_generic() {
        let notice = Notice::from_error(&Error::Database(sea_orm::DbErr::Custom(
            "disk I/O error".to_string(),
        )));
        assert_eq!(notice.severity, Severity::Error);
        assert!(!notice.message.contains("disk"));
    }

    #[test]
    fn test_invalid_transition_message() {
        let notice = Notice::from_error(&Error::InvalidTransition {
            id: 3,
            from: AppointmentStatus::Completed,
            to: AppointmentStatus::Cancelled,
        });
        assert_eq!(
            notice.message,
            "Appointment 3 cannot move from Completed to Cancelled"
        );
    }
}
