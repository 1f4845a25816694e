//! Unified error type for `DetailBuddy`.
//!
//! Every core operation returns [`Result`]. Database failures surface as
//! [`Error::Database`]; any transaction still open at that point is rolled back
//! when it is dropped, so a failed transition leaves no partial state behind.

use crate::entities::appointment::AppointmentStatus;
use thiserror::Error;

/// All errors produced by the application.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Persistence layer failure (query or commit)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A monetary or quantity value was negative, NaN or infinite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// A non-numeric input failed validation
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// No customer with this id or phone
    #[error("Customer not found: {id}")]
    CustomerNotFound {
        /// Id or phone used for the lookup
        id: String,
    },

    /// No vehicle with this id (or it belongs to another customer)
    #[error("Vehicle not found: {id}")]
    VehicleNotFound {
        /// Id used for the lookup
        id: String,
    },

    /// No appointment with this id
    #[error("Appointment not found: {id}")]
    AppointmentNotFound {
        /// Id used for the lookup
        id: String,
    },

    /// No product with this id
    #[error("Product not found: {name}")]
    ProductNotFound {
        /// Id or name used for the lookup
        name: String,
    },

    /// No catalog service with this id or name
    #[error("Service not found: {name}")]
    ServiceNotFound {
        /// Id or name used for the lookup
        name: String,
    },

    /// Phone numbers identify customers and must be unique
    #[error("Phone number already registered: {phone}")]
    PhoneTaken {
        /// The duplicated phone number
        phone: String,
    },

    /// The requested status change is not allowed from the current status
    #[error("Appointment {id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Appointment id
        id: i64,
        /// Current status
        from: AppointmentStatus,
        /// Requested status
        to: AppointmentStatus,
    },

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or unreadable environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Discord framework error
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl Error {
    /// Whether this error means "the thing you referred to does not exist".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CustomerNotFound { .. }
                | Self::VehicleNotFound { .. }
                | Self::AppointmentNotFound { .. }
                | Self::ProductNotFound { .. }
                | Self::ServiceNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
