//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod appointment;
pub mod customer;
pub mod media;
pub mod product;
pub mod service;
pub mod vehicle;

// Re-export specific types to avoid conflicts
pub use appointment::{
    AppointmentStatus, Column as AppointmentColumn, Entity as Appointment,
    Model as AppointmentModel,
};
pub use customer::{Column as CustomerColumn, Entity as Customer, Model as CustomerModel};
pub use media::{Column as MediaColumn, Entity as Media, Model as MediaModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use service::{Column as ServiceColumn, Entity as Service, Model as ServiceModel};
pub use vehicle::{Column as VehicleColumn, Entity as Vehicle, Model as VehicleModel};
