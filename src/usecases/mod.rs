//! Application use cases. Orchestrate domain logic via ports.

pub mod admin_service;
pub mod availability_service;
pub mod registration_service;

pub use admin_service::{AdminDashboard, AdminService};
pub use availability_service::AvailabilityService;
pub use registration_service::RegistrationService;
