pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;
pub mod time;

pub use models::*;
pub use services::SchedulingValidator;
pub use store::{AppointmentStore, ClinicApiStore, StoreError};
pub use router::scheduling_routes;
