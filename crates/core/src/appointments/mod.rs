//! Appointment data access: service, live collection, and store port

pub mod live;
pub mod ports;
pub mod service;

pub use live::LiveAppointments;
pub use ports::AppointmentStore;
pub use service::AppointmentService;
