//! Call data access: service, live collection, and store port

pub mod live;
pub mod ports;
pub mod service;

pub use live::LiveCalls;
pub use ports::CallStore;
pub use service::CallService;
