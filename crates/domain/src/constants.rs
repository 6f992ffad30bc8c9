//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Appointment validation
pub const MIN_APPOINTMENT_DURATION_MINUTES: u32 = 15;
pub const MAX_APPOINTMENT_DURATION_MINUTES: u32 = 480;
pub const MIN_CUSTOMER_NAME_LEN: usize = 2;
pub const MIN_PHONE_DIGITS: usize = 10;

// Fetch defaults (mirror the dashboard's page sizes)
pub const APPOINTMENT_FETCH_LIMIT: usize = 100;
pub const CALL_FETCH_LIMIT: usize = 50;

// Outcome tag that counts toward the conversion rate
pub const CONVERSION_OUTCOME: &str = "appointment_booked";

// Backend store table names
pub const TABLE_APPOINTMENTS: &str = "appointments";
pub const TABLE_CALLS: &str = "calls";
pub const TABLE_CLIENTS: &str = "clients";
pub const TABLE_USER_PROFILES: &str = "user_profiles";

// Tenant column on every scoped table
pub const TENANT_COLUMN: &str = "organization_id";

// Change feed configuration
pub const CHANGE_FEED_BUFFER: usize = 256;
