//! Validation rules for leave requests.
//!
//! Each leave kind has its own rule module. The rules are pure functions of
//! the requested day count, the employee's balances and the [`LeavePolicy`];
//! they report the first violated rule as a [`LeaveRejection`].

mod annual_leave;
mod policy;
mod rejection;
mod sick_leave;

pub use annual_leave::check_annual_leave;
pub use policy::{DEFAULT_ANNUAL_MAX_DAYS, DEFAULT_SICK_CERTIFICATE_THRESHOLD_DAYS, LeavePolicy};
pub use rejection::LeaveRejection;
pub use sick_leave::check_sick_leave;
