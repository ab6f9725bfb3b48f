pub mod leave_request;
pub mod locked_period;
pub mod role;
pub mod user;
