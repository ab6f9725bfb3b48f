pub mod leave_request;
pub mod locked_period;
