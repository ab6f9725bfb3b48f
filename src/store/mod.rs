pub mod leave_store;
pub mod locked_periods;
