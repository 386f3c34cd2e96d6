pub mod registry;
pub mod traits;

// Provider implementations
pub mod remote;
pub mod static_csv;
