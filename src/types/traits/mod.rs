pub mod period;
pub mod types;
