pub mod date_period;
