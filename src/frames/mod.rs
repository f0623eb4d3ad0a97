pub(crate) mod convert;
pub mod weather_frame;
