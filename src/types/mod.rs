pub mod city;
pub mod traits;
pub mod weather_record;
