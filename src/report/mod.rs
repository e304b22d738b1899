pub mod combine;
pub mod output;
