pub mod data_api;
pub mod repositories;
