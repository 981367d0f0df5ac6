#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "This crate contains the business logic, domain models, authentication"]
#![doc = "mechanisms, routing configuration, and error handling for the TaskVault"]
#![doc = "to-do API. It is used by the main binary (`main.rs`) to construct and"]
#![doc = "run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
