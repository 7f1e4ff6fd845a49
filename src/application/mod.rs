pub mod admin;
pub mod error;
pub mod repos;
pub mod schedule;
pub mod site;
