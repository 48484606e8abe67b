pub mod account;
pub mod repository;
pub mod user;
