pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod model;
pub mod services;

#[cfg(test)]
pub mod testing;
