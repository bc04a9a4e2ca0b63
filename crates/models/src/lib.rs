pub mod account;
pub mod appointment;
pub mod db;
pub mod errors;
pub mod service;

#[cfg(test)]
mod tests;
