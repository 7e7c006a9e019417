mod auth;
pub mod client;
mod people;
mod reports;
pub mod types;
mod work;

pub use client::*;
pub use types::*;
