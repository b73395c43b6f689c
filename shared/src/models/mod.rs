//! Domain models for the tire retailer back-office

mod article;
mod billing;
mod client;
mod service;
mod stock;

pub use article::*;
pub use billing::*;
pub use client::*;
pub use service::*;
pub use stock::*;
