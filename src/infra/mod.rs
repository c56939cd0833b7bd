//! Backends that turn a vehicle record into a price.

pub mod api;
pub mod predictor;
