pub mod aggregators;
pub mod boundaries;
pub mod gateways;
pub mod interactors;
pub mod models;
pub mod sessions;
pub(crate) mod utils;
