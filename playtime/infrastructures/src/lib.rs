pub mod boundaries;
pub mod gateways {
    pub mod credentials;
    pub mod youtube;
}
pub mod terminals;
pub(crate) mod utils;
