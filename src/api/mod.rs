pub mod client;
pub mod worker;

pub use client::NodeApi;
pub use worker::ApiWorker;
