//! Player data loading

pub mod store;

pub use store::DataStore;
