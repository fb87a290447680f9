// src/model/mod.rs

pub mod facility;
pub mod store;

pub use facility::Facility;
pub use store::Store;
