//! Domain models for the Bodega server.

pub mod lead;
pub mod product;
pub mod store;

pub use lead::Lead;
pub use product::Product;
pub use store::Store;
