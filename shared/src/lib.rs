//! Shared types and recommendation logic for the Crop Advisor Platform
//!
//! This crate contains the pure recommendation pipeline and the types shared
//! between the backend, the browser (via WASM), and other components.

pub mod engine;
pub mod lookup;
pub mod models;
pub mod nutrients;
pub mod reference;
pub mod types;
pub mod validation;

pub use engine::*;
pub use models::*;
pub use nutrients::*;
pub use reference::ReferenceData;
pub use types::*;
pub use validation::*;
