//! Domain models for the Crop Advisor Platform

mod crop;
mod nutrients;
mod rainfall;
mod recommendation;
mod region;
mod season;

pub use crop::*;
pub use nutrients::*;
pub use rainfall::*;
pub use recommendation::*;
pub use region::*;
pub use season::*;
