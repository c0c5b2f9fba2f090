//! Domain models for the Crop Yield Prediction service

mod baseline;
mod crop;
mod feature;
mod form;
mod recommendation;

pub use baseline::*;
pub use crop::*;
pub use feature::*;
pub use form::*;
pub use recommendation::*;
