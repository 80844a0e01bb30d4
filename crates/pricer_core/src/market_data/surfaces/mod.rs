//! Volatility surface trait and implementations.
//!
//! - [`VolatilitySurface`]: date-anchored implied vol query contract
//! - [`FlatVol`]: constant vol
//! - [`TermVol`]: strike-independent vol term structure
//! - [`VolSurfaceEnum`]: static dispatch over the above

mod flat;
mod surface_enum;
mod term;
mod traits;

pub use flat::FlatVol;
pub use surface_enum::VolSurfaceEnum;
pub use term::TermVol;
pub use traits::VolatilitySurface;
