//! Yield curve trait and implementations.
//!
//! - [`YieldCurve`]: date-anchored discount/zero-rate query contract
//! - [`FlatCurve`]: constant-rate curve
//! - [`InterpolatedCurve`]: pillar-based zero curve
//! - [`QuantoCurve`]: quanto drift-adjusted composition
//! - [`CurveEnum`]: static dispatch over the above

mod curve_enum;
mod flat;
mod interpolated;
mod quanto;
mod traits;

pub use curve_enum::CurveEnum;
pub use flat::FlatCurve;
pub use interpolated::InterpolatedCurve;
pub use quanto::QuantoCurve;
pub use traits::YieldCurve;
