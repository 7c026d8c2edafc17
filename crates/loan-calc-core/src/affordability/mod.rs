pub mod dsr;
pub mod policy;

pub use dsr::{assess_affordability, AffordabilityInput, AffordabilityResult};
pub use policy::{AffordabilityPolicy, RiskTier};
