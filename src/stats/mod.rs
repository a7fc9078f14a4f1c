//! Distribution math behind the capacity estimate
//!
//! Everything here works in log space: a lognormal quantity is described by the mean and the
//! standard deviation of its natural logarithm.

pub mod lognormal;
pub mod normal;

pub use self::lognormal::LognormalParams;
