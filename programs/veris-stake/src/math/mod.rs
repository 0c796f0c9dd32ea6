pub mod accrual;
pub use accrual::*;

pub mod penalty;
pub use penalty::*;

pub mod stake;
pub use stake::*;

pub mod tier;
pub use tier::*;
