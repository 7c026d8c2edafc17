pub mod affordability;
pub mod compare;
pub mod loan;
pub mod saved;
