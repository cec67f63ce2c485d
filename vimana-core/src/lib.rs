pub mod payment;
pub mod pnr;
pub mod validation;
