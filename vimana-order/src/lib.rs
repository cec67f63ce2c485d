pub mod booking;
pub mod identity;

pub use booking::{
    BookingEngine, BookingError, BookingHold, BookingRequest, CancelError, CancelledBooking,
    ConfirmedBooking, PassengerDetails, Ticket,
};
pub use identity::{IdentityClaim, IdentityConflict, IdentityField};
pub use vimana_core::validation;
