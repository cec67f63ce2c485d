pub mod app_config;
pub mod fares;
pub mod flight;
pub mod inventory;

pub use fares::{FareBreakdown, FareTable};
pub use flight::{Flight, FlightNumber, PassengerRecord, Seat, SeatClass, SeatNumber, SeatStatus};
pub use inventory::{Inventory, InventoryError};
