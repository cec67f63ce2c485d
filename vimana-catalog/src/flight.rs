use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SEATS_PER_FLIGHT: u8 = 10;
pub const BUSINESS_SEAT_COUNT: u8 = 5;

/// Flight designator, e.g. "FL001".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightNumber(String);

impl FlightNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("seat number {0} out of range 1-10")]
pub struct InvalidSeatNumber(pub u8);

/// Seat position within a flight, bounded to 1-10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SeatNumber(u8);

impl SeatNumber {
    pub fn new(number: u8) -> Result<Self, InvalidSeatNumber> {
        if (1..=SEATS_PER_FLIGHT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(InvalidSeatNumber(number))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Class is fixed by position: 1-5 Business, 6-10 Economy.
    pub fn class(self) -> SeatClass {
        if self.0 <= BUSINESS_SEAT_COUNT {
            SeatClass::Business
        } else {
            SeatClass::Economy
        }
    }

    pub fn all() -> impl Iterator<Item = SeatNumber> {
        (1..=SEATS_PER_FLIGHT).map(SeatNumber)
    }
}

impl TryFrom<u8> for SeatNumber {
    type Error = InvalidSeatNumber;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SeatNumber> for u8 {
    fn from(value: SeatNumber) -> Self {
        value.0
    }
}

impl fmt::Display for SeatNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatClass {
    Business,
    Economy,
}

impl fmt::Display for SeatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatClass::Business => write!(f, "Business"),
            SeatClass::Economy => write!(f, "Economy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    Available,
    Booked,
}

/// Passenger details written at confirmation and retained across a soft
/// cancel for historical listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerRecord {
    pub name: String,
    pub passport: String,
    pub email: String,
    pub phone: String,
    pub travel_date: NaiveDate,
    pub booking_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    number: SeatNumber,
    class: SeatClass,
    status: SeatStatus,
    /// Last rounded total fare charged; 0 until first booking.
    price: i64,
    record: Option<PassengerRecord>,
}

impl Seat {
    fn new(number: SeatNumber) -> Self {
        Self {
            number,
            class: number.class(),
            status: SeatStatus::Available,
            price: 0,
            record: None,
        }
    }

    pub fn number(&self) -> SeatNumber {
        self.number
    }

    pub fn class(&self) -> SeatClass {
        self.class
    }

    pub fn status(&self) -> SeatStatus {
        self.status
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn record(&self) -> Option<&PassengerRecord> {
        self.record.as_ref()
    }

    /// Occupancy is date-scoped: a seat booked for a different date is
    /// still offered for this one.
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        match (&self.status, &self.record) {
            (SeatStatus::Booked, Some(record)) => record.travel_date != date,
            _ => true,
        }
    }

    /// True for seats that were booked at least once, even if cancelled
    /// since.
    pub fn has_history(&self) -> bool {
        self.record.is_some()
    }

    pub(crate) fn book(&mut self, record: PassengerRecord, price: i64) {
        self.record = Some(record);
        self.price = price;
        self.status = SeatStatus::Booked;
    }

    /// Soft cancel: status reverts, passenger fields stay for history.
    pub(crate) fn release(&mut self) {
        self.status = SeatStatus::Available;
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("flight {number} origin and destination must differ ({city})")]
pub struct InvalidRoute {
    pub number: FlightNumber,
    pub city: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    number: FlightNumber,
    origin: String,
    destination: String,
    seats: Vec<Seat>,
}

impl Flight {
    pub fn new(
        number: FlightNumber,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Result<Self, InvalidRoute> {
        let origin = origin.into();
        let destination = destination.into();
        if origin == destination {
            return Err(InvalidRoute {
                number,
                city: origin,
            });
        }
        Ok(Self {
            number,
            origin,
            destination,
            seats: SeatNumber::all().map(Seat::new).collect(),
        })
    }

    pub fn number(&self) -> &FlightNumber {
        &self.number
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, number: SeatNumber) -> &Seat {
        // SeatNumber is bounded to the seat vector length.
        &self.seats[(number.get() - 1) as usize]
    }

    pub(crate) fn seat_mut(&mut self, number: SeatNumber) -> &mut Seat {
        &mut self.seats[(number.get() - 1) as usize]
    }

    pub fn seats_in_class(&self, class: SeatClass) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter(move |seat| seat.class() == class)
    }

    /// Seat numbers of the given class open for the given date, in order.
    pub fn available_seats(&self, class: SeatClass, date: NaiveDate) -> Vec<SeatNumber> {
        self.seats_in_class(class)
            .filter(|seat| seat.is_available_on(date))
            .map(|seat| seat.number())
            .collect()
    }
}
