use crate::flight::{Flight, FlightNumber, PassengerRecord, Seat, SeatNumber, SeatStatus};

/// Owns the fixed set of flights for the process lifetime. All seat
/// mutation funnels through `book_seat` / `release_seat`; everything
/// else is read-only.
#[derive(Debug, Clone)]
pub struct Inventory {
    flights: Vec<Flight>,
}

impl Inventory {
    pub fn new(flights: Vec<Flight>) -> Self {
        Self { flights }
    }

    /// The three-route network the engine ships with.
    pub fn seed() -> Self {
        let routes = [
            ("FL001", "Delhi", "Mumbai"),
            ("FL002", "Mumbai", "Bengaluru"),
            ("FL003", "Chennai", "Hyderabad"),
        ];
        let flights = routes
            .into_iter()
            .map(|(number, origin, destination)| {
                // Static table, origins and destinations all distinct.
                Flight::new(FlightNumber::new(number), origin, destination)
                    .expect("seed routes are valid")
            })
            .collect();
        Self::new(flights)
    }

    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    pub fn flight(&self, number: &FlightNumber) -> Result<&Flight, InventoryError> {
        self.flights
            .iter()
            .find(|flight| flight.number() == number)
            .ok_or_else(|| InventoryError::FlightNotFound(number.clone()))
    }

    fn flight_mut(&mut self, number: &FlightNumber) -> Result<&mut Flight, InventoryError> {
        self.flights
            .iter_mut()
            .find(|flight| flight.number() == number)
            .ok_or_else(|| InventoryError::FlightNotFound(number.clone()))
    }

    pub fn find_flight_by_route(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<&Flight, InventoryError> {
        self.flights
            .iter()
            .find(|flight| flight.origin() == origin && flight.destination() == destination)
            .ok_or_else(|| InventoryError::RouteNotFound {
                origin: origin.to_string(),
                destination: destination.to_string(),
            })
    }

    pub fn seat(
        &self,
        flight: &FlightNumber,
        number: SeatNumber,
    ) -> Result<&Seat, InventoryError> {
        Ok(self.flight(flight)?.seat(number))
    }

    pub fn list_routes(&self) -> Vec<(String, String)> {
        self.flights
            .iter()
            .map(|flight| (flight.origin().to_string(), flight.destination().to_string()))
            .collect()
    }

    /// Seats worth listing as tickets: currently booked, or previously
    /// booked and soft-cancelled.
    pub fn active_bookings(&self) -> Vec<(&Flight, &Seat)> {
        self.flights
            .iter()
            .flat_map(|flight| {
                flight
                    .seats()
                    .iter()
                    .filter(|seat| seat.status() == SeatStatus::Booked || seat.has_history())
                    .map(move |seat| (flight, seat))
            })
            .collect()
    }

    /// Case-insensitive ticket search over passport, passenger name and
    /// flight number.
    pub fn search_bookings(&self, term: &str) -> Vec<(&Flight, &Seat)> {
        let term = term.to_lowercase();
        self.active_bookings()
            .into_iter()
            .filter(|(flight, seat)| {
                flight.number().as_str().to_lowercase().contains(&term)
                    || seat.record().is_some_and(|record| {
                        record.passport.to_lowercase().contains(&term)
                            || record.name.to_lowercase().contains(&term)
                    })
            })
            .collect()
    }

    /// First currently-booked seat matching passport and email, in flight
    /// order then seat order. Soft-cancelled records never match.
    pub fn find_active_booking(
        &self,
        passport: &str,
        email: &str,
    ) -> Option<(&Flight, &Seat)> {
        self.flights.iter().find_map(|flight| {
            flight
                .seats()
                .iter()
                .find(|seat| {
                    seat.status() == SeatStatus::Booked
                        && seat.record().is_some_and(|record| {
                            record.passport == passport && record.email == email
                        })
                })
                .map(|seat| (flight, seat))
        })
    }

    /// Write a confirmed booking into a seat, re-checking date-scoped
    /// availability under whatever lock the caller holds.
    pub fn book_seat(
        &mut self,
        flight_number: &FlightNumber,
        seat_number: SeatNumber,
        record: PassengerRecord,
        price: i64,
    ) -> Result<(), InventoryError> {
        let flight = self.flight_mut(flight_number)?;
        let seat = flight.seat_mut(seat_number);
        if !seat.is_available_on(record.travel_date) {
            return Err(InventoryError::SeatUnavailable {
                flight: flight_number.clone(),
                seat: seat_number,
            });
        }
        tracing::debug!(flight = %flight_number, seat = %seat_number, price, "seat booked");
        seat.book(record, price);
        Ok(())
    }

    /// Soft-cancel a booked seat.
    pub fn release_seat(
        &mut self,
        flight_number: &FlightNumber,
        seat_number: SeatNumber,
    ) -> Result<(), InventoryError> {
        let flight = self.flight_mut(flight_number)?;
        let seat = flight.seat_mut(seat_number);
        if seat.status() != SeatStatus::Booked {
            return Err(InventoryError::SeatNotBooked {
                flight: flight_number.clone(),
                seat: seat_number,
            });
        }
        tracing::debug!(flight = %flight_number, seat = %seat_number, "seat released");
        seat.release();
        Ok(())
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::seed()
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("flight {0} not found")]
    FlightNotFound(FlightNumber),

    #[error("no flight available for route {origin} -> {destination}")]
    RouteNotFound { origin: String, destination: String },

    #[error("seat {seat} on flight {flight} is not available for this date")]
    SeatUnavailable { flight: FlightNumber, seat: SeatNumber },

    #[error("seat {seat} on flight {flight} has no active booking")]
    SeatNotBooked { flight: FlightNumber, seat: SeatNumber },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::SeatClass;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
    }

    fn record(passport: &str, email: &str, date: NaiveDate) -> PassengerRecord {
        PassengerRecord {
            name: "Asha Rao".to_string(),
            passport: passport.to_string(),
            email: email.to_string(),
            phone: "9876543211".to_string(),
            travel_date: date,
            booking_id: "AB12CD".to_string(),
        }
    }

    #[test]
    fn test_seed_network() {
        let inventory = Inventory::seed();
        assert_eq!(inventory.flights().len(), 3);
        assert_eq!(
            inventory.list_routes(),
            vec![
                ("Delhi".to_string(), "Mumbai".to_string()),
                ("Mumbai".to_string(), "Bengaluru".to_string()),
                ("Chennai".to_string(), "Hyderabad".to_string()),
            ]
        );
        assert!(inventory.find_flight_by_route("Delhi", "Mumbai").is_ok());
        assert!(inventory.find_flight_by_route("Mumbai", "Delhi").is_err());
    }

    #[test]
    fn test_book_and_release_lifecycle() {
        let mut inventory = Inventory::seed();
        let fl001 = FlightNumber::new("FL001");
        let seat3 = SeatNumber::new(3).unwrap();

        inventory
            .book_seat(&fl001, seat3, record("B2345678", "p@x.com", date(1)), 31100)
            .unwrap();
        assert_eq!(
            inventory.seat(&fl001, seat3).unwrap().status(),
            SeatStatus::Booked
        );

        // Same seat, same date: rejected.
        let err = inventory
            .book_seat(&fl001, seat3, record("C3456789", "q@x.com", date(1)), 31100)
            .unwrap_err();
        assert!(matches!(err, InventoryError::SeatUnavailable { .. }));

        inventory.release_seat(&fl001, seat3).unwrap();
        let seat = inventory.seat(&fl001, seat3).unwrap();
        assert_eq!(seat.status(), SeatStatus::Available);
        assert_eq!(seat.record().unwrap().passport, "B2345678");

        // Releasing twice fails.
        assert!(inventory.release_seat(&fl001, seat3).is_err());
    }

    #[test]
    fn test_listing_includes_soft_cancelled() {
        let mut inventory = Inventory::seed();
        let fl001 = FlightNumber::new("FL001");
        let seat3 = SeatNumber::new(3).unwrap();

        assert!(inventory.active_bookings().is_empty());

        inventory
            .book_seat(&fl001, seat3, record("B2345678", "p@x.com", date(1)), 31100)
            .unwrap();
        inventory.release_seat(&fl001, seat3).unwrap();

        let bookings = inventory.active_bookings();
        assert_eq!(bookings.len(), 1);
        let (flight, seat) = bookings[0];
        assert_eq!(flight.number(), &fl001);
        assert_eq!(seat.status(), SeatStatus::Available);
        assert_eq!(seat.record().unwrap().booking_id, "AB12CD");
    }

    #[test]
    fn test_search_bookings() {
        let mut inventory = Inventory::seed();
        inventory
            .book_seat(
                &FlightNumber::new("FL002"),
                SeatNumber::new(6).unwrap(),
                record("D4567890", "d@x.com", date(2)),
                9575,
            )
            .unwrap();

        assert_eq!(inventory.search_bookings("fl002").len(), 1);
        assert_eq!(inventory.search_bookings("d45678").len(), 1);
        assert_eq!(inventory.search_bookings("asha").len(), 1);
        assert!(inventory.search_bookings("fl003").is_empty());
    }

    #[test]
    fn test_find_active_booking_skips_cancelled() {
        let mut inventory = Inventory::seed();
        let fl001 = FlightNumber::new("FL001");
        let seat1 = SeatNumber::new(1).unwrap();

        inventory
            .book_seat(&fl001, seat1, record("B2345678", "p@x.com", date(1)), 31100)
            .unwrap();
        assert!(inventory.find_active_booking("B2345678", "p@x.com").is_some());
        // Email must match too.
        assert!(inventory.find_active_booking("B2345678", "other@x.com").is_none());

        inventory.release_seat(&fl001, seat1).unwrap();
        assert!(inventory.find_active_booking("B2345678", "p@x.com").is_none());
    }

    #[test]
    fn test_all_seats_in_class_offered_when_empty() {
        let inventory = Inventory::seed();
        let flight = inventory.find_flight_by_route("Delhi", "Mumbai").unwrap();
        let business = flight.available_seats(SeatClass::Business, date(1));
        let economy = flight.available_seats(SeatClass::Economy, date(1));
        assert_eq!(business.iter().map(|s| s.get()).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(economy.iter().map(|s| s.get()).collect::<Vec<_>>(), vec![6, 7, 8, 9, 10]);
    }
}
