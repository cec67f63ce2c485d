use crate::identity::{self, IdentityClaim, IdentityConflict};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;
use vimana_catalog::app_config::Config;
use vimana_catalog::{
    FareBreakdown, FareTable, FlightNumber, Inventory, InventoryError, PassengerRecord, SeatClass,
    SeatNumber, SeatStatus,
};
use vimana_core::payment::{MockPaymentGateway, PaymentAdapter, PaymentError, PaymentRequest};
use vimana_core::pnr::generate_booking_id;
use vimana_core::validation::{validate_passenger_fields, validate_travel_date, FieldError};

const CURRENCY: &str = "INR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassengerDetails {
    pub name: String,
    pub passport: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub origin: String,
    pub destination: String,
    pub class: SeatClass,
    pub travel_date: NaiveDate,
    pub passenger: PassengerDetails,
}

/// Phase-1 result: an admitted booking pending seat selection and
/// payment. Holds no inventory; availability is re-checked at
/// confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingHold {
    pub id: Uuid,
    pub flight: FlightNumber,
    pub class: SeatClass,
    pub travel_date: NaiveDate,
    pub passenger: PassengerDetails,
    /// Seats of the requested class open for the requested date.
    pub available_seats: Vec<SeatNumber>,
    /// Full-precision quote for the class.
    pub fare: FareBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmedBooking {
    pub flight: FlightNumber,
    pub seat: SeatNumber,
    pub booking_id: String,
    pub total_fare: i64,
    pub fare: FareBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelledBooking {
    pub flight: FlightNumber,
    pub seat: SeatNumber,
}

/// Snapshot of a listed ticket; listings include soft-cancelled seats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub flight: FlightNumber,
    pub origin: String,
    pub destination: String,
    pub seat: SeatNumber,
    pub class: SeatClass,
    pub status: SeatStatus,
    pub passenger: PassengerRecord,
    pub fare: i64,
}

fn format_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    #[error("please correct: {}", format_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("no flight available for route {origin} -> {destination}")]
    RouteNotFound { origin: String, destination: String },

    #[error(transparent)]
    Identity(#[from] IdentityConflict),

    #[error("seat {seat} is not a {class} class seat")]
    SeatClassMismatch { seat: SeatNumber, class: SeatClass },

    #[error("seat {seat} on flight {flight} is no longer available for this date")]
    SeatUnavailable { flight: FlightNumber, seat: SeatNumber },

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error(transparent)]
    Inventory(InventoryError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CancelError {
    #[error("no booking found with the provided details")]
    NotFound,
}

/// The booking-domain facade a UI, CLI or API layer drives. Owns the
/// inventory behind a single write lock; two concurrent confirmations of
/// the same seat cannot both succeed.
pub struct BookingEngine {
    inventory: RwLock<Inventory>,
    fares: FareTable,
    payments: Arc<dyn PaymentAdapter>,
    last_fare: AtomicI64,
    today: Arc<dyn Fn() -> NaiveDate + Send + Sync>,
}

impl BookingEngine {
    pub fn new(inventory: Inventory, fares: FareTable, payments: Arc<dyn PaymentAdapter>) -> Self {
        Self {
            inventory: RwLock::new(inventory),
            fares,
            payments,
            last_fare: AtomicI64::new(0),
            today: Arc::new(|| Utc::now().date_naive()),
        }
    }

    /// Override the wall-clock date source, so the date-in-past boundary
    /// can be pinned in tests.
    pub fn with_today_source(
        mut self,
        today: impl Fn() -> NaiveDate + Send + Sync + 'static,
    ) -> Self {
        self.today = Arc::new(today);
        self
    }

    /// Seed inventory, configured fares, and the simulated gateway with
    /// the configured settlement delay.
    pub fn from_config(config: Config) -> Self {
        let payments = Arc::new(MockPaymentGateway::new(Duration::from_millis(
            config.payment.processing_delay_ms,
        )));
        Self::new(Inventory::seed(), config.fares, payments)
    }

    pub fn fares(&self) -> &FareTable {
        &self.fares
    }

    /// Rounded total of the most recently confirmed booking; 0 before
    /// the first one.
    pub fn last_fare(&self) -> i64 {
        self.last_fare.load(Ordering::Relaxed)
    }

    pub async fn list_routes(&self) -> Vec<(String, String)> {
        self.inventory.read().await.list_routes()
    }

    pub async fn search_seats(
        &self,
        origin: &str,
        destination: &str,
        class: SeatClass,
        travel_date: NaiveDate,
    ) -> Result<Vec<SeatNumber>, BookingError> {
        let inventory = self.inventory.read().await;
        let flight = inventory
            .find_flight_by_route(origin, destination)
            .map_err(|_| BookingError::RouteNotFound {
                origin: origin.to_string(),
                destination: destination.to_string(),
            })?;
        Ok(flight.available_seats(class, travel_date))
    }

    /// Phase 1: format validation, route resolution and the identity
    /// consistency check. Leaves the inventory untouched.
    pub async fn create_booking(&self, request: BookingRequest) -> Result<BookingHold, BookingError> {
        let passenger = &request.passenger;

        let mut errors = validate_passenger_fields(
            &passenger.name,
            &passenger.passport,
            &passenger.email,
            &passenger.phone,
        )
        .err()
        .unwrap_or_default();
        if let Err(err) = validate_travel_date(request.travel_date, (self.today)()) {
            errors.push(err);
        }
        if !errors.is_empty() {
            return Err(BookingError::Validation(errors));
        }

        let inventory = self.inventory.read().await;
        let flight = inventory
            .find_flight_by_route(&request.origin, &request.destination)
            .map_err(|_| BookingError::RouteNotFound {
                origin: request.origin.clone(),
                destination: request.destination.clone(),
            })?;

        identity::check_identity(
            &inventory,
            flight,
            request.travel_date,
            &IdentityClaim {
                passport: &passenger.passport,
                email: &passenger.email,
                phone: &passenger.phone,
            },
        )?;

        let hold = BookingHold {
            id: Uuid::new_v4(),
            flight: flight.number().clone(),
            class: request.class,
            travel_date: request.travel_date,
            passenger: request.passenger.clone(),
            available_seats: flight.available_seats(request.class, request.travel_date),
            fare: self.fares.quote(request.class),
        };

        tracing::debug!(
            hold = %hold.id,
            flight = %hold.flight,
            class = %hold.class,
            seats = hold.available_seats.len(),
            "booking hold created"
        );

        Ok(hold)
    }

    /// Phase 2: charge the simulated gateway, then atomically re-check
    /// the seat and write the booking. Availability is never trusted
    /// from the phase-1 snapshot.
    pub async fn confirm_booking(
        &self,
        hold: &BookingHold,
        seat: SeatNumber,
    ) -> Result<ConfirmedBooking, BookingError> {
        if seat.class() != hold.class {
            return Err(BookingError::SeatClassMismatch {
                seat,
                class: hold.class,
            });
        }

        let total_fare = hold.fare.rounded_total();
        self.payments
            .process_payment(&PaymentRequest {
                reference: hold.id,
                amount: total_fare,
                currency: CURRENCY.to_string(),
            })
            .await?;

        let booking_id = generate_booking_id();
        let record = PassengerRecord {
            name: hold.passenger.name.clone(),
            passport: hold.passenger.passport.clone(),
            email: hold.passenger.email.clone(),
            phone: hold.passenger.phone.clone(),
            travel_date: hold.travel_date,
            booking_id: booking_id.clone(),
        };

        {
            let mut inventory = self.inventory.write().await;
            inventory
                .book_seat(&hold.flight, seat, record, total_fare)
                .map_err(|err| match err {
                    InventoryError::SeatUnavailable { flight, seat } => {
                        BookingError::SeatUnavailable { flight, seat }
                    }
                    other => BookingError::Inventory(other),
                })?;
        }

        self.last_fare.store(total_fare, Ordering::Relaxed);
        tracing::info!(
            flight = %hold.flight,
            %seat,
            booking_id = %booking_id,
            total_fare,
            "booking confirmed"
        );

        Ok(ConfirmedBooking {
            flight: hold.flight.clone(),
            seat,
            booking_id,
            total_fare,
            fare: hold.fare.clone(),
        })
    }

    /// Look up the first booked seat matching passport and email and
    /// soft-cancel it.
    pub async fn cancel_booking(
        &self,
        passport: &str,
        email: &str,
    ) -> Result<CancelledBooking, CancelError> {
        let mut inventory = self.inventory.write().await;

        let (flight_number, seat_number) = inventory
            .find_active_booking(passport, email)
            .map(|(flight, seat)| (flight.number().clone(), seat.number()))
            .ok_or(CancelError::NotFound)?;

        // The seat was just found booked under this same lock.
        inventory
            .release_seat(&flight_number, seat_number)
            .expect("found booking is releasable");

        tracing::info!(flight = %flight_number, seat = %seat_number, "booking cancelled");

        Ok(CancelledBooking {
            flight: flight_number,
            seat: seat_number,
        })
    }

    pub async fn list_bookings(&self) -> Vec<Ticket> {
        let inventory = self.inventory.read().await;
        Self::tickets(inventory.active_bookings())
    }

    pub async fn search_bookings(&self, term: &str) -> Vec<Ticket> {
        let inventory = self.inventory.read().await;
        Self::tickets(inventory.search_bookings(term))
    }

    fn tickets(entries: Vec<(&vimana_catalog::Flight, &vimana_catalog::Seat)>) -> Vec<Ticket> {
        entries
            .into_iter()
            .filter_map(|(flight, seat)| {
                seat.record().map(|record| Ticket {
                    flight: flight.number().clone(),
                    origin: flight.origin().to_string(),
                    destination: flight.destination().to_string(),
                    seat: seat.number(),
                    class: seat.class(),
                    status: seat.status(),
                    passenger: record.clone(),
                    fare: seat.price(),
                })
            })
            .collect()
    }
}
