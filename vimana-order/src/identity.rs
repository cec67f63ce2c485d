use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use vimana_catalog::{Flight, FlightNumber, Inventory, PassengerRecord, SeatStatus};

/// The passport/email/phone triple a candidate booking claims.
#[derive(Debug, Clone, Copy)]
pub struct IdentityClaim<'a> {
    pub passport: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityField {
    Email,
    Passport,
    Phone,
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdentityField::Email => "email address",
            IdentityField::Passport => "passport number",
            IdentityField::Phone => "mobile number",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityConflict {
    /// All three fields match an existing booking on the same flight and
    /// date: a re-submission, not a new booking.
    #[error("these details are already used for flight {flight} on {travel_date}")]
    DuplicateBooking {
        flight: FlightNumber,
        travel_date: NaiveDate,
    },

    /// One or two fields match another passenger on the same flight and
    /// date.
    #[error("this {field} is already linked to another passenger for this flight and date")]
    FieldInUseOnFlight {
        field: IdentityField,
        flight: FlightNumber,
        travel_date: NaiveDate,
    },

    /// One or two fields match another passenger somewhere in the
    /// inventory.
    #[error("this {field} is already linked to another passenger")]
    FieldInUse { field: IdentityField },
}

impl IdentityConflict {
    pub fn field(&self) -> Option<IdentityField> {
        match self {
            IdentityConflict::DuplicateBooking { .. } => None,
            IdentityConflict::FieldInUseOnFlight { field, .. }
            | IdentityConflict::FieldInUse { field } => Some(*field),
        }
    }
}

fn field_matches(record: &PassengerRecord, claim: &IdentityClaim) -> (bool, bool, bool) {
    (
        record.email == claim.email,
        record.passport == claim.passport,
        record.phone == claim.phone,
    )
}

/// First matching field in reporting precedence: email, then passport,
/// then phone.
fn colliding_field(record: &PassengerRecord, claim: &IdentityClaim) -> Option<IdentityField> {
    let (email, passport, phone) = field_matches(record, claim);
    if email {
        Some(IdentityField::Email)
    } else if passport {
        Some(IdentityField::Passport)
    } else if phone {
        Some(IdentityField::Phone)
    } else {
        None
    }
}

fn booked_records(flight: &Flight) -> impl Iterator<Item = &PassengerRecord> {
    flight
        .seats()
        .iter()
        .filter(|seat| seat.status() == SeatStatus::Booked)
        .filter_map(|seat| seat.record())
}

/// Decide whether a candidate identity may book `flight` on
/// `travel_date`. Read-only; rules short-circuit in order, so the first
/// failing rule determines the reported reason.
///
/// 1. Exact duplicate on the same flight and date.
/// 2. Partial collision on the same flight and date.
/// 3. Partial collision anywhere in the inventory, any date.
///
/// The same full triple may hold seats across any number of flights and
/// dates; only soft-cancelled records are ignored entirely.
pub fn check_identity(
    inventory: &Inventory,
    flight: &Flight,
    travel_date: NaiveDate,
    claim: &IdentityClaim,
) -> Result<(), IdentityConflict> {
    // Rule 1: idempotent re-submission guard.
    for record in booked_records(flight).filter(|r| r.travel_date == travel_date) {
        let (email, passport, phone) = field_matches(record, claim);
        if email && passport && phone {
            return Err(IdentityConflict::DuplicateBooking {
                flight: flight.number().clone(),
                travel_date,
            });
        }
    }

    // Rule 2: partial collision on this flight and date.
    for record in booked_records(flight).filter(|r| r.travel_date == travel_date) {
        let (email, passport, phone) = field_matches(record, claim);
        if (email || passport || phone) && !(email && passport && phone) {
            if let Some(field) = colliding_field(record, claim) {
                return Err(IdentityConflict::FieldInUseOnFlight {
                    field,
                    flight: flight.number().clone(),
                    travel_date,
                });
            }
        }
    }

    // Rule 3: partial collision anywhere. A field reused under a
    // different combined identity is blocked system-wide.
    for other in inventory.flights() {
        for record in booked_records(other) {
            let (email, passport, phone) = field_matches(record, claim);
            if (email || passport || phone) && !(email && passport && phone) {
                if let Some(field) = colliding_field(record, claim) {
                    return Err(IdentityConflict::FieldInUse { field });
                }
            }
        }
    }

    Ok(())
}
