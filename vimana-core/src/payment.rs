use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Booking hold this charge settles.
    pub reference: Uuid,
    /// Amount in whole currency units.
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub reference: Uuid,
    pub amount: i64,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("payment declined: {0}")]
    Declined(String),

    #[error("payment gateway failure: {0}")]
    Gateway(String),
}

#[async_trait]
pub trait PaymentAdapter: Send + Sync {
    /// Charge the given amount. The call completes only once the gateway
    /// has settled; there is no cancellation path for an in-flight charge.
    async fn process_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError>;
}

/// Simulated gateway: waits out a configurable settlement delay and
/// approves every charge, unless constructed in declining mode.
pub struct MockPaymentGateway {
    delay: Duration,
    decline_all: bool,
}

impl MockPaymentGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            decline_all: false,
        }
    }

    /// Zero-delay variant for tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Variant that declines every charge, for exercising failure paths.
    pub fn declining() -> Self {
        Self {
            delay: Duration::ZERO,
            decline_all: true,
        }
    }
}

#[async_trait]
impl PaymentAdapter for MockPaymentGateway {
    async fn process_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        tokio::time::sleep(self.delay).await;

        if self.decline_all {
            return Err(PaymentError::Declined("card declined".to_string()));
        }

        tracing::info!(
            reference = %request.reference,
            amount = request.amount,
            currency = %request.currency,
            "payment settled"
        );

        Ok(PaymentReceipt {
            reference: request.reference,
            amount: request.amount,
            paid_at: Utc::now(),
        })
    }
}
