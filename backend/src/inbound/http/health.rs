//! Liveness and readiness endpoints for orchestrators and load balancers.
//!
//! Both report the serving phase and which payment providers can have their
//! callbacks verified, so a deployment missing a webhook secret is visible
//! without reading logs.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;

use crate::domain::PaymentProvider;

/// Where the process is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServingPhase {
    /// Settings loaded, listener not yet bound.
    Starting,
    /// Accepting requests.
    Serving,
    /// Shutting down; in-flight webhooks may still finish.
    Draining,
}

impl ServingPhase {
    const fn to_raw(self) -> u8 {
        match self {
            Self::Starting => 0,
            Self::Serving => 1,
            Self::Draining => 2,
        }
    }

    const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }
}

/// Lifecycle phase plus the webhook providers configured at start-up.
#[derive(Debug)]
pub struct HealthState {
    phase: AtomicU8,
    webhook_providers: Vec<PaymentProvider>,
}

#[derive(Serialize)]
struct HealthReport<'a> {
    status: ServingPhase,
    webhook_providers: &'a [PaymentProvider],
}

impl HealthState {
    /// Start in [`ServingPhase::Starting`].
    #[must_use]
    pub fn new(webhook_providers: Vec<PaymentProvider>) -> Self {
        Self {
            phase: AtomicU8::new(ServingPhase::Starting.to_raw()),
            webhook_providers,
        }
    }

    /// Move to [`ServingPhase::Serving`] once the listener is bound. Ignored
    /// after draining has begun.
    pub fn mark_serving(&self) {
        let _ = self.phase.compare_exchange(
            ServingPhase::Starting.to_raw(),
            ServingPhase::Serving.to_raw(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Move to [`ServingPhase::Draining`]; terminal.
    pub fn mark_draining(&self) {
        self.phase
            .store(ServingPhase::Draining.to_raw(), Ordering::Release);
    }

    #[must_use]
    pub fn phase(&self) -> ServingPhase {
        ServingPhase::from_raw(self.phase.load(Ordering::Acquire))
    }

    fn report(&self, healthy: impl Fn(ServingPhase) -> bool) -> HttpResponse {
        let status = self.phase();
        let mut response = if healthy(status) {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(HealthReport {
                status,
                webhook_providers: &self.webhook_providers,
            })
    }
}

/// Readiness: 200 only while serving.
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    state.report(|phase| phase == ServingPhase::Serving)
}

/// Liveness: 200 until draining starts.
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.report(|phase| phase != ServingPhase::Draining)
}
