use serde_json::json;

use crate::entities::booking::{self, BookingStatus};
use crate::AppState;

/// Fire a booking notification to the configured webhook.
///
/// Best-effort and at-most-once: the send runs on a detached task after
/// the triggering write has committed, so a delivery failure never fails
/// or rolls back the request that caused it. Failures are logged for
/// manual follow-up.
pub fn send_booking_notification(state: &AppState, booking: &booking::Model, status: BookingStatus) {
    let Some(url) = state.config.notify_webhook_url.clone() else {
        tracing::debug!(booking_id = %booking.id, "NOTIFY_WEBHOOK_URL not set, skipping notification");
        return;
    };

    let client = state.http.clone();
    let booking = booking.clone();

    tokio::spawn(async move {
        let payload = json!({
            "booking_id": booking.id,
            "name": booking.name,
            "email": booking.email,
            "date": booking.date,
            "time": booking.time,
            "guests": booking.guests,
            "status": status,
        });

        let result = client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .and_then(|res| res.error_for_status());

        match result {
            Ok(_) => {
                tracing::info!(booking_id = %booking.id, status = ?status, "Booking notification sent");
            }
            Err(e) => {
                tracing::warn!(booking_id = %booking.id, error = %e, "Booking notification failed");
            }
        }
    });
}
