use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;

use crate::contact::enquiry::{build_enquiry_payload, validate_enquiry, ContactEnquiry};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub relay_message_id: Option<String>,
}

/// POST /api/v1/contact
pub async fn handle_contact(
    State(state): State<AppState>,
    Json(enquiry): Json<ContactEnquiry>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    let problems = validate_enquiry(&enquiry);
    if !problems.is_empty() {
        return Err(AppError::Validation(problems.join("; ")));
    }

    let payload = build_enquiry_payload(&enquiry, &state.routing, Utc::now());
    let receipt = state.relay.send(&payload).await?;

    tracing::info!(
        message_id = receipt.message_id.as_deref().unwrap_or("-"),
        "Contact enquiry delivered"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(ContactResponse {
            relay_message_id: receipt.message_id,
        }),
    ))
}
