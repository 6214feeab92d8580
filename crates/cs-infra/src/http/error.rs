use cs_core::ids::RemoteId;
use cs_core::ports::RemoteError;
use reqwest::StatusCode;

use super::dto::Envelope;

pub(crate) fn from_reqwest(error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::Timeout
    } else if error.is_decode() {
        RemoteError::Decode(error.to_string())
    } else {
        RemoteError::Transport(error.to_string())
    }
}

/// Classifies a failed response. The status code wins; the message text is
/// checked as well because the service reports some conflicts as 400.
pub(crate) fn from_response(status: StatusCode, envelope: &Envelope) -> RemoteError {
    let message = envelope
        .error_message()
        .map(str::to_string)
        .unwrap_or_else(|| format!("API Error: {}", status.canonical_reason().unwrap_or("unknown")));
    let lowered = message.to_lowercase();

    if status == StatusCode::CONFLICT || lowered.contains("already exists") {
        RemoteError::Duplicate {
            message,
            existing_id: envelope.existing_id.as_deref().map(RemoteId::from),
        }
    } else if status == StatusCode::NOT_FOUND || lowered.contains("not found") {
        RemoteError::NotFound(message)
    } else {
        RemoteError::Status {
            status: status.as_u16(),
            message,
        }
    }
}
