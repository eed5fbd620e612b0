//! Execution of planned operations.

use crate::Error;
use crate::operation::{Operation, Outcome, ResponseShape, StatusResult};
use crate::transport::Transport;

/// Performs the exchange described by `operation` and shapes its result.
///
/// Each call issues exactly one request; nothing is cached between calls.
/// Any received status produces an [`Outcome`]. Transport failures are
/// logged and returned unchanged.
///
/// # Errors
///
/// Returns the transport's error (`Timeout`, `Connection`, `Transport`), or
/// [`InvalidResponse`](crate::ErrorKind::InvalidResponse) when a JSON body
/// cannot be parsed.
pub async fn execute<T>(transport: &T, operation: &Operation) -> Result<Outcome, Error>
where
    T: Transport + ?Sized,
{
    if operation.debug() {
        tracing::info!(
            target: "permit::dispatch",
            action = operation.action().as_str(),
            params = operation.params(),
            "permit.api.{}({})",
            operation.action(),
            operation.params(),
        );
    }

    let response = match transport.send(operation.to_transport_request()).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(
                target: "permit::dispatch",
                action = operation.action().as_str(),
                params = operation.params(),
                kind = %err.kind(),
                "error while calling {}({}): {}",
                operation.action(),
                operation.params(),
                err,
            );
            return Err(err);
        },
    };

    match operation.response_shape() {
        ResponseShape::Status => Ok(Outcome::Status(StatusResult {
            status: response.status,
        })),
        ResponseShape::Json if response.body.iter().all(u8::is_ascii_whitespace) => {
            Ok(Outcome::Body(serde_json::Value::Null))
        },
        ResponseShape::Json => match serde_json::from_slice(&response.body) {
            Ok(value) => Ok(Outcome::Body(value)),
            Err(e) => {
                let err = Error::invalid_response(format!(
                    "{} returned status {} with a non-JSON body: {}",
                    operation.action(),
                    response.status,
                    e
                ))
                .with_source(e);
                tracing::error!(
                    target: "permit::dispatch",
                    action = operation.action().as_str(),
                    params = operation.params(),
                    kind = %err.kind(),
                    "{}",
                    err,
                );
                Err(err)
            },
        },
    }
}
