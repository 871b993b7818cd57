use actix_web::{
    body::{to_bytes, MessageBody},
    dev::ServiceResponse,
    http::header::{self, HeaderMap},
    middleware::ErrorHandlerResponse,
    Result,
};
use futures::FutureExt;

use crate::model::Response;

/// Rewrites non-JSON error responses (extractor failures, unknown routes) into the response envelope.
pub fn default_error_handler<B: MessageBody + 'static>(
    svc_res: ServiceResponse<B>,
) -> Result<ErrorHandlerResponse<B>> {
    if is_json(svc_res.response().headers()) {
        return Ok(ErrorHandlerResponse::Response(svc_res.map_into_left_body()));
    }

    let (req, res) = svc_res.into_parts();
    let status_code = res.status();

    Ok(ErrorHandlerResponse::Future(
        async move {
            let message = match to_bytes(res.into_body()).await {
                Ok(bytes) if !bytes.is_empty() => String::from_utf8_lossy(&bytes).into_owned(),
                Ok(_) => status_code
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_owned(),
                Err(err) => {
                    let err: Box<dyn std::error::Error> = err.into();
                    err.to_string()
                }
            };

            let res = Response::error_raw(&status_code, &message);
            Ok(ServiceResponse::new(req, res).map_into_right_body())
        }
        .boxed_local(),
    ))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .is_some_and(|content_type| content_type.to_lowercase().starts_with("application/json"))
}
