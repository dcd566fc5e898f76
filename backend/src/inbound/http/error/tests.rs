//! Tests for HTTP error mapping.

use super::*;
use crate::domain::TraceId;
use actix_web::body::to_bytes;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn render(error: Error) -> (StatusCode, Option<String>, ErrorResponse) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error envelope deserialises");
    (status, header, body)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_details_and_trace_id(expected_trace_id: String) {
    let error = Error::invalid_request("bad")
        .try_with_trace_id(expected_trace_id.clone())
        .expect("trace id is non-empty")
        .with_details(json!({ "field": "id" }));

    let (status, header, body) = render(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(body.status, 400);
    assert_eq!(body.code, ErrorCode::InvalidRequest);
    assert_eq!(body.message, "bad");
    assert_eq!(body.trace_id, Some(expected_trace_id));
    assert_eq!(body.details, Some(json!({ "field": "id" })));
}

#[rstest]
#[actix_web::test]
async fn internal_errors_keep_the_message_but_drop_details() {
    let error = Error::internal("user store query failed: cursor killed")
        .with_details(json!({ "collection": "user" }));

    let (status, header, body) = render(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(header.is_none(), "no trace id outside a request scope");
    assert_eq!(body.status, 500);
    assert_eq!(body.message, "user store query failed: cursor killed");
    assert_eq!(body.details, None);
}

#[rstest]
#[actix_web::test]
async fn envelope_uses_camel_case_keys() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid uuid");
    let error = TraceId::scope(trace_id, async { Error::not_found("gone") }).await;
    let value = serde_json::to_value(ErrorResponse::from(&error)).expect("serialises");
    assert_eq!(
        value,
        json!({
            "status": 404,
            "code": "not_found",
            "message": "gone",
            "traceId": TRACE_ID,
        })
    );
}

#[rstest]
fn actix_errors_are_promoted_to_internal_errors() {
    let actix = actix_web::error::ErrorBadGateway("upstream");
    let err = Error::from(actix);
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "internal server error");
}

#[derive(Debug, serde::Deserialize)]
struct Probe {
    age: u8,
}

#[actix_web::post("/probe/{n}")]
async fn probe(path: web::Path<u32>, body: web::Json<Probe>) -> HttpResponse {
    HttpResponse::Ok().body(format!("{} {}", path.into_inner(), body.age))
}

#[rstest]
#[case("/probe/1", r#"{"age": "old"}"#, "malformed JSON body")]
#[case("/probe/1", "{", "malformed JSON body")]
#[case("/probe/one", r#"{"age": 3}"#, "malformed path")]
#[actix_web::test]
async fn extractor_failures_render_as_bad_request_envelopes(
    #[case] uri: &str,
    #[case] payload: &'static str,
    #[case] message_prefix: &str,
) {
    let app = actix_test::init_service(
        App::new()
            .app_data(json_config())
            .app_data(path_config())
            .service(probe),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .insert_header(("content-type", "application/json"))
        .set_payload(payload)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = actix_test::read_body_json(response).await;
    assert_eq!(body.code, ErrorCode::InvalidRequest);
    assert!(
        body.message.starts_with(message_prefix),
        "unexpected message {}",
        body.message
    );
}
