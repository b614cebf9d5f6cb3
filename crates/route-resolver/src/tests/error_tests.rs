//! Error mapping tests

use crate::{Context, EmptyContext, Params, Rejection, RouteError, RouteErrorCode, Router};
use proptest::prelude::*;
use serde_json::json;

fn any_code() -> impl Strategy<Value = RouteErrorCode> {
    prop_oneof![
        Just(RouteErrorCode::NotFound),
        Just(RouteErrorCode::UnknownRoute),
        Just(RouteErrorCode::MissingParam),
        Just(RouteErrorCode::ValidationError),
        Just(RouteErrorCode::BadRequest),
        Just(RouteErrorCode::Forbidden),
        Just(RouteErrorCode::Conflict),
        Just(RouteErrorCode::InternalError),
        Just(RouteErrorCode::SerializationError),
    ]
}

proptest! {
    /// Every code is exactly one of client or server error.
    #[test]
    fn prop_code_is_client_xor_server(code in any_code()) {
        prop_assert!(code.is_client_error() != code.is_server_error());
        prop_assert_eq!(code.is_client_error(), code.status_code() < 500);
    }

    /// Errors survive a JSON round trip.
    #[test]
    fn prop_error_serde_round_trip(code in any_code(), message in "[a-zA-Z ]{0,30}") {
        let error = RouteError::new(code, message).with_details(json!({"k": 1}));
        let back: RouteError = serde_json::from_value(serde_json::to_value(&error).unwrap()).unwrap();
        prop_assert_eq!(back, error);
    }
}

#[test]
fn test_error_display() {
    let error = RouteError::conflict("already exists");
    assert_eq!(error.to_string(), "[CONFLICT] already exists");
}

#[test]
fn test_optional_fields_skipped_when_absent() {
    let value = serde_json::to_value(RouteError::internal("x")).unwrap();
    assert_eq!(value, json!({"code": "INTERNAL_ERROR", "message": "x"}));
}

#[test]
fn test_rejection_into_error() {
    assert_eq!(Rejection::Empty.into_error(), None);
    let error = RouteError::forbidden("no");
    assert_eq!(Rejection::ignore(error.clone()).into_error(), Some(error));
}

#[tokio::test]
async fn test_hard_error_surfaces_verbatim() {
    let expected = RouteError::conflict("Order already shipped")
        .with_details(json!({"order": 7}))
        .with_cause("status=shipped");
    let returned = expected.clone();

    let router = Router::new().route("/orders/:id", move |_ctx: Context<EmptyContext>, _p: Params| {
        let error = returned.clone();
        async move { Err::<(), Rejection>(error.into()) }
    });

    assert_eq!(router.resolve("/orders/7").await.unwrap_err(), expected);
}

#[tokio::test]
async fn test_question_mark_in_handler_is_hard() {
    let router = Router::new()
        .route("/n/:n", |_ctx: Context<EmptyContext>, params: Params| async move {
            let n: u32 = params.get_as("n")?;
            Ok::<_, Rejection>(n)
        })
        .route("/n/:other", |_ctx: Context<EmptyContext>, _p: Params| async {
            Ok::<_, Rejection>(0)
        });

    let err = router.resolve("/n/seven").await.unwrap_err();
    assert_eq!(err.code, RouteErrorCode::ValidationError);
}
