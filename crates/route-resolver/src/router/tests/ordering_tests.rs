//! Candidate ordering and fallthrough tests

use super::{answer, call_log, calls, echo, fail, skip};
use crate::{RouteErrorCode, Router, RouterConfig};
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_hard_rejection_stops_resolution() {
    let log = call_log();
    let router = Router::new()
        .route("/x", fail(&log, 1))
        .route("/:y", answer(&log, 2));

    let err = router.resolve("/x").await.unwrap_err();
    assert_eq!(err.code, RouteErrorCode::InternalError);
    assert_eq!(err.message, "handler 1 failed");
    assert_eq!(calls(&log), vec![1]);
}

#[tokio::test]
async fn test_rejection_without_reason_falls_through() {
    let log = call_log();
    let router = Router::new()
        .route("/x", skip(&log, 1))
        .route("/:y", answer(&log, 2));

    assert_eq!(router.resolve("/x").await.unwrap(), json!(2));
    assert_eq!(calls(&log), vec![1, 2]);
}

#[tokio::test]
async fn test_ignored_reason_falls_through() {
    let router = Router::new()
        .route("/x", |_ctx: crate::Context<crate::EmptyContext>, _p: crate::Params| async {
            Err::<String, _>(crate::Rejection::ignore(crate::RouteError::forbidden("skip me")))
        })
        .route("/:y", |_ctx: crate::Context<crate::EmptyContext>, _p: crate::Params| async {
            Ok::<_, crate::Rejection>("done")
        });

    assert_eq!(router.resolve("/x").await.unwrap(), json!("done"));
}

#[tokio::test]
async fn test_first_success_wins() {
    let log = call_log();
    let router = Router::new()
        .route("/stuff", answer(&log, 1))
        .route("/stuff", fail(&log, 2));

    assert_eq!(router.resolve("/stuff").await.unwrap(), json!(1));
    assert_eq!(calls(&log), vec![1]);
}

#[tokio::test]
async fn test_static_routes_preferred_over_dynamic() {
    let log = call_log();
    let router = Router::new()
        .route("/:a/:b/:c", skip(&log, 5))
        .route("/stuff/goes", fail(&log, 0))
        .route("/stuff/goes/here/not", fail(&log, 0))
        .route("/stuff/goes/here/:nil", fail(&log, 0))
        .route("/stuff/goes/:c", skip(&log, 2))
        .route("/stuff/:b/here", skip(&log, 3))
        .route("/stuff/:b/:c", skip(&log, 4))
        .route("/stuff/goes/here", skip(&log, 1))
        .route("/:x/:y/:z", skip(&log, 6));

    let err = router.resolve("/stuff/goes/here").await.unwrap_err();
    assert_eq!(err.code, RouteErrorCode::NotFound);
    assert_eq!(err.status_code(), 404);
    assert_eq!(calls(&log), vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_candidates_lists_resolution_order() {
    let log = call_log();
    let router = Router::new()
        .route("/:a/:b", skip(&log, 3))
        .route("/a/:b", skip(&log, 2))
        .route("/a/b", skip(&log, 1))
        .route("/a/b/c", skip(&log, 0));

    assert_eq!(router.candidates("/a/b").unwrap(), vec!["/a/b", "/a/:b", "/:a/:b"]);
    assert!(router.candidates("/nothing/here/at/all").unwrap().is_empty());

    let _ = router.resolve("/a/b").await;
    assert_eq!(calls(&log), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_no_routes_is_not_found() {
    let router = Router::new();
    let err = router.resolve("/anything").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.details, Some(json!({"path": "/anything"})));
}

#[tokio::test]
async fn test_slashes_are_normalized() {
    let router = Router::new().route("a//b/", echo);
    assert_eq!(router.routes(), vec!["/a/b"]);
    assert!(router.resolve("//a/b//").await.is_ok());
}

#[tokio::test]
async fn test_root_path() {
    let log = call_log();
    let router = Router::new().route("/", answer(&log, 1));
    assert_eq!(router.resolve("").await.unwrap(), json!(1));
    assert_eq!(router.resolve("/").await.unwrap(), json!(1));
}

#[tokio::test]
async fn test_case_insensitive_matching() {
    let router = Router::case_insensitive().route("/Foo/:name", echo);

    let output = router.resolve("/fOO/MixedCase").await.unwrap();
    assert_eq!(output["values"]["name"], json!("MixedCase"));

    let sensitive = Router::new().route("/Foo/:name", echo);
    assert!(sensitive.resolve("/foo/x").await.unwrap_err().is_not_found());
    assert!(sensitive.resolve("/Foo/x").await.is_ok());
}

#[tokio::test]
async fn test_path_length_limit() {
    let router = Router::with_config(RouterConfig::new().with_max_path_length(8))
        .unwrap()
        .route("/:x", echo);

    assert!(router.resolve("/short").await.is_ok());
    let err = router.resolve("/much-too-long").await.unwrap_err();
    assert_eq!(err.code, RouteErrorCode::BadRequest);

    assert_eq!(router.candidates("/short").unwrap(), vec!["/:x"]);
    let err = router.candidates("/much-too-long").unwrap_err();
    assert_eq!(err.code, RouteErrorCode::BadRequest);
}

#[tokio::test]
async fn test_resolution_is_repeatable() {
    let log = call_log();
    let router = Router::new()
        .route("/a/:b", skip(&log, 1))
        .route("/:a/b", answer(&log, 2))
        .route("/:a/:b", answer(&log, 3));

    assert_eq!(router.resolve("/a/b").await.unwrap(), json!(2));
    assert_eq!(router.resolve("/a/b").await.unwrap(), json!(2));
    assert_eq!(calls(&log), vec![1, 2, 1, 2]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolution() {
    let router = Arc::new(Router::new().route("/users/:id", echo));

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let router = Arc::clone(&router);
            tokio::spawn(async move { router.resolve(&format!("/users/{i}")).await })
        })
        .collect();

    for (i, task) in tasks.into_iter().enumerate() {
        let output = task.await.unwrap().unwrap();
        assert_eq!(output["raw"]["id"], json!(i.to_string()));
    }
}
