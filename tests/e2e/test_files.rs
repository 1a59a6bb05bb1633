use crate::helpers::TestContext;
use hyper::StatusCode;
use std::sync::atomic::Ordering;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_issue_an_upload_url(ctx: &mut TestContext) {
    let response = ctx
        .client
        .post_empty("/api/files/generate-upload-url")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let upload_url = response.json()["upload_url"].as_str().unwrap();
    assert!(
        upload_url.starts_with(&format!("{}/api/storage/upload?token=", ctx.storage_base_url)),
        "unexpected upload url {}",
        upload_url
    );
    assert_eq!(ctx.storage.upload_urls_issued.load(Ordering::SeqCst), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_issue_a_fresh_url_per_call(ctx: &mut TestContext) {
    let first = ctx.client.post_empty("/api/files/generate-upload-url").await.unwrap();
    let second = ctx.client.post_empty("/api/files/generate-upload-url").await.unwrap();

    assert_ne!(first.json()["upload_url"], second.json()["upload_url"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_storage_failures_as_bad_gateway(ctx: &mut TestContext) {
    ctx.storage.fail_upload_url.store(true, Ordering::SeqCst);

    let response = ctx
        .client
        .post_empty("/api/files/generate-upload-url")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("Server Error");
}
