use crate::helpers::{fake_tts::mock_audio_bytes, TestContext};
use hyper::StatusCode;
use podcast_studio::domain::podcast::VoiceType;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use test_context::test_context;

fn notification_severities(body: &Value) -> Vec<String> {
    body["notifications"]
        .as_array()
        .expect("Missing notifications")
        .iter()
        .map(|n| n["severity"].as_str().unwrap().to_string())
        .collect()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_and_publish_a_podcast(ctx: &mut TestContext) {
    let response = ctx
        .client
        .post(
            "/api/podcasts/generate",
            &json!({
                "voice_type": "nova",
                "voice_prompt": "Welcome to the first episode of the show."
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.json();
    assert_eq!(body["audio_storage_id"], "kg1");
    assert_eq!(
        body["audio"],
        format!("{}/api/storage/kg1", ctx.storage_base_url)
    );
    assert_eq!(body["is_generating"], false);
    assert_eq!(body["audio_duration"], Value::Null);
    assert!(body["generated_at"].is_string());
    assert_eq!(notification_severities(body), vec!["success"]);

    assert_eq!(
        ctx.tts.requests(),
        vec![(
            VoiceType::Nova,
            "Welcome to the first episode of the show.".to_string()
        )]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_store_the_audio_as_mpeg(ctx: &mut TestContext) {
    let response = ctx
        .client
        .post(
            "/api/podcasts/generate",
            &json!({ "voice_type": "alloy", "voice_prompt": "Short intro." }),
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let files = ctx.storage.files();
    let stored = files.get("kg1").expect("audio was not uploaded");
    assert_eq!(stored.content_type, "audio/mpeg");
    assert_eq!(stored.data, mock_audio_bytes());

    let audio_url = response.json()["audio"].as_str().unwrap().to_string();
    let playback = ctx.client.get_url(&audio_url).await.unwrap();
    playback.assert_status(StatusCode::OK);
    assert_eq!(playback.header("content-type").map(String::as_str), Some("audio/mpeg"));
    assert_eq!(playback.body_bytes, mock_audio_bytes());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_blank_prompt_without_remote_calls(ctx: &mut TestContext) {
    for prompt in ["", "   "] {
        let response = ctx
            .client
            .post(
                "/api/podcasts/generate",
                &json!({ "voice_type": "echo", "voice_prompt": prompt }),
            )
            .await
            .unwrap();

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json();
        assert_eq!(body["is_generating"], false);
        assert_eq!(body["audio"], Value::Null);
        assert_eq!(notification_severities(body), vec!["destructive"]);
    }

    assert!(ctx.tts.requests().is_empty());
    assert_eq!(ctx.storage.upload_urls_issued.load(Ordering::SeqCst), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_voices(ctx: &mut TestContext) {
    let response = ctx
        .client
        .post(
            "/api/podcasts/generate",
            &json!({ "voice_type": "Joanna", "voice_prompt": "Hello" }),
        )
        .await
        .unwrap();

    assert!(response.status.is_client_error());
    assert!(ctx.tts.requests().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_synthesis_failures(ctx: &mut TestContext) {
    ctx.tts.fail.store(true, Ordering::SeqCst);

    let response = ctx
        .client
        .post(
            "/api/podcasts/generate",
            &json!({ "voice_type": "onyx", "voice_prompt": "Hello listeners." }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body = response.json();
    assert_eq!(body["is_generating"], false);
    assert_eq!(body["audio"], Value::Null);
    assert_eq!(body["audio_storage_id"], Value::Null);
    assert_eq!(notification_severities(body), vec!["destructive"]);
    assert_eq!(ctx.storage.upload_urls_issued.load(Ordering::SeqCst), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_upload_failures(ctx: &mut TestContext) {
    ctx.storage.fail_upload.store(true, Ordering::SeqCst);

    let response = ctx
        .client
        .post(
            "/api/podcasts/generate",
            &json!({ "voice_type": "fable", "voice_prompt": "Hello listeners." }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body = response.json();
    assert_eq!(body["audio"], Value::Null);
    assert_eq!(body["audio_storage_id"], Value::Null);
    assert_eq!(notification_severities(body), vec!["destructive"]);
    assert!(ctx.storage.files().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_publish_audio_when_url_resolution_fails(ctx: &mut TestContext) {
    ctx.storage.fail_get_url.store(true, Ordering::SeqCst);

    let response = ctx
        .client
        .post(
            "/api/podcasts/generate",
            &json!({ "voice_type": "shimmer", "voice_prompt": "Hello listeners." }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body = response.json();
    assert_eq!(body["audio_storage_id"], "kg1");
    assert_eq!(body["audio"], Value::Null);
    assert_eq!(body["is_generating"], false);
    assert_eq!(notification_severities(body), vec!["destructive"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_again_after_a_failure(ctx: &mut TestContext) {
    ctx.storage.fail_get_url.store(true, Ordering::SeqCst);
    let failed = ctx
        .client
        .post(
            "/api/podcasts/generate",
            &json!({ "voice_type": "alloy", "voice_prompt": "Take one." }),
        )
        .await
        .unwrap();
    failed.assert_status(StatusCode::BAD_GATEWAY);

    ctx.storage.fail_get_url.store(false, Ordering::SeqCst);
    let retried = ctx
        .client
        .post(
            "/api/podcasts/generate",
            &json!({ "voice_type": "alloy", "voice_prompt": "Take one." }),
        )
        .await
        .unwrap();

    retried.assert_status(StatusCode::OK);
    let body = retried.json();
    assert_eq!(body["audio_storage_id"], "kg2");
    assert_eq!(body["audio"], format!("{}/api/storage/kg2", ctx.storage_base_url));
    assert_eq!(notification_severities(body), vec!["success"]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_store_each_generation_separately(ctx: &mut TestContext) {
    for _ in 0..2 {
        ctx.client
            .post(
                "/api/podcasts/generate",
                &json!({ "voice_type": "echo", "voice_prompt": "Same words twice." }),
            )
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }

    assert_eq!(ctx.storage.files().len(), 2);
    assert_eq!(ctx.storage.upload_urls_issued.load(Ordering::SeqCst), 2);
}
