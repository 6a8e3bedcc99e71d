use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, expected_authorization};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authed(method: &str, uri: &str, body: Option<&str>) -> Request<String> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, expected_authorization());
    match body {
        Some(body) => builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .unwrap(),
        None => builder.body(String::new()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<String>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body_bytes(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

// --- auth ---

#[tokio::test]
async fn missing_credentials_return_401_envelope() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/v1/on-demand")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], 401);
    assert_eq!(body["error"]["message"], "Unauthorized");
}

#[tokio::test]
async fn wrong_credentials_return_401() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/v1/live/streams")
                .header(http::header::AUTHORIZATION, "Basic d3Jvbmc6d3Jvbmc=")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// --- media ---

#[tokio::test]
async fn list_media_empty_has_pagination() {
    let app = app();
    let (status, body) = send(&app, authed("GET", "/v1/on-demand?limit=1&offset=1", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], Value::Array(Vec::new()));
    assert_eq!(body["pagination"]["totalRecords"], 0);
    assert_eq!(body["pagination"]["currentOffset"], 1);
}

#[tokio::test]
async fn create_media_returns_201_with_playback_id() {
    let app = app();
    let (status, body) = send(
        &app,
        authed(
            "POST",
            "/v1/on-demand",
            Some(r#"{"inputs":[{"type":"video","url":"https://static.example.com/a.mp4"}],"accessPolicy":"private"}"#),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let media = &body["data"];
    assert!(media["id"].as_str().is_some());
    assert_eq!(media["playbackIds"][0]["accessPolicy"], "private");
    assert!(media.get("inputs").is_none());
}

#[tokio::test]
async fn create_media_without_inputs_is_400() {
    let app = app();
    let (status, body) = send(&app, authed("POST", "/v1/on-demand", Some(r#"{"inputs":[]}"#))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);
}

#[tokio::test]
async fn create_media_rejects_unknown_access_policy() {
    let app = app();
    let (status, _) = send(
        &app,
        authed(
            "POST",
            "/v1/on-demand",
            Some(r#"{"inputs":[{"type":"video","url":"https://x/a.mp4"}],"accessPolicy":"unlisted"}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_media_not_found() {
    let app = app();
    let (status, body) = send(&app, authed("GET", "/v1/on-demand/nope", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Not Found");
}

#[tokio::test]
async fn media_lifecycle() {
    let app = app();
    let (_, created) = send(
        &app,
        authed(
            "POST",
            "/v1/on-demand",
            Some(r#"{"inputs":[{"type":"video","url":"https://static.example.com/a.mp4"}]}"#),
        ),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        authed(
            "PATCH",
            &format!("/v1/on-demand/{id}"),
            Some(r#"{"title":"Launch","metadata":{"team":"video"}}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["title"], "Launch");
    assert_eq!(updated["data"]["metadata"]["team"], "video");

    let (_, info) = send(&app, authed("GET", &format!("/v1/on-demand/{id}/input-info"), None)).await;
    assert_eq!(info["data"][0]["type"], "video");
    assert_eq!(info["data"][0]["url"], "https://static.example.com/a.mp4");

    let (status, _) = send(&app, authed("DELETE", &format!("/v1/on-demand/{id}"), None)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, authed("GET", &format!("/v1/on-demand/{id}"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn media_playback_id_delete_uses_query() {
    let app = app();
    let (_, created) = send(
        &app,
        authed(
            "POST",
            "/v1/on-demand",
            Some(r#"{"inputs":[{"type":"video","url":"https://x/a.mp4"}]}"#),
        ),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, playback) = send(
        &app,
        authed(
            "POST",
            &format!("/v1/on-demand/{id}/playback-ids"),
            Some(r#"{"accessPolicy":"drm"}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let playback_id = playback["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        authed(
            "DELETE",
            &format!("/v1/on-demand/{id}/playback-ids?playbackId={playback_id}"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        authed(
            "GET",
            &format!("/v1/on-demand/{id}/playback-ids/{playback_id}"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// --- uploads ---

#[tokio::test]
async fn upload_url_points_at_storage_route() {
    let app = app();
    let mut request = authed("POST", "/v1/on-demand/upload", Some(r#"{"corsOrigin":"*"}"#));
    request
        .headers_mut()
        .insert(http::header::HOST, "127.0.0.1:9999".parse().unwrap());
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::CREATED);
    let upload = &body["data"];
    let upload_id = upload["uploadId"].as_str().unwrap();
    assert_eq!(
        upload["url"],
        format!("http://127.0.0.1:9999/storage/uploads/{upload_id}")
    );
    assert_eq!(upload["status"], "waiting");
    assert_eq!(upload["timeout"], 14400.0);
    assert_eq!(upload["pushMediaSettings"]["accessPolicy"], "public");
}

#[tokio::test]
async fn storage_put_needs_no_auth_and_creates_media() {
    let app = app();
    let (_, body) = send(&app, authed("POST", "/v1/on-demand/upload", Some("{}"))).await;
    let upload_id = body["data"]["uploadId"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/storage/uploads/{upload_id}"))
                .header(http::header::CONTENT_TYPE, "video/mp4")
                .body("fake video bytes".to_string())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, unused) = send(&app, authed("GET", "/v1/on-demand/uploads", None)).await;
    assert_eq!(unused["data"], Value::Array(Vec::new()));
    let (_, media) = send(&app, authed("GET", "/v1/on-demand", None)).await;
    assert_eq!(media["pagination"]["totalRecords"], 1);
}

#[tokio::test]
async fn cancelled_upload_cannot_be_cancelled_again() {
    let app = app();
    let (_, body) = send(&app, authed("POST", "/v1/on-demand/upload", Some("{}"))).await;
    let upload_id = body["data"]["uploadId"].as_str().unwrap().to_string();
    let uri = format!("/v1/on-demand/upload/{upload_id}/cancel");

    let (status, cancelled) = send(&app, authed("PUT", &uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["data"]["status"], "cancelled");

    let (status, _) = send(&app, authed("PUT", &uri, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// --- live ---

#[tokio::test]
async fn stream_enable_disable_finish() {
    let app = app();
    let (status, created) = send(
        &app,
        authed(
            "POST",
            "/v1/live/streams",
            Some(r#"{"playbackSettings":{},"inputMediaSettings":{"maxResolution":"720p"}}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let stream = &created["data"];
    assert_eq!(stream["status"], "idle");
    assert_eq!(stream["maxResolution"], "720p");
    assert_eq!(stream["reconnectWindow"], 60);
    let stream_id = stream["streamId"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        authed("PUT", &format!("/v1/live/streams/{stream_id}/live-disable"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        authed("PUT", &format!("/v1/live/streams/{stream_id}/finish"), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(
        &app,
        authed("PUT", &format!("/v1/live/streams/{stream_id}/live-enable"), None),
    )
    .await;
    let (_, fetched) = send(&app, authed("GET", &format!("/v1/live/streams/{stream_id}"), None)).await;
    assert_eq!(fetched["data"]["status"], "idle");
}

#[tokio::test]
async fn reconnect_window_is_bounded() {
    let app = app();
    let (status, _) = send(
        &app,
        authed(
            "POST",
            "/v1/live/streams",
            Some(r#"{"playbackSettings":{},"inputMediaSettings":{"reconnectWindow":5000}}"#),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn simulcast_requires_rtmp_url() {
    let app = app();
    let (_, created) = send(&app, authed("POST", "/v1/live/streams", Some("{}"))).await;
    let stream_id = created["data"]["streamId"].as_str().unwrap().to_string();
    let uri = format!("/v1/live/streams/{stream_id}/simulcast");

    let (status, _) = send(
        &app,
        authed("POST", &uri, Some(r#"{"url":"https://x","streamKey":"k"}"#)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        authed("POST", &uri, Some(r#"{"url":"rtmps://live.example.com/app","streamKey":"k"}"#)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["isEnabled"], true);
}

// --- playlists ---

#[tokio::test]
async fn duplicate_reference_id_conflicts() {
    let app = app();
    let body = r#"{"name":"A","referenceId":"ref-a","type":"manual"}"#;
    let (status, _) = send(&app, authed("POST", "/v1/on-demand/playlists", Some(body))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, error) = send(&app, authed("POST", "/v1/on-demand/playlists", Some(body))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"]["code"], 409);
}

#[tokio::test]
async fn reorder_must_name_every_member() {
    let app = app();
    let media_body = r#"{"inputs":[{"type":"video","url":"https://x/a.mp4"}]}"#;
    let (_, first) = send(&app, authed("POST", "/v1/on-demand", Some(media_body))).await;
    let (_, second) = send(&app, authed("POST", "/v1/on-demand", Some(media_body))).await;
    let first = first["data"]["id"].as_str().unwrap().to_string();
    let second = second["data"]["id"].as_str().unwrap().to_string();

    let (_, playlist) = send(
        &app,
        authed(
            "POST",
            "/v1/on-demand/playlists",
            Some(r#"{"name":"P","referenceId":"p","type":"manual"}"#),
        ),
    )
    .await;
    let playlist_id = playlist["data"]["id"].as_str().unwrap().to_string();
    let media_uri = format!("/v1/on-demand/playlists/{playlist_id}/media");

    let (_, added) = send(
        &app,
        authed(
            "PATCH",
            &media_uri,
            Some(&format!(r#"{{"mediaIds":["{first}","{second}"]}}"#)),
        ),
    )
    .await;
    assert_eq!(added["data"]["mediaCount"], 2);

    let (status, _) = send(
        &app,
        authed("PUT", &media_uri, Some(&format!(r#"{{"mediaIds":["{second}"]}}"#))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, reordered) = send(
        &app,
        authed(
            "PUT",
            &media_uri,
            Some(&format!(r#"{{"mediaIds":["{second}","{first}"]}}"#)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reordered["data"]["mediaList"][0]["id"], second.as_str());
}
