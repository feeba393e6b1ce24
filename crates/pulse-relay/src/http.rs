// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! HTTP surface: `GET /pulse[?delay=N]`, the pulse-length settings page,
//! plus static files.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Form, Router,
};
use pulse_core::DEFAULT_ENDPOINT;
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

use crate::relay::RelayPort;
use crate::scheduler::PulseScheduler;

/// Path of the settings page.
pub const SETTINGS_PATH: &str = "/settings";

/// Query string of `GET /pulse`.
#[derive(Debug, Default, Deserialize)]
pub struct PulseQuery {
    /// Seconds to wait before closing the relay.
    pub delay: Option<u64>,
}

/// Body of `POST /settings`.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    /// Relay closed time per pulse, in milliseconds.
    #[serde(rename = "timeOn")]
    pub time_on: u64,
}

/// Build the service router. Anything other than the pulse endpoint and
/// the settings page is looked up under `doc_root`.
pub fn router<R: RelayPort>(scheduler: Arc<PulseScheduler<R>>, doc_root: &Path) -> Router {
    Router::new()
        .route(
            DEFAULT_ENDPOINT,
            // HEAD would otherwise fall through to the GET handler and pulse.
            get(pulse::<R>)
                .head(not_implemented)
                .fallback(not_implemented),
        )
        .route(
            SETTINGS_PATH,
            get(settings::<R>).post(save_settings::<R>),
        )
        .fallback_service(ServeDir::new(doc_root))
        .layer(TraceLayer::new_for_http())
        .with_state(scheduler)
}

async fn pulse<R: RelayPort>(
    State(scheduler): State<Arc<PulseScheduler<R>>>,
    Query(query): Query<PulseQuery>,
) -> impl IntoResponse {
    scheduler.trigger(query.delay.map(Duration::from_secs));
    info!(
        delay_s = query.delay,
        time_on_ms = scheduler.time_on().as_millis(),
        "pulse accepted"
    );
    ([(header::CONTENT_TYPE, "text/plain")], "OK")
}

async fn not_implemented() -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}

async fn settings<R: RelayPort>(State(scheduler): State<Arc<PulseScheduler<R>>>) -> Html<String> {
    settings_page(scheduler.time_on())
}

async fn save_settings<R: RelayPort>(
    State(scheduler): State<Arc<PulseScheduler<R>>>,
    Form(form): Form<SettingsForm>,
) -> Result<Html<String>, (StatusCode, String)> {
    scheduler
        .set_time_on(Duration::from_millis(form.time_on))
        .map_err(|err| {
            warn!(%err, time_on_ms = form.time_on, "settings rejected");
            (StatusCode::BAD_REQUEST, err.to_string())
        })?;
    Ok(settings_page(scheduler.time_on()))
}

fn settings_page(time_on: Duration) -> Html<String> {
    Html(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Pulse settings</title></head>
<body>
  <form method="post" action="{SETTINGS_PATH}">
    <label>Pulse length (ms)
      <input type="number" name="timeOn" min="1" value="{ms}">
    </label>
    <button type="submit">Save</button>
  </form>
  <p><a href="/">Back</a></p>
</body>
</html>
"##,
        ms = time_on.as_millis()
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use axum::{
        body::{self, Body},
        http::Request,
        response::Response,
    };
    use pulse_core::testing::settle;
    use tokio::time::advance;
    use tower::ServiceExt;

    use super::*;
    use crate::relay::recording::RecordingRelay;

    fn app(doc_root: &Path) -> (Router, Arc<RecordingRelay>) {
        let relay = Arc::new(RecordingRelay::default());
        let scheduler = Arc::new(PulseScheduler::new(
            Arc::clone(&relay),
            Duration::from_millis(500),
        ));
        (router(scheduler, doc_root), relay)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("request")
    }

    fn post_settings(form: &'static str) -> Request<Body> {
        Request::post(SETTINGS_PATH)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .expect("request")
    }

    async fn text(response: Response) -> String {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[tokio::test(start_paused = true)]
    async fn pulse_returns_ok_and_drives_relay() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (app, relay) = app(dir.path());

        let response = app.oneshot(get("/pulse")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).expect("content type"),
            "text/plain"
        );
        assert_eq!(text(response).await, "OK");

        settle().await;
        assert_eq!(relay.levels(), vec![true]);
        advance(Duration::from_millis(500)).await;
        settle().await;
        assert_eq!(relay.levels(), vec![true, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_pulse_answers_before_relay_moves() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (app, relay) = app(dir.path());

        let response = app.oneshot(get("/pulse?delay=2")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        settle().await;
        assert!(relay.levels().is_empty());
        advance(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(relay.levels(), vec![true]);
    }

    #[tokio::test]
    async fn malformed_delay_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (app, relay) = app(dir.path());

        let response = app
            .oneshot(get("/pulse?delay=soon"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(relay.levels().is_empty());
    }

    #[tokio::test]
    async fn only_get_fires_the_pulse() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (app, relay) = app(dir.path());

        let head = Request::head("/pulse").body(Body::empty()).expect("request");
        let response = app.clone().oneshot(head).await.expect("response");
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

        let post = Request::post("/pulse").body(Body::empty()).expect("request");
        let response = app.oneshot(post).await.expect("response");
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);

        settle().await;
        assert!(relay.levels().is_empty());
    }

    #[tokio::test]
    async fn settings_page_shows_current_pulse_length() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (app, _relay) = app(dir.path());

        let response = app.oneshot(get(SETTINGS_PATH)).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let page = text(response).await;
        assert!(page.contains(r#"name="timeOn""#));
        assert!(page.contains(r#"value="500""#));
    }

    #[tokio::test(start_paused = true)]
    async fn posted_pulse_length_applies_to_next_pulse() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (app, relay) = app(dir.path());

        let response = app
            .clone()
            .oneshot(post_settings("timeOn=1500"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(text(response).await.contains(r#"value="1500""#));

        let response = app.oneshot(get("/pulse")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        settle().await;
        advance(Duration::from_millis(1499)).await;
        settle().await;
        assert_eq!(relay.levels(), vec![true], "still closed at 1499ms");
        advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(relay.levels(), vec![true, false]);
        assert!(dir.path().read_dir().expect("read dir").next().is_none());
    }

    #[tokio::test]
    async fn zero_pulse_length_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (app, _relay) = app(dir.path());

        let response = app
            .clone()
            .oneshot(post_settings("timeOn=0"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let page = text(app.oneshot(get(SETTINGS_PATH)).await.expect("response")).await;
        assert!(page.contains(r#"value="500""#));
    }

    #[tokio::test]
    async fn page_is_served_from_doc_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("index.html"),
            r#"<button id="pulseButton">Pulse</button>"#,
        )
        .expect("write page");
        let (app, _relay) = app(dir.path());

        let response = app.clone().oneshot(get("/")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(text(response).await.contains("pulseButton"));

        let missing = app.oneshot(get("/nope.js")).await.expect("response");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
