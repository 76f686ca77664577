//! Home route: the logging page, its form posts and the last-feed lookup.
//!
//! Routes:
//! - GET / - Render the page
//! - HEAD / - Liveness target for the healthcheck
//! - POST / - Record a feeding session or diaper change
//! - GET /api/last-feed - Last recorded feeding start time

use chrono::Local;
use lambda_http::{Body, Request, RequestPayloadExt, Response};
use tracing::{error, info, warn};

use crate::http::{empty_response, error_response, html_response, json_response, text_response, wants_json};
use crate::logbook::Logbook;
use crate::models::{EventRecord, LastFeedResponse, SubmissionForm, SubmitOk};
use crate::page::{render_home, Notice};
use crate::sheets::SheetStore;
use crate::Error;

pub async fn handler<S: SheetStore>(
    logbook: &Logbook<S>,
    event: Request,
) -> Result<Response<Body>, lambda_http::Error> {
    let path = event.uri().path().to_string();
    let method = event.method().as_str().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => html_response(200, render_home(&Local::now().naive_local(), None)),
        ("HEAD", "/") => empty_response(200),
        ("POST", "/") => submit(logbook, &event).await,
        ("GET", "/api/last-feed") => last_feed(logbook).await,
        _ => text_response(404, "Not found"),
    }
}

async fn submit<S: SheetStore>(
    logbook: &Logbook<S>,
    event: &Request,
) -> Result<Response<Body>, lambda_http::Error> {
    let json = wants_json(event);

    let record = match EventRecord::try_from(&parse_form(event)) {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %e, "Rejected submission");
            return respond_failure(json, &e);
        }
    };

    match logbook.record(&record).await {
        Ok(()) => {
            info!(kind = kind(&record), "Event recorded");
            if json {
                json_response(200, &SubmitOk { ok: true })
            } else {
                html_response(
                    200,
                    render_home(&Local::now().naive_local(), Some(&Notice::Submitted)),
                )
            }
        }
        Err(e) => {
            error!(kind = kind(&record), error = %e, "Failed to record event");
            respond_failure(json, &e)
        }
    }
}

/// An unreadable or absent body reads as an empty form, which then fails
/// on its first required field.
fn parse_form(event: &Request) -> SubmissionForm {
    match event.payload::<SubmissionForm>() {
        Ok(form) => form.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "Unreadable form body");
            SubmissionForm::default()
        }
    }
}

fn kind(record: &EventRecord) -> &'static str {
    match record {
        EventRecord::Feeding(_) => "feeding",
        EventRecord::Diaper(_) => "diaper",
    }
}

fn respond_failure(json: bool, e: &Error) -> Result<Response<Body>, lambda_http::Error> {
    if json {
        error_response(e)
    } else {
        html_response(
            e.status_code(),
            render_home(
                &Local::now().naive_local(),
                Some(&Notice::Failed(e.error_code().to_string())),
            ),
        )
    }
}

async fn last_feed<S: SheetStore>(logbook: &Logbook<S>) -> Result<Response<Body>, lambda_http::Error> {
    match logbook.last_feed_time().await {
        Ok(last_food_time) => json_response(200, &LastFeedResponse { last_food_time }),
        Err(e) => {
            error!(error = %e, "Failed to read last feed time");
            error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailurePolicy;
    use crate::http::body_text;
    use crate::logbook::tests::{test_config, MockStore};

    fn logbook(store: MockStore, policy: FailurePolicy) -> Logbook<MockStore> {
        Logbook::new(store, &test_config(policy))
    }

    fn post(body: &str, accept: &str) -> Request {
        lambda_http::http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/x-www-form-urlencoded")
            .header("accept", accept)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(path: &str) -> Request {
        lambda_http::http::Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::Empty)
            .unwrap()
    }

    #[tokio::test]
    async fn test_diaper_submission_appends_row() {
        let logbook = logbook(MockStore::default(), FailurePolicy::Surface);
        let response = handler(
            &logbook,
            post(
                "_action=WC&startDateTime=2024-03-09T07%3A05&hasPeed=true&hasPooped=false",
                "application/json",
            ),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(body_text(&response), r#"{"ok":true}"#);
        assert_eq!(
            logbook.store().appended.lock().unwrap().clone(),
            vec![(
                "Couches".to_string(),
                vec![
                    "09/03/2024 07:05:00".to_string(),
                    "OUI".to_string(),
                    "NON".to_string()
                ]
            )]
        );
    }

    #[tokio::test]
    async fn test_missing_start_fails_before_remote_call() {
        let logbook = logbook(MockStore::default(), FailurePolicy::Surface);

        for body in [
            "_action=FOOD&endDateTime=",
            "_action=WC&hasPeed=true&hasPooped=true",
        ] {
            let response = handler(&logbook, post(body, "application/json")).await.unwrap();
            assert_eq!(response.status(), 400);
            assert_eq!(body_text(&response), r#"{"errorCode":"missing-field"}"#);
        }
        assert_eq!(logbook.store().call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_action_is_400() {
        let logbook = logbook(MockStore::default(), FailurePolicy::Surface);
        let response = handler(&logbook, post("_action=NAP", "application/json"))
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        assert_eq!(body_text(&response), r#"{"errorCode":"invalid-action"}"#);
        assert_eq!(logbook.store().call_count(), 0);
    }

    #[tokio::test]
    async fn test_bad_date_is_rejected_before_remote_call() {
        let logbook = logbook(MockStore::default(), FailurePolicy::Surface);
        let response = handler(
            &logbook,
            post("_action=FOOD&startDateTime=tomorrow", "application/json"),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 400);
        assert_eq!(body_text(&response), r#"{"errorCode":"invalid-date"}"#);
        assert_eq!(logbook.store().call_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_surfaces_as_500() {
        let logbook = logbook(MockStore::failing(), FailurePolicy::Surface);
        let response = handler(
            &logbook,
            post("_action=FOOD&startDateTime=2024-03-09T07%3A05", "application/json"),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 500);
        assert_eq!(body_text(&response), r#"{"errorCode":"unknown"}"#);
    }

    #[tokio::test]
    async fn test_remote_failure_swallowed_when_best_effort() {
        let logbook = logbook(MockStore::failing(), FailurePolicy::BestEffort);
        let response = handler(
            &logbook,
            post("_action=FOOD&startDateTime=2024-03-09T07%3A05", "application/json"),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(logbook.store().appended.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_plain_form_post_renders_page() {
        let logbook = logbook(MockStore::default(), FailurePolicy::Surface);
        let response = handler(
            &logbook,
            post(
                "_action=FOOD&startDateTime=2024-03-09T07%3A05&endDateTime=2024-03-09T07%3A30",
                "text/html",
            ),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 200);
        assert!(body_text(&response).contains("Data submitted successfully!</div>"));
        assert_eq!(
            logbook.store().appended.lock().unwrap()[0].1,
            vec!["09/03/2024 07:05:00", "09/03/2024 07:30:00"]
        );
    }

    #[tokio::test]
    async fn test_plain_form_post_failure_keeps_status() {
        let logbook = logbook(MockStore::default(), FailurePolicy::Surface);
        let response = handler(&logbook, post("_action=FOOD", "text/html"))
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        assert!(body_text(&response).contains("Erreur : missing-field"));
    }

    #[tokio::test]
    async fn test_page_and_liveness() {
        let logbook = logbook(MockStore::default(), FailurePolicy::Surface);

        let response = handler(&logbook, get("/")).await.unwrap();
        assert_eq!(response.status(), 200);
        assert!(body_text(&response).contains("Dernière tétée"));
        assert_eq!(logbook.store().call_count(), 0);

        let head = lambda_http::http::Request::builder()
            .method("HEAD")
            .uri("/")
            .body(Body::Empty)
            .unwrap();
        assert_eq!(handler(&logbook, head).await.unwrap().status(), 200);

        let response = handler(&logbook, get("/nope")).await.unwrap();
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_last_feed_endpoint() {
        let store = MockStore {
            last_cell: Some("09/03/2024 07:05:00".to_string()),
            ..Default::default()
        };
        let logbook = logbook(store, FailurePolicy::Surface);
        let response = handler(&logbook, get("/api/last-feed")).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            body_text(&response),
            r#"{"lastFoodTime":"09/03/2024 07:05:00"}"#
        );

        let logbook = self::logbook(MockStore::default(), FailurePolicy::Surface);
        let response = handler(&logbook, get("/api/last-feed")).await.unwrap();
        assert_eq!(body_text(&response), r#"{"lastFoodTime":null}"#);
    }
}
