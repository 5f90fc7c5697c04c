use std::time::Duration;

use leadgen_engine::{
    ApiSettings, DashboardApi, FailureKind, JobsQuery, ReqwestApi, ScheduleRequest, ScrapeRequest,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestApi {
    ReqwestApi::new(ApiSettings {
        base_url: server.uri(),
        ..ApiSettings::default()
    })
    .expect("valid base url")
}

#[tokio::test]
async fn stats_decodes_source_breakdown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_jobs": 50,
            "unique_companies": 31,
            "today_count": 4,
            "sources": { "Indeed": 40, "LinkedIn": 10 }
        })))
        .mount(&server)
        .await;

    let stats = api_for(&server).stats().await.expect("stats ok");
    assert_eq!(stats.total_jobs, 50);
    assert_eq!(stats.sources.get("Indeed"), Some(&40));
    assert_eq!(stats.sources.len(), 2);
}

#[tokio::test]
async fn jobs_sends_filters_and_omits_blank_ones() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs"))
        .and(query_param("page", "3"))
        .and(query_param("per_page", "25"))
        .and(query_param("source", "Google Jobs"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [{
                "id": 7,
                "url": "https://example.com/job/7",
                "content_hash": "abc",
                "source": "Google Jobs",
                "company": "Acme",
                "title": "AP Clerk",
                "seen_at": "2026-02-24T08:00:00"
            }],
            "total": 40,
            "page": 2,
            "per_page": 25,
            "pages": 2
        })))
        .mount(&server)
        .await;

    let page = api_for(&server)
        .jobs(&JobsQuery {
            page: 3,
            per_page: 25,
            search: String::new(),
            source: "Google Jobs".to_string(),
        })
        .await
        .expect("jobs ok");

    assert_eq!(page.page, 2);
    assert_eq!(page.pages, 2);
    assert_eq!(page.jobs.len(), 1);
    assert_eq!(page.jobs[0].company.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn scrape_posts_tiers_and_reads_command() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .and(body_json(json!({ "tier": [1, 3], "dry_run": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Scrape started",
            "command": "python main.py --tier 1 3 --dry-run",
            "status": { "running": false }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let started = api_for(&server)
        .start_scrape(&ScrapeRequest {
            tier: vec![1, 3],
            keywords: None,
            dry_run: true,
        })
        .await
        .expect("scrape accepted");
    assert_eq!(
        started.command.as_deref(),
        Some("python main.py --tier 1 3 --dry-run")
    );
}

#[tokio::test]
async fn scrape_forwards_keyword_override() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .and(body_json(json!({
            "tier": [2],
            "keywords": ["accounts payable", "AP clerk"],
            "dry_run": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Scrape started",
            "command": "python main.py --tier 2 --keyword accounts payable AP clerk"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let started = api_for(&server)
        .start_scrape(&ScrapeRequest {
            tier: vec![2],
            keywords: Some(vec!["accounts payable".to_string(), "AP clerk".to_string()]),
            dry_run: false,
        })
        .await
        .expect("scrape accepted");
    assert_eq!(started.message.as_deref(), Some("Scrape started"));
}

#[tokio::test]
async fn daily_counts_decode_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "days": [
                { "date": "2026-02-25", "count": 12 },
                { "date": "2026-02-24", "count": 7 }
            ]
        })))
        .mount(&server)
        .await;

    let daily = api_for(&server).daily_counts().await.expect("daily ok");
    assert_eq!(daily.days.len(), 2);
    assert_eq!(daily.days[0].date, "2026-02-25");
    assert_eq!(daily.days[0].count, 12);
}

#[tokio::test]
async fn busy_scrape_is_a_rejection_with_server_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "A scrape is already running",
            "status": { "running": true }
        })))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .start_scrape(&ScrapeRequest {
            tier: vec![1],
            keywords: None,
            dry_run: false,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Rejected { status: 409 });
    assert_eq!(err.user_message("Failed to start scrape"), "A scrape is already running");
}

#[tokio::test]
async fn status_tolerates_null_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scrape/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "running": false,
            "last_run": null,
            "last_result": null,
            "log_output": ""
        })))
        .mount(&server)
        .await;

    let status = api_for(&server).scrape_status().await.expect("status ok");
    assert!(!status.running);
    assert_eq!(status.last_result, None);
    assert_eq!(status.started_at, None);
}

#[tokio::test]
async fn schedule_save_returns_message_with_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scheduler/save"))
        .and(body_json(json!({ "frequency": "every_6h", "time": "06:00", "tiers": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "active": true,
            "paused": false,
            "frequency": "every_6h",
            "time": "06:00",
            "tiers": [],
            "next_run": "2026-02-26T06:00:00",
            "message": "Scheduled every_6h at 06:00"
        })))
        .mount(&server)
        .await;

    let saved = api_for(&server)
        .save_schedule(&ScheduleRequest {
            frequency: "every_6h".to_string(),
            time: "06:00".to_string(),
            tiers: Vec::new(),
        })
        .await
        .expect("save ok");
    assert_eq!(saved.message.as_deref(), Some("Scheduled every_6h at 06:00"));
    assert!(saved.state.active);
    assert_eq!(saved.state.frequency.as_deref(), Some("every_6h"));
}

#[tokio::test]
async fn pause_posts_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scheduler/pause"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "active": true,
            "paused": true,
            "tiers": [1]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = api_for(&server).pause_schedule().await.expect("pause ok");
    assert!(state.paused);
    assert_eq!(state.tiers, vec![1]);
}

#[tokio::test]
async fn server_error_without_body_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sources"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api_for(&server).sources().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.user_message("fallback"), "fallback");
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let api = ReqwestApi::new(ApiSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    })
    .expect("valid base url");

    let err = api.config().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}
