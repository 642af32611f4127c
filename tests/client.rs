//! Tests of the HTTP task gateway, against a mocked task server

use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use agenda_client::client::Client;
use agenda_client::traits::TaskGateway;
use agenda_client::{NewTask, TaskId};

#[tokio::test]
async fn list_tasks() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(query_param("date", "2024-01-08 23:59"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "desc": "Buy the course", "estimateAt": "2024-01-05T12:00:00.000Z", "doneAt": null},
            {"id": 2, "desc": "Finish the course", "estimateAt": "2024-01-08T12:00:00.000Z", "doneAt": "2024-01-01T09:00:00.000Z"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).unwrap();
    let max_date = NaiveDate::from_ymd(2024, 1, 8).and_hms(23, 59, 0);
    let tasks = client.list_tasks(max_date).await.unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id(), &TaskId::from(1));
    assert!(tasks[0].is_pending());
    assert_eq!(tasks[1].description(), "Finish the course");
    assert!(tasks[1].completed());
}

#[tokio::test]
async fn create_task() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;

    let date = Utc.ymd(2024, 1, 8).and_hms(12, 0, 0);
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .and(body_json(json!({"desc": "Write tests", "estimateAt": "2024-01-08T12:00:00+00:00"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).unwrap();
    client.create_task(&NewTask::new("Write tests", date)).await.unwrap();
}

#[tokio::test]
async fn delete_and_toggle() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/tasks/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/tasks/2/toggle"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).unwrap();
    client.delete_task(&TaskId::from(3)).await.unwrap();
    client.toggle_task(&TaskId::from(2)).await.unwrap();
}

#[tokio::test]
async fn error_statuses() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Invalid date"))
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).unwrap();

    let err = client.delete_task(&TaskId::from(99)).await.unwrap_err();
    assert!(err.message().contains("404"));
    let err = client.toggle_task(&TaskId::from(99)).await.unwrap_err();
    assert!(err.message().contains("500"));
    let max_date = NaiveDate::from_ymd(2024, 1, 8).and_hms(23, 59, 0);
    assert!(client.list_tasks(max_date).await.is_err());
}

#[tokio::test]
async fn malformed_list() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "a list"})))
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).unwrap();
    let max_date = NaiveDate::from_ymd(2024, 1, 8).and_hms(23, 59, 0);
    assert!(client.list_tasks(max_date).await.is_err());
}

#[tokio::test]
async fn unreachable_server() {
    let _ = env_logger::builder().is_test(true).try_init();

    // Nothing listens on port 1
    let client = Client::new("http://127.0.0.1:1").unwrap();
    let max_date = NaiveDate::from_ymd(2024, 1, 8).and_hms(23, 59, 0);
    let err = client.list_tasks(max_date).await.unwrap_err();
    assert!(err.message().is_empty() == false);
}
