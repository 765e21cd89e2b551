use httpmock::prelude::*;
use mandrill_mailer::{Address, Attachment, Client, Email, Error, Message, MessageParams};
use serde_json::json;
use std::time::Duration;

fn client(server: &MockServer) -> Client {
    Client::builder("test-key")
        .base_url(server.base_url())
        .user_agent("mandrill-mailer-tests")
        .build()
        .unwrap()
}

fn sample() -> Email {
    Email::new("Hello")
        .from(Address::with_name("noreply@example.com", "Example"))
        .to(Address::with_name("alice@example.com", "Alice"))
        .cc("bob@example.com")
        .bcc("audit@example.com")
        .text("Hi there")
        .html("<p>Hi there</p>")
        .header("Date", "Mon, 19 Oct 2026 10:00:00 +0000")
        .header("X-Campaign", "launch")
        .header("Tags", "launch,welcome")
        .attach(Attachment::new("hello.txt", "text/plain", b"hello".to_vec()))
}

#[tokio::test]
async fn posts_envelope_and_returns_response() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/messages/send.json")
                .header("content-type", "application/json")
                .header("user-agent", "mandrill-mailer-tests")
                .json_body(json!({
                    "key": "test-key",
                    "async": true,
                    "message": {
                        "subject": "Hello",
                        "text": "Hi there",
                        "html": "<p>Hi there</p>",
                        "from_email": "noreply@example.com",
                        "from_name": "Example",
                        "to": [
                            { "email": "alice@example.com", "name": "Alice", "type": "to" },
                            { "email": "bob@example.com", "type": "cc" },
                            { "email": "audit@example.com", "type": "bcc" }
                        ],
                        "headers": { "X-Campaign": "launch" },
                        "tags": ["launch", "welcome"],
                        "attachments": [
                            { "type": "text/plain", "name": "hello.txt", "content": "aGVsbG8=" }
                        ]
                    }
                }));
            then.status(200).json_body(json!({ "status": "sent" }));
        })
        .await;

    let response = client(&server).send(sample()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response, json!({ "status": "sent" }));
}

#[tokio::test]
async fn missing_sender_makes_no_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/messages/send.json");
            then.status(200).json_body(json!({ "status": "sent" }));
        })
        .await;

    let email = Email::new("orphan").to("alice@example.com");
    let err = client(&server).send(email).await.unwrap_err();

    assert!(matches!(err, Error::MissingSender));
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn unnamed_attachment_makes_no_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/messages/send.json");
            then.status(200).json_body(json!({ "status": "sent" }));
        })
        .await;

    let email = sample().attach(Attachment::from_parts(
        "application/pdf",
        "attachment; filename=\"bad/name.pdf\"",
        b"%PDF".to_vec(),
    ));
    let err = client(&server).send(email).await.unwrap_err();

    assert!(matches!(err, Error::MissingFilename { index: 1 }));
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn rejection_carries_status_and_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/messages/send.json");
            then.status(500).json_body(json!({
                "status": "error",
                "code": -1,
                "name": "Invalid_Key",
                "message": "invalid key"
            }));
        })
        .await;

    let err = client(&server).send(sample()).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    let text = err.to_string();
    assert!(text.contains("500"), "{text}");
    assert!(text.contains("invalid key"), "{text}");
}

#[tokio::test]
async fn rejection_without_json_uses_fallback_text() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/messages/send.json");
            then.status(503).body("Service Unavailable");
        })
        .await;

    let err = client(&server).send(sample()).await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "unable to parse response");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unparseable_success_body_is_a_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/messages/send.json");
            then.status(200).body("not json");
        })
        .await;

    let err = client(&server).send(sample()).await.unwrap_err();
    assert!(matches!(err, Error::ResponseParse(_)));
}

#[tokio::test]
async fn transport_failure_is_a_request_error() {
    // Nothing listens on the discard port.
    let client = Client::builder("test-key")
        .base_url("http://127.0.0.1:9")
        .build()
        .unwrap();

    let err = client.send(sample()).await.unwrap_err();
    assert!(matches!(err, Error::Request(_)));
}

#[tokio::test]
async fn prepared_params_are_sent_verbatim() {
    let prepared = MessageParams {
        subject: "Prebuilt".into(),
        from_email: "ops@example.com".into(),
        tags: vec!["raw".into()],
        ..Default::default()
    };

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/messages/send.json").json_body(json!({
                "key": "test-key",
                "async": true,
                "message": {
                    "subject": "Prebuilt",
                    "from_email": "ops@example.com",
                    "to": [],
                    "tags": ["raw"]
                }
            }));
            then.status(200).json_body(json!([{ "status": "queued" }]));
        })
        .await;

    let response = client(&server)
        .send(Message::Prepared(prepared))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response, json!([{ "status": "queued" }]));
}

#[tokio::test]
async fn default_user_agent_is_sent() {
    let agent = format!("mandrill-mailer/{} (Rust)", env!("CARGO_PKG_VERSION"));
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/messages/send.json")
                .header("user-agent", agent.as_str());
            then.status(200).json_body(json!({ "status": "sent" }));
        })
        .await;

    let client = Client::builder("test-key")
        .base_url(server.base_url())
        .build()
        .unwrap();
    client.send(sample()).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn slow_response_times_out_as_request_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/messages/send.json");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({ "status": "sent" }));
        })
        .await;

    let client = Client::builder("test-key")
        .base_url(server.base_url())
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    match client.send(sample()).await {
        Err(Error::Request(err)) => assert!(err.is_timeout(), "{err}"),
        other => panic!("unexpected result: {other:?}"),
    }
}
