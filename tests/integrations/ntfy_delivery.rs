//! Integration tests for publishing notifications to an ntfy server.

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::mock_ntfy::{sender_for, start_mock_ntfy};
use ntfy_notify::{Destination, Message, SendError, Sender, SentMessage, User};
use std::time::{Duration, Instant};
use tokio_test::{assert_err, assert_ok};
use tokio_util::sync::CancellationToken;

fn on_call_message() -> Message {
    Message::ScheduleOnCallUsers {
        dest: Destination::new("oncall-ops"),
        schedule_id: "sched-7".to_string(),
        schedule_name: "Ops".to_string(),
        schedule_url: "http://x/s/1".to_string(),
        users: vec![
            User {
                id: "u1".to_string(),
                name: "Alice".to_string(),
                ..Default::default()
            },
            User {
                id: "u2".to_string(),
                name: "Bob".to_string(),
                ..Default::default()
            },
        ],
    }
}

#[tokio::test]
async fn test_on_call_roster_is_published() {
    // Arrange
    let server = start_mock_ntfy(200, Duration::ZERO).await;
    let sender = sender_for(&server);

    // Act
    let result = sender
        .send(&CancellationToken::new(), &on_call_message())
        .await;

    // Assert
    assert_eq!(assert_ok!(result), SentMessage::sent());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.url.path(), "/oncall-ops");
    assert_eq!(
        String::from_utf8(request.body.clone()).unwrap(),
        "On Call: Ops\nUsers on call: Alice,Bob\nhttp://x/s/1"
    );
    assert_eq!(request.headers.get("title").unwrap(), "On Call: Ops");
    assert_eq!(request.headers.get("priority").unwrap(), "default");
    assert_eq!(request.headers.get("tags").unwrap(), "calendar");
    assert_eq!(
        request.headers.get("click").unwrap(),
        "https://oncall.test/schedules/sched-7"
    );
}

#[tokio::test]
async fn test_any_2xx_counts_as_sent() {
    let server = start_mock_ntfy(204, Duration::ZERO).await;
    let sender = sender_for(&server);

    let msg = Message::Test {
        dest: Destination::new("me"),
    };
    assert_ok!(sender.send(&CancellationToken::new(), &msg).await);
}

#[tokio::test]
async fn test_rejected_request_is_a_delivery_failure() {
    let server = start_mock_ntfy(403, Duration::ZERO).await;
    let sender = sender_for(&server);

    let msg = Message::Verification {
        dest: Destination::new("me"),
        code: 4242,
    };
    let err = assert_err!(sender.send(&CancellationToken::new(), &msg).await);

    assert!(matches!(err, SendError::DeliveryFailed(_)));
}

#[tokio::test]
async fn test_unresponsive_server_times_out_after_three_seconds() {
    let server = start_mock_ntfy(200, Duration::from_secs(10)).await;
    let sender = sender_for(&server);

    let started = Instant::now();
    let result = tokio::time::timeout(
        Duration::from_secs(8),
        sender.send(&CancellationToken::new(), &on_call_message()),
    )
    .await
    .expect("send should return before the caller's deadline");

    let elapsed = started.elapsed();
    assert!(matches!(result, Err(SendError::DeliveryTimeout)));
    assert!(elapsed >= Duration::from_secs(3), "returned after {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(5), "returned after {:?}", elapsed);
}

#[tokio::test]
async fn test_cancellation_aborts_in_flight_delivery() {
    let server = start_mock_ntfy(200, Duration::from_secs(10)).await;
    let sender = sender_for(&server);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            cancel.cancel();
        });
    }

    let started = Instant::now();
    let result = sender.send(&cancel, &on_call_message()).await;

    assert!(matches!(result, Err(SendError::Cancelled)));
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_already_cancelled_token_returns_immediately() {
    let server = start_mock_ntfy(200, Duration::ZERO).await;
    let sender = sender_for(&server);

    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = sender.send(&cancel, &on_call_message()).await;

    assert!(matches!(result, Err(SendError::Cancelled)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
