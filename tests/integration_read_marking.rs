mod common;

use common::{TestApp, unique_name};
use reqwest::StatusCode;

#[tokio::test]
async fn marking_read_zeroes_the_unread_count() {
    let app = TestApp::spawn().await;
    let alice = app.register_user(&unique_name("alice")).await;
    let bob = app.register_user(&unique_name("bob")).await;

    app.send_message(&alice.token, bob.user_id, "one").await;
    app.send_message(&alice.token, bob.user_id, "two").await;
    app.send_message(&bob.token, alice.user_id, "reply").await;

    let conversations = app.get_conversations(&bob.token).await;
    let conversation_id = conversations[0]["id"].as_str().unwrap().to_string();
    assert_eq!(conversations[0]["unread_count"], 2);

    let status = app.mark_read(&bob.token, &conversation_id, alice.user_id).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let conversations = app.get_conversations(&bob.token).await;
    assert_eq!(conversations[0]["unread_count"], 0);

    // The other direction is untouched: Alice still has Bob's reply unread
    let conversations = app.get_conversations(&alice.token).await;
    assert_eq!(conversations[0]["unread_count"], 1);
}

#[tokio::test]
async fn marking_read_is_idempotent() {
    let app = TestApp::spawn().await;
    let alice = app.register_user(&unique_name("alice")).await;
    let bob = app.register_user(&unique_name("bob")).await;

    app.send_message(&alice.token, bob.user_id, "one").await;

    let conversations = app.get_conversations(&bob.token).await;
    let conversation_id = conversations[0]["id"].as_str().unwrap().to_string();

    assert_eq!(app.mark_read(&bob.token, &conversation_id, alice.user_id).await, StatusCode::NO_CONTENT);
    assert_eq!(app.mark_read(&bob.token, &conversation_id, alice.user_id).await, StatusCode::NO_CONTENT);

    let conversations = app.get_conversations(&bob.token).await;
    assert_eq!(conversations[0]["unread_count"], 0);
    for message in conversations[0]["messages"].as_array().unwrap() {
        assert_eq!(message["read"], true);
    }
}

#[tokio::test]
async fn non_participant_is_forbidden_and_changes_nothing() {
    let app = TestApp::spawn().await;
    let alice = app.register_user(&unique_name("alice")).await;
    let bob = app.register_user(&unique_name("bob")).await;
    let mallory = app.register_user(&unique_name("mallory")).await;

    app.send_message(&alice.token, bob.user_id, "secret").await;

    let conversations = app.get_conversations(&bob.token).await;
    let conversation_id = conversations[0]["id"].as_str().unwrap().to_string();

    let status = app.mark_read(&mallory.token, &conversation_id, alice.user_id).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let conversations = app.get_conversations(&bob.token).await;
    assert_eq!(conversations[0]["unread_count"], 1);
}

#[tokio::test]
async fn unknown_conversation_is_not_found() {
    let app = TestApp::spawn().await;
    let alice = app.register_user(&unique_name("alice")).await;

    let status = app.mark_read(&alice.token, &uuid::Uuid::new_v4().to_string(), alice.user_id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn seen_indicator_appears_after_the_counterpart_reads() {
    let app = TestApp::spawn().await;
    let alice = app.register_user(&unique_name("alice")).await;
    let bob = app.register_user(&unique_name("bob")).await;

    app.send_message(&alice.token, bob.user_id, "one").await;
    let latest = app.send_message(&alice.token, bob.user_id, "two").await;

    // Nothing read yet, so Alice gets no indicator
    let conversations = app.get_conversations(&alice.token).await;
    assert!(conversations[0]["last_read_id"].is_null());

    let conversation_id = conversations[0]["id"].as_str().unwrap().to_string();
    app.mark_read(&bob.token, &conversation_id, alice.user_id).await;

    // Default style gates on the last sender; Alice sent last, so her newest
    // read message carries the indicator
    let conversations = app.get_conversations(&alice.token).await;
    assert_eq!(conversations[0]["last_read_id"], latest["id"]);

    // Bob never sent anything read by Alice, so he gets none
    let conversations = app.get_conversations(&bob.token).await;
    assert!(conversations[0]["last_read_id"].is_null());
}
