mod common;

use common::{TestApp, unique_name};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn new_user_has_no_conversations() {
    let app = TestApp::spawn().await;
    let user = app.register_user(&unique_name("alice")).await;

    let conversations = app.get_conversations(&user.token).await;
    assert!(conversations.is_empty());
}

#[tokio::test]
async fn preview_carries_counterpart_latest_text_and_unread_count() {
    let app = TestApp::spawn().await;
    let alice = app.register_user(&unique_name("alice")).await;
    let bob = app.register_user(&unique_name("bob")).await;

    app.send_message(&alice.token, bob.user_id, "hi bob").await;
    app.send_message(&alice.token, bob.user_id, "are you there?").await;

    let conversations = app.get_conversations(&bob.token).await;
    assert_eq!(conversations.len(), 1);

    let preview = &conversations[0];
    assert_eq!(preview["other_user"]["username"], alice.username);
    assert_eq!(preview["other_user"]["id"], json!(alice.user_id));
    assert_eq!(preview["latest_message_text"], "are you there?");
    assert_eq!(preview["unread_count"], 2);
    assert_eq!(preview["messages"].as_array().unwrap().len(), 2);

    // From Alice's side the same thread has nothing unread
    let conversations = app.get_conversations(&alice.token).await;
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0]["unread_count"], 0);
    assert_eq!(conversations[0]["other_user"]["username"], bob.username);
}

#[tokio::test]
async fn replying_reuses_the_existing_thread() {
    let app = TestApp::spawn().await;
    let alice = app.register_user(&unique_name("alice")).await;
    let bob = app.register_user(&unique_name("bob")).await;

    let first = app.send_message(&alice.token, bob.user_id, "hello").await;
    let reply = app.send_message(&bob.token, alice.user_id, "hello back").await;

    assert_eq!(first["conversation_id"], reply["conversation_id"]);

    let conversations = app.get_conversations(&alice.token).await;
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0]["messages"].as_array().unwrap().len(), 2);
    assert_eq!(conversations[0]["unread_count"], 1);
}

#[tokio::test]
async fn conversations_are_ordered_by_latest_activity() {
    let app = TestApp::spawn().await;
    let alice = app.register_user(&unique_name("alice")).await;
    let bob = app.register_user(&unique_name("bob")).await;
    let carol = app.register_user(&unique_name("carol")).await;
    let dave = app.register_user(&unique_name("dave")).await;

    app.send_message(&alice.token, bob.user_id, "first thread").await;
    app.send_message(&alice.token, carol.user_id, "second thread").await;
    app.send_message(&alice.token, dave.user_id, "third thread").await;

    let conversations = app.get_conversations(&alice.token).await;
    let counterparts: Vec<&str> =
        conversations.iter().map(|c| c["other_user"]["username"].as_str().unwrap()).collect();
    assert_eq!(counterparts, vec![dave.username.as_str(), carol.username.as_str(), bob.username.as_str()]);

    // New activity in the oldest thread moves it to the front
    app.send_message(&bob.token, alice.user_id, "bump").await;

    let conversations = app.get_conversations(&alice.token).await;
    assert_eq!(conversations[0]["other_user"]["username"], bob.username);
}

#[tokio::test]
async fn online_flag_follows_the_session() {
    let app = TestApp::spawn().await;
    let alice = app.register_user(&unique_name("alice")).await;
    let bob = app.register_user(&unique_name("bob")).await;

    app.send_message(&alice.token, bob.user_id, "hello").await;

    // Bob just registered, so he holds a session
    let conversations = app.get_conversations(&alice.token).await;
    assert_eq!(conversations[0]["other_user"]["online"], true);

    app.logout(&bob.token).await;

    let conversations = app.get_conversations(&alice.token).await;
    assert_eq!(conversations[0]["other_user"]["online"], false);
}

#[tokio::test]
async fn sending_to_unknown_recipient_is_not_found() {
    let app = TestApp::spawn().await;
    let alice = app.register_user(&unique_name("alice")).await;

    let resp = app
        .client
        .post(format!("{}/v1/messages", app.server_url))
        .header("Authorization", format!("Bearer {}", alice.token))
        .json(&json!({ "recipient_id": uuid::Uuid::new_v4(), "text": "anyone there?" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sending_to_yourself_is_rejected() {
    let app = TestApp::spawn().await;
    let alice = app.register_user(&unique_name("alice")).await;

    let resp = app
        .client
        .post(format!("{}/v1/messages", app.server_url))
        .header("Authorization", format!("Bearer {}", alice.token))
        .json(&json!({ "recipient_id": alice.user_id, "text": "note to self" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
