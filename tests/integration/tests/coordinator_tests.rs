//! Coordinator Integration Tests
//!
//! Drive connect / heartbeat / list / create / join / send through the
//! dispatcher against an in-memory store and a scripted translator.
//!
//! Run with: cargo test -p integration-tests --test coordinator_tests

use integration_tests::{memory_state, ScriptedTranslator, TestClient};
use lingo_core::Language;
use lingo_gateway::handlers::IdentityClaims;
use lingo_gateway::protocol::{ClientCommand, GatewayMessage, OpCode};
use lingo_gateway::GatewayState;
use serde_json::{json, Value};

async fn create_room(client: &mut TestClient, name: &str) -> String {
    client
        .command(ClientCommand::CreateRoom, Some(json!({ "name": name })))
        .await;
    let created = client.expect_event("ROOM_CREATE");
    client.expect_event("ROOM_LIST");
    created["room"]["id"].as_str().expect("room id").to_string()
}

async fn join(client: &mut TestClient, room_id: &str) -> Value {
    client
        .command(ClientCommand::JoinRoom, Some(json!({ "room_id": room_id })))
        .await;
    client.expect_event("ROOM_JOIN")
}

async fn send(client: &TestClient, text: &str) {
    client
        .command(ClientCommand::SendMessage, Some(json!({ "text": text })))
        .await;
}

fn state() -> (GatewayState, std::sync::Arc<ScriptedTranslator>) {
    let translator = ScriptedTranslator::new();
    (memory_state(translator.clone()), translator)
}

// ============================================================================
// Connect
// ============================================================================

#[tokio::test]
async fn test_connect_confirms_identity_then_pushes_rooms() {
    let (state, _) = state();
    let mut client = TestClient::connect(&state, IdentityClaims::new("u1", "alice")).await;

    let ready = client.expect_event("READY");
    assert_eq!(ready["user_id"], "u1");
    assert_eq!(ready["nickname"], "alice");
    assert_eq!(ready["connection_id"], client.connection_id());

    let listing = client.expect_event("ROOM_LIST");
    assert_eq!(listing["rooms"], json!([]));
    client.expect_silence();
}

#[tokio::test]
async fn test_ready_precedes_broadcasts_during_connect() {
    let (state, _) = state();
    let mut alice = TestClient::connect_ready(&state, "u1", "alice").await;
    let mut bob = TestClient::open(&state);

    // Bob has a queue but has not finished connecting
    create_room(&mut alice, "early").await;
    bob.expect_silence();

    bob.handshake(&IdentityClaims::new("u2", "bob")).await;
    let first = bob.try_next().expect("ready queued");
    assert_eq!(first.t.as_deref(), Some("READY"));
    assert_eq!(first.s, Some(1));

    let listing = bob.expect_event("ROOM_LIST");
    assert_eq!(listing["rooms"][0]["name"], "early");

    create_room(&mut alice, "late").await;
    bob.expect_event("ROOM_LIST");
}

#[tokio::test]
async fn test_connect_without_claims_uses_defaults() {
    let (state, _) = state();
    let mut client = TestClient::connect(&state, IdentityClaims::default()).await;

    let ready = client.expect_event("READY");
    assert_eq!(ready["user_id"], client.connection_id());
    assert_eq!(ready["nickname"], "anonymous");
}

#[tokio::test]
async fn test_sequence_numbers_increase_per_connection() {
    let (state, _) = state();
    let mut client = TestClient::connect(&state, IdentityClaims::default()).await;
    client.command(ClientCommand::ListRooms, None).await;

    let seqs: Vec<u64> = std::iter::from_fn(|| client.try_next())
        .filter_map(|m| m.s)
        .collect();
    assert_eq!(seqs, vec![1, 2, 3]);
}

// ============================================================================
// Heartbeat
// ============================================================================

#[tokio::test]
async fn test_heartbeat_echoes_with_server_time() {
    let (state, _) = state();
    let mut client = TestClient::connect_ready(&state, "u1", "alice").await;

    client
        .dispatch(GatewayMessage::heartbeat(Some(json!({"nonce": "abc"}))))
        .await;

    let ack = client.try_next().expect("ack queued");
    assert_eq!(ack.op, OpCode::HeartbeatAck);
    let d = ack.d.expect("ack payload");
    assert_eq!(d["echo"]["nonce"], "abc");
    assert!(d["server_time"].is_i64());
}

// ============================================================================
// Rooms
// ============================================================================

#[tokio::test]
async fn test_create_room_unicasts_room_and_broadcasts_listing() {
    let (state, _) = state();
    let mut alice = TestClient::connect_ready(&state, "u1", "alice").await;
    let mut bob = TestClient::connect_ready(&state, "u2", "bob").await;

    alice
        .command(ClientCommand::CreateRoom, Some(json!({"name": "  general "})))
        .await;

    let created = alice.expect_event("ROOM_CREATE");
    assert_eq!(created["room"]["name"], "general");
    assert_eq!(created["room"]["created_by"]["user_id"], "u1");
    assert_eq!(created["room"]["created_by"]["nickname"], "alice");

    let alice_list = alice.expect_event("ROOM_LIST");
    let bob_list = bob.expect_event("ROOM_LIST");
    assert_eq!(alice_list, bob_list);
    assert_eq!(bob_list["rooms"][0]["id"], created["room"]["id"]);

    bob.expect_silence();
}

#[tokio::test]
async fn test_list_rooms_oldest_first() {
    let (state, _) = state();
    let mut client = TestClient::connect_ready(&state, "u1", "alice").await;

    let first = create_room(&mut client, "first").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = create_room(&mut client, "second").await;

    client.command(ClientCommand::ListRooms, None).await;
    let listing = client.expect_event("ROOM_LIST");
    let ids: Vec<&str> = listing["rooms"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![first.as_str(), second.as_str()]);
}

#[tokio::test]
async fn test_create_room_with_blank_name_is_dropped() {
    let (state, _) = state();
    let mut client = TestClient::connect_ready(&state, "u1", "alice").await;

    client
        .command(ClientCommand::CreateRoom, Some(json!({"name": "   "})))
        .await;
    client.command(ClientCommand::CreateRoom, None).await;
    client
        .command(ClientCommand::CreateRoom, Some(json!({"title": "x"})))
        .await;

    client.expect_silence();
    assert!(state.room_store().list_rooms().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_join_replays_history_oldest_first() {
    let (state, _) = state();
    let mut alice = TestClient::connect_ready(&state, "u1", "alice").await;
    let room = create_room(&mut alice, "general").await;
    join(&mut alice, &room).await;

    for text in ["one", "two", "three"] {
        send(&alice, text).await;
        alice.expect_event("MESSAGE_CREATE");
    }

    let mut bob = TestClient::connect_ready(&state, "u2", "bob").await;
    let joined = join(&mut bob, &room).await;

    assert_eq!(joined["room_id"], room.as_str());
    assert_eq!(joined["room"]["name"], "general");
    let texts: Vec<&str> = joined["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["translations"]["en"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn test_join_limit_is_clamped() {
    let (state, _) = state();
    let mut client = TestClient::connect_ready(&state, "u1", "alice").await;
    join(&mut client, "r1").await;
    for i in 0..5 {
        send(&client, &format!("line {i}")).await;
        client.expect_event("MESSAGE_CREATE");
    }

    client
        .command(ClientCommand::JoinRoom, Some(json!({"room_id": "r1", "limit": 2})))
        .await;
    let joined = client.expect_event("ROOM_JOIN");
    assert_eq!(joined["messages"].as_array().unwrap().len(), 2);
    assert_eq!(joined["messages"][1]["translations"]["en"], "line 4");

    client
        .command(ClientCommand::JoinRoom, Some(json!({"room_id": "r1", "limit": 0})))
        .await;
    let joined = client.expect_event("ROOM_JOIN");
    assert_eq!(joined["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_join_unknown_room_is_permitted() {
    let (state, _) = state();
    let mut client = TestClient::connect_ready(&state, "u1", "alice").await;

    let joined = join(&mut client, "no-such-room").await;
    assert!(joined["room"].is_null());
    assert_eq!(joined["messages"], json!([]));
    assert_eq!(
        state.sessions().get(client.connection_id()).unwrap().room_id.as_deref(),
        Some("no-such-room")
    );
}

#[tokio::test]
async fn test_join_with_empty_room_id_is_dropped() {
    let (state, _) = state();
    let mut client = TestClient::connect_ready(&state, "u1", "alice").await;

    client
        .command(ClientCommand::JoinRoom, Some(json!({"room_id": "  "})))
        .await;
    client.command(ClientCommand::JoinRoom, None).await;

    client.expect_silence();
    assert!(state.sessions().get(client.connection_id()).unwrap().room_id.is_none());
}

#[tokio::test]
async fn test_join_x_then_y_leaves_x() {
    let (state, _) = state();
    let mut alice = TestClient::connect_ready(&state, "u1", "alice").await;
    let mut bob = TestClient::connect_ready(&state, "u2", "bob").await;

    join(&mut alice, "x").await;
    join(&mut alice, "y").await;
    join(&mut bob, "x").await;

    send(&bob, "anyone here?").await;
    bob.expect_event("MESSAGE_CREATE");
    alice.expect_silence();

    assert_eq!(state.connection_manager().get_room_connections("x").len(), 1);
    assert_eq!(state.connection_manager().get_room_connections("y").len(), 1);
    assert_eq!(
        state.sessions().get(alice.connection_id()).unwrap().room_id.as_deref(),
        Some("y")
    );
}

// ============================================================================
// Chat
// ============================================================================

#[tokio::test]
async fn test_korean_message_reaches_both_members_translated() {
    let (state, translator) = state();
    let mut alice = TestClient::connect_ready(&state, "u1", "alice").await;
    let mut bob = TestClient::connect_ready(&state, "u2", "bob").await;

    let room = create_room(&mut alice, "general").await;
    bob.expect_event("ROOM_LIST");
    join(&mut alice, &room).await;
    join(&mut bob, &room).await;

    send(&alice, "안녕").await;

    let expected = json!({
        "ko": "안녕",
        "ja": ScriptedTranslator::rendering("안녕", Language::Ja),
        "en": ScriptedTranslator::rendering("안녕", Language::En),
    });
    for client in [&mut alice, &mut bob] {
        let event = client.expect_event("MESSAGE_CREATE");
        assert_eq!(event["message"]["translations"], expected);
        assert_eq!(event["message"]["source"], "ko");
        assert_eq!(event["message"]["room_id"], room.as_str());
        assert_eq!(event["message"]["sender"]["nickname"], "alice");
    }

    assert_eq!(translator.calls().len(), 2);
    let stored = state.room_store().get_messages(&room, 50).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].original(), "안녕");
}

#[tokio::test]
async fn test_jamo_laughter_is_transliterated_without_translator() {
    let (state, translator) = state();
    let mut client = TestClient::connect_ready(&state, "u1", "alice").await;
    join(&mut client, "r1").await;

    send(&client, "ㅋㅋㅋ").await;

    let event = client.expect_event("MESSAGE_CREATE");
    let translations = &event["message"]["translations"];
    assert_eq!(translations["ko"], "ㅋㅋㅋ");
    assert_eq!(translations["ja"], "kkk");
    assert_eq!(translations["en"], "kkk");
    assert!(translator.calls().is_empty());
}

#[tokio::test]
async fn test_failed_target_falls_back_to_original() {
    let translator = ScriptedTranslator::failing(&[Language::Ko]);
    let state = memory_state(translator.clone());
    let mut client = TestClient::connect_ready(&state, "u1", "alice").await;
    join(&mut client, "r1").await;

    send(&client, "good morning").await;

    let event = client.expect_event("MESSAGE_CREATE");
    let translations = &event["message"]["translations"];
    assert_eq!(translations["en"], "good morning");
    assert_eq!(translations["ko"], "good morning");
    assert_eq!(
        translations["ja"],
        ScriptedTranslator::rendering("good morning", Language::Ja)
    );
}

#[tokio::test]
async fn test_send_outside_room_is_dropped() {
    let (state, translator) = state();
    let mut client = TestClient::connect_ready(&state, "u1", "alice").await;

    send(&client, "hello?").await;

    client.expect_silence();
    assert!(translator.calls().is_empty());
    assert_eq!(state.connection_manager().room_count(), 0);
}

#[tokio::test]
async fn test_send_blank_text_is_dropped() {
    let (state, translator) = state();
    let mut client = TestClient::connect_ready(&state, "u1", "alice").await;
    join(&mut client, "r1").await;

    send(&client, "   ").await;
    client
        .command(ClientCommand::SendMessage, Some(json!({"body": "hi"})))
        .await;

    client.expect_silence();
    assert!(translator.calls().is_empty());
    assert!(state.room_store().get_messages("r1", 50).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_surrounding_whitespace_is_kept() {
    let (state, translator) = state();
    let mut client = TestClient::connect_ready(&state, "u1", "alice").await;
    join(&mut client, "r1").await;

    send(&client, "  hi  ").await;

    let event = client.expect_event("MESSAGE_CREATE");
    let translations = &event["message"]["translations"];
    assert_eq!(event["message"]["source"], "en");
    assert_eq!(translations["en"], "  hi  ");
    assert_eq!(translations["ja"], ScriptedTranslator::rendering("  hi  ", Language::Ja));
    assert!(translator.calls().iter().all(|call| call.text == "  hi  "));

    let stored = state.room_store().get_messages("r1", 50).await.unwrap();
    assert_eq!(stored[0].original(), "  hi  ");
}

#[tokio::test]
async fn test_messages_stay_in_their_room() {
    let (state, _) = state();
    let mut alice = TestClient::connect_ready(&state, "u1", "alice").await;
    let mut bob = TestClient::connect_ready(&state, "u2", "bob").await;
    join(&mut alice, "x").await;
    join(&mut bob, "y").await;

    send(&alice, "only for x").await;

    alice.expect_event("MESSAGE_CREATE");
    bob.expect_silence();
}

#[tokio::test]
async fn test_history_keeps_newest_200() {
    let (state, _) = state();
    let mut client = TestClient::connect_ready(&state, "u1", "alice").await;
    join(&mut client, "r1").await;

    for i in 0..205 {
        send(&client, &format!("m{i}")).await;
        client.expect_event("MESSAGE_CREATE");
    }

    let history = state.room_store().get_messages("r1", 250).await.unwrap();
    assert_eq!(history.len(), 200);
    assert_eq!(history[0].translations.en, "m5");
    assert_eq!(history[199].translations.en, "m204");
}

// ============================================================================
// Ignored input and disconnect
// ============================================================================

#[tokio::test]
async fn test_unknown_commands_and_server_ops_are_ignored() {
    let (state, _) = state();
    let mut client = TestClient::connect_ready(&state, "u1", "alice").await;

    client
        .dispatch(GatewayMessage::from_json(r#"{"op": 2, "t": "LEAVE_ROOM"}"#).unwrap())
        .await;
    client
        .dispatch(GatewayMessage::from_json(r#"{"op": 0, "t": "READY", "s": 1, "d": {}}"#).unwrap())
        .await;
    client
        .dispatch(GatewayMessage::from_json(r#"{"op": 10, "d": {"heartbeat_interval": 1}}"#).unwrap())
        .await;

    client.expect_silence();
}

#[tokio::test]
async fn test_commands_after_disconnect_are_dropped() {
    let (state, translator) = state();
    let mut client = TestClient::connect_ready(&state, "u1", "alice").await;
    join(&mut client, "r1").await;

    client.disconnect();
    assert!(state.sessions().get(client.connection_id()).is_none());
    assert_eq!(state.connection_manager().room_count(), 0);

    send(&client, "ghost").await;
    client
        .command(ClientCommand::CreateRoom, Some(json!({"name": "ghost town"})))
        .await;

    client.expect_silence();
    assert!(translator.calls().is_empty());
    assert!(state.room_store().list_rooms().await.unwrap().is_empty());

    // Idempotent
    client.disconnect();
}
