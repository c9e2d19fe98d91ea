//! Test helpers for integration tests
//!
//! `TestClient` drives the coordinator in-process through an outbound queue,
//! the way a socket would. `TestServer` and `WsClient` run the real HTTP and
//! WebSocket stack on an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use lingo_gateway::connection::Connection;
use lingo_gateway::handlers::{ConnectHandler, IdentityClaims, MessageDispatcher};
use lingo_gateway::protocol::{ClientCommand, GatewayMessage, OpCode};
use lingo_gateway::{create_app, GatewayState};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// How long to wait for an expected frame
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// In-process client
// ============================================================================

/// A connection driven directly through the coordinator
pub struct TestClient {
    pub connection: Arc<Connection>,
    rx: mpsc::Receiver<GatewayMessage>,
    state: GatewayState,
}

impl TestClient {
    /// Open an outbound queue without going through connect
    pub fn open(state: &GatewayState) -> Self {
        let connection_id = format!("conn-{}", crate::unique_suffix());
        let (tx, rx) = mpsc::channel(256);

        Self {
            connection: Connection::new(connection_id, tx),
            rx,
            state: state.clone(),
        }
    }

    /// Connect with identity claims and consume nothing
    pub async fn connect(state: &GatewayState, claims: IdentityClaims) -> Self {
        let client = Self::open(state);
        client.handshake(&claims).await;
        client
    }

    /// Run the connect handler for this client
    pub async fn handshake(&self, claims: &IdentityClaims) {
        ConnectHandler::handle(&self.state, &self.connection, claims)
            .await
            .expect("connect succeeds");
    }

    /// Connect and discard the READY and initial ROOM_LIST events
    pub async fn connect_ready(state: &GatewayState, user_id: &str, nickname: &str) -> Self {
        let mut client = Self::connect(state, IdentityClaims::new(user_id, nickname)).await;
        client.expect_event("READY");
        client.expect_event("ROOM_LIST");
        client
    }

    pub fn connection_id(&self) -> &str {
        self.connection.connection_id()
    }

    /// Run one command through the dispatcher to completion
    pub async fn command(&self, command: ClientCommand, data: Option<Value>) {
        self.dispatch(GatewayMessage::command(command, data)).await;
    }

    /// Run an arbitrary message through the dispatcher to completion
    pub async fn dispatch(&self, message: GatewayMessage) {
        MessageDispatcher::dispatch(&self.state, &self.connection, message)
            .await
            .expect("handler succeeds");
    }

    /// Next queued frame, if any
    pub fn try_next(&mut self) -> Option<GatewayMessage> {
        self.rx.try_recv().ok()
    }

    /// Next queued frame, asserting it is the dispatch event `t`
    pub fn expect_event(&mut self, t: &str) -> Value {
        let message = self
            .try_next()
            .unwrap_or_else(|| panic!("expected {t}, queue is empty"));
        assert_eq!(message.op, OpCode::Dispatch, "expected dispatch, got {message}");
        assert_eq!(message.t.as_deref(), Some(t), "unexpected event {message}");
        message.d.unwrap_or(Value::Null)
    }

    /// Assert nothing else was queued
    pub fn expect_silence(&mut self) {
        if let Some(message) = self.try_next() {
            panic!("expected no frames, got {message}");
        }
    }

    /// Close the connection the way the socket handler does
    pub fn disconnect(&self) {
        ConnectHandler::disconnect(&self.state, self.connection_id());
    }
}

// ============================================================================
// Live server
// ============================================================================

/// Gateway served on an ephemeral local port
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(state: GatewayState) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = create_app(state);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Gateway URL with identity claims
    pub fn gateway_url(&self, user_id: &str, nickname: &str) -> String {
        format!("ws://{}/gateway?user_id={user_id}&nickname={nickname}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Open a WebSocket connection
    pub async fn connect(&self, user_id: &str, nickname: &str) -> Result<WsClient> {
        WsClient::connect(&self.gateway_url(user_id, nickname)).await
    }
}

/// WebSocket client speaking the gateway protocol
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _) = connect_async(url).await.context("WebSocket connect")?;
        Ok(Self { stream })
    }

    pub async fn send(&mut self, message: &GatewayMessage) -> Result<()> {
        self.send_text(message.to_json()?).await
    }

    pub async fn send_text(&mut self, text: impl Into<String>) -> Result<()> {
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }

    pub async fn send_binary(&mut self, bytes: Vec<u8>) -> Result<()> {
        self.stream.send(Message::Binary(bytes)).await?;
        Ok(())
    }

    /// Next gateway frame, skipping control frames
    pub async fn recv(&mut self) -> Result<GatewayMessage> {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .context("timed out waiting for a frame")?
                .context("stream closed")??;

            if let Message::Text(text) = frame {
                return Ok(GatewayMessage::from_json(&text)?);
            }
        }
    }

    /// Skip frames until the dispatch event `t` arrives, returning its data
    pub async fn recv_event(&mut self, t: &str) -> Result<Value> {
        loop {
            let message = self.recv().await?;
            if message.op == OpCode::Dispatch && message.t.as_deref() == Some(t) {
                return Ok(message.d.unwrap_or(Value::Null));
            }
        }
    }

    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}

/// Helper to check if a Redis test environment is available
pub fn check_redis_env() -> Option<String> {
    dotenvy::dotenv().ok();
    match std::env::var("REDIS_URL") {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("Skipping test: REDIS_URL not set");
            None
        }
    }
}
