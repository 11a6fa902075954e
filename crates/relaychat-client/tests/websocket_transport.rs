//! WebSocket transport tests against an in-process server.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use relaychat_client::{
    OutboundMessage, TransportEvent,
    transport::{self, ConnectedClient},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    time::timeout,
};
use tokio_tungstenite::{
    accept_hdr_async,
    tungstenite::{
        Message,
        handshake::server::{ErrorResponse, Request, Response},
    },
};

const STEP: Duration = Duration::from_secs(5);

async fn next_event(client: &mut ConnectedClient) -> TransportEvent {
    timeout(STEP, client.recv()).await.unwrap().unwrap()
}

#[tokio::test]
async fn relays_frames_and_closes_cleanly() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("ws://{}/ws", listener.local_addr().unwrap());

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut uri = None;
        let callback = |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
            uri = Some(request.uri().to_string());
            Ok(response)
        };
        let mut ws = accept_hdr_async(stream, callback).await.unwrap();

        ws.send(Message::Text(r#"[{"username":"alice"}]"#.into())).await.unwrap();

        let mut received = Vec::new();
        while let Some(Ok(message)) = ws.next().await {
            if let Message::Text(text) = message {
                received.push(text);
            }
        }
        (uri, received)
    });

    let mut client = transport::connect(&endpoint, "alice").unwrap();

    assert_eq!(next_event(&mut client).await, TransportEvent::Opened);
    assert_eq!(
        next_event(&mut client).await,
        TransportEvent::Payload(r#"[{"username":"alice"}]"#.into())
    );

    client.send(&OutboundMessage::direct("bob", "hi")).await.unwrap();
    client.send(&OutboundMessage::logout("alice")).await.unwrap();
    client.close().await;

    assert!(matches!(next_event(&mut client).await, TransportEvent::Closed { clean: true, .. }));

    let (uri, received) = timeout(STEP, server).await.unwrap().unwrap();
    assert_eq!(uri.as_deref(), Some("/ws?username=alice"));
    assert_eq!(received, [
        r#"{"to":"bob","content":"hi"}"#.to_owned(),
        r#"{"type":"logout","username":"alice"}"#.to_owned(),
    ]);
}

#[tokio::test]
async fn refused_upgrade_closes_uncleanly_with_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("ws://{}/ws", listener.local_addr().unwrap());

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = [0_u8; 1024];
        let _ = stream.read(&mut buf).await.unwrap();

        let body = "Username already taken\n";
        let response = format!(
            "HTTP/1.1 409 Conflict\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });

    let mut client = transport::connect(&endpoint, "alice").unwrap();

    match next_event(&mut client).await {
        TransportEvent::Closed { clean, reason } => {
            assert!(!clean);
            assert!(reason.unwrap().contains("409"));
        },
        other => panic!("expected close, got {other:?}"),
    }
}

#[tokio::test]
async fn dropped_connection_closes_uncleanly() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("ws://{}/ws", listener.local_addr().unwrap());

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        drop(ws);
    });

    let mut client = transport::connect(&endpoint, "alice").unwrap();

    assert_eq!(next_event(&mut client).await, TransportEvent::Opened);
    assert!(matches!(next_event(&mut client).await, TransportEvent::Closed { clean: false, .. }));
}
