//! Newline-delimited JSON bus over a pair of byte streams.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::dispatcher::Dispatcher;
use super::protocol::{Reply, Request};

/// Reads requests from `input` until EOF and writes each reply to `output`
/// as soon as its handler completes.
///
/// Fire-and-forget requests are applied before the next line is read, so a
/// `state:read` always observes every `state:write` sent ahead of it.
/// Malformed lines are logged and skipped. Returns after all in-flight
/// requests have replied, including when reading `input` fails.
///
/// # Errors
/// Returns error if reading `input` fails or the reply writer panics.
pub async fn serve<R, W>(dispatcher: Arc<Dispatcher>, input: R, output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (reply_tx, reply_rx) = mpsc::unbounded_channel::<Reply>();
    let writer = tokio::spawn(write_replies(reply_rx, output));

    let mut handlers = JoinSet::new();
    let mut lines = input.lines();

    let read_result = loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break Ok(()),
            Err(e) => {
                warn!(error = %e, "Bus input failed");
                break Err(e);
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Skipping malformed request");
                continue;
            }
        };

        if !request.op.expects_reply() {
            if let Some(reply) = dispatcher.dispatch(request).await {
                let _ = reply_tx.send(reply);
            }
            continue;
        }

        let dispatcher = dispatcher.clone();
        let reply_tx = reply_tx.clone();
        handlers.spawn(async move {
            if let Some(reply) = dispatcher.dispatch(request).await {
                let _ = reply_tx.send(reply);
            }
        });

        while handlers.try_join_next().is_some() {}
    };

    debug!(in_flight = handlers.len(), "Input closed, draining");
    while handlers.join_next().await.is_some() {}
    drop(reply_tx);

    writer.await.map_err(std::io::Error::other)?;
    info!("Bus closed");
    read_result
}

async fn write_replies<W>(mut replies: mpsc::UnboundedReceiver<Reply>, mut output: W)
where
    W: AsyncWrite + Unpin,
{
    while let Some(reply) = replies.recv().await {
        let mut frame = match serde_json::to_vec(&reply) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, nonce = %reply.nonce, "Failed to encode reply");
                continue;
            }
        };
        frame.push(b'\n');

        if output.write_all(&frame).await.is_err() || output.flush().await.is_err() {
            warn!("Reply stream closed");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockYouTubePort;
    use crate::presentation::dispatcher::tests::Harness;
    use crate::presentation::protocol::{Nonce, Operation};
    use serde_json::json;
    use tokio::io::{AsyncReadExt, BufReader};

    async fn run(harness: &Harness, input: &str) -> Vec<Reply> {
        let (client, server) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server);
        let (mut client_read, mut client_write) = tokio::io::split(client);

        client_write.write_all(input.as_bytes()).await.unwrap();
        client_write.shutdown().await.unwrap();

        serve(
            harness.dispatcher.clone(),
            BufReader::new(server_read),
            server_write,
        )
        .await
        .unwrap();

        let mut out = String::new();
        client_read.read_to_string(&mut out).await.unwrap();
        out.lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_replies_carry_request_nonce() {
        let harness = Harness::with_youtube(MockYouTubePort::new()).await;
        let input = concat!(
            r#"{"op":"isAuthenticated","nonce":1700000000001}"#,
            "\n",
            r#"{"op":"state:read","nonce":"read-1"}"#,
            "\n",
        );

        let mut replies = run(&harness, input).await;
        replies.sort_by_key(|r| r.nonce.to_string());

        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].nonce, Nonce::Number(1700000000001));
        assert_eq!(replies[0].payload, json!({"isAuthenticated": false}));
        assert_eq!(replies[1].op, Operation::StateRead);
        assert_eq!(replies[1].payload, json!({}));
    }

    #[tokio::test]
    async fn test_single_reply_frame_is_exact() {
        let harness = Harness::with_youtube(MockYouTubePort::new()).await;
        let input = tokio_test::io::Builder::new()
            .read(b"{\"op\":\"signout\",\"nonce\":\"bye\"}\n")
            .build();
        let output = tokio_test::io::Builder::new()
            .write(b"{\"op\":\"signout\",\"nonce\":\"bye\",\"payload\":{}}\n")
            .build();

        serve(harness.dispatcher.clone(), BufReader::new(input), output)
            .await
            .unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_state_read_observes_preceding_write() {
        let harness = Harness::with_youtube(MockYouTubePort::new()).await;
        let mut input = String::new();
        for i in 0..100 {
            input.push_str(&format!(
                "{{\"op\":\"state:write\",\"nonce\":\"w{i}\",\"data\":{{\"i\":{i}}}}}\n"
            ));
            input.push_str(&format!("{{\"op\":\"state:read\",\"nonce\":\"r{i}\"}}\n"));
        }

        let replies = run(&harness, &input).await;

        assert_eq!(replies.len(), 100);
        for reply in replies {
            let Nonce::Text(nonce) = &reply.nonce else {
                panic!("unexpected nonce {}", reply.nonce);
            };
            let i: u64 = nonce.trim_start_matches('r').parse().unwrap();
            assert_eq!(reply.payload, json!({"i": i}));
        }
    }

    #[tokio::test]
    async fn test_read_error_still_flushes_in_flight_replies() {
        let harness = Harness::with_youtube(MockYouTubePort::new()).await;
        let input = tokio_test::io::Builder::new()
            .read(b"{\"op\":\"isAuthenticated\",\"nonce\":7}\n")
            .read_error(std::io::Error::other("pipe broke"))
            .build();
        let output = tokio_test::io::Builder::new()
            .write(b"{\"op\":\"isAuthenticated\",\"nonce\":7,\"payload\":{\"isAuthenticated\":false}}\n")
            .build();

        let err = serve(harness.dispatcher.clone(), BufReader::new(input), output)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "pipe broke");
    }

    #[tokio::test]
    async fn test_fire_and_forget_and_garbage_produce_no_output() {
        let harness = Harness::with_youtube(MockYouTubePort::new()).await;
        let input = concat!(
            "not json\n",
            "\n",
            r#"{"op":"state:write","nonce":"w","data":{"k":[1,2]}}"#,
            "\n",
            r#"{"op":"launchMissiles","nonce":"x"}"#,
            "\n",
        );

        let replies = run(&harness, input).await;

        assert!(replies.is_empty());
        assert_eq!(harness.settings.stored().unwrap().state, json!({"k": [1, 2]}));
    }
}
