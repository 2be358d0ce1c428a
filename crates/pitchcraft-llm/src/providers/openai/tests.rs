use super::*;
use std::time::Duration;

#[test]
fn test_config_builder() {
    let config = OpenAiConfig::new("test-key")
        .with_model("gpt-4o")
        .with_base_url("http://localhost:11434/v1")
        .with_timeout(Duration::from_secs(30));

    assert_eq!(config.api_key, "test-key");
    assert_eq!(config.default_model, "gpt-4o");
    assert_eq!(config.base_url.as_deref(), Some("http://localhost:11434/v1"));
    assert_eq!(config.timeout, Duration::from_secs(30));
}

#[test]
fn test_config_defaults() {
    let config = OpenAiConfig::new("test-key");
    assert_eq!(config.default_model, DEFAULT_MODEL);
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    assert!(config.base_url.is_none());
}

#[test]
fn test_config_debug_masks_key() {
    let config = OpenAiConfig::new("sk-1234567890abcdefghijklmnop");
    let debug_str = format!("{:?}", config);

    assert!(!debug_str.contains("1234567890abcdefghijkl"));
    assert!(debug_str.contains("sk-1...mnop"));
}

#[test]
fn test_provider_reports_configured_model() {
    let provider = OpenAiProvider::new(OpenAiConfig::new("test-key").with_model("gpt-4o"));
    assert_eq!(provider.name(), "openai");
    assert_eq!(provider.default_model(), "gpt-4o");
}

#[test]
fn test_backoff_allows_no_second_attempt() {
    use backoff::backoff::Backoff;

    let mut policy = single_attempt();
    policy.reset();
    std::thread::sleep(Duration::from_millis(2));
    assert!(policy.next_backoff().is_none());
}

mod rate_limited {
    use super::*;
    use crate::message::Message;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    const BODY: &str = r#"{"error":{"message":"Rate limit reached","type":"requests","param":null,"code":"rate_limit_exceeded"}}"#;

    async fn read_request(stream: &mut TcpStream) -> std::io::Result<()> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                return Ok(());
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    return Ok(());
                }
            }
        }
    }

    /// Answers every request with 429 and counts requests
    async fn spawn_server() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let counter = counter.clone();
                tokio::spawn(async move {
                    if read_request(&mut stream).await.is_err() {
                        return;
                    }
                    counter.fetch_add(1, Ordering::SeqCst);
                    let response = format!(
                        "HTTP/1.1 429 Too Many Requests\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                        BODY.len(),
                        BODY
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        (format!("http://{addr}/v1"), hits)
    }

    #[tokio::test]
    async fn test_rate_limited_call_is_sent_once() {
        let (base_url, hits) = spawn_server().await;
        let provider = OpenAiProvider::new(
            OpenAiConfig::new("sk-test-key")
                .with_base_url(base_url)
                .with_timeout(Duration::from_secs(4)),
        );
        let request = CompletionRequest::new("gpt-4o-mini").with_message(Message::user("hi"));

        let err = provider.complete(request).await.unwrap_err();

        assert!(matches!(err, Error::Api(_)), "unexpected error: {err:?}");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
