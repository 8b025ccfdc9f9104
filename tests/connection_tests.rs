use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use completion_client::{ApiKey, CompletionClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const RESPONSE_BODY: &str = r#"{"choices":[{"text":"ok","index":0}]}"#;

/// Serves every request on a connection with a keep-alive JSON response until
/// the client hangs up. Returns the base URL and the number of accepted
/// connections.
async fn start_counting_server() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let accepted = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&accepted);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(serve_connection(stream));
        }
    });

    (format!("http://{addr}"), accepted)
}

async fn serve_connection(mut stream: TcpStream) {
    let mut buf = Vec::new();
    loop {
        if !read_request(&mut stream, &mut buf).await {
            return;
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\r\n{}",
            RESPONSE_BODY.len(),
            RESPONSE_BODY
        );
        if stream.write_all(response.as_bytes()).await.is_err() {
            return;
        }
    }
}

/// Reads one full request (headers plus `content-length` bytes of body) and
/// drains it from `buf`. Returns false once the peer closes the connection.
async fn read_request(stream: &mut TcpStream, buf: &mut Vec<u8>) -> bool {
    let mut chunk = [0u8; 4096];
    loop {
        if let Some(header_end) = find_header_end(buf) {
            let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
            let body_len = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let total = header_end + 4 + body_len;
            if buf.len() >= total {
                buf.drain(..total);
                return true;
            }
        }

        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return false,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|window| window == b"\r\n\r\n")
}

#[tokio::test]
async fn each_call_opens_its_own_connection() {
    let (base_url, accepted) = start_counting_server().await;

    let client = CompletionClient::builder()
        .api_key(ApiKey::Custom("sk-test".to_string()))
        .endpoint_url(format!("{base_url}/v1/completions"))
        .build()
        .expect("client");

    let first = client.get_completion("one").await.expect("first completion");
    let second = client.get_completion("two").await.expect("second completion");

    assert_eq!(first["choices"][0]["text"], "ok");
    assert_eq!(second["choices"][0]["text"], "ok");
    assert_eq!(accepted.load(Ordering::SeqCst), 2);
}
