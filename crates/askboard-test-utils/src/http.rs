//! One-shot HTTP server for exercising the real reqwest client.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub struct CannedServer {
    pub base_url: String,
    /// Resolves to the raw request text (head and body) once served.
    pub request: JoinHandle<String>,
}

/// Accept one connection, capture the request, answer with `status` and a JSON `body`.
pub async fn serve_once(status: u16, body: &str) -> CannedServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind canned server");
    let addr = listener.local_addr().expect("canned server addr");
    let body = body.to_string();

    let request = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let raw = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            reason(status),
            body.len(),
        );
        socket.write_all(response.as_bytes()).await.expect("write response");
        socket.shutdown().await.ok();
        raw
    });

    CannedServer { base_url: format!("http://{addr}"), request }
}

/// A base URL nothing listens on, for transport-failure paths.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}")
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.expect("read request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(head_end) = find_head_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..head_end]).to_ascii_lowercase();
            let content_length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
