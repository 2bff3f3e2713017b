//! Local HTTP endpoint for tests of outbound requests.
//!
//! Binds an ephemeral port on 127.0.0.1 and answers exactly one request with a canned
//! response, then closes the connection.

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

/// Serves one HTTP response and returns the base URL of the endpoint.
///
/// # Arguments
/// - `status` - Status line after the protocol version, e.g. `"403 Forbidden"`
/// - `content_type` - Value of the `content-type` header
/// - `body` - Response body
///
/// # Panics
/// - If no port can be bound on the loopback interface
///
/// # Examples
///
/// ```rust,ignore
/// let base = serve_once("200 OK", "image/png", b"PNG").await;
/// let bytes = reqwest::get(format!("{base}/a.png")).await?.bytes().await?;
/// ```
pub async fn serve_once(status: &str, content_type: &str, body: &[u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test HTTP endpoint");
    let addr = listener
        .local_addr()
        .expect("Failed to read test HTTP endpoint address");

    let mut reply = format!(
        "HTTP/1.1 {status}\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    reply.extend_from_slice(body);

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        let _ = socket.write_all(&reply).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{addr}")
}
