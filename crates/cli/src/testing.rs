//! A local stand-in for the statistics endpoint.

use std::io;

use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::net::TcpStream;

/// A canned answer for one request target (path and query).
pub(crate) struct Route {
    pub(crate) target: &'static str,
    pub(crate) status: u16,
    pub(crate) body: &'static str,
}

impl Route {
    pub(crate) fn new(target: &'static str, status: u16, body: &'static str) -> Route {
        Self {
            target,
            status,
            body,
        }
    }
}

/// Serves `routes` on a local port and returns the URL of the
/// `danvk/dygraphs` dashboard page. Unknown targets get a 404.
pub(crate) async fn serve(routes: Vec<Route>) -> io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let url = format!("http://{}/danvk/dygraphs", listener.local_addr()?);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let _ = respond(stream, &routes).await;
        }
    });

    Ok(url)
}

async fn respond(mut stream: TcpStream, routes: &[Route]) -> io::Result<()> {
    let mut request = Vec::new();
    let mut buffer = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buffer).await?;
        if n == 0 {
            return Ok(());
        }
        request.extend_from_slice(&buffer[..n]);
    }

    let request = String::from_utf8_lossy(&request);
    let target = request.split_whitespace().nth(1).unwrap_or_default();

    let (status, body) = routes
        .iter()
        .find(|route| route.target == target)
        .map_or((404, "not found"), |route| (route.status, route.body));

    let response = format!(
        "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}
