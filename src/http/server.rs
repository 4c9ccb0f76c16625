//! # HTTP API Server
//!
//! Minimal TCP/HTTP front end for the debate orchestrator. One endpoint:
//! `POST /blog` takes `{"topic": ..., "user_id": ...}` and answers with a
//! chunked stream of progress lines followed by the final result line (see
//! [`crate::http::wire`] for the line format).
//!
//! The server owns no request state; each connection gets its own task and
//! its own debate run. A client that disconnects mid-stream drops the event
//! receiver, which cancels the run.

use crate::core::transcript::Turn;
use crate::features::debate::DebateOrchestrator;
use crate::http::wire;
use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, warn};
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// Upper bound for request bodies; topic submissions are tiny
const MAX_BODY_BYTES: usize = 64 * 1024;

fn default_topic() -> String {
    "Starwars".to_string()
}

fn default_user_id() -> String {
    "default_user".to_string()
}

/// Body of `POST /blog`. Both fields are optional with the historical
/// defaults.
#[derive(Debug, Deserialize)]
struct BlogRequest {
    #[serde(default = "default_topic")]
    topic: String,
    #[serde(default = "default_user_id")]
    user_id: String,
}

/// A parsed incoming request, just enough HTTP for this service
#[derive(Debug)]
struct ParsedRequest {
    method: String,
    path: String,
    body: Vec<u8>,
}

/// HTTP front end wrapping a shared orchestrator
pub struct HttpServer {
    orchestrator: DebateOrchestrator,
    bind_address: String,
}

impl HttpServer {
    pub fn new(orchestrator: DebateOrchestrator, bind_address: impl Into<String>) -> Self {
        HttpServer {
            orchestrator,
            bind_address: bind_address.into(),
        }
    }

    /// Bind and serve until the process exits
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.bind_address)
            .await
            .with_context(|| format!("failed to bind {}", self.bind_address))?;
        self.serve(listener).await
    }

    /// Accept loop over an already-bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        info!("HTTP server listening on {}", listener.local_addr()?);

        loop {
            match listener.accept().await {
                Ok((stream, addr)) => {
                    debug!("Connection accepted from {addr}");
                    let orchestrator = self.orchestrator.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(orchestrator, stream).await {
                            debug!("Connection from {addr} ended: {e:#}");
                        }
                    });
                }
                Err(e) => {
                    error!("Failed to accept connection: {e}");
                }
            }
        }
    }
}

async fn handle_connection(orchestrator: DebateOrchestrator, stream: TcpStream) -> Result<()> {
    let (read_half, mut writer) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let request = match read_request(&mut reader).await {
        Ok(request) => request,
        Err(e) => {
            warn!("Malformed request: {e:#}");
            write_plain(&mut writer, "400 Bad Request", "malformed request\n").await?;
            return Ok(());
        }
    };

    match (request.method.as_str(), request.path.as_str()) {
        ("POST", "/blog") => handle_blog(orchestrator, &request.body, &mut writer).await,
        _ => {
            debug!("No route for {} {}", request.method, request.path);
            write_plain(&mut writer, "404 Not Found", "not found\n").await
        }
    }
}

async fn handle_blog<W>(
    orchestrator: DebateOrchestrator,
    body: &[u8],
    writer: &mut W,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let request: BlogRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejecting /blog request with invalid body: {e}");
            write_plain(writer, "400 Bad Request", "invalid request body\n").await?;
            return Ok(());
        }
    };

    info!(
        "API request received: topic '{}' for user '{}'",
        request.topic, request.user_id
    );

    let content = format!("Write a blog post about {}.", request.topic);
    let mut rx = orchestrator.process_conversation(&request.user_id, vec![Turn::user(content)]);

    writer
        .write_all(
            b"HTTP/1.1 200 OK\r\n\
              Content-Type: text/event-stream\r\n\
              Transfer-Encoding: chunked\r\n\
              Connection: close\r\n\
              \r\n",
        )
        .await?;

    while let Some(item) = rx.recv().await {
        let line = match item {
            Ok(event) => wire::encode_event(&event),
            Err(e) => {
                // Terminal failure line; the run is already over
                let line = wire::encode_error(&e);
                write_chunk(writer, &line).await?;
                break;
            }
        };
        if write_chunk(writer, &line).await.is_err() {
            // Client went away; dropping rx cancels the debate run
            debug!("Client disconnected mid-stream");
            return Ok(());
        }
    }

    writer.write_all(b"0\r\n\r\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Read one request: request line, headers, then a Content-Length body
async fn read_request<R>(reader: &mut R) -> Result<ParsedRequest>
where
    R: AsyncBufRead + Unpin,
{
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).await? == 0 {
        return Err(anyhow!("connection closed before request line"));
    }
    let (method, path) = parse_request_line(request_line.trim_end())
        .ok_or_else(|| anyhow!("malformed request line '{}'", request_line.trim_end()))?;

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some(value) = header_value(line, "content-length") {
            content_length = value.parse().context("invalid Content-Length")?;
        }
    }

    if content_length > MAX_BODY_BYTES {
        return Err(anyhow!("request body too large: {content_length} bytes"));
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await?;

    Ok(ParsedRequest { method, path, body })
}

/// Split `"POST /blog HTTP/1.1"` into method and path
fn parse_request_line(line: &str) -> Option<(String, String)> {
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    let path = parts.next()?;
    parts.next()?; // HTTP version must be present
    Some((method.to_string(), path.to_string()))
}

/// Case-insensitive header lookup on a single `Name: value` line
fn header_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let (header, value) = line.split_once(':')?;
    if header.trim().eq_ignore_ascii_case(name) {
        Some(value.trim())
    } else {
        None
    }
}

/// One chunked-transfer chunk carrying a single line of the stream
async fn write_chunk<W>(writer: &mut W, line: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let data = format!("{line}\n");
    writer
        .write_all(format!("{:X}\r\n{data}\r\n", data.len()).as_bytes())
        .await?;
    writer.flush().await
}

/// Small non-streaming response (errors, unknown routes)
async fn write_plain<W>(writer: &mut W, status: &str, body: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(
            format!(
                "HTTP/1.1 {status}\r\n\
                 Content-Type: text/plain\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\
                 \r\n\
                 {body}",
                body.len()
            )
            .as_bytes(),
        )
        .await?;
    writer.flush().await?;
    Ok(())
}
