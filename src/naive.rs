use std::{
    io::{self, Read},
    net::{Shutdown, TcpListener, TcpStream},
    time::Duration,
};

use crate::{
    config::Config,
    listener,
    responder::{self, Responder},
    response::{Response, Status},
};

const READ_CHUNK_SIZE: usize = 4096;
const MAX_HEAD_SIZE: usize = 64 * 1024;
const MAX_HEADERS: usize = 100;
const DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

pub fn main(config: Config) -> anyhow::Result<()> {
    let listener = listener::bind(config.bind_addr())?;
    let responder = Responder::new(config.port);
    responder::log_listening(responder.port());
    serve(&listener, &responder);
    Ok(())
}

/// Accepts and answers connections one at a time, forever.
pub fn serve(listener: &TcpListener, responder: &Responder) {
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(err) => {
                tracing::warn!(message = "Accept failed", error = %err);
                continue;
            }
        };
        if let Err(err) = handle_connection(stream, responder) {
            tracing::warn!(message = "Connection dropped", error = %err);
        }
    }
}

fn handle_connection(mut stream: TcpStream, responder: &Responder) -> anyhow::Result<()> {
    let peer = stream.peer_addr()?;
    let span = tracing::debug_span!("connection", %peer);
    let _enter = span.enter();
    tracing::debug!("Accepted connection");

    let mut buf = Vec::with_capacity(READ_CHUNK_SIZE);
    let mut chunk = [0u8; READ_CHUNK_SIZE];
    let (request_line, response) = loop {
        if buf.len() >= MAX_HEAD_SIZE {
            tracing::debug!("Request head exceeds {} bytes", MAX_HEAD_SIZE);
            break (None, Response::header_too_large());
        }
        let read = stream.read(&mut chunk)?;
        if read == 0 {
            tracing::debug!("Closed before a full request head");
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..read]);

        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
        let mut req = httparse::Request::new(&mut headers);
        match req.parse(&buf) {
            Ok(httparse::Status::Complete(_)) => {
                let method = req.method.unwrap_or_default();
                let path = req.path.unwrap_or_default();
                let version = req.version.unwrap_or(1);
                tracing::debug!(message = "Successfully parsed request", path);
                let request_line = format!("{method} {path} HTTP/1.{version}");
                break (Some(request_line), responder.respond(method, path)?);
            }
            Ok(httparse::Status::Partial) => continue,
            Err(httparse::Error::TooManyHeaders) => break (None, Response::header_too_large()),
            Err(err) => {
                tracing::debug!(message = "Invalid request", error = %err);
                break (None, Response::bad_request());
            }
        }
    };

    response.write_to(&mut stream)?;
    responder::log_request(request_line.as_deref(), response.status);
    if response.status != Status::Ok {
        drain(&mut stream)?;
    }
    tracing::debug!("Closing connection");
    Ok(())
}

/// Closing with unread input resets the connection and the client may lose
/// the reply, so consume what is left (bounded) after half-closing.
fn drain(stream: &mut TcpStream) -> io::Result<()> {
    stream.shutdown(Shutdown::Write)?;
    stream.set_read_timeout(Some(DRAIN_TIMEOUT))?;
    let mut rest = stream.take(MAX_HEAD_SIZE as u64);
    if let Err(err) = io::copy(&mut rest, &mut io::sink()) {
        tracing::debug!(message = "Stopped draining", error = %err);
    }
    Ok(())
}
