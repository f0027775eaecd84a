use crate::{
    health::Health,
    response::{Response, Status},
};

pub const SERVICE_NAME: &str = "python-basic";
pub const HEALTH_PATH: &str = "/health";

/// Maps a request to one of the fixed responses for the configured port.
#[derive(Debug, Clone, Copy)]
pub struct Responder {
    port: u16,
}

impl Responder {
    pub fn new(port: u16) -> Responder {
        Responder { port }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `path` is the raw request target, query string included.
    pub fn respond(&self, method: &str, path: &str) -> serde_json::Result<Response> {
        if method != "GET" {
            return Ok(Response::not_implemented(method));
        }
        if path == HEALTH_PATH {
            let body = Health {
                ok: true,
                service: SERVICE_NAME,
                port: self.port,
            }
            .to_vec()?;
            return Ok(Response::json(body));
        }
        Ok(Response::text(
            Status::Ok,
            format!("{SERVICE_NAME} running on {}\n", self.port),
        ))
    }
}

pub fn log_listening(port: u16) {
    tracing::info!("[{SERVICE_NAME}] listening on http://localhost:{port}");
}

/// One line per handled request. `request_line` is `None` when the head
/// could not be parsed.
pub fn log_request(request_line: Option<&str>, status: Status) {
    let request_line = request_line.unwrap_or("-");
    tracing::info!(
        "[{SERVICE_NAME}] \"{request_line}\" {} -",
        status.code()
    );
}
