use std::io::{self, Write};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    RequestHeaderFieldsTooLarge,
    NotImplemented,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::RequestHeaderFieldsTooLarge => 431,
            Status::NotImplemented => 501,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::RequestHeaderFieldsTooLarge => "Request Header Fields Too Large",
            Status::NotImplemented => "Not Implemented",
        }
    }
}

/// A complete response. `Content-Length` always comes from `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Response {
    pub fn json(body: Vec<u8>) -> Response {
        Response {
            status: Status::Ok,
            content_type: CONTENT_TYPE_JSON,
            body,
        }
    }

    pub fn text(status: Status, body: impl Into<String>) -> Response {
        Response {
            status,
            content_type: CONTENT_TYPE_TEXT,
            body: body.into().into_bytes(),
        }
    }

    pub fn bad_request() -> Response {
        Response::text(Status::BadRequest, "Bad request syntax\n")
    }

    pub fn header_too_large() -> Response {
        Response::text(
            Status::RequestHeaderFieldsTooLarge,
            "Request header fields too large\n",
        )
    }

    pub fn not_implemented(method: &str) -> Response {
        Response::text(
            Status::NotImplemented,
            format!("Unsupported method ('{method}')\n"),
        )
    }

    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    /// Writes an HTTP/1.1 response that closes the connection afterwards.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(
            writer,
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status.code(),
            self.status.reason(),
            self.content_type,
            self.content_length(),
        )?;
        writer.write_all(&self.body)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format() -> io::Result<()> {
        let mut out = Vec::new();
        Response::text(Status::Ok, "python-basic running on 7\n").write_to(&mut out)?;
        assert_eq!(
            String::from_utf8_lossy(&out),
            "HTTP/1.1 200 OK\r\n\
             Content-Type: text/plain\r\n\
             Content-Length: 26\r\n\
             Connection: close\r\n\
             \r\n\
             python-basic running on 7\n"
        );
        Ok(())
    }

    #[test]
    fn error_responses() {
        let response = Response::not_implemented("POST");
        assert_eq!(response.status.code(), 501);
        assert_eq!(response.body, b"Unsupported method ('POST')\n");
        assert_eq!(Response::bad_request().status.code(), 400);
        assert_eq!(Response::header_too_large().status.code(), 431);
    }
}
