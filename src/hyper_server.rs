use std::borrow::Cow;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{
    body::Incoming,
    header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE},
    server::conn::http1,
    service::service_fn,
    Request, Uri,
};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::{
    config::Config,
    listener,
    responder::{self, Responder},
    response::Response,
};

pub fn main(config: Config) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let listener = listener::bind(config.bind_addr())?;
        listener.set_nonblocking(true)?;
        let listener = TcpListener::from_std(listener)?;
        let responder = Responder::new(config.port);
        responder::log_listening(responder.port());
        serve(listener, responder).await
    })
}

pub async fn serve(listener: TcpListener, responder: Responder) -> anyhow::Result<()> {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                tracing::warn!(message = "Accept failed", error = %err);
                continue;
            }
        };
        tracing::debug!(message = "Accepted connection", %peer);
        let io = TokioIo::new(stream);

        tokio::spawn(async move {
            let service = service_fn(move |req| handle(req, responder));
            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                tracing::warn!(message = "Connection dropped", %peer, error = %err);
            }
        });
    }
}

async fn handle(
    req: Request<Incoming>,
    responder: Responder,
) -> anyhow::Result<hyper::Response<Full<Bytes>>> {
    let method = req.method().as_str();
    let path = request_target(req.uri());
    let response = responder.respond(method, &path)?;
    let request_line = format!("{method} {path} {:?}", req.version());
    responder::log_request(Some(&request_line), response.status);
    into_hyper(response)
}

/// The target as sent: absolute-form keeps its scheme and authority.
fn request_target(uri: &Uri) -> Cow<'_, str> {
    if uri.scheme().is_some() {
        return Cow::Owned(uri.to_string());
    }
    Cow::Borrowed(uri.path_and_query().map_or_else(|| uri.path(), |target| target.as_str()))
}

fn into_hyper(response: Response) -> anyhow::Result<hyper::Response<Full<Bytes>>> {
    let content_length = response.content_length();
    let response = hyper::Response::builder()
        .status(response.status.code())
        .header(CONTENT_TYPE, HeaderValue::from_static(response.content_type))
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(Bytes::from(response.body)))?;
    Ok(response)
}
