use std::{io, net::SocketAddr, num::ParseIntError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("PORT={value:?} is not a valid port: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("PORT is not valid unicode")]
    NonUnicodePort,
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}
