use std::{
    io,
    net::{SocketAddr, TcpListener},
};

use crate::error::Error;

const BACKLOG: i32 = 128;

pub fn bind(addr: SocketAddr) -> Result<TcpListener, Error> {
    bind_socket(addr).map_err(|source| Error::Bind { addr, source })
}

fn bind_socket(addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;
    Ok(socket.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn bind_ephemeral() -> anyhow::Result<()> {
        let listener = bind((Ipv4Addr::LOCALHOST, 0).into())?;
        assert_ne!(listener.local_addr()?.port(), 0);
        Ok(())
    }

    #[test]
    fn port_in_use() -> anyhow::Result<()> {
        let first = bind((Ipv4Addr::LOCALHOST, 0).into())?;
        let addr = first.local_addr()?;
        match bind(addr) {
            Err(Error::Bind { addr: failed, .. }) => assert_eq!(failed, addr),
            other => panic!("expected bind failure, got {other:?}"),
        }
        Ok(())
    }
}
