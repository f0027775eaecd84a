use std::{
    env::{self, VarError},
    net::{Ipv4Addr, SocketAddr},
};

use crate::error::Error;

pub const PORT_ENV: &str = "PORT";
pub const DEFAULT_PORT: u16 = 3300;

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        match env::var(PORT_ENV) {
            Ok(value) => Config::from_port_value(Some(&value)),
            Err(VarError::NotPresent) => Config::from_port_value(None),
            Err(VarError::NotUnicode(_)) => Err(Error::NonUnicodePort),
        }
    }

    /// An empty value counts as unset.
    pub fn from_port_value(value: Option<&str>) -> Result<Config, Error> {
        let port = match value.map(str::trim) {
            None | Some("") => DEFAULT_PORT,
            Some(value) => value.parse().map_err(|source| Error::InvalidPort {
                value: value.to_owned(),
                source,
            })?,
        };
        Ok(Config { port })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        (Ipv4Addr::UNSPECIFIED, self.port).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_port_defaults() -> Result<(), Error> {
        assert_eq!(Config::from_port_value(None)?.port, 3300);
        assert_eq!(Config::from_port_value(Some(""))?.port, 3300);
        assert_eq!(Config::from_port_value(Some("  "))?.port, 3300);
        Ok(())
    }

    #[test]
    fn explicit_port() -> Result<(), Error> {
        assert_eq!(Config::from_port_value(Some("8080"))?.port, 8080);
        assert_eq!(Config::from_port_value(Some(" 4000\n"))?.port, 4000);
        assert_eq!(Config::from_port_value(Some("7"))?.port, 7);
        Ok(())
    }

    #[test]
    fn rejects_garbage() {
        for value in ["abc", "-1", "65536", "80.5", "0x50"] {
            let err = Config::from_port_value(Some(value)).unwrap_err();
            match err {
                Error::InvalidPort { value: reported, .. } => assert_eq!(reported, value),
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    /// The only test that touches `PORT`, so the steps run in one body.
    #[test]
    fn reads_process_environment() -> Result<(), Error> {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt as _};

        env::remove_var(PORT_ENV);
        assert_eq!(Config::from_env()?.port, DEFAULT_PORT);

        env::set_var(PORT_ENV, "8080");
        assert_eq!(Config::from_env()?.port, 8080);

        env::set_var(PORT_ENV, OsStr::from_bytes(b"80\xff"));
        let err = Config::from_env().unwrap_err();
        env::remove_var(PORT_ENV);
        assert!(matches!(err, Error::NonUnicodePort), "{err:?}");
        Ok(())
    }

    #[test]
    fn binds_all_interfaces() {
        let config = Config { port: 4000 };
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:4000");
    }
}
