use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

/// Payload of the `/health` endpoint. Field order is the wire order.
#[derive(Debug, Serialize)]
pub struct Health<'a> {
    pub ok: bool,
    pub service: &'a str,
    pub port: u16,
}

impl Health<'_> {
    /// Serializes with `", "` and `": "` separators, e.g.
    /// `{"ok": true, "service": "python-basic", "port": 4000}`.
    pub fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        let mut body = Vec::with_capacity(64);
        let mut serializer = serde_json::Serializer::with_formatter(&mut body, SpacedFormatter);
        self.serialize(&mut serializer)?;
        Ok(body)
    }
}

/// Single-line JSON with a space after every separator.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
