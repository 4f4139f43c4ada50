//! JSON encoding behind a small codec contract.
//!
//! Hosts call the free functions; they delegate to [`SerdeJson`], the only
//! backend. Code that wants to stay backend-agnostic can be generic over
//! [`JsonCodec`].

use std::io::{Read, Write};

use serde::Serialize;
use serde::de::{Deserialize, DeserializeOwned};
use serde_json::ser::PrettyFormatter;

/// Unparsed JSON text kept verbatim, for delayed decoding.
pub type RawMessage = serde_json::value::RawValue;

/// Error produced by the default backend.
pub type JsonError = serde_json::Error;

/// Encoding and decoding operations a JSON backend provides.
pub trait JsonCodec {
    /// Backend error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Encodes `value` compactly.
    ///
    /// # Errors
    ///
    /// Fails when `value` cannot be represented as JSON.
    fn marshal<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, Self::Error>;

    /// Encodes `value` with one element per line. Every line after the first
    /// starts with `prefix` followed by one `indent` per nesting level.
    ///
    /// # Errors
    ///
    /// Fails when `value` cannot be represented as JSON.
    fn marshal_indent<T: Serialize + ?Sized>(
        value: &T,
        prefix: &str,
        indent: &str,
    ) -> Result<Vec<u8>, Self::Error>;

    /// Decodes `data` into a `T`.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or when the document does not match `T`.
    fn unmarshal<'de, T: Deserialize<'de>>(data: &'de [u8]) -> Result<T, Self::Error>;
}

/// [`JsonCodec`] backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJson;

impl JsonCodec for SerdeJson {
    type Error = JsonError;

    fn marshal<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, Self::Error> {
        serde_json::to_vec(value)
    }

    fn marshal_indent<T: Serialize + ?Sized>(
        value: &T,
        prefix: &str,
        indent: &str,
    ) -> Result<Vec<u8>, Self::Error> {
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        value.serialize(&mut serializer)?;
        if prefix.is_empty() {
            return Ok(out);
        }
        let mut prefixed = Vec::with_capacity(out.len());
        for byte in out {
            prefixed.push(byte);
            if byte == b'\n' {
                prefixed.extend_from_slice(prefix.as_bytes());
            }
        }
        Ok(prefixed)
    }

    fn unmarshal<'de, T: Deserialize<'de>>(data: &'de [u8]) -> Result<T, Self::Error> {
        serde_json::from_slice(data)
    }
}

/// Encodes `value` compactly.
///
/// # Errors
///
/// Fails when `value` cannot be represented as JSON.
pub fn marshal<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, JsonError> {
    SerdeJson::marshal(value)
}

/// Encodes `value` indented; see [`JsonCodec::marshal_indent`].
///
/// # Errors
///
/// Fails when `value` cannot be represented as JSON.
pub fn marshal_indent<T: Serialize + ?Sized>(
    value: &T,
    prefix: &str,
    indent: &str,
) -> Result<Vec<u8>, JsonError> {
    SerdeJson::marshal_indent(value, prefix, indent)
}

/// Decodes `data` into a `T`.
///
/// # Errors
///
/// Fails on malformed JSON or when the document does not match `T`.
///
/// # Examples
///
/// ```
/// use cliflag::json;
///
/// let ports: Vec<u16> = json::unmarshal(b"[80, 443]")?;
/// assert_eq!(ports, [80, 443]);
/// assert_eq!(json::marshal(&ports)?, b"[80,443]");
/// # Ok::<(), cliflag::json::JsonError>(())
/// ```
pub fn unmarshal<'de, T: Deserialize<'de>>(data: &'de [u8]) -> Result<T, JsonError> {
    SerdeJson::unmarshal(data)
}

/// Streams `value` to `writer` followed by a newline.
///
/// # Errors
///
/// Fails when encoding fails or `writer` reports an error.
pub fn encode<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<(), JsonError> {
    serde_json::to_writer(&mut writer, value)?;
    writer.write_all(b"\n").map_err(JsonError::io)
}

/// Reads one JSON document from `reader`.
///
/// # Errors
///
/// Fails on I/O errors, malformed JSON or a shape mismatch.
pub fn decode<R: Read, T: DeserializeOwned>(reader: R) -> Result<T, JsonError> {
    serde_json::from_reader(reader)
}
