//! Persistence codecs.
//!
//! A codec turns a store's document into the bytes kept in its resource and
//! back. Every codec must round-trip the same ordered records exactly.

mod checksum;

pub use checksum::ChecksummedCodec;

use crate::error::Result;
use crate::resource::Resource;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serializes a document to and from a resource.
pub trait PersistenceCodec {
    /// Short name, used in logs.
    fn name(&self) -> &'static str;

    /// Encode a document.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;

    /// Decode a document. Malformed input is a codec error.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;

    /// Read the resource's full content and decode it.
    fn load<T, R>(&self, resource: &mut R) -> Result<T>
    where
        T: DeserializeOwned,
        R: Resource + ?Sized,
    {
        let bytes = resource.read_all()?;
        self.decode(&bytes)
    }

    /// Encode `value` and replace the resource's content with it.
    fn save<T, R>(&self, resource: &mut R, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
        R: Resource + ?Sized,
    {
        let bytes = self.encode(value)?;
        resource.replace(&bytes)
    }
}

/// JSON documents.
///
/// Pretty output uses a two-space indent.
#[derive(Clone, Copy, Debug)]
pub struct JsonCodec {
    pub pretty: bool,
}

impl JsonCodec {
    /// Single-line output.
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl PersistenceCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        Ok(bytes)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// MessagePack documents.
#[derive(Clone, Copy, Debug, Default)]
pub struct MessagePackCodec;

impl PersistenceCodec for MessagePackCodec {
    fn name(&self) -> &'static str {
        "msgpack"
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec(value)?)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, StoreError};
    use crate::records::{RecordSet, Tables};
    use crate::resource::MemoryResource;

    fn sample() -> RecordSet {
        ["hello, world!", "2nd string", "", "ünïcödé \"quoted\"\n"]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_json_pretty_layout() {
        let set: RecordSet = ["a", "b"].into_iter().collect();
        let bytes = JsonCodec::default().encode(&set).unwrap();
        assert_eq!(bytes, b"[\n  \"a\",\n  \"b\"\n]");

        let compact = JsonCodec::compact().encode(&set).unwrap();
        assert_eq!(compact, b"[\"a\",\"b\"]");
    }

    #[test]
    fn test_json_save_and_load() {
        let codec = JsonCodec::default();
        let mut res = MemoryResource::new();

        codec.save(&mut res, &sample()).unwrap();
        let loaded: RecordSet = codec.load(&mut res).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_msgpack_save_and_load() {
        let codec = MessagePackCodec;
        let mut res = MemoryResource::new();

        let mut tables = Tables::new();
        tables.create("b").unwrap();
        tables.create("a").unwrap();
        tables.get_mut("a").unwrap().push("row");

        codec.save(&mut res, &tables).unwrap();
        let loaded: Tables = codec.load(&mut res).unwrap();
        assert_eq!(loaded.names(), vec!["b", "a"]);
        assert_eq!(loaded.get("a").unwrap().slice(0), vec!["row"]);
    }

    #[test]
    fn test_malformed_json_is_codec_error() {
        let mut res = MemoryResource::with_bytes(b"[\"unterminated".to_vec());
        let err = JsonCodec::default().load::<RecordSet, _>(&mut res).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Codec);
    }

    #[test]
    fn test_wrong_shape_is_codec_error() {
        let mut res = MemoryResource::with_bytes(b"{\"a\": 1}".to_vec());
        let err = JsonCodec::default().load::<RecordSet, _>(&mut res).unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
    }

    #[test]
    fn test_save_replaces_content() {
        let codec = JsonCodec::compact();
        let mut res = MemoryResource::with_bytes(b"garbage that is longer than the output".to_vec());

        let set: RecordSet = ["x"].into_iter().collect();
        codec.save(&mut res, &set).unwrap();
        assert_eq!(res.contents(), b"[\"x\"]");
    }
}
