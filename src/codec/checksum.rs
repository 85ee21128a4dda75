//! Checksummed framing around another codec.

use crate::codec::PersistenceCodec;
use crate::error::{Result, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Magic bytes for framed documents.
const FRAME_MAGIC: &[u8; 4] = b"RWS\0";

/// Current frame format version.
const FRAME_VERSION: u8 = 1;

/// Frame header size: magic + version + crc32.
const FRAME_HEADER_SIZE: usize = 4 + 1 + 4;

/// Wraps an inner codec's output in a header carrying a CRC32 of the payload.
///
/// Layout: `magic(4) | version(1) | crc32(4, LE) | payload`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChecksummedCodec<C> {
    inner: C,
}

impl<C: PersistenceCodec> ChecksummedCodec<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: PersistenceCodec> PersistenceCodec for ChecksummedCodec<C> {
    fn name(&self) -> &'static str {
        "checksummed"
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let payload = self.inner.encode(value)?;

        let mut out = Vec::with_capacity(FRAME_HEADER_SIZE + payload.len());
        out.extend_from_slice(FRAME_MAGIC);
        out.push(FRAME_VERSION);
        out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
        out.extend_from_slice(&payload);
        Ok(out)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        if bytes.len() < FRAME_HEADER_SIZE {
            return Err(StoreError::Codec(format!(
                "Frame too short: {} bytes",
                bytes.len()
            )));
        }

        if &bytes[0..4] != FRAME_MAGIC {
            return Err(StoreError::Codec("Invalid frame magic".into()));
        }

        if bytes[4] != FRAME_VERSION {
            return Err(StoreError::Codec(format!(
                "Unsupported frame version: {}",
                bytes[4]
            )));
        }

        let mut crc_bytes = [0u8; 4];
        crc_bytes.copy_from_slice(&bytes[5..9]);
        let stored = u32::from_le_bytes(crc_bytes);

        let payload = &bytes[FRAME_HEADER_SIZE..];
        let computed = crc32fast::hash(payload);
        if stored != computed {
            return Err(StoreError::ChecksumMismatch {
                expected: stored,
                got: computed,
            });
        }

        self.inner.decode(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{JsonCodec, MessagePackCodec};
    use crate::error::ErrorKind;
    use crate::records::RecordSet;

    fn sample() -> RecordSet {
        ["one", "two", "three"].into_iter().collect()
    }

    #[test]
    fn test_frame_round_trip() {
        let codec = ChecksummedCodec::new(MessagePackCodec);
        let bytes = codec.encode(&sample()).unwrap();
        assert_eq!(&bytes[0..4], FRAME_MAGIC);
        assert_eq!(bytes[4], FRAME_VERSION);

        let back: RecordSet = codec.decode(&bytes).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_flipped_byte_detected() {
        let codec = ChecksummedCodec::new(JsonCodec::compact());
        let mut bytes = codec.encode(&sample()).unwrap();
        let last = bytes.len() - 3;
        bytes[last] ^= 0x01;

        let err = codec.decode::<RecordSet>(&bytes).unwrap_err();
        assert!(matches!(err, StoreError::ChecksumMismatch { .. }));
        assert_eq!(err.kind(), ErrorKind::Codec);
    }

    #[test]
    fn test_bad_header() {
        let codec = ChecksummedCodec::new(JsonCodec::compact());

        assert!(matches!(
            codec.decode::<RecordSet>(b"RWS"),
            Err(StoreError::Codec(_))
        ));

        let mut bytes = codec.encode(&sample()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(
            codec.decode::<RecordSet>(&bytes),
            Err(StoreError::Codec(_))
        ));

        let mut bytes = codec.encode(&sample()).unwrap();
        bytes[4] = 99;
        assert!(matches!(
            codec.decode::<RecordSet>(&bytes),
            Err(StoreError::Codec(_))
        ));
    }
}
