//! Statistics document serialization
//!
//! The wire form of the trailing document is picked once, when the scan is
//! set up:
//!
//! - `kryo` / `compact`: MessagePack, zstd-compressed on request
//! - `writable` / `native`: bincode
//! - `tostring` / `debug`: JSON text

use crate::stats::StatsDocument;
use quarry_core::{Error, QueryConfig, Result, SerializationFormat};

const ZSTD_LEVEL: i32 = 3;

/// Serializes statistics documents in one fixed format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentSerializer {
    format: SerializationFormat,
    reduced: bool,
    compressed: bool,
}

impl DocumentSerializer {
    /// Serializer for `format`
    ///
    /// `reduced` drops stage timings; `compressed` only affects the compact
    /// binary format.
    pub fn new(format: SerializationFormat, reduced: bool, compressed: bool) -> Self {
        Self {
            format,
            reduced,
            compressed,
        }
    }

    /// Serializer from config; an unknown return type is a config error
    pub fn from_config(config: &QueryConfig) -> Result<Self> {
        Ok(Self::new(
            config.serialization_format()?,
            config.reduced_response,
            config.compress_results,
        ))
    }

    /// Serializer from a return-type name such as `"kryo"`
    pub fn from_name(name: &str, reduced: bool, compressed: bool) -> Result<Self> {
        Ok(Self::new(name.parse()?, reduced, compressed))
    }

    /// The selected format
    pub fn format(&self) -> SerializationFormat {
        self.format
    }

    /// Encode `doc`
    pub fn serialize(&self, doc: &StatsDocument) -> Result<Vec<u8>> {
        let reduced;
        let doc = if self.reduced {
            reduced = doc.reduced();
            &reduced
        } else {
            doc
        };

        match self.format {
            SerializationFormat::CompactBinary => {
                let bytes = rmp_serde::to_vec_named(doc)
                    .map_err(|e| Error::serialization(e.to_string()))?;
                if self.compressed {
                    Ok(zstd::encode_all(bytes.as_slice(), ZSTD_LEVEL)?)
                } else {
                    Ok(bytes)
                }
            }
            SerializationFormat::Native => Ok(bincode::serialize(doc)?),
            SerializationFormat::DebugText => {
                serde_json::to_vec(doc).map_err(|e| Error::serialization(e.to_string()))
            }
        }
    }

    /// Decode bytes produced by [`serialize`](Self::serialize)
    pub fn deserialize(&self, bytes: &[u8]) -> Result<StatsDocument> {
        match self.format {
            SerializationFormat::CompactBinary => {
                let decoded;
                let bytes = if self.compressed {
                    decoded = zstd::decode_all(bytes)?;
                    decoded.as_slice()
                } else {
                    bytes
                };
                rmp_serde::from_slice(bytes).map_err(|e| Error::serialization(e.to_string()))
            }
            SerializationFormat::Native => Ok(bincode::deserialize(bytes)?),
            SerializationFormat::DebugText => {
                serde_json::from_slice(bytes).map_err(|e| Error::serialization(e.to_string()))
            }
        }
    }
}
