//! The configured codec: the boundary where untrusted bytes become datums.
//!
//! Wraps the pure core with input ceilings and logging. Everything here is
//! stateless apart from the immutable configuration, so a single codec can be
//! shared across threads.

use datum_core::{DataCodec, Datum, DatumHash, OutputDatum};
use tracing::{debug, warn};

use crate::config::CodecConfig;
use crate::error::{Error, Result};

/// Encodes, decodes, and hashes datums under a [`CodecConfig`].
#[derive(Debug, Clone, Default)]
pub struct DatumCodec {
    config: CodecConfig,
}

impl DatumCodec {
    /// Create a codec, rejecting invalid configuration.
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Canonical bytes of a datum.
    pub fn encode(&self, datum: &Datum) -> Vec<u8> {
        let bytes = datum.to_canonical_bytes();
        debug!(len = bytes.len(), "encoded datum");
        bytes
    }

    /// Content hash of a datum.
    pub fn hash(&self, datum: &Datum) -> DatumHash {
        datum.hash()
    }

    /// Decode untrusted bytes into a datum.
    pub fn decode(&self, bytes: &[u8]) -> Result<Datum> {
        self.check_len(bytes)?;
        match Datum::from_canonical_bytes_with(bytes, &self.config.decode_limits()) {
            Ok(datum) => {
                debug!(len = bytes.len(), "decoded datum");
                Ok(datum)
            }
            Err(e) => {
                warn!(error = %e, len = bytes.len(), "rejected malformed datum");
                Err(e.into())
            }
        }
    }

    /// Decode bytes and then decode the datum leniently into `T`.
    ///
    /// Malformed bytes are an error; a well-formed datum of the wrong shape
    /// is `Ok(None)`.
    pub fn decode_as<T: DataCodec>(&self, bytes: &[u8]) -> Result<Option<T>> {
        let datum = self.decode(bytes)?;
        let value = T::from_data(datum.as_data());
        if value.is_none() {
            debug!(
                target_type = std::any::type_name::<T>(),
                "datum shape did not match"
            );
        }
        Ok(value)
    }

    /// Decode bytes and then decode the datum strictly into `T`.
    pub fn decode_as_strict<T: DataCodec>(&self, bytes: &[u8]) -> Result<T> {
        let datum = self.decode(bytes)?;
        T::from_data_strict(datum.as_data()).map_err(|e| {
            warn!(
                error = %e,
                target_type = std::any::type_name::<T>(),
                "strict decode met unexpected shape"
            );
            Error::Shape(e)
        })
    }

    /// Resolve the datum for an output slot.
    ///
    /// Inline slots yield their datum. Hash slots need the datum's canonical
    /// bytes supplied separately; they are checked against the hash before
    /// decoding, and leaving them out is [`Error::MissingDatum`]. Returns
    /// `Ok(None)` only when the slot carries no datum.
    pub fn resolve(&self, slot: &OutputDatum, supplied: Option<&[u8]>) -> Result<Option<Datum>> {
        match (slot, supplied) {
            (OutputDatum::None, _) => Ok(None),
            (OutputDatum::Inline(datum), _) => Ok(Some(datum.clone())),
            (OutputDatum::Hash(expected), None) => {
                warn!(%expected, "referenced datum was not supplied");
                Err(Error::MissingDatum {
                    expected: *expected,
                })
            }
            (OutputDatum::Hash(expected), Some(bytes)) => {
                self.check_len(bytes)?;
                // Canonical decoding is one-to-one, so hashing the supplied
                // bytes equals hashing the decoded value.
                let actual = DatumHash::hash_bytes(bytes);
                if actual != *expected {
                    warn!(%expected, %actual, "supplied datum does not match hash");
                    return Err(Error::HashMismatch {
                        expected: *expected,
                        actual,
                    });
                }
                self.decode(bytes).map(Some)
            }
        }
    }

    fn check_len(&self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > self.config.max_input_len {
            warn!(
                len = bytes.len(),
                limit = self.config.max_input_len,
                "rejected oversized datum"
            );
            return Err(Error::InputTooLarge {
                len: bytes.len(),
                limit: self.config.max_input_len,
            });
        }
        Ok(())
    }
}
