//! Two-pass JSON decoding.
//!
//! Firmware updates tend to add fields to the hub's documents. The strict
//! pass rejects any field the record type does not declare; when it fails,
//! the same bytes are decoded again with unknown fields ignored. Missing or
//! mistyped declared fields fail both passes.

use serde::de::DeserializeOwned;

/// Which pass produced a decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePass {
    Strict,
    Lenient,
}

/// A decoded value and how it was obtained.
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    pub value: T,
    pub pass: DecodePass,
    /// Paths of fields the strict pass rejected, e.g. `downstream.channels.0.ofdmProfile`.
    pub unknown_fields: Vec<String>,
}

/// Decode `bytes` strictly, falling back to a lenient decode.
///
/// Returns the lenient pass's error when both passes fail.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<Decoded<T>, serde_json::Error> {
    let mut unknown_fields = Vec::new();

    if let Ok(value) = decode_strict::<T>(bytes, &mut unknown_fields)
        && unknown_fields.is_empty()
    {
        return Ok(Decoded {
            value,
            pass: DecodePass::Strict,
            unknown_fields,
        });
    }

    let value = serde_json::from_slice(bytes)?;
    Ok(Decoded {
        value,
        pass: DecodePass::Lenient,
        unknown_fields,
    })
}

fn decode_strict<T: DeserializeOwned>(
    bytes: &[u8],
    unknown_fields: &mut Vec<String>,
) -> Result<T, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = serde_ignored::deserialize(&mut de, |path| unknown_fields.push(path.to_string()))?;
    de.end()?;
    Ok(value)
}
