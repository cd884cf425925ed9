//! The pluggable codec abstraction every compression backend implements.

use crate::error::CodecError;

/// A codec turns an arbitrary byte sequence into a compressed bit-stream and back.
///
/// Implementations are pure with respect to their input: calling `encode` twice on the same
/// bytes must produce identical output, and `decode` must succeed using only the bytes `encode`
/// produced, with no side channel.
pub trait Codec {
    /// Stable identifier used to select this codec from the command line (e.g. `"huf"`).
    fn id(&self) -> &'static str;

    /// Compresses `input` into a self-describing bit-stream.
    fn encode(&self, input: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Reconstructs the original bytes from a stream produced by [`Codec::encode`].
    fn decode(&self, stream: &[u8]) -> Result<Vec<u8>, CodecError>;
}
