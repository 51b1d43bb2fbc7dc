//! MinData: compact tagged binary serialization for a closed catalog of
//! primitive and slice values, with optional DEFLATE compression and
//! AES-GCM encryption.
//!
//! ```
//! use mindata::{from_bytes, to_bytes, Options, Value};
//!
//! let opts = Options::new();
//! let (bytes, approach) = to_bytes(&Value::Int64(168), &opts).unwrap();
//! assert_eq!(approach, "MD1");
//!
//! let back = from_bytes(&bytes, Some(mindata::default_approach().as_ref()), &opts).unwrap();
//! assert_eq!(back, Value::Int64(168));
//! ```

/// The serialization approach contract.
pub mod approach;
/// MinData codec: tags, values, encode/decode, Int64 and time helpers.
pub mod codec;
/// Process settings loaded from `MINDATA_*` environment variables.
pub mod config;
/// Multi-value framing.
pub mod framer;
/// Subscriber setup for binaries.
pub mod logging;
/// Per-call options.
pub mod options;
/// Name -> approach registry.
pub mod registry;
/// Public to/from bytes operations.
pub mod serialise;
/// Compression and encryption pipeline.
pub mod transform;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

pub use approach::Approach;
pub use codec::{
    from_bytes_i64, size_of_i64, to_bytes_i64, MinData, MinDataVersion, Tag, Value, SIZE_OF_I64,
};
pub use config::Settings;
pub use mindata_error::{ErrorExt, LogLevel, MinDataError, MinDataResult, StatusCode};
pub use options::Options;
pub use registry::{get_approach, register_approach, ApproachRegistry};
pub use serialise::{
    default_approach, from_bytes, from_bytes_many, from_bytes_many_named, from_bytes_named,
    to_bytes, to_bytes_many,
};
pub use transform::{AesGcmCipher, CipherFn};
