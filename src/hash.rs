//! Keyed hashing for bucket placement.
//!
//! Keys are digested with SipHash-1-3 under a 128-bit key, so bucket
//! placement is unpredictable to callers that do not know the key. The key
//! is sourced from the operating system's CSPRNG exactly once per process,
//! on first engine construction, and shared by every engine instance for
//! the lifetime of the process.

use std::hash::Hasher;

use once_cell::sync::OnceCell;
use siphasher::sip::SipHasher13;

/// A 128-bit hashing key, held as two 64-bit words.
///
/// Engines normally share the process-wide key, but a fixed key can be
/// supplied through [`EngineBuilder::hash_key`][crate::EngineBuilder::hash_key]
/// to make bucket layouts reproducible in tests.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HashKey {
    k0: u64,
    k1: u64,
}

impl HashKey {
    /// Creates a key from two 64-bit words.
    pub const fn new(k0: u64, k1: u64) -> Self {
        Self { k0, k1 }
    }

    fn from_bytes(bytes: [u8; 16]) -> Self {
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        lo.copy_from_slice(&bytes[..8]);
        hi.copy_from_slice(&bytes[8..]);
        Self {
            k0: u64::from_le_bytes(lo),
            k1: u64::from_le_bytes(hi),
        }
    }
}

// The key is what makes placement unpredictable; keep it out of logs.
impl std::fmt::Debug for HashKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HashKey(..)")
    }
}

/// Used when the system random source is unavailable. Hashing still works,
/// but placement becomes predictable to an adversary who knows these words.
const FALLBACK_KEY: HashKey = HashKey::new(0x9e37_79b9_7f4a_7c15, 0xcbf2_9ce4_8422_2325);

static PROCESS_KEY: OnceCell<HashKey> = OnceCell::new();

/// Returns the process-wide hashing key, generating it on first use.
///
/// Falls back to [`FALLBACK_KEY`] if the random source fails; that is a
/// reduced-security state, not an error, and is surfaced through a warning.
pub(crate) fn process_key() -> HashKey {
    *PROCESS_KEY.get_or_init(|| {
        let mut bytes = [0u8; 16];
        match getrandom::getrandom(&mut bytes) {
            Ok(()) => HashKey::from_bytes(bytes),
            Err(e) => {
                log::warn!(
                    "random hash key generation failed ({e}); \
                     falling back to a fixed key"
                );
                FALLBACK_KEY
            }
        }
    })
}

/// Computes the 64-bit digest of `bytes` under `key`.
pub(crate) fn hash64(key: &HashKey, bytes: &[u8]) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(key.k0, key.k1);
    hasher.write(bytes);
    hasher.finish()
}
