use crate::{
    engine::{EngineConfig, HashEngine, MAX_BUCKET_COUNT},
    error::EngineError,
    hash::HashKey,
};

/// Builds a [`HashEngine`] with custom sizing and hashing parameters.
///
/// [`HashEngine::new`] covers the common case; the builder exists for
/// callers that need to pin the bucket-count bounds, tune the load-factor
/// watermarks, or fix the hash key for reproducible bucket layouts.
///
/// # Examples
///
/// ```rust
/// use cairn::EngineBuilder;
///
/// let engine = EngineBuilder::new(1024)
///     .max_load_factor(0.8)
///     .min_load_factor(0.2)
///     .build()?;
///
/// engine.put(b"k", b"v")?;
/// # Ok::<(), cairn::EngineError>(())
/// ```
#[must_use]
pub struct EngineBuilder {
    capacity: usize,
    min_bucket_count: usize,
    max_bucket_count: usize,
    max_load_factor: f64,
    min_load_factor: f64,
    hash_key: Option<HashKey>,
}

impl EngineBuilder {
    /// Starts a builder for an engine sized for roughly `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let config = EngineConfig::default();
        Self {
            capacity,
            min_bucket_count: config.min_bucket_count,
            max_bucket_count: config.max_bucket_count,
            max_load_factor: config.max_load_factor,
            min_load_factor: config.min_load_factor,
            hash_key: None,
        }
    }

    /// Lower bound on the bucket count; shrinking stops here. Must be a
    /// power of two.
    pub fn min_bucket_count(self, min_bucket_count: usize) -> Self {
        Self {
            min_bucket_count,
            ..self
        }
    }

    /// Upper bound on the bucket count; growth stops here. Must be a power
    /// of two no greater than [`MAX_BUCKET_COUNT`].
    pub fn max_bucket_count(self, max_bucket_count: usize) -> Self {
        Self {
            max_bucket_count,
            ..self
        }
    }

    /// Load factor above which an insert doubles the bucket count.
    pub fn max_load_factor(self, max_load_factor: f64) -> Self {
        Self {
            max_load_factor,
            ..self
        }
    }

    /// Load factor below which a delete halves the bucket count.
    pub fn min_load_factor(self, min_load_factor: f64) -> Self {
        Self {
            min_load_factor,
            ..self
        }
    }

    /// Uses a fixed hashing key instead of the process-wide random one.
    ///
    /// Two engines built with the same key and capacity place identical key
    /// sets into identical bucket layouts, which makes collision and probe
    /// behavior reproducible in tests. Production engines should keep the
    /// random key.
    pub fn hash_key(self, hash_key: HashKey) -> Self {
        Self {
            hash_key: Some(hash_key),
            ..self
        }
    }

    /// Validates the configuration and constructs the engine.
    pub fn build(self) -> Result<HashEngine, EngineError> {
        if !self.min_bucket_count.is_power_of_two() || !self.max_bucket_count.is_power_of_two() {
            return Err(EngineError::InvalidArgument(
                "bucket-count bounds must be powers of two",
            ));
        }
        if self.min_bucket_count > self.max_bucket_count || self.max_bucket_count > MAX_BUCKET_COUNT
        {
            return Err(EngineError::InvalidArgument(
                "bucket-count bounds out of order or above the supported maximum",
            ));
        }
        if !(self.max_load_factor > 0.0 && self.max_load_factor < 1.0) {
            return Err(EngineError::InvalidArgument(
                "max load factor must be within (0, 1)",
            ));
        }
        // A halved table must not immediately exceed the grow watermark.
        if !(self.min_load_factor >= 0.0 && self.min_load_factor * 2.0 <= self.max_load_factor) {
            return Err(EngineError::InvalidArgument(
                "min load factor must be non-negative and at most half of the max",
            ));
        }

        let config = EngineConfig {
            min_bucket_count: self.min_bucket_count,
            max_bucket_count: self.max_bucket_count,
            max_load_factor: self.max_load_factor,
            min_load_factor: self.min_load_factor,
        };
        HashEngine::with_config(self.capacity, config, self.hash_key)
    }
}

#[cfg(test)]
mod tests {
    use super::EngineBuilder;
    use crate::{EngineError, HashKey};

    #[test]
    fn build_with_defaults() {
        let engine = EngineBuilder::new(100).build().unwrap();
        // 100 rounds up to the next power of two.
        assert_eq!(engine.bucket_count(), 128);
        assert_eq!(engine.len(), 0);
    }

    #[test]
    fn rejects_zero_capacity() {
        assert!(matches!(
            EngineBuilder::new(0).build(),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_non_power_of_two_bounds() {
        let result = EngineBuilder::new(16).min_bucket_count(12).build();
        assert!(matches!(result, Err(EngineError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let result = EngineBuilder::new(16)
            .min_bucket_count(64)
            .max_bucket_count(16)
            .build();
        assert!(matches!(result, Err(EngineError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_watermarks_that_would_thrash() {
        // Shrinking at 0.4 would land a halved table at 0.8, above the 0.7
        // grow watermark.
        let result = EngineBuilder::new(16)
            .max_load_factor(0.7)
            .min_load_factor(0.4)
            .build();
        assert!(matches!(result, Err(EngineError::InvalidArgument(_))));
    }

    #[test]
    fn fixed_key_engines_share_layouts() {
        let key = HashKey::new(11, 13);
        let a = EngineBuilder::new(64).hash_key(key).build().unwrap();
        let b = EngineBuilder::new(64).hash_key(key).build().unwrap();

        for i in 0..32u32 {
            let bytes = i.to_be_bytes();
            a.put(&bytes, b"x").unwrap();
            b.put(&bytes, b"x").unwrap();
        }
        assert_eq!(a.stats().bucket_count(), b.stats().bucket_count());
    }
}
