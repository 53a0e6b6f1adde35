#![warn(clippy::all)]
#![warn(rust_2018_idioms)]

//! Cairn is a process-local, concurrent, in-memory key/value storage
//! engine.
//!
//! The store is an open-addressing hash table: colliding keys resolve by
//! linear probing within one bucket array, deletion leaves tombstones so
//! probe chains stay intact, and the table doubles or halves its
//! power-of-two bucket count as the load factor crosses configurable
//! watermarks. Bucket placement uses SipHash under a 128-bit key drawn
//! from the system's random source once per process, so callers cannot
//! craft key sets that degrade probing.
//!
//! Keys and values are arbitrary non-empty byte strings. The engine owns
//! independent copies of both; [`get`][HashEngine::get] hands out cheap
//! shared views that remain readable across later updates and deletes.
//!
//! Cairn is not a database. There is no persistence and no replication;
//! it is a fast associative store for one process.
//!
//! # Examples
//!
//! Basic use:
//!
//! ```rust
//! use cairn::HashEngine;
//!
//! let engine = HashEngine::new(16)?;
//!
//! engine.put(b"user:7", b"nakamoto")?;
//! assert_eq!(&*engine.get(b"user:7")?, b"nakamoto");
//!
//! engine.delete(b"user:7")?;
//! assert!(engine.get(b"user:7").is_err());
//! # Ok::<(), cairn::EngineError>(())
//! ```
//!
//! Sharing one engine across threads:
//!
//! ```rust
//! use cairn::HashEngine;
//! use std::{sync::Arc, thread};
//!
//! const NUM_THREADS: u64 = 8;
//! const KEYS_PER_THREAD: u64 = 64;
//!
//! let engine = Arc::new(HashEngine::new(1024)?);
//!
//! let handles: Vec<_> = (0..NUM_THREADS)
//!     .map(|t| {
//!         let engine = Arc::clone(&engine);
//!         thread::spawn(move || {
//!             for i in 0..KEYS_PER_THREAD {
//!                 let key = format!("key-{}-{}", t, i);
//!                 engine.put(key.as_bytes(), b"payload").unwrap();
//!                 assert!(engine.contains_key(key.as_bytes()));
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(engine.len(), NUM_THREADS * KEYS_PER_THREAD);
//! # Ok::<(), cairn::EngineError>(())
//! ```

mod bucket;
mod builder;
mod engine;
mod error;
mod hash;
mod probe;
mod stats;

pub use builder::EngineBuilder;
pub use engine::{
    HashEngine, DEFAULT_MAX_LOAD_FACTOR, DEFAULT_MIN_LOAD_FACTOR, MAX_BUCKET_COUNT,
    MIN_BUCKET_COUNT,
};
pub use error::EngineError;
pub use hash::HashKey;
pub use stats::EngineStats;
