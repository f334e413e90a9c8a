//! Universally Unique Lexicographically Sortable Identifier (ULID)
//!
//! ```rust
//! use ulidx::ulid;
//!
//! let ulid = ulid();
//! println!("{}", ulid); // e.g. "01ARZ3NDEKTSV4RRFFQ69G5FAV"
//! println!("{:?}", ulid.as_bytes()); // as 16-byte big-endian array
//! ```
//!
//! See the [ULID specification](https://github.com/ulid/spec).
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |            random             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            random                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            random                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in
//!   milliseconds.
//! - The remaining 80 `random` bits are filled with a random number.
//!
//! The canonical string representation is 26 digits of Crockford's Base32, the
//! first of which is at most `7`. Parsing accepts lowercase letters and the
//! aliases `O` for `0` and `I`/`L` for `1`, and rejects any string that would
//! not fit in 128 bits.
//!
//! # Monotonic order
//!
//! [`ulid_monotonic()`] and the monotonic methods of [`Generator`] guarantee
//! that each ULID is greater than the previous one from the same generator. When
//! the clock has not moved forward since the previous call, whether within the
//! same millisecond or after a rollback, the generator reuses the previous
//! `unix_ts_ms` and increments the previous `random` field by one. The random
//! field wraps around to zero in the practically unreachable event that 2^80
//! ULIDs are generated within one millisecond.
//!
//! ```rust
//! use ulidx::ulid_monotonic;
//!
//! let x = ulid_monotonic();
//! let y = ulid_monotonic();
//! assert!(x < y);
//! ```
//!
//! # Other features
//!
//! This library also supports a readable representation that spells out the
//! timestamp as a UTC date and time:
//!
//! ```rust
//! use ulidx::Ulid;
//!
//! let x = "01ARZ3NDEKTSV4RRFFQ69G5FAV".parse::<Ulid>()?;
//! let y = x.encode_readable().unwrap();
//! assert_eq!(y.as_str(), "20160730T235410259ZTSV4RRFFQ69G5FAV");
//! assert_eq!(Ulid::parse_readable(&y)?, x);
//! # Ok::<(), ulidx::ParseError>(())
//! ```
//!
//! # Crate features
//!
//! Default features:
//!
//! - `std` integrates the library with, among others, the system clock.
//! - `default_gen` provides the thread-local default generator behind
//!   [`ulid()`] and [`ulid_monotonic()`].
//!
//! Optional features:
//!
//! - `serde` enables serialization/deserialization of [`Ulid`].
//! - `uuid` enables conversion from/to [`uuid::Uuid`](https://docs.rs/uuid).
//! - `tracing` instruments generation and reports random field wraparounds.

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod base32;

mod id;
pub use id::{ParseError, ParseErrorKind, Ulid};

mod readable;

pub mod generator;
pub use generator::Generator;

mod entry;
#[cfg(feature = "default_gen")]
pub use entry::{ulid, ulid_monotonic};
