//! ULID generator and related types.

use crate::Ulid;

#[cfg(feature = "tracing")]
use tracing::instrument;

pub mod with_rand08;


/// The largest value the 48-bit `unix_ts_ms` field can hold.
const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

/// A trait that defines the minimum random number generator interface for [`Generator`].
///
/// Any source of uniformly distributed bits can back a generator, including a seeded
/// deterministic one for reproducible tests. The randomness only has to avoid collisions; it does
/// not have to be unpredictable.
pub trait RandSource {
    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;

    /// Returns `n` random bits in the lower bits of a `u64`, taken from the upper bits of the next
    /// random `u64`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero or greater than 64.
    fn next_bits(&mut self, n: u32) -> u64 {
        assert!(0 < n && n <= 64, "`n` must be in 1..=64");
        self.next_u64() >> (64 - n)
    }

    /// Derives an independent random number generator from this one, advancing the state of this
    /// one.
    ///
    /// The derived stream is meant to be moved to another thread or task.
    fn split(&mut self) -> Self
    where
        Self: Sized;
}

/// A trait that defines the minimum system clock interface for [`Generator`].
///
/// The clock does not have to be monotonic; the generator absorbs rollbacks.
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
///
/// A clock set before the Unix epoch reads as zero.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .map_or(0, |e| e.as_millis() as u64)
    }
}

/// Represents a ULID generator that retains the last generated value and guarantees the monotonic
/// order of ULIDs generated within the same millisecond.
///
/// A generator is meant to be owned by a single thread or task. There is no locking inside; the
/// monotonic order holds only among the values produced by the same generator. Use
/// [`split`](Generator::split) to derive a generator for another thread, or wrap one generator in
/// a mutex to share a single order across threads.
///
/// # Examples
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha12Rng;
/// use ulidx::Generator;
///
/// let mut g = Generator::with_rand08(ChaCha12Rng::from_entropy());
/// let (x, y) = (g.generate_monotonic(), g.generate_monotonic());
/// assert!(x < y);
/// ```
///
/// # Generator functions
///
/// | Method                      | Timestamp | Within the same millisecond        |
/// | --------------------------- | --------- | ---------------------------------- |
/// | [`generate`]                | Now       | Fresh random field, unordered      |
/// | [`generate_monotonic`]      | Now       | Previous random field plus one     |
/// | [`generate_core`]           | Argument  | Fresh random field, unordered      |
/// | [`generate_monotonic_core`] | Argument  | Previous random field plus one     |
///
/// The monotonic methods reuse the previous timestamp whenever the one provided is not greater,
/// so a clock rollback is treated exactly like a repeated millisecond. If more than 2^80 ULIDs
/// are requested within one millisecond, the random field wraps around to zero and the order
/// breaks; generation itself never fails.
///
/// [`generate`]: Generator::generate
/// [`generate_monotonic`]: Generator::generate_monotonic
/// [`generate_core`]: Generator::generate_core
/// [`generate_monotonic_core`]: Generator::generate_monotonic_core
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Generator<R, T = StdSystemTime> {
    timestamp: u64,

    /// The last value returned by the monotonic methods, or `None` until the first call.
    last: Option<Ulid>,

    rand_source: R,
    time_source: T,
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<R: RandSource> Generator<R> {
    /// Creates a generator object that reads the system clock.
    pub const fn new(rand_source: R) -> Self {
        Self::with_rand_and_time_sources(rand_source, StdSystemTime)
    }
}

impl<R: RandSource, T: TimeSource> Generator<R, T> {
    /// Creates a generator object with specified random number generator and system clock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha12Rng;
    /// use ulidx::generator::{with_rand08::Adapter, Generator, TimeSource};
    ///
    /// struct FixedClock(u64);
    ///
    /// impl TimeSource for FixedClock {
    ///     fn unix_ts_ms(&mut self) -> u64 {
    ///         self.0
    ///     }
    /// }
    ///
    /// let rng = Adapter(ChaCha12Rng::seed_from_u64(42));
    /// let mut g = Generator::with_rand_and_time_sources(rng, FixedClock(1_469_922_850_259));
    /// assert!(g.generate_monotonic().to_string().starts_with("01ARZ3NDEK"));
    /// ```
    pub const fn with_rand_and_time_sources(rand_source: R, time_source: T) -> Self {
        Self {
            timestamp: 0,
            last: None,
            rand_source,
            time_source,
        }
    }

    /// Generates a new ULID object from the current timestamp and a fresh random field.
    ///
    /// ULIDs generated within the same millisecond are not ordered among themselves.
    pub fn generate(&mut self) -> Ulid {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_core(unix_ts_ms)
    }

    /// Generates a new ULID object from the current timestamp, guaranteeing that it is greater
    /// than the one generated immediately before by this generator.
    ///
    /// See the [`Generator`] type documentation for the description.
    pub fn generate_monotonic(&mut self) -> Ulid {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_monotonic_core(unix_ts_ms)
    }

    /// Derives a generator with an independent random number generator and a clone of the system
    /// clock, advancing the state of this generator's random number generator.
    ///
    /// The derived generator carries no monotonic state; its first monotonic ULID is based on the
    /// timestamp it reads then.
    pub fn split(&mut self) -> Self
    where
        T: Clone,
    {
        Self::with_rand_and_time_sources(self.rand_source.split(), self.time_source.clone())
    }
}

impl<R: RandSource, T> Generator<R, T> {
    /// Generates a new ULID object from the `unix_ts_ms` passed and a fresh random field.
    ///
    /// Only the lower 48 bits of `unix_ts_ms` are used. The monotonic state of the generator is
    /// left untouched.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_core(&mut self, unix_ts_ms: u64) -> Ulid {
        Ulid::from_fields(unix_ts_ms & MAX_TIMESTAMP, self.draw_random())
    }

    /// Generates a new ULID object from the `unix_ts_ms` passed, guaranteeing that it is greater
    /// than the one generated immediately before by the monotonic methods of this generator.
    ///
    /// Only the lower 48 bits of `unix_ts_ms` are used. See the [`Generator`] type documentation
    /// for the description.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_monotonic_core(&mut self, unix_ts_ms: u64) -> Ulid {
        let unix_ts_ms = unix_ts_ms & MAX_TIMESTAMP;
        let value = match self.last {
            Some(last) if unix_ts_ms <= self.timestamp => {
                // go on with previous timestamp if new one is not greater
                let mut random = last.random_bytes();
                if increment_be(&mut random) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        unix_ts_ms = self.timestamp,
                        "random field wrapped around within one millisecond"
                    );
                }
                Ulid::from_fields(self.timestamp, random)
            }
            _ => {
                self.timestamp = unix_ts_ms;
                Ulid::from_fields(unix_ts_ms, self.draw_random())
            }
        };
        self.last = Some(value);
        value
    }

    /// Fills a random field one byte at a time.
    fn draw_random(&mut self) -> [u8; 10] {
        let mut random = [0u8; 10];
        for e in random.iter_mut() {
            *e = self.rand_source.next_bits(8) as u8;
        }
        random
    }
}

/// Adds one to a big-endian unsigned integer, returning `true` if it wrapped around to zero.
fn increment_be(counter: &mut [u8]) -> bool {
    for e in counter.iter_mut().rev() {
        let (sum, overflow) = e.overflowing_add(1);
        *e = sum;
        if !overflow {
            return false;
        }
    }
    true
}

/// Supports operations as an infinite iterator that produces a new monotonic ULID object for each
/// call of `next()`.
///
/// # Examples
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha12Rng;
/// use ulidx::Generator;
///
/// Generator::with_rand08(ChaCha12Rng::from_entropy())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{i}] {e}"));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for Generator<R, T> {
    type Item = Ulid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate_monotonic())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> core::iter::FusedIterator for Generator<R, T> {}
