//! Integration with `rand` (v0.8) crate.

use super::{Generator, RandSource};
use rand::{RngCore, SeedableRng};

/// An adapter that implements [`RandSource`] for [`RngCore`] types that are also
/// [`SeedableRng`].
///
/// [`split`](RandSource::split) seeds a new instance of the wrapped type with bytes drawn from
/// this one.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore + SeedableRng> RandSource for Adapter<T> {
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn split(&mut self) -> Self {
        let mut seed = T::Seed::default();
        self.0.fill_bytes(seed.as_mut());
        Self(T::from_seed(seed))
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<T: RngCore + SeedableRng> Generator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] and [`SeedableRng`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rand::SeedableRng;
    /// use ulidx::Generator;
    ///
    /// let mut g = Generator::with_rand08(rand::rngs::StdRng::from_entropy());
    /// println!("{}", g.generate());
    /// ```
    pub const fn with_rand08(rng: T) -> Self {
        Self::new(Adapter(rng))
    }
}
