//! Default generator and entry point functions

#![cfg(feature = "default_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "default_gen")))]

use std::cell::RefCell;

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::{generator::with_rand08::Adapter, Generator, Ulid};

thread_local! {
    static DEFAULT_GENERATOR: RefCell<Generator<Adapter<ChaCha12Rng>>> =
        RefCell::new(new_default_generator());
}

/// Creates a generator seeded from the operating system's entropy source.
fn new_default_generator() -> Generator<Adapter<ChaCha12Rng>> {
    Generator::with_rand08(ChaCha12Rng::from_entropy())
}

/// Runs `f` with the thread-local generator, replacing the generator first if the process has
/// forked since the last call in this thread.
fn with_default_generator(f: impl FnOnce(&mut Generator<Adapter<ChaCha12Rng>>) -> Ulid) -> Ulid {
    DEFAULT_GENERATOR.with(|g| {
        if unix_fork_safety::pid_changed() {
            g.replace(new_default_generator());
        }

        f(&mut g.borrow_mut())
    })
}

/// Generates a ULID object.
///
/// This function employs a thread-local generator and does not order ULIDs generated within the
/// same millisecond. Use [`ulid_monotonic()`] where the order matters.
///
/// # Examples
///
/// ```rust
/// let ulid = ulidx::ulid();
/// println!("{ulid}"); // e.g., "01ARZ3NDEKTSV4RRFFQ69G5FAV"
/// println!("{:?}", ulid.as_bytes()); // as 16-byte big-endian array
///
/// let ulid_string: String = ulidx::ulid().to_string();
/// ```
pub fn ulid() -> Ulid {
    with_default_generator(|g| g.generate())
}

/// Generates a monotonic ULID object.
///
/// This function employs a thread-local generator and guarantees the per-thread monotonic order of
/// ULIDs, including those generated within the same millisecond or after a clock rollback. There
/// is no ordering across threads. On Unix, this function resets the generator when the process ID
/// changes (i.e. upon process forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let x = ulidx::ulid_monotonic();
/// let y = ulidx::ulid_monotonic();
/// assert!(x < y);
/// assert!(x.to_string() < y.to_string());
/// ```
pub fn ulid_monotonic() -> Ulid {
    with_default_generator(|g| g.generate_monotonic())
}

impl Ulid {
    /// Generates a ULID object using the thread-local generator. Equivalent to [`ulid()`].
    pub fn generate() -> Self {
        ulid()
    }

    /// Generates a monotonic ULID object using the thread-local generator. Equivalent to
    /// [`ulid_monotonic()`].
    pub fn generate_monotonic() -> Self {
        ulid_monotonic()
    }
}

#[cfg(unix)]
mod unix_fork_safety {
    use std::{cell::Cell, process};

    thread_local! {
        static PID: Cell<u32> = Cell::new(process::id());
    }

    /// Returns true if the process ID has changed since the last call in this thread (i.e. upon
    /// process forks).
    pub fn pid_changed() -> bool {
        PID.with(|last_pid| {
            let pid = process::id();
            pid != last_pid.replace(pid)
        })
    }
}

#[cfg(not(unix))]
mod unix_fork_safety {
    pub const fn pid_changed() -> bool {
        false
    }
}

#[cfg(test)]
mod tests_monotonic {
    use super::ulid_monotonic;
    use crate::Ulid;

    const N_SAMPLES: usize = 100_000;
    thread_local! {
        static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| ulid_monotonic().into()).collect();
    }

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-7][0-9A-HJKMNP-TV-Z]{25}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Generates sortable string representation by creation time
    #[test]
    fn generates_sortable_string_representation_by_creation_time() {
        SAMPLES.with(|samples| {
            for i in 1..N_SAMPLES {
                assert!(samples[i - 1] < samples[i]);
            }
        });
    }

    /// Sorts values and strings identically after shuffling
    #[test]
    fn sorts_values_and_strings_identically_after_shuffling() {
        use rand::seq::SliceRandom;
        SAMPLES.with(|samples| {
            let mut values: Vec<Ulid> =
                samples[..1_000].iter().map(|e| e.parse().unwrap()).collect();
            values.shuffle(&mut rand::thread_rng());
            let mut strings: Vec<String> = values.iter().map(|e| e.to_string()).collect();
            values.sort();
            strings.sort();
            for (value, string) in values.iter().zip(&strings) {
                assert_eq!(&value.to_string(), string);
            }
            assert_eq!(strings, samples[..1_000]);
        });
    }

    /// Generates increasing readable strings
    #[test]
    fn generates_increasing_readable_strings() {
        let mut prev = Ulid::generate_monotonic().encode_readable().unwrap();
        for _ in 0..10_000 {
            let curr = Ulid::generate_monotonic().encode_readable().unwrap();
            assert!(prev.as_str() < curr.as_str());
            prev = curr;
        }
    }

    /// Generates no duplicates and keeps per-thread order under multithreading
    #[test]
    fn generates_no_duplicates_and_keeps_per_thread_order_under_multithreading() {
        use std::{collections::HashSet, thread};

        let handles: Vec<_> = (0..4)
            .map(|_| thread::spawn(|| (0..10_000).map(|_| ulid_monotonic()).collect::<Vec<_>>()))
            .collect();

        let mut s = HashSet::new();
        for handle in handles {
            let samples = handle.join().unwrap();
            for pair in samples.windows(2) {
                assert!(pair[0] < pair[1]);
            }
            s.extend(samples);
        }
        assert_eq!(s.len(), 4 * 10_000);
    }
}
