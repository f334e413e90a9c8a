#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, str};

use fstr::FStr;

use crate::base32;

/// Represents a Universally Unique Lexicographically Sortable Identifier.
///
/// The 16 bytes are big-endian: the first six hold the 48-bit `unix_ts_ms` field and the
/// remaining ten hold the 80-bit random field. Comparison is byte-wise, so the ordering of values
/// always agrees with the ordering of their canonical strings.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Ulid([u8; 16]);

impl Ulid {
    /// Nil ULID (00000000000000000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max ULID (7ZZZZZZZZZZZZZZZZZZZZZZZZZ)
    pub const MAX: Self = Self([0xff; 16]);

    /// Creates an object from a 16-byte big-endian array. Any byte array is a valid ULID.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates an object from field values, keeping the lower 48 bits of `unix_ts_ms` only.
    pub const fn from_fields(unix_ts_ms: u64, random: [u8; 10]) -> Self {
        Self([
            (unix_ts_ms >> 40) as u8,
            (unix_ts_ms >> 32) as u8,
            (unix_ts_ms >> 24) as u8,
            (unix_ts_ms >> 16) as u8,
            (unix_ts_ms >> 8) as u8,
            unix_ts_ms as u8,
            random[0],
            random[1],
            random[2],
            random[3],
            random[4],
            random[5],
            random[6],
            random[7],
            random[8],
            random[9],
        ])
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns a copy of the underlying byte array.
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Returns the 48-bit `unix_ts_ms` field value.
    pub const fn timestamp_ms(&self) -> u64 {
        (self.0[0] as u64) << 40
            | (self.0[1] as u64) << 32
            | (self.0[2] as u64) << 24
            | (self.0[3] as u64) << 16
            | (self.0[4] as u64) << 8
            | self.0[5] as u64
    }

    /// Returns a copy of the 80-bit random field.
    pub fn random_bytes(&self) -> [u8; 10] {
        let mut dst = [0u8; 10];
        dst.copy_from_slice(&self.0[6..]);
        dst
    }

    /// Returns the 26-digit canonical string representation stored in a stack-allocated string
    /// type that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// This method is primarily for `no_std` environments where heap-allocated string types are
    /// not readily available. Use the [`fmt::Display`] trait usually to get the canonical string
    /// representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ulidx::Ulid;
    ///
    /// let x = "01arz3ndektsv4rrffq69g5fav".parse::<Ulid>()?;
    /// let y = x.encode();
    /// assert_eq!(y.as_str(), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
    /// assert_eq!(format!("{}", y), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
    /// # Ok::<(), ulidx::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<26> {
        let buffer = base32::encode(&self.0);
        debug_assert!(buffer.is_ascii());
        // SAFETY: every byte comes from the ASCII digit table
        unsafe { FStr::from_inner_unchecked(buffer) }
    }
}

impl fmt::Display for Ulid {
    /// Returns the 26-digit canonical string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Ulid {
    type Err = ParseError;

    /// Creates an object from the 26-digit canonical string representation.
    ///
    /// The parser is case-insensitive and reads `O` as `0` and `I` and `L` as `1`.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        base32::decode(src.as_bytes()).map(Self)
    }
}

impl From<Ulid> for [u8; 16] {
    fn from(src: Ulid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Ulid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Ulid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Ulid> for u128 {
    fn from(src: Ulid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Ulid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

/// Error parsing an invalid string representation of ULID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    kind: ParseErrorKind,
}

/// Category of [`ParseError`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// The input has a wrong length, a character outside the accepted set, or a misplaced
    /// separator.
    Malformed,

    /// The input is well formed but denotes a value that cannot be represented, such as a
    /// canonical string wider than 128 bits, an impossible calendar date, or a pre-epoch time.
    OutOfRange,
}

impl ParseError {
    pub(crate) const fn malformed() -> Self {
        Self {
            kind: ParseErrorKind::Malformed,
        }
    }

    pub(crate) const fn out_of_range() -> Self {
        Self {
            kind: ParseErrorKind::OutOfRange,
        }
    }

    /// Returns the category of the error.
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::Malformed => write!(f, "invalid string representation"),
            ParseErrorKind::OutOfRange => write!(f, "string representation out of range"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Ulid};

    impl From<Ulid> for String {
        fn from(src: Ulid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Ulid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }

    impl std::error::Error for ParseError {}
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Ulid;

    impl From<Ulid> for uuid::Uuid {
        fn from(src: Ulid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Ulid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Ulid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Ulid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Ulid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Ulid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a ULID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{ParseErrorKind, Ulid};

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [((u64, [u8; 10]), &'static str)] {
        const MAX_UINT48: u64 = (1 << 48) - 1;

        &[
            ((0, [0x00; 10]), "00000000000000000000000000"),
            ((MAX_UINT48, [0x00; 10]), "7ZZZZZZZZZ0000000000000000"),
            ((0, [0xff; 10]), "0000000000ZZZZZZZZZZZZZZZZ"),
            ((MAX_UINT48, [0xff; 10]), "7ZZZZZZZZZZZZZZZZZZZZZZZZZ"),
            (
                (
                    0x0156_3e3a_b5d3,
                    [0xd6, 0x76, 0x4c, 0x61, 0xef, 0xb9, 0x93, 0x02, 0xbd, 0x5b],
                ),
                "01ARZ3NDEKTSV4RRFFQ69G5FAV",
            ),
            (
                (
                    0x0123_4567_89ab,
                    [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0x01, 0x23],
                ),
                "014D2PF2DB04HMASW9NF6YY093",
            ),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for (fs, text) in prepare_cases() {
            let from_fields = Ulid::from_fields(fs.0, fs.1);
            assert_eq!(from_fields.timestamp_ms(), fs.0);
            assert_eq!(from_fields.random_bytes(), fs.1);
            assert_eq!(Ok(from_fields), text.parse());
            assert_eq!(Ok(from_fields), text.to_lowercase().parse());
            assert_eq!(&from_fields.encode() as &str, *text);
            #[cfg(feature = "std")]
            assert_eq!(&from_fields.to_string(), text);
            #[cfg(feature = "std")]
            assert_eq!(&from_fields.encode().to_string(), text);
        }
    }

    /// Round-trips the reference example through decode and encode
    #[test]
    fn round_trips_the_reference_example_through_decode_and_encode() {
        let text = "01ARZ3NDEKTSV4RRFFQ69G5FAV";
        let e = text.parse::<Ulid>().unwrap();
        assert_eq!(e.encode().as_str(), text);
        assert_eq!(e.timestamp_ms(), 1_469_922_850_259);

        let messy = "o1arz3ndeKtSv4rrffq69g5fav";
        assert_eq!(messy.parse::<Ulid>().unwrap().encode().as_str(), text);
    }

    /// Orders adjacent monotonic examples identically as strings and values
    #[test]
    fn orders_adjacent_monotonic_examples_identically_as_strings_and_values() {
        let s1 = "01BX5ZZKBKACTAV9WEVGEMMVRZ";
        let s2 = "01BX5ZZKBKACTAV9WEVGEMMVS0";
        let u1 = s1.parse::<Ulid>().unwrap();
        let u2 = s2.parse::<Ulid>().unwrap();
        assert!(s1 < s2);
        assert!(u1 < u2);
        assert_eq!(u1.timestamp_ms(), u2.timestamp_ms());
        assert_eq!(u128::from(u1) + 1, u128::from(u2));
        assert_eq!(u1.encode().as_str(), s1);
        assert_eq!(u2.encode().as_str(), s2);
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            ("", ParseErrorKind::Malformed),
            ("123", ParseErrorKind::Malformed),
            ("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAA", ParseErrorKind::Malformed),
            (" 01ARZ3NDEKTSV4RRFFQ69G5FAV", ParseErrorKind::Malformed),
            ("01ARZ3NDEKTSV4RRFFQ69G5FAV ", ParseErrorKind::Malformed),
            ("01ARZ3NDEKTSV4RRFFQ69G5FA!", ParseErrorKind::Malformed),
            ("01ARZ3NDEK-TSV4RRFFQ69G5FA", ParseErrorKind::Malformed),
            ("01ARZ3NDEKTSV4RRFFQ69G5FAu", ParseErrorKind::Malformed),
            ("80000000000000000000000000", ParseErrorKind::OutOfRange),
            ("ZZZZZZZZZZZZZZZZZZZZZZZZZZ", ParseErrorKind::OutOfRange),
        ];

        for (text, kind) in cases {
            assert_eq!(text.parse::<Ulid>().map_err(|e| e.kind()), Err(kind));
        }
    }

    /// Returns Nil and Max ULIDs
    #[test]
    fn returns_nil_and_max_ulids() {
        assert_eq!(&Ulid::NIL.encode() as &str, "00000000000000000000000000");
        assert_eq!(&Ulid::MAX.encode() as &str, "7ZZZZZZZZZZZZZZZZZZZZZZZZZ");
        assert_eq!(Ulid::default(), Ulid::NIL);
        assert_eq!(Ulid::MAX.timestamp_ms(), (1 << 48) - 1);
    }

    /// Keeps the lower 48 bits of an oversized timestamp
    #[test]
    fn keeps_the_lower_48_bits_of_an_oversized_timestamp() {
        let e = Ulid::from_fields(0xabcd_0123_4567_89ab, [0; 10]);
        assert_eq!(e.timestamp_ms(), 0x0123_4567_89ab);
    }

    /// Exposes the underlying bytes in big-endian order
    #[test]
    fn exposes_the_underlying_bytes_in_big_endian_order() {
        let mut bytes = [0u8; 16];
        for (i, e) in bytes.iter_mut().enumerate() {
            *e = (i * 7) as u8;
        }
        let e = Ulid::from_bytes(bytes);
        assert_eq!(e.as_bytes(), &bytes);
        assert_eq!(e.to_bytes(), bytes);
        assert_eq!(AsRef::<[u8]>::as_ref(&e), &bytes[..]);
        assert_eq!(e.timestamp_ms(), 0x0007_0e15_1c23);
        assert_eq!(e, Ulid::from_bytes(bytes));
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (fs, _) in prepare_cases() {
            let e = Ulid::from_fields(fs.0, fs.1);
            assert_eq!(Ulid::from(<[u8; 16]>::from(e)), e);
            assert_eq!(Ulid::from(u128::from(e)), e);
            assert_eq!(e.encode().parse(), Ok(e));
            assert_eq!(e.encode().to_lowercase().parse(), Ok(e));
            #[cfg(feature = "std")]
            assert_eq!(Ulid::try_from(e.to_string()), Ok(e));
            #[cfg(feature = "std")]
            assert_eq!(Ulid::try_from(e.to_string().to_lowercase()), Ok(e));
            #[cfg(feature = "uuid")]
            assert_eq!(Ulid::from(<uuid::Uuid>::from(e)), e);
            #[cfg(feature = "uuid")]
            assert_eq!(uuid::Uuid::from(e).as_u128(), u128::from(e));
        }
    }

    mod properties {
        use super::Ulid;
        use proptest::prelude::*;

        proptest! {
            /// Decodes every encoded value back to itself
            #[test]
            fn decodes_every_encoded_value_back_to_itself(bytes in any::<[u8; 16]>()) {
                let e = Ulid::from_bytes(bytes);
                prop_assert_eq!(e.encode().parse::<Ulid>(), Ok(e));
            }

            /// Orders values and canonical strings identically
            #[test]
            fn orders_values_and_canonical_strings_identically(
                a in any::<[u8; 16]>(),
                b in any::<[u8; 16]>(),
            ) {
                let (a, b) = (Ulid::from_bytes(a), Ulid::from_bytes(b));
                prop_assert_eq!(a.cmp(&b), a.encode().as_str().cmp(b.encode().as_str()));
            }
        }
    }
}
