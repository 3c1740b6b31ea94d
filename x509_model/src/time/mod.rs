// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Validity window types.
//!
//! Both RFC 5280 time encodings are accepted. UTCTime years 50-99 map to
//! 1950-1999 and 00-49 to 2000-2049. No policy is applied here: callers
//! decide whether an expired or not-yet-valid certificate is acceptable.

extern crate alloc;

use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use der::{
    asn1::{GeneralizedTime, UtcTime},
    Decode, DecodeValue, Header, Reader, Result, Tag,
};

/// A timestamp that can be either UTCTime or GeneralizedTime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Time {
    /// UTCTime format (YYMMDDHHMMSSZ)
    UtcTime(UtcTime),
    /// GeneralizedTime format (YYYYMMDDHHMMSSZ)
    GeneralizedTime(GeneralizedTime),
}

impl Time {
    /// Build a GeneralizedTime from seconds since the Unix epoch.
    pub fn from_unix_secs(secs: u64) -> Result<Self> {
        let dt = der::DateTime::from_unix_duration(core::time::Duration::from_secs(secs))?;
        Ok(Time::GeneralizedTime(GeneralizedTime::from_date_time(dt)))
    }

    /// Returns the DateTime representation.
    pub fn to_date_time(&self) -> der::DateTime {
        match self {
            Time::UtcTime(utc) => utc.to_date_time(),
            Time::GeneralizedTime(gen) => gen.to_date_time(),
        }
    }

    /// Seconds since the Unix epoch.
    pub fn unix_secs(&self) -> u64 {
        self.to_date_time().unix_duration().as_secs()
    }

    /// Checks if this time is before or equal to another time.
    pub fn is_before_or_equal(&self, other: &Time) -> bool {
        self <= other
    }

    /// ISO 8601 rendering, e.g. `2025-01-01T00:00:00Z`.
    pub fn to_iso8601(&self) -> String {
        alloc::format!("{}", self)
    }
}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_date_time()
            .unix_duration()
            .cmp(&other.to_date_time().unix_duration())
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // der::DateTime renders RFC 3339.
        write!(f, "{}", self.to_date_time())
    }
}

impl<'a> DecodeValue<'a> for Time {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> Result<Self> {
        match header.tag {
            Tag::UtcTime => Ok(Time::UtcTime(UtcTime::decode_value(reader, header)?)),
            Tag::GeneralizedTime => Ok(Time::GeneralizedTime(GeneralizedTime::decode_value(
                reader, header,
            )?)),
            tag => Err(der::Error::from(der::ErrorKind::TagUnexpected {
                expected: Some(Tag::UtcTime),
                actual: tag,
            })),
        }
    }
}

impl<'a> Decode<'a> for Time {
    fn decode<R: Reader<'a>>(reader: &mut R) -> Result<Self> {
        let header = Header::decode(reader)?;
        Self::decode_value(reader, header)
    }
}

/// Certificate validity period.
///
/// ```text
/// Validity ::= SEQUENCE {
///     notBefore      Time,
///     notAfter       Time
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validity {
    /// The time before which the certificate is not valid.
    pub not_before: Time,
    /// The time after which the certificate is not valid.
    pub not_after: Time,
}

impl Validity {
    /// Creates a new Validity period.
    pub const fn new(not_before: Time, not_after: Time) -> Self {
        Validity {
            not_before,
            not_after,
        }
    }

    /// Checks if the certificate is valid at the given time (inclusive bounds).
    pub fn is_valid_at(&self, check_time: &Time) -> bool {
        self.not_before <= *check_time && *check_time <= self.not_after
    }

    /// notBefore does not come after notAfter.
    pub fn is_well_formed(&self) -> bool {
        self.not_before.is_before_or_equal(&self.not_after)
    }
}

impl<'a> DecodeValue<'a> for Validity {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> Result<Self> {
        reader.read_nested(header.length, |reader| {
            let not_before = Time::decode(reader)?;
            let not_after = Time::decode(reader)?;
            Ok(Validity {
                not_before,
                not_after,
            })
        })
    }
}

impl der::FixedTag for Validity {
    const TAG: Tag = Tag::Sequence;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn utc(secs: u64) -> Time {
        Time::UtcTime(UtcTime::from_unix_duration(core::time::Duration::from_secs(secs)).unwrap())
    }

    #[test]
    fn test_validity_well_formed() {
        let validity = Validity::new(utc(0), utc(86400));
        assert!(validity.is_well_formed());

        let invalid_validity = Validity::new(utc(86400), utc(0));
        assert!(!invalid_validity.is_well_formed());
    }

    #[test]
    fn test_validity_checking() {
        let validity = Validity::new(utc(1000), utc(2000));

        assert!(!validity.is_valid_at(&utc(500)));
        assert!(validity.is_valid_at(&utc(1000)));
        assert!(validity.is_valid_at(&utc(1500)));
        assert!(validity.is_valid_at(&utc(2000)));
        assert!(!validity.is_valid_at(&utc(2500)));
    }

    #[test]
    fn test_mixed_encodings_compare_by_instant() {
        let gen = Time::from_unix_secs(1000).unwrap();
        assert_eq!(gen.cmp(&utc(1000)), Ordering::Equal);
        assert!(utc(999) < gen);
    }

    #[test]
    fn test_decode_utc_time() {
        // UTCTime 250101000000Z
        let der = b"\x17\x0d250101000000Z";
        let time = Time::from_der(der).unwrap();
        assert!(matches!(time, Time::UtcTime(_)));
        assert_eq!(time.unix_secs(), 1_735_689_600);
        assert_eq!(time.to_string(), "2025-01-01T00:00:00Z");
    }

    #[test]
    fn test_decode_rejects_other_tags() {
        let der = b"\x04\x01\x00";
        assert!(Time::from_der(der).is_err());
    }
}
