//! Raw register words -> typed, scaled measurements.

use serde::Serialize;

use super::catalog::{RegisterDescriptor, WordSize};
use crate::utils::error::PollError;

/// Scaled register value. Integer-scaled registers stay integral so the
/// outbound payload carries `500`, not `500.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub value: Scalar,
    pub unit: &'static str,
}

/// Decode one raw reading against its descriptor. Pure function; the word
/// count must match the descriptor's size exactly.
pub fn decode(words: &[u16], desc: &RegisterDescriptor) -> Result<Measurement, PollError> {
    if words.len() != desc.word_count() as usize {
        return Err(PollError::MalformedReading(format!(
            "{} expects {} word(s), got {}",
            desc.name,
            desc.word_count(),
            words.len()
        )));
    }

    let raw: i64 = match desc.size {
        WordSize::U16 => {
            if desc.signed {
                words[0] as i16 as i64
            } else {
                words[0] as i64
            }
        }
        // High word first, then low word
        WordSize::U32 => {
            let bits = ((words[0] as u32) << 16) | words[1] as u32;
            if desc.signed {
                bits as i32 as i64
            } else {
                bits as i64
            }
        }
    };

    Ok(Measurement {
        value: scale_raw(raw, desc.scale),
        unit: desc.unit,
    })
}

// Fractional factors below 1 are rounded to 2 decimals to suppress
// floating-point noise; integral factors never leave integer arithmetic.
fn scale_raw(raw: i64, scale: f64) -> Scalar {
    if scale.fract() == 0.0 {
        Scalar::Int(raw * scale as i64)
    } else {
        let scaled = raw as f64 * scale;
        if scale < 1.0 {
            Scalar::Float((scaled * 100.0).round() / 100.0)
        } else {
            Scalar::Float(scaled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::catalog::{RegisterDescriptor, WordSize};

    fn desc(size: WordSize, signed: bool, scale: f64) -> RegisterDescriptor {
        RegisterDescriptor {
            name: "TEST_REGISTER",
            address: 1024,
            size,
            signed,
            scale,
            unit: "kPa",
        }
    }

    #[test]
    fn test_u16_consumes_exactly_one_word() {
        let d = desc(WordSize::U16, false, 1.0);
        assert!(decode(&[0x0064], &d).is_ok());
        assert!(matches!(
            decode(&[], &d),
            Err(PollError::MalformedReading(_))
        ));
        assert!(matches!(
            decode(&[0x0064, 0x0000], &d),
            Err(PollError::MalformedReading(_))
        ));
    }

    #[test]
    fn test_u32_consumes_exactly_two_words() {
        let d = desc(WordSize::U32, false, 1.0);
        assert!(decode(&[0x0001, 0x0000], &d).is_ok());
        assert!(matches!(
            decode(&[0x0001], &d),
            Err(PollError::MalformedReading(_))
        ));
    }

    #[test]
    fn test_signed_16_bit_two_complement() {
        let m = decode(&[0xFFFF], &desc(WordSize::U16, true, 1.0)).unwrap();
        assert_eq!(m.value, Scalar::Int(-1));
    }

    #[test]
    fn test_unsigned_16_bit_full_range() {
        let m = decode(&[0xFFFF], &desc(WordSize::U16, false, 1.0)).unwrap();
        assert_eq!(m.value, Scalar::Int(65535));
    }

    #[test]
    fn test_u32_word_order_high_then_low() {
        let m = decode(&[0x0001, 0x0000], &desc(WordSize::U32, false, 1.0)).unwrap();
        assert_eq!(m.value, Scalar::Int(65536));
    }

    #[test]
    fn test_signed_32_bit_two_complement() {
        let m = decode(&[0xFFFF, 0xFFFF], &desc(WordSize::U32, true, 1.0)).unwrap();
        assert_eq!(m.value, Scalar::Int(-1));
    }

    #[test]
    fn test_fractional_scale_rounds_to_two_decimals() {
        let m = decode(&[1325], &desc(WordSize::U16, false, 0.1)).unwrap();
        assert_eq!(m.value, Scalar::Float(132.5));
    }

    #[test]
    fn test_integral_scale_stays_integral() {
        let m = decode(&[500], &desc(WordSize::U16, false, 1.0)).unwrap();
        assert_eq!(m.value, Scalar::Int(500));
    }

    #[test]
    fn test_negative_value_with_fractional_scale() {
        // -40 raw at 0.1 scale
        let m = decode(&[0xFFD8], &desc(WordSize::U16, true, 0.1)).unwrap();
        assert_eq!(m.value, Scalar::Float(-4.0));
    }

    #[test]
    fn test_decode_is_idempotent() {
        let d = desc(WordSize::U32, true, 0.1);
        let words = [0x0001, 0x2345];
        let first = decode(&words, &d).unwrap();
        let second = decode(&words, &d).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unit_carried_through() {
        let m = decode(&[100], &desc(WordSize::U16, false, 1.0)).unwrap();
        assert_eq!(m.unit, "kPa");
    }
}
