//! Golden test vectors for deterministic verification.
//!
//! Each vector pins the canonical string and the composed hash of one phone
//! number. Any implementation of the hash composer (multiplier 31, zero
//! seed, fields in declaration order) must reproduce these values.

use serde::Serialize;
use valkern_core::{format, hash, parse, PhoneNumber};

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub area_code: u16,
    pub prefix: u16,
    pub line_num: u16,
    /// Expected canonical form.
    pub canonical: &'static str,
    /// Expected composed hash.
    pub expected_hash: u64,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "Jenny",
            area_code: 707,
            prefix: 867,
            line_num: 5307,
            canonical: "707-867-5307",
            // 707 * 31^2 + 867 * 31 + 5307
            expected_hash: 711_611,
        },
        GoldenVector {
            name: "Repeated groups",
            area_code: 123,
            prefix: 123,
            line_num: 1111,
            canonical: "123-123-1111",
            expected_hash: 123_127,
        },
        GoldenVector {
            name: "Zero padding",
            area_code: 7,
            prefix: 86,
            line_num: 53,
            canonical: "007-086-0053",
            expected_hash: 9_446,
        },
        GoldenVector {
            name: "All zeros",
            area_code: 0,
            prefix: 0,
            line_num: 0,
            canonical: "000-000-0000",
            expected_hash: 0,
        },
        GoldenVector {
            name: "All nines",
            area_code: 999,
            prefix: 999,
            line_num: 9999,
            canonical: "999-999-9999",
            expected_hash: 1_001_007,
        },
    ]
}

/// Build the phone number a vector describes.
pub fn phone_from_vector(vector: &GoldenVector) -> Result<PhoneNumber, valkern_core::CoreError> {
    PhoneNumber::new(vector.area_code, vector.prefix, vector.line_num)
}

/// Verify every golden vector.
///
/// Returns `(name, matches, detail)` per vector; `detail` describes the
/// first mismatch or the computed values on success.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let (matches, detail) = match verify_vector(v) {
                Ok(detail) => (true, detail),
                Err(detail) => (false, detail),
            };
            (v.name.to_string(), matches, detail)
        })
        .collect()
}

fn verify_vector(v: &GoldenVector) -> Result<String, String> {
    let number = phone_from_vector(v).map_err(|e| e.to_string())?;

    let text = format(&number);
    if text != v.canonical {
        return Err(format!("format gave {}, expected {}", text, v.canonical));
    }

    let computed = hash(&number);
    if computed != v.expected_hash {
        return Err(format!("hash gave {}, expected {}", computed, v.expected_hash));
    }

    let parsed: PhoneNumber = parse(v.canonical).map_err(|e| e.to_string())?;
    if parsed != number {
        return Err(format!("parse gave {:?}", parsed));
    }

    Ok(format!("{} hash {}", text, computed))
}

/// All vectors as pretty-printed JSON, for sharing with other
/// implementations.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_vectors())
}
