//! Deterministic lane noise
//!
//! The synthetic model wants lanes to sit slightly off a perfectly smooth
//! distance curve, but repeated quotes for the same lane must be identical
//! without any external random state. Both the noise offset and the source
//! label derive from one SHA-256 digest of the lane key, so they are
//! stable across processes and platforms.

use sha2::{Digest, Sha256};

/// Noise band half-width, $/mi
pub const NOISE_HALF_WIDTH: f64 = 0.03;

/// Fixed synthetic source labels, hash-picked per lane
pub const SOURCE_LABELS: [&str; 4] = [
    "DAT RateView",
    "Truckstop posted avg",
    "broker quote history",
    "lane history model",
];

fn digest(lane_key: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(lane_key.as_bytes());
    hasher.finalize().into()
}

/// Stable 64-bit hash of a lane key (first 8 digest bytes, big-endian)
pub fn lane_hash(lane_key: &str) -> u64 {
    let d = digest(lane_key);
    u64::from_be_bytes([d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]])
}

/// Deterministic pseudo-random offset in [-0.03, 0.03] for a lane
///
/// The hash maps to a 53-bit fraction in [0, 1), then shifts into the
/// noise band. Documented range so tests can assert exact outputs.
pub fn noise_offset(lane_key: &str) -> f64 {
    let fraction = (lane_hash(lane_key) >> 11) as f64 * (1.0 / ((1u64 << 53) as f64));
    -NOISE_HALF_WIDTH + 2.0 * NOISE_HALF_WIDTH * fraction
}

/// Hash-picked source label for a lane (digest byte 8, so the pick is not
/// a function of the noise value)
pub fn source_label(lane_key: &str) -> &'static str {
    let d = digest(lane_key);
    SOURCE_LABELS[d[8] as usize % SOURCE_LABELS.len()]
}
