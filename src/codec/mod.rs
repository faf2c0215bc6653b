//! Compact room-system encoding.
//!
//! A system is serialized into a fixed 100-bit value, zero-padded to 25
//! lowercase hex characters:
//!
//! - 4 bits: start room id
//! - 8 × 4 bits, one nibble per room slot: included, locked, has-key,
//!   is-exit
//! - 64 bits: 8×8 adjacency matrix, row-major
//!
//! `encode` and `decode` are exact round-trip inverses for every valid
//! system. `decode` rejects anything structurally invalid with
//! [`EngineError::MalformedEncoding`] — wrong length, non-hex characters,
//! asymmetric adjacency, self-loops, bits set on excluded room slots,
//! lock/key count mismatch, or a disconnected graph.

use crate::core::EngineError;
use crate::system::{RoomId, RoomSystem, MAX_ROOMS};

/// Length of an encoding string in hex characters.
pub const ENCODING_LEN: usize = 25;

const ENCODING_BITS: u32 = 100;

fn bit(value: u128, index: u32) -> bool {
    debug_assert!(index < ENCODING_BITS);
    (value >> (ENCODING_BITS - 1 - index)) & 1 == 1
}

fn set_bit(value: &mut u128, index: u32) {
    debug_assert!(index < ENCODING_BITS);
    *value |= 1 << (ENCODING_BITS - 1 - index);
}

/// Index of the adjacency bit for `(row, col)`.
fn adjacency_bit(row: usize, col: usize) -> u32 {
    36 + (row * MAX_ROOMS + col) as u32
}

/// Encode a system into its 25-hex-char string.
#[must_use]
pub fn encode(system: &RoomSystem) -> String {
    let mut bits: u128 = 0;

    // Start room (4 bits).
    let start = system.start_room_id().index() as u128;
    bits |= start << (ENCODING_BITS - 4);

    // Room metadata nibbles.
    for slot in 0..MAX_ROOMS {
        let base = 4 + (slot * 4) as u32;
        if let Some(room) = system.room_info(RoomId::new(slot as u8)) {
            set_bit(&mut bits, base);
            if room.locked {
                set_bit(&mut bits, base + 1);
            }
            if room.has_key {
                set_bit(&mut bits, base + 2);
            }
            if room.is_exit {
                set_bit(&mut bits, base + 3);
            }
        }
    }

    // Adjacency matrix.
    for (a, b) in system.edges() {
        set_bit(&mut bits, adjacency_bit(a.index(), b.index()));
        set_bit(&mut bits, adjacency_bit(b.index(), a.index()));
    }

    format!("{bits:025x}")
}

/// Decode a 25-hex-char string back into a system.
pub fn decode(encoding: &str) -> Result<RoomSystem, EngineError> {
    let malformed = |msg: String| EngineError::MalformedEncoding(msg);

    if encoding.len() != ENCODING_LEN {
        return Err(malformed(format!(
            "expected {ENCODING_LEN} hex characters, got {}",
            encoding.len()
        )));
    }
    if !encoding.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed("non-hex character in encoding".into()));
    }
    // 25 hex digits are exactly 100 bits, so this cannot overflow u128.
    let bits = u128::from_str_radix(encoding, 16)
        .map_err(|err| malformed(format!("unparsable encoding: {err}")))?;

    let start = RoomId::new(((bits >> (ENCODING_BITS - 4)) & 0xF) as u8);
    if start.index() >= MAX_ROOMS {
        return Err(malformed(format!("start {start} out of range 0..{MAX_ROOMS}")));
    }

    let mut included = [false; MAX_ROOMS];
    let mut builder = RoomSystem::builder();
    for slot in 0..MAX_ROOMS {
        let base = 4 + (slot * 4) as u32;
        let id = RoomId::new(slot as u8);
        if bit(bits, base) {
            included[slot] = true;
            builder = builder.room(id);
            if bit(bits, base + 1) {
                builder = builder.lock(id);
            }
            if bit(bits, base + 2) {
                builder = builder.key(id);
            }
            if bit(bits, base + 3) {
                builder = builder.exit(id);
            }
        } else if bit(bits, base + 1) || bit(bits, base + 2) || bit(bits, base + 3) {
            return Err(malformed(format!(
                "attribute bits set on excluded room slot {slot}"
            )));
        }
    }

    for row in 0..MAX_ROOMS {
        for col in 0..MAX_ROOMS {
            if !bit(bits, adjacency_bit(row, col)) {
                continue;
            }
            if row == col {
                return Err(malformed(format!("room {row} connects to itself")));
            }
            if !bit(bits, adjacency_bit(col, row)) {
                return Err(malformed(format!(
                    "asymmetric adjacency between rooms {row} and {col}"
                )));
            }
            if !included[row] || !included[col] {
                return Err(malformed(format!(
                    "edge between excluded room slots {row} and {col}"
                )));
            }
            if row < col {
                builder = builder.edge(RoomId::new(row as u8), RoomId::new(col as u8));
            }
        }
    }

    if !included[start.index()] {
        return Err(malformed(format!("start {start} is not an included room")));
    }

    builder.start(start).build().map_err(|err| match err {
        EngineError::InvalidSystem(msg) => malformed(msg),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::RoomId;

    fn keyed_system() -> RoomSystem {
        RoomSystem::builder()
            .room(RoomId::new(0))
            .room(RoomId::new(1))
            .room(RoomId::new(2))
            .room(RoomId::new(4))
            .edge(RoomId::new(0), RoomId::new(1))
            .edge(RoomId::new(1), RoomId::new(2))
            .edge(RoomId::new(1), RoomId::new(4))
            .lock(RoomId::new(2))
            .key(RoomId::new(4))
            .start(RoomId::new(0))
            .exit(RoomId::new(2))
            .build()
            .unwrap()
    }

    #[test]
    fn test_encode_shape() {
        let encoding = encode(&keyed_system());
        assert_eq!(encoding.len(), ENCODING_LEN);
        assert!(encoding.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_round_trip() {
        let system = keyed_system();
        let decoded = decode(&encode(&system)).unwrap();
        assert_eq!(decoded, system);
    }

    #[test]
    fn test_round_trip_is_stable() {
        let encoding = encode(&keyed_system());
        let reencoded = encode(&decode(&encoding).unwrap());
        assert_eq!(reencoded, encoding);
    }

    #[test]
    fn test_decode_accepts_uppercase() {
        let encoding = encode(&keyed_system()).to_uppercase();
        assert_eq!(decode(&encoding).unwrap(), keyed_system());
    }

    #[test]
    fn test_reject_wrong_length() {
        assert!(matches!(
            decode("123"),
            Err(EngineError::MalformedEncoding(_))
        ));
        assert!(matches!(
            decode(&"0".repeat(26)),
            Err(EngineError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_reject_non_hex() {
        assert!(matches!(
            decode(&"z".repeat(25)),
            Err(EngineError::MalformedEncoding(_))
        ));
        // from_str_radix would accept a leading '+'; the charset check must not.
        assert!(matches!(
            decode("+000000000000000000000001"),
            Err(EngineError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_reject_all_zero() {
        // No rooms included at all.
        assert!(matches!(
            decode(&"0".repeat(25)),
            Err(EngineError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_reject_asymmetric_adjacency() {
        let mut bits: u128 = 0;
        // Rooms 0 and 1 included, room 1 is the exit.
        set_bit(&mut bits, 4);
        set_bit(&mut bits, 8);
        set_bit(&mut bits, 11);
        // Edge 0->1 only.
        set_bit(&mut bits, adjacency_bit(0, 1));
        let encoding = format!("{bits:025x}");
        assert!(matches!(
            decode(&encoding),
            Err(EngineError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_reject_self_loop() {
        let mut bits: u128 = 0;
        set_bit(&mut bits, 4);
        set_bit(&mut bits, 8);
        set_bit(&mut bits, 11);
        set_bit(&mut bits, adjacency_bit(0, 1));
        set_bit(&mut bits, adjacency_bit(1, 0));
        set_bit(&mut bits, adjacency_bit(0, 0));
        let encoding = format!("{bits:025x}");
        assert!(matches!(
            decode(&encoding),
            Err(EngineError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_reject_bits_on_excluded_slot() {
        let mut bits: u128 = 0;
        set_bit(&mut bits, 4);
        set_bit(&mut bits, 8);
        set_bit(&mut bits, 11);
        set_bit(&mut bits, adjacency_bit(0, 1));
        set_bit(&mut bits, adjacency_bit(1, 0));
        // Key bit on excluded slot 7.
        set_bit(&mut bits, 4 + 7 * 4 + 2);
        let encoding = format!("{bits:025x}");
        assert!(matches!(
            decode(&encoding),
            Err(EngineError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_reject_out_of_range_start() {
        let mut bits: u128 = 0;
        // Start nibble = 9, beyond the 8 room slots.
        bits |= 9 << (ENCODING_BITS - 4);
        set_bit(&mut bits, 4);
        set_bit(&mut bits, 8);
        set_bit(&mut bits, 11);
        set_bit(&mut bits, adjacency_bit(0, 1));
        set_bit(&mut bits, adjacency_bit(1, 0));
        let encoding = format!("{bits:025x}");
        assert!(matches!(
            decode(&encoding),
            Err(EngineError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_reject_excluded_start() {
        let mut bits: u128 = 0;
        // Start nibble = 5, but rooms 0 and 1 are the included ones.
        bits |= 5 << (ENCODING_BITS - 4);
        set_bit(&mut bits, 4);
        set_bit(&mut bits, 8);
        set_bit(&mut bits, 11);
        set_bit(&mut bits, adjacency_bit(0, 1));
        set_bit(&mut bits, adjacency_bit(1, 0));
        let encoding = format!("{bits:025x}");
        assert!(matches!(
            decode(&encoding),
            Err(EngineError::MalformedEncoding(_))
        ));
    }
}
