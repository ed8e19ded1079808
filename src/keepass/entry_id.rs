use base64::{engine::general_purpose::STANDARD, Engine as _};
use byteorder::{BigEndian, ByteOrder};
use rand::{rngs::StdRng, Rng, SeedableRng};
use uuid::{Builder, Uuid};

/// Supplies the UUIDs stamped on groups and entries.
pub trait IdSource {
    fn next_id(&mut self) -> Uuid;
}

/// Random v4 UUIDs from the operating system's entropy source.
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Reproducible v4 UUIDs drawn from a seeded generator.
pub struct SeededIds {
    rng: StdRng,
}

impl SeededIds {
    pub fn new(seed: u64) -> Self {
        SeededIds {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl IdSource for SeededIds {
    fn next_id(&mut self) -> Uuid {
        Builder::from_random_bytes(self.rng.random::<[u8; 16]>()).into_uuid()
    }
}

/// Encodes a UUID the way KeePass stores it: base64 of the most significant
/// 64 bits followed by the least significant 64 bits, both big-endian.
pub fn encode_uuid(uuid: &Uuid) -> String {
    let (high, low) = uuid.as_u64_pair();
    let mut bytes = [0u8; 16];
    BigEndian::write_u64(&mut bytes[..8], high);
    BigEndian::write_u64(&mut bytes[8..], low);
    STANDARD.encode(bytes)
}
