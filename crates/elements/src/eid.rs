use core_types::Eid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hands out element ids: four random decimal digits plus a serial that
/// starts at 1 and is never reused.
///
/// The random part only makes ids harder to guess by eye; it is not a
/// security boundary.
#[derive(Debug)]
pub struct EidGenerator {
    serial: u64,
    rng: StdRng,
}

impl Default for EidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl EidGenerator {
    pub fn new() -> Self {
        Self {
            serial: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for tests and demos.
    pub fn seeded(seed: u64) -> Self {
        Self {
            serial: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_eid(&mut self) -> Eid {
        self.serial += 1;
        let tag = (0..4).fold(0u16, |acc, _| acc * 10 + self.rng.gen_range(0..=9u16));
        Eid::new(tag, self.serial)
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.serial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_starts_at_one_and_increases() {
        let mut ids = EidGenerator::new();
        let serials: Vec<u64> = (0..5).map(|_| ids.next_eid().serial()).collect();
        assert_eq!(serials, vec![1, 2, 3, 4, 5]);
        assert_eq!(ids.issued(), 5);
    }

    #[test]
    fn random_part_always_prints_as_four_digits() {
        let mut ids = EidGenerator::seeded(7);
        for _ in 0..200 {
            let eid = ids.next_eid();
            let text = eid.to_string();
            let (tag, serial) = text.split_once('-').unwrap();
            assert_eq!(tag.len(), 4, "{text}");
            assert!(tag.bytes().all(|b| b.is_ascii_digit()));
            assert_eq!(serial, eid.serial().to_string());
        }
    }

    #[test]
    fn seeded_generators_agree() {
        let mut a = EidGenerator::seeded(42);
        let mut b = EidGenerator::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.next_eid(), b.next_eid());
        }
    }
}
