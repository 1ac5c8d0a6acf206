//! Random identifiers for `uuid` fields.

use panel_core::DocValue;
use rand::Rng;
use uuid::{Builder, Uuid};

/// Draw a v4 UUID from the record generator's RNG.
///
/// Drawing from the seeded RNG keeps seeded runs reproducible, unlike
/// `Uuid::new_v4`, which reads from the OS.
pub fn random_uuid<R: Rng>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.random::<[u8; 16]>()).into_uuid()
}

/// Hyphenated lowercase form, stored as a string value.
pub fn generate_uuid_v4<R: Rng>(rng: &mut R) -> DocValue {
    DocValue::String(random_uuid(rng).hyphenated().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::{Variant, Version};

    #[test]
    fn test_same_seed_same_ids() {
        let first: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..3).map(|_| generate_uuid_v4(&mut rng)).collect()
        };
        let second: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..3).map(|_| generate_uuid_v4(&mut rng)).collect()
        };

        assert_eq!(first, second);
        assert_ne!(first[0], first[1]);
    }

    #[test]
    fn test_version_and_layout() {
        let mut rng = StdRng::seed_from_u64(99);
        let id = random_uuid(&mut rng);
        assert_eq!(id.get_version(), Some(Version::Random));
        assert_eq!(id.get_variant(), Variant::RFC4122);

        let DocValue::String(text) = generate_uuid_v4(&mut rng) else {
            panic!("uuid values are strings");
        };
        assert_eq!(text.len(), 36);
        assert_eq!(text.matches('-').count(), 4);
        assert_eq!(text, text.to_lowercase());
    }
}
