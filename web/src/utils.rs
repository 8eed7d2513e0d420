use std::hash::{DefaultHasher, Hash, Hasher};

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Numeric seeds are used as-is, anything else is hashed.
pub(crate) fn seed_from_str(seed: &str) -> u64 {
    seed.trim().parse().unwrap_or_else(|_| {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        hasher.finish()
    })
}
