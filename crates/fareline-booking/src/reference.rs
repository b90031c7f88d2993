//! Human-readable booking references: `BOOK-{user}-{event}-{suffix}`.
//!
//! The suffix is random, so two references for the same user and event are
//! distinct with high probability but not guaranteed to be. References are
//! for display and support lookups, never a primary key.

use rand::seq::SliceRandom;
use rand::Rng;

/// Characters a reference suffix is drawn from.
pub const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Draws `len` characters uniformly from [`SUFFIX_CHARSET`].
pub fn random_suffix<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .filter_map(|_| SUFFIX_CHARSET.choose(rng).map(|&b| char::from(b)))
        .collect()
}

/// Builds a reference with a suffix from `rng`.
///
/// ```rust
/// use fareline_booking::reference::booking_reference;
///
/// let reference = booking_reference(&mut rand::thread_rng(), "BOOK", "42", "7", 6);
/// assert!(reference.starts_with("BOOK-42-7-"));
/// assert_eq!(reference.len(), "BOOK-42-7-".len() + 6);
/// ```
pub fn booking_reference<R: Rng + ?Sized>(
    rng: &mut R,
    prefix: &str,
    user_id: &str,
    event_id: &str,
    suffix_len: usize,
) -> String {
    format!("{}-{}-{}-{}", prefix, user_id, event_id, random_suffix(rng, suffix_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_suffix_uses_charset_only() {
        let mut rng = StdRng::seed_from_u64(7);
        let suffix = random_suffix(&mut rng, 500);
        assert_eq!(suffix.len(), 500);
        assert!(suffix.bytes().all(|b| SUFFIX_CHARSET.contains(&b)));
    }

    #[test]
    fn test_reference_format() {
        let mut rng = StdRng::seed_from_u64(1);
        let reference = booking_reference(&mut rng, "BOOK", "1", "100", 6);

        let suffix = reference
            .strip_prefix("BOOK-1-100-")
            .expect("reference keeps prefix, user and event");
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_same_seed_same_reference() {
        let a = booking_reference(&mut StdRng::seed_from_u64(9), "BOOK", "u", "e", 6);
        let b = booking_reference(&mut StdRng::seed_from_u64(9), "BOOK", "u", "e", 6);
        assert_eq!(a, b);
    }

    #[test]
    fn test_references_are_distinct() {
        let mut rng = rand::thread_rng();
        let refs: HashSet<String> = (0..100)
            .map(|_| booking_reference(&mut rng, "BOOK", "1", "100", 6))
            .collect();
        assert_eq!(refs.len(), 100);
    }

    #[test]
    fn test_empty_suffix() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(booking_reference(&mut rng, "BOOK", "1", "2", 0), "BOOK-1-2-");
    }
}
