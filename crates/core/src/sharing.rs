//! Public share slugs and share-link construction.
//!
//! A slug is an opaque token of [`SLUG_LENGTH`] characters drawn from
//! `[a-z0-9]`. Uniqueness is enforced by the `uq_items_share_slug`
//! constraint; callers retry with a fresh slug on collision, up to
//! [`MAX_SLUG_ATTEMPTS`] times.

use rand::Rng;

/// Number of characters in a generated slug.
pub const SLUG_LENGTH: usize = 12;

/// Attempts made before giving up on finding an unused slug.
pub const MAX_SLUG_ATTEMPTS: usize = 5;

/// Path segment under which shared items are served to the public.
pub const SHARED_PATH: &str = "shared";

const SLUG_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a new random URL-safe share slug.
pub fn generate_share_slug() -> String {
    let mut rng = rand::rng();
    (0..SLUG_LENGTH)
        .map(|_| SLUG_ALPHABET[rng.random_range(0..SLUG_ALPHABET.len())] as char)
        .collect()
}

/// Whether `slug` has the shape of a generated slug.
pub fn is_valid_slug(slug: &str) -> bool {
    slug.len() == SLUG_LENGTH && slug.bytes().all(|b| SLUG_ALPHABET.contains(&b))
}

/// Build the public URL for a shared item: `{origin}/shared/{slug}`.
///
/// ```
/// use thoughtcache_core::sharing::share_url;
///
/// assert_eq!(
///     share_url("https://thoughtcache.app/", "abc123def456"),
///     "https://thoughtcache.app/shared/abc123def456"
/// );
/// ```
pub fn share_url(origin: &str, slug: &str) -> String {
    format!("{}/{SHARED_PATH}/{slug}", origin.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_slug_has_expected_shape() {
        for _ in 0..100 {
            let slug = generate_share_slug();
            assert!(is_valid_slug(&slug), "unexpected slug {slug}");
        }
    }

    #[test]
    fn generated_slugs_differ() {
        assert_ne!(generate_share_slug(), generate_share_slug());
    }

    #[test]
    fn rejects_malformed_slug() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("ABCDEFGHIJKL"));
        assert!(!is_valid_slug("abc-def-ghij"));
        assert!(!is_valid_slug("abc"));
    }

    #[test]
    fn share_url_without_trailing_slash() {
        assert_eq!(
            share_url("http://localhost:5173", "q1w2e3r4t5y6"),
            "http://localhost:5173/shared/q1w2e3r4t5y6"
        );
    }
}
