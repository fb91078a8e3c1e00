//! Watson-Crick complementarity lookup.
//!
//! The table is directional: it maps the opening base to the partner it
//! requires. `U` opens a pair with `A`, but `A` only accepts `T`, so `UA` can
//! pair while `AU` cannot. G-U wobble pairs are not supported, and anything
//! outside the table (including `N`) never pairs.

/// Partner required by `base` when it opens a pair
#[must_use]
pub fn partner_of(base: u8) -> Option<u8> {
    match base {
        b'A' => Some(b'T'),
        b'T' => Some(b'A'),
        b'G' => Some(b'C'),
        b'C' => Some(b'G'),
        b'U' => Some(b'A'),
        _ => None,
    }
}

/// Check if `opening` can pair with a later `closing` base
#[must_use]
pub fn can_pair(opening: u8, closing: u8) -> bool {
    partner_of(opening) == Some(closing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watson_crick_pairs() {
        assert!(can_pair(b'A', b'T'));
        assert!(can_pair(b'T', b'A'));
        assert!(can_pair(b'G', b'C'));
        assert!(can_pair(b'C', b'G'));
    }

    #[test]
    fn test_uracil_is_directional() {
        assert!(can_pair(b'U', b'A'));
        assert!(!can_pair(b'A', b'U'));
    }

    #[test]
    fn test_no_wobble_or_unknown() {
        assert!(!can_pair(b'G', b'U'));
        assert!(!can_pair(b'U', b'G'));
        assert!(!can_pair(b'N', b'N'));
        assert!(!can_pair(b'A', b'N'));
        assert!(!can_pair(b'N', b'T'));
        assert!(!can_pair(b'a', b't'));
        assert_eq!(partner_of(b'X'), None);
    }
}
