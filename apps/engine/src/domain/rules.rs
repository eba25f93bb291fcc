use std::time::Duration;

/// Number of distinct presentation color buckets.
pub const PALETTE_SIZE: usize = 17;

/// Pair counts a custom session may request.
pub const CUSTOM_PAIR_COUNTS: [u8; 4] = [6, 8, 10, 12];
pub const DEFAULT_PAIR_COUNT: u8 = 8;

/// Cards that can be face up at once while a move is being resolved.
pub const MAX_SELECTION: usize = 2;

/// How long a mismatched pair stays visible before flipping back.
pub const MISMATCH_RESET_DELAY: Duration = Duration::from_millis(1000);
/// Pause between the final match and the outcome report.
pub const WIN_REPORT_DELAY: Duration = Duration::from_millis(600);
/// Elapsed-time counter resolution.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub fn is_valid_custom_pair_count(count: u8) -> bool {
    CUSTOM_PAIR_COUNTS.contains(&count)
}

/// Shared key carried by both cards built from pair `index`.
pub fn pair_key(index: usize) -> String {
    format!("pair-{index}")
}

/// Color bucket for pair `index`; wraps once the palette is exhausted.
pub fn color_bucket(index: usize) -> u8 {
    (index % PALETTE_SIZE) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_pair_counts_are_validated() {
        for n in CUSTOM_PAIR_COUNTS {
            assert!(is_valid_custom_pair_count(n));
        }
        assert!(!is_valid_custom_pair_count(4));
        assert!(!is_valid_custom_pair_count(7));
        assert!(!is_valid_custom_pair_count(16));
    }

    #[test]
    fn palette_covers_every_supported_size() {
        let largest = *CUSTOM_PAIR_COUNTS.iter().max().unwrap() as usize;
        assert!(PALETTE_SIZE >= largest);
        let buckets: std::collections::HashSet<u8> = (0..largest).map(color_bucket).collect();
        assert_eq!(buckets.len(), largest);
    }

    #[test]
    fn color_bucket_wraps() {
        assert_eq!(color_bucket(0), 0);
        assert_eq!(color_bucket(PALETTE_SIZE), 0);
        assert_eq!(color_bucket(PALETTE_SIZE + 3), 3);
    }

    #[test]
    fn pair_keys_are_index_based() {
        assert_eq!(pair_key(0), "pair-0");
        assert_eq!(pair_key(11), "pair-11");
    }
}
