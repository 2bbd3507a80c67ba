#![forbid(unsafe_code)]

/// Level index requesting automatic bitrate selection.
pub const AUTO_LEVEL: i32 = -1;

/// One adaptive quality tier discovered from a manifest.
///
/// `index` is the tier's position in the manifest's level list and stays
/// valid as a selection argument even after display dedup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QualityLevel {
    pub index: usize,
    /// Vertical resolution in pixels.
    pub height: u32,
    pub bitrate_bps: u64,
}

impl QualityLevel {
    #[must_use]
    pub fn new(index: usize, height: u32, bitrate_bps: u64) -> Self {
        Self {
            index,
            height,
            bitrate_bps,
        }
    }
}

/// Deduplicate quality levels for display.
///
/// Sorts descending by vertical resolution and keeps the first occurrence
/// per distinct height. The sort is stable, so among equal heights the
/// manifest's earlier level wins.
#[must_use]
pub fn dedup_by_height(levels: &[QualityLevel]) -> Vec<QualityLevel> {
    let mut sorted = levels.to_vec();
    sorted.sort_by(|a, b| b.height.cmp(&a.height));

    let mut seen_height = None;
    sorted.retain(|level| {
        if seen_height == Some(level.height) {
            false
        } else {
            seen_height = Some(level.height);
            true
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn dedup_sorts_descending_and_keeps_first_per_height() {
        let levels = vec![
            QualityLevel::new(0, 480, 1_280_000),
            QualityLevel::new(1, 720, 2_560_000),
            QualityLevel::new(2, 720, 3_000_000),
            QualityLevel::new(3, 1080, 5_120_000),
        ];

        let deduped = dedup_by_height(&levels);
        let heights: Vec<_> = deduped.iter().map(|l| l.height).collect();
        assert_eq!(heights, [1080, 720, 480]);
        // The first 720p tier from the manifest survives.
        assert_eq!(deduped[1].index, 1);
    }

    #[rstest]
    #[case(Vec::new(), 0)]
    #[case(vec![QualityLevel::new(0, 720, 1)], 1)]
    fn dedup_handles_trivial_lists(#[case] levels: Vec<QualityLevel>, #[case] expected: usize) {
        assert_eq!(dedup_by_height(&levels).len(), expected);
    }
}
