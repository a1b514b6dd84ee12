use super::state::{Score, Tile, MAX_TILE};

/// Result of collapsing a single row or column toward its front.
///
/// The transform is pure: score and max-tile bookkeeping is returned here
/// and folded into the game state by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collapse {
    /// Front-packed line, same length as the input.
    pub line: Vec<Tile>,
    /// Sum of every merge result produced in this line.
    pub score_delta: Score,
    /// Largest merge result produced, or 0 if nothing merged.
    pub max_merged: Tile,
}

impl Collapse {
    /// True if the collapsed line differs from `original`.
    #[inline]
    pub fn changed(&self, original: &[Tile]) -> bool {
        self.line.as_slice() != original
    }
}

/// Slide non-zero tiles toward index 0 and merge equal neighbours once each.
///
/// Tiles are first compacted, then scanned front to back. A tile equal to its
/// right neighbour absorbs it (doubling), and every visited tile is re-placed
/// at the first empty slot from the front. A tile produced by a merge is never
/// revisited, so it cannot merge again in the same pass. `MAX_TILE` tiles
/// are never merged, keeping the transform total.
///
/// ```
/// use grid_2048::engine::collapse;
/// let c = collapse(&[2, 0, 2, 2]);
/// assert_eq!(c.line, vec![4, 2, 0, 0]);
/// assert_eq!(c.score_delta, 4);
/// ```
pub fn collapse(line: &[Tile]) -> Collapse {
    let len = line.len();
    let mut out: Vec<Tile> = line.iter().copied().filter(|&t| t != 0).collect();
    out.resize(len, 0);

    let mut score_delta: Score = 0;
    let mut max_merged: Tile = 0;
    for idx in 0..len {
        let mut val = out[idx];
        if val == 0 {
            continue;
        }
        if val < MAX_TILE && idx + 1 < len && out[idx + 1] == val {
            val *= 2;
            out[idx + 1] = 0;
            score_delta += Score::from(val);
            max_merged = max_merged.max(val);
        }
        out[idx] = 0;
        // out[idx] was just cleared, so a slot at or before idx always exists
        let slot = out.iter().position(|&t| t == 0).unwrap_or(idx);
        out[slot] = val;
    }

    Collapse {
        line: out,
        score_delta,
        max_merged,
    }
}

/// True if two consecutive non-zero tiles in `line` are equal.
///
/// Empty neighbours are ignored: two adjacent blanks do not make a merge.
/// Neither do two `MAX_TILE` tiles, matching `collapse`.
pub fn has_adjacent_equal(line: &[Tile]) -> bool {
    line.windows(2).any(|w| w[0] != 0 && w[0] < MAX_TILE && w[0] == w[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_collapse_pair_to_front() {
        let c = collapse(&[2, 2, 0, 0]);
        assert_eq!(c.line, vec![4, 0, 0, 0]);
        assert_eq!(c.score_delta, 4);
        assert_eq!(c.max_merged, 4);
    }

    #[test]
    fn it_collapse_leftmost_pair_first() {
        let c = collapse(&[2, 0, 2, 2]);
        assert_eq!(c.line, vec![4, 2, 0, 0]);
        assert_eq!(c.score_delta, 4);
    }

    #[test]
    fn it_collapse_two_pairs() {
        let c = collapse(&[2, 2, 2, 2]);
        assert_eq!(c.line, vec![4, 4, 0, 0]);
        assert_eq!(c.score_delta, 8);
        assert_eq!(c.max_merged, 4);

        let c = collapse(&[4, 4, 8, 8]);
        assert_eq!(c.line, vec![8, 16, 0, 0]);
        assert_eq!(c.score_delta, 24);
        assert_eq!(c.max_merged, 16);
    }

    #[test]
    fn it_collapse_no_remerge() {
        // The 4 built from the pair must not absorb the existing 4.
        let c = collapse(&[4, 2, 2, 0]);
        assert_eq!(c.line, vec![4, 4, 0, 0]);
        let c = collapse(&[2, 2, 4, 0]);
        assert_eq!(c.line, vec![4, 4, 0, 0]);
        assert_eq!(c.score_delta, 4);
    }

    #[test]
    fn it_collapse_identity_without_gaps_or_pairs() {
        for line in [vec![2, 4, 2, 4], vec![2, 4, 8, 16, 32], vec![1024, 2]] {
            let c = collapse(&line);
            assert_eq!(c.line, line);
            assert_eq!(c.score_delta, 0);
            assert_eq!(c.max_merged, 0);
            assert!(!c.changed(&line));
        }
    }

    #[test]
    fn it_collapse_shift_only() {
        let c = collapse(&[0, 0, 0, 2]);
        assert_eq!(c.line, vec![2, 0, 0, 0]);
        assert_eq!(c.score_delta, 0);
        assert!(c.changed(&[0, 0, 0, 2]));

        let c = collapse(&[2, 0, 0, 2]);
        assert_eq!(c.line, vec![4, 0, 0, 0]);
    }

    #[test]
    fn it_collapse_empty_and_degenerate() {
        assert_eq!(collapse(&[0, 0, 0, 0]).line, vec![0, 0, 0, 0]);
        assert_eq!(collapse(&[]).line, Vec::<Tile>::new());
        assert_eq!(collapse(&[8]).line, vec![8]);
    }

    #[test]
    fn it_collapse_longer_lines() {
        let c = collapse(&[2, 2, 0, 4, 4, 0, 8, 8]);
        assert_eq!(c.line, vec![4, 8, 16, 0, 0, 0, 0, 0]);
        assert_eq!(c.score_delta, 28);
        assert_eq!(c.max_merged, 16);
    }

    #[test]
    fn it_collapse_keeps_top_tiles_apart() {
        let c = collapse(&[MAX_TILE, MAX_TILE, 0, 0]);
        assert_eq!(c.line, vec![MAX_TILE, MAX_TILE, 0, 0]);
        assert_eq!(c.score_delta, 0);
        assert!(!has_adjacent_equal(&c.line));

        let c = collapse(&[0, MAX_TILE / 2, MAX_TILE / 2, MAX_TILE]);
        assert_eq!(c.line, vec![MAX_TILE, MAX_TILE, 0, 0]);
        assert_eq!(c.score_delta, Score::from(MAX_TILE));
        assert_eq!(c.max_merged, MAX_TILE);
    }

    #[test]
    fn it_has_adjacent_equal() {
        assert!(has_adjacent_equal(&[2, 2, 4, 8]));
        assert!(has_adjacent_equal(&[2, 4, 8, 8]));
        assert!(!has_adjacent_equal(&[2, 4, 2, 4]));
        assert!(!has_adjacent_equal(&[0, 0, 2, 4]));
        assert!(!has_adjacent_equal(&[2, 0, 2, 0]));
        assert!(!has_adjacent_equal(&[2]));
    }
}
