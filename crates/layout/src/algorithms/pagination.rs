/// Tolerance for floating point drift when comparing heights.
pub const EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_height: f32,
}

/// Decides whether a block of `needed` height fits below `cursor_y`.
///
/// * `cursor_y`: current position from the top of the page.
/// * `needed`: height the block requires.
/// * `bottom_limit`: lowest y content may reach (page height minus bottom margin).
pub fn check_fit(cursor_y: f32, needed: f32, bottom_limit: f32) -> BreakAnalysis {
    let available = (bottom_limit - cursor_y).max(0.0);
    BreakAnalysis {
        should_break: needed > available + EPSILON,
        remaining_height: available,
    }
}

/// Splits `total` lines of `line_height` into chunks: the first sized to the
/// space left on the current page, the rest to a full content area.
/// Always yields at least one line per chunk.
pub fn line_chunks(total: usize, line_height: f32, first_space: f32, page_space: f32) -> Vec<usize> {
    let per = |space: f32| (((space + EPSILON) / line_height).floor() as usize).max(1);
    let mut chunks = Vec::new();
    let mut remaining = total;
    let mut take = per(first_space);
    while remaining > 0 {
        let n = take.min(remaining);
        chunks.push(n);
        remaining -= n;
        take = per(page_space);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_exactly_at_bottom() {
        let analysis = check_fit(700.0, 101.89, 801.89);
        assert!(!analysis.should_break);
        assert!((analysis.remaining_height - 101.89).abs() < 1e-3);
    }

    #[test]
    fn breaks_when_over() {
        assert!(check_fit(700.0, 102.0, 801.0).should_break);
    }

    #[test]
    fn cursor_below_limit_has_no_room() {
        let analysis = check_fit(820.0, 1.0, 801.0);
        assert!(analysis.should_break);
        assert_eq!(analysis.remaining_height, 0.0);
    }

    #[test]
    fn chunks_fill_first_page_then_full_pages() {
        // 12pt lines, 30pt left (2 lines), 60pt per page (5 lines).
        assert_eq!(line_chunks(13, 12.0, 30.0, 60.0), vec![2, 5, 5, 1]);
        assert_eq!(line_chunks(0, 12.0, 30.0, 60.0), Vec::<usize>::new());
        // No room left still takes one line so the loop progresses.
        assert_eq!(line_chunks(2, 12.0, 0.0, 12.0), vec![1, 1]);
    }
}
