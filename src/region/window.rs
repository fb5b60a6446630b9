use super::{Region, Window};

/// Expand each region by `pad` seconds on both sides, clamped to
/// `[0, max_end]`, and merge windows that now touch or overlap.
///
/// Input regions are processed in order and padding only grows adjacency,
/// so the output is always sorted and non-overlapping.
pub fn pad_and_merge(regions: &[Region], pad: f64, max_end: f64) -> Vec<Window> {
    let mut out: Vec<Window> = Vec::new();

    for region in regions {
        let start = (region.start - pad).max(0.0);
        let end = (region.end + pad).min(max_end);

        match out.last_mut() {
            Some(last) if start <= last.end => {
                last.end = last.end.max(end);
                last.char_count += region.char_count;
            }
            _ => out.push(Window {
                start,
                end,
                char_count: region.char_count,
            }),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(start: f64, end: f64, char_count: usize) -> Region {
        Region {
            start,
            end,
            char_count,
            word_count: 0,
            texts: Vec::new(),
        }
    }

    #[test]
    fn test_pad_clamps_to_zero() {
        let windows = pad_and_merge(&[region(0.0, 10.0, 50)], 2.0, 100.0);

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, 0.0);
        assert_eq!(windows[0].end, 12.0);
    }

    #[test]
    fn test_pad_clamps_to_max_end() {
        let windows = pad_and_merge(&[region(95.0, 99.0, 50)], 3.0, 100.0);

        assert_eq!(windows[0].end, 100.0);
        assert_eq!(windows[0].start, 92.0);
    }

    #[test]
    fn test_merges_overlapping_windows() {
        let windows = pad_and_merge(&[region(0.0, 10.0, 40), region(9.0, 20.0, 60)], 0.0, 100.0);

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, 0.0);
        assert_eq!(windows[0].end, 20.0);
        assert_eq!(windows[0].char_count, 100);
    }

    #[test]
    fn test_merges_windows_made_adjacent_by_padding() {
        // Regions 2s apart become touching once padded by 1s each side.
        let windows = pad_and_merge(&[region(5.0, 10.0, 10), region(12.0, 15.0, 10)], 1.0, 100.0);

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, 4.0);
        assert_eq!(windows[0].end, 16.0);
    }

    #[test]
    fn test_keeps_separated_windows_apart() {
        let windows = pad_and_merge(&[region(0.0, 5.0, 10), region(20.0, 25.0, 10)], 1.0, 100.0);

        assert_eq!(windows.len(), 2);
        assert_eq!(windows[1].start, 19.0);
    }

    #[test]
    fn test_bounds_hold_for_all_windows() {
        let regions = vec![region(0.5, 3.0, 5), region(4.0, 8.0, 5), region(50.0, 99.9, 5)];
        let windows = pad_and_merge(&regions, 5.0, 100.0);

        for w in &windows {
            assert!(w.start >= 0.0);
            assert!(w.end <= 100.0);
            assert!(w.end >= w.start);
        }
    }

    #[test]
    fn test_empty_regions() {
        assert!(pad_and_merge(&[], 3.5, 100.0).is_empty());
    }
}
