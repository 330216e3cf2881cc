use crate::models::Timing;

/// Constants for estimating timings of words the recognizer never heard
#[derive(Debug, Clone)]
pub struct InterpolationConfig {
    /// Upper bound on an estimated word's duration between two anchors (seconds)
    pub max_gap_word_duration: f64,
    /// Spacing per word after the last anchor (seconds)
    pub trailing_step: f64,
    /// Spacing per word before the first anchor (seconds)
    pub leading_step: f64,
    /// Duration of an estimated word outside two anchors (seconds)
    pub default_duration: f64,
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        Self {
            max_gap_word_duration: 0.3,
            trailing_step: 0.15,
            leading_step: 0.2,
            default_duration: 0.2,
        }
    }
}

/// Fill every empty slot with an estimated timing.
///
/// Resolved slots are anchors and are returned unchanged. An empty slot takes
/// its estimate from the nearest anchor before it (its `end`) and after it
/// (its `start`):
///
/// - both: spread linearly across the silence between them
/// - only before: step forward from the previous anchor
/// - only after: step back from the next anchor, never below zero
/// - neither: place by relative position across the whole recording
///
/// Estimates never end past `audio_duration` and are flagged interpolated.
pub fn fill_gaps(
    slots: &[Option<Timing>],
    audio_duration: f64,
    config: &InterpolationConfig,
) -> Vec<Timing> {
    let total = slots.len();

    let mut prev_anchor = Vec::with_capacity(total);
    let mut last = None;
    for (i, slot) in slots.iter().enumerate() {
        prev_anchor.push(last);
        if let Some(timing) = slot {
            last = Some((i, *timing));
        }
    }

    let mut next_anchor = vec![None; total];
    let mut upcoming = None;
    for (i, slot) in slots.iter().enumerate().rev() {
        next_anchor[i] = upcoming;
        if let Some(timing) = slot {
            upcoming = Some((i, *timing));
        }
    }

    slots
        .iter()
        .enumerate()
        .map(|(i, slot)| match slot {
            Some(timing) => *timing,
            None => estimate(
                i,
                total,
                prev_anchor[i],
                next_anchor[i],
                audio_duration,
                config,
            ),
        })
        .collect()
}

fn estimate(
    index: usize,
    total: usize,
    prev: Option<(usize, Timing)>,
    next: Option<(usize, Timing)>,
    audio_duration: f64,
    config: &InterpolationConfig,
) -> Timing {
    let (start, end) = match (prev, next) {
        (Some((p, before)), Some((n, after))) => {
            let gap = (n - p) as f64;
            let span = (after.start - before.end).max(0.0);
            let start = before.end + span * (index - p) as f64 / gap;
            (start, start + config.max_gap_word_duration.min(span / gap))
        }
        (Some((p, before)), None) => {
            let start = before.end + config.trailing_step * (index - p) as f64;
            (start, start + config.default_duration)
        }
        (None, Some((n, after))) => {
            let start = (after.start - config.leading_step * (n - index) as f64).max(0.0);
            (start, start + config.default_duration)
        }
        (None, None) => {
            let start = audio_duration * index as f64 / total as f64;
            (start, start + config.default_duration)
        }
    };

    let end = end.min(audio_duration);
    Timing {
        start: start.min(end),
        end,
        is_interpolated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(start: f64, end: f64) -> Option<Timing> {
        Some(Timing {
            start,
            end,
            is_interpolated: false,
        })
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_between_two_anchors() {
        let slots = vec![anchor(0.0, 1.0), None, None, None, anchor(3.0, 3.5)];
        let filled = fill_gaps(&slots, 3.5, &InterpolationConfig::default());

        // span 2.0 over a gap of 4 words
        assert!(close(filled[1].start, 1.5));
        assert!(close(filled[2].start, 2.0));
        assert!(close(filled[3].start, 2.5));
        assert!(close(filled[1].end, 1.8));
        assert!(filled[1..4].iter().all(|t| t.is_interpolated));
        assert!(!filled[0].is_interpolated);
        assert_eq!(filled[4], slots[4].unwrap());
    }

    #[test]
    fn test_monotonic_between_anchors() {
        let mut slots = vec![anchor(0.0, 0.4)];
        slots.extend(std::iter::repeat(None).take(7));
        slots.push(anchor(2.0, 2.4));
        let filled = fill_gaps(&slots, 2.4, &InterpolationConfig::default());

        for pair in filled.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
    }

    #[test]
    fn test_overlapping_anchors_collapse_span() {
        let slots = vec![anchor(0.0, 1.0), None, anchor(0.8, 1.2)];
        let filled = fill_gaps(&slots, 1.2, &InterpolationConfig::default());
        assert!(close(filled[1].start, 1.0));
        assert!(close(filled[1].end, 1.0));
    }

    #[test]
    fn test_trailing_and_leading() {
        let slots = vec![None, None, anchor(1.0, 1.5), None, None];
        let filled = fill_gaps(&slots, 10.0, &InterpolationConfig::default());

        assert!(close(filled[0].start, 0.6));
        assert!(close(filled[1].start, 0.8));
        assert!(close(filled[1].end, 1.0));
        assert!(close(filled[3].start, 1.65));
        assert!(close(filled[4].start, 1.8));
        assert!(close(filled[4].end, 2.0));
    }

    #[test]
    fn test_leading_never_negative() {
        let slots = vec![None, None, anchor(0.1, 0.3)];
        let filled = fill_gaps(&slots, 0.3, &InterpolationConfig::default());
        assert!(close(filled[0].start, 0.0));
        assert!(close(filled[1].start, 0.0));
    }

    #[test]
    fn test_clamped_to_audio_duration() {
        let slots = vec![anchor(0.0, 0.4), None, None];
        let filled = fill_gaps(&slots, 0.4, &InterpolationConfig::default());
        for timing in &filled {
            assert!(timing.end <= 0.4);
            assert!(timing.start <= timing.end);
        }
    }

    #[test]
    fn test_no_anchors_spread_over_duration() {
        let slots: Vec<Option<Timing>> = vec![None; 4];
        let filled = fill_gaps(&slots, 8.0, &InterpolationConfig::default());
        let starts: Vec<f64> = filled.iter().map(|t| t.start).collect();
        assert_eq!(starts, vec![0.0, 2.0, 4.0, 6.0]);
        assert!(filled.iter().all(|t| t.is_interpolated));
    }

    #[test]
    fn test_empty() {
        assert!(fill_gaps(&[], 1.0, &InterpolationConfig::default()).is_empty());
    }
}
