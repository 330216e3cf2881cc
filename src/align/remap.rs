use tracing::debug;

use super::builder::BuilderConfig;
use super::differ::{Step, Walk, diff_words};
use super::interpolate::fill_gaps;
use crate::models::{TimestampTable, TimestampedToken, Timing};
use crate::text::{keys, tokenize};

/// Carry a stable table's timings over to an edited version of its text.
///
/// Words the edit left alone keep their timing, including whether it was
/// estimated; words typed since are estimated from their neighbours the same
/// way the builder estimates words the recognizer missed. Identical text
/// reuses the stable table as is.
pub fn remap_table(stable: &TimestampTable, local_text: &str, config: &BuilderConfig) -> TimestampTable {
    if stable.is_valid_for(local_text) {
        return stable.clone();
    }

    let tokens = remap_tokens(stable.tokens(), stable.snapshot(), local_text, config);
    TimestampTable::new(local_text, tokens)
}

/// Timings for the words of `local_text`, derived from the ordered tokens of
/// `stable_text` without going back to the recognizer output
pub fn remap_tokens(
    stable: &[TimestampedToken],
    stable_text: &str,
    local_text: &str,
    config: &BuilderConfig,
) -> Vec<TimestampedToken> {
    if local_text == stable_text {
        return stable.to_vec();
    }
    if stable.is_empty() {
        return Vec::new();
    }

    let stable_tokens = tokenize(stable_text, &config.normalizer);
    let local_tokens = tokenize(local_text, &config.normalizer);
    if local_tokens.is_empty() {
        return Vec::new();
    }

    let runs = diff_words(&keys(&stable_tokens), &keys(&local_tokens));

    let mut slots: Vec<Option<Timing>> = vec![None; local_tokens.len()];
    let mut carried = 0usize;
    for step in Walk::new(&runs) {
        if let Step::Matched { old, new } = step {
            if let Some(entry) = stable.get(old) {
                slots[new] = Some(entry.timing());
                carried += 1;
            }
        }
    }

    debug!(
        "Remapped {} of {} words, estimating {}",
        carried,
        local_tokens.len(),
        local_tokens.len() - carried
    );

    let audio_duration = stable.iter().map(|t| t.end).fold(0.0, f64::max);
    let timings = fill_gaps(&slots, audio_duration, &config.interpolation);

    local_tokens
        .into_iter()
        .zip(timings)
        .map(|(token, timing)| TimestampedToken::new(token, timing))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::builder::build_timestamp_table;
    use crate::models::Segment;

    fn stable_table(text: &str) -> TimestampTable {
        let segments: Vec<Segment> = serde_json::from_str(
            r#"[{"start": 0, "end": 3, "text": "der befund der lunge ist frei", "words": [
                {"word": "der", "start": 0.0, "end": 0.3},
                {"word": "befund", "start": 0.4, "end": 0.9},
                {"word": "der", "start": 1.0, "end": 1.2},
                {"word": "lunge", "start": 1.3, "end": 1.8},
                {"word": "ist", "start": 1.9, "end": 2.1},
                {"word": "frei", "start": 2.2, "end": 2.6}
            ]}]"#,
        )
        .unwrap();
        build_timestamp_table(&segments, text, &BuilderConfig::default())
    }

    #[test]
    fn test_identical_text_round_trips() {
        let mut tables: Vec<TimestampTable> = [
            "Der Befund der Lunge ist frei.",
            "Insgesamt: der Befund der Lunge ist frei. Ende.",
            "Lunge  frei\n\nder Befund – äußerst unauffällig, Größe 1,5 cm.",
            "",
            " \n\t ",
        ]
        .iter()
        .map(|text| stable_table(text))
        .collect();
        tables.push(TimestampTable::empty("Herz gesund"));

        for stable in &tables {
            let text = stable.snapshot().to_string();

            let remapped = remap_table(stable, &text, &BuilderConfig::default());
            assert_eq!(&remapped, stable, "table for {:?} changed", text);
            assert_eq!(
                remap_tokens(stable.tokens(), &text, &text, &BuilderConfig::default()),
                stable.tokens(),
                "tokens for {:?} changed",
                text
            );
        }
    }

    #[test]
    fn test_untouched_words_keep_timings() {
        let stable = stable_table("Der Befund der Lunge ist frei.");
        let local = "Der Befund der rechten Lunge ist frei.";

        let remapped = remap_table(&stable, local, &BuilderConfig::default());
        let tokens = remapped.tokens();
        assert_eq!(tokens.len(), 7);
        assert_eq!(remapped.snapshot(), local);

        assert_eq!(tokens[4].text, "Lunge");
        assert_eq!((tokens[4].start, tokens[4].end), (1.3, 1.8));
        assert!(!tokens[4].is_interpolated);
        assert_eq!(tokens[4].offset, local.find("Lunge").unwrap());

        // typed word sits between its neighbours
        assert_eq!(tokens[3].text, "rechten");
        assert!(tokens[3].is_interpolated);
        assert!(tokens[3].start >= tokens[2].end);
        assert!(tokens[3].end <= tokens[4].start + 1e-9);
    }

    #[test]
    fn test_deleted_words_are_skipped() {
        let stable = stable_table("Der Befund der Lunge ist frei.");
        let remapped = remap_table(&stable, "Lunge frei.", &BuilderConfig::default());
        let tokens = remapped.tokens();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].start, 1.3);
        assert_eq!(tokens[1].start, 2.2);
        assert_eq!(remapped.anchor_count(), 2);
    }

    #[test]
    fn test_carried_estimates_stay_estimated() {
        let stable = stable_table("Insgesamt: der Befund der Lunge ist frei.");
        assert!(stable.tokens()[0].is_interpolated);

        let remapped = remap_table(&stable, "Insgesamt: der Befund der Lunge ist frei. Ende.", &BuilderConfig::default());
        let tokens = remapped.tokens();
        assert_eq!(tokens[0], stable.tokens()[0]);
        assert!(tokens[7].is_interpolated);
        assert!(tokens[7].end <= 2.6);
    }

    #[test]
    fn test_empty_inputs() {
        let empty = TimestampTable::empty("Herz");
        assert!(remap_table(&empty, "Herz gesund", &BuilderConfig::default()).is_empty());

        let stable = stable_table("Der Befund der Lunge ist frei.");
        assert!(remap_table(&stable, "", &BuilderConfig::default()).is_empty());
    }
}
