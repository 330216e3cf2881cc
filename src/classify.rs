use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::align::{Step, Walk, diff_words};
use crate::models::{DiffAnnotation, DiffAnnotations, Provenance, Token};
use crate::text::{NormalizerConfig, keys, tokenize};

/// Classify every word of the live text against both baselines
///
/// 1. Against the recognizer transcript: words it never contained were added
///    by correction (or by hand); transcript words that disappeared are not
///    shown but remembered as what an added word replaced.
/// 2. Against the last saved text: byte positions of words added since are
///    manual edits. Tracking positions instead of word text keeps a changed
///    "der" from marking every other "der" in the report.
/// 3. A word touching a manual position is `Manual`; otherwise an added word
///    is `AiAdded`; otherwise `Unchanged`.
pub fn classify(
    original_text: &str,
    saved_text: &str,
    local_text: &str,
    config: &NormalizerConfig,
) -> DiffAnnotations {
    let local = tokenize(local_text, config);
    let original = tokenize(original_text, config);
    let saved = tokenize(saved_text, config);

    let manual = manual_positions(&saved, &local);
    let runs = diff_words(&keys(&original), &keys(&local));

    let mut annotations = DiffAnnotations::default();
    let mut replaced: VecDeque<&Token> = VecDeque::new();

    for step in Walk::new(&runs) {
        match step {
            Step::Deleted { old } => replaced.push_back(&original[old]),
            Step::Matched { new, .. } => {
                replaced.clear();
                annotations.insert(annotate(&local[new], false, None, &manual));
            }
            Step::Inserted { new } => {
                let original_word = replaced.pop_front().map(|t| t.text.clone());
                annotations.insert(annotate(&local[new], true, original_word, &manual));
            }
        }
    }

    debug!(
        "Classified {} words: {} AI-added, {} manual",
        annotations.len(),
        annotations.count(Provenance::AiAdded),
        annotations.count(Provenance::Manual)
    );

    annotations
}

/// Byte positions of the live text covered by words added since `saved`
fn manual_positions(saved: &[Token], local: &[Token]) -> HashSet<usize> {
    let runs = diff_words(&keys(saved), &keys(local));

    Walk::new(&runs)
        .filter_map(|step| match step {
            Step::Inserted { new } => Some(local[new].span()),
            _ => None,
        })
        .flatten()
        .collect()
}

fn annotate(
    token: &Token,
    added: bool,
    original_word: Option<String>,
    manual: &HashSet<usize>,
) -> DiffAnnotation {
    let provenance = if token.span().any(|pos| manual.contains(&pos)) {
        Provenance::Manual
    } else if added {
        Provenance::AiAdded
    } else {
        Provenance::Unchanged
    };

    DiffAnnotation {
        offset: token.offset,
        provenance,
        original_word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_default(original: &str, saved: &str, local: &str) -> DiffAnnotations {
        classify(original, saved, local, &NormalizerConfig::default())
    }

    #[test]
    fn test_only_the_edited_word_is_marked() {
        let original = "der Befund der Lunge";
        let local = "der Befund der Leber";
        let annotations = classify_default(original, original, local);

        assert_eq!(annotations.len(), 4);
        let changed: Vec<&DiffAnnotation> = annotations.changed().collect();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].offset, local.find("Leber").unwrap());
        assert!(changed[0].is_manual());
        assert_eq!(changed[0].original_word.as_deref(), Some("Lunge"));

        assert_eq!(annotations.provenance(0), Provenance::Unchanged);
        assert_eq!(annotations.provenance(11), Provenance::Unchanged);
    }

    #[test]
    fn test_ai_added_vs_manual() {
        let original = "herz gesund";
        let saved = "Das Herz ist gesund.";
        let local = "Das Herz ist völlig gesund.";
        let annotations = classify_default(original, saved, local);

        assert_eq!(annotations.provenance(0), Provenance::AiAdded);
        assert_eq!(annotations.provenance(4), Provenance::Unchanged);
        assert_eq!(annotations.provenance(9), Provenance::AiAdded);
        assert_eq!(annotations.provenance(13), Provenance::Manual);
        assert_eq!(annotations.provenance(local.find("gesund").unwrap()), Provenance::Unchanged);
    }

    #[test]
    fn test_repeated_word_scoped_to_one_instance() {
        let original = "der Befund der Lunge der Leber";
        let saved = original;
        let local = "der Befund der Lunge die Leber";
        let annotations = classify_default(original, saved, local);

        let changed: Vec<usize> = annotations.changed().map(|a| a.offset).collect();
        assert_eq!(changed, vec![local.find("die").unwrap()]);
    }

    #[test]
    fn test_replacement_pairs_in_order() {
        let original = "eins zwei drei vier";
        let local = "eins a b vier";
        let annotations = classify(original, original, local, &NormalizerConfig {
            spoken_numbers: false,
            ..Default::default()
        });

        assert_eq!(annotations.get(5).and_then(|a| a.original_word.as_deref()), Some("zwei"));
        assert_eq!(annotations.get(7).and_then(|a| a.original_word.as_deref()), Some("drei"));
    }

    #[test]
    fn test_pending_replacements_cleared_by_unchanged_text() {
        let original = "alt gleich";
        let local = "gleich neu";
        let annotations = classify_default(original, original, local);

        let added = annotations.get(local.find("neu").unwrap()).unwrap();
        assert!(added.is_changed());
        assert!(added.original_word.is_none());
    }

    #[test]
    fn test_formatting_only_changes_are_unchanged() {
        let annotations = classify_default("am 18.09.2025 befund", "Am 18092025 Befund:", "Am 18092025 Befund:");
        assert_eq!(annotations.changed().count(), 0);
    }

    #[test]
    fn test_empty_texts() {
        assert!(classify_default("", "", "").is_empty());

        let annotations = classify_default("", "Neu", "Neu");
        assert!(annotations.get(0).unwrap().is_ai_added());

        let annotations = classify_default("", "", "Neu");
        assert!(annotations.get(0).unwrap().is_manual());
    }
}
