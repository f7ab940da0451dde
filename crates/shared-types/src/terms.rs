//! Legal term annotations
//!
//! The analysis backend rewrites jargon in the simplified text as
//! `[label (definition)]`. This module splits such text into segments the
//! view layer can turn into highlighted spans and line breaks.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `[label (definition)]`; the label may not span brackets, parens or lines
    static ref TERM_ANNOTATION: Regex =
        Regex::new(r"\[([^\[\]()\n]+?)\s*\(([^)]+)\)\]").unwrap();
}

/// A piece of simplified text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Term {
        label: &'a str,
        definition: &'a str,
    },
    LineBreak,
}

/// Split simplified text into plain runs, annotated terms and line breaks
pub fn parse_annotations(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in TERM_ANNOTATION.captures_iter(text) {
        // Group 0 always exists for a match
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        push_plain(&mut segments, &text[last..whole.start]);

        let label = caps.get(1).map_or("", |m| m.as_str().trim());
        let definition = caps.get(2).map_or("", |m| m.as_str().trim());
        segments.push(Segment::Term { label, definition });

        last = whole.end;
    }

    push_plain(&mut segments, &text[last..]);
    segments
}

/// Number of `[label (definition)]` annotations in the text
pub fn count_terms(text: &str) -> usize {
    TERM_ANNOTATION.find_iter(text).count()
}

fn push_plain<'a>(segments: &mut Vec<Segment<'a>>, run: &'a str) {
    for (idx, line) in run.split('\n').enumerate() {
        if idx > 0 {
            segments.push(Segment::LineBreak);
        }
        if !line.is_empty() {
            segments.push(Segment::Text(line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_single_annotation() {
        let segments = parse_annotations("[rent (monthly payment)]");
        assert_eq!(
            segments,
            vec![Segment::Term {
                label: "rent",
                definition: "monthly payment"
            }]
        );
        assert_eq!(count_terms("[rent (monthly payment)]"), 1);
    }

    #[test]
    fn test_annotation_inside_sentence() {
        let text = "Tenant is in [breach (violation or breaking of a contract or agreement)] today.";
        let segments = parse_annotations(text);
        assert_eq!(
            segments,
            vec![
                Segment::Text("Tenant is in "),
                Segment::Term {
                    label: "breach",
                    definition: "violation or breaking of a contract or agreement"
                },
                Segment::Text(" today."),
            ]
        );
    }

    #[test]
    fn test_newlines_become_breaks() {
        let segments = parse_annotations("line one\nline two\n\n[lease (contract)]");
        assert_eq!(
            segments,
            vec![
                Segment::Text("line one"),
                Segment::LineBreak,
                Segment::Text("line two"),
                Segment::LineBreak,
                Segment::LineBreak,
                Segment::Term {
                    label: "lease",
                    definition: "contract"
                },
            ]
        );
    }

    #[test]
    fn test_definition_with_punctuation() {
        let text = "[liability (legal responsibility for one's actions, usually)]";
        assert_eq!(
            parse_annotations(text),
            vec![Segment::Term {
                label: "liability",
                definition: "legal responsibility for one's actions, usually"
            }]
        );
    }

    #[test]
    fn test_plain_brackets_are_left_alone() {
        let text = "See [Exhibit A] and (attached) pages";
        assert_eq!(count_terms(text), 0);
        assert_eq!(parse_annotations(text), vec![Segment::Text(text)]);
    }

    #[test]
    fn test_label_does_not_swallow_earlier_brackets() {
        let text = "[Exhibit A] then [default (failure to pay)]";
        assert_eq!(count_terms(text), 1);
        assert_eq!(
            parse_annotations(text),
            vec![
                Segment::Text("[Exhibit A] then "),
                Segment::Term {
                    label: "default",
                    definition: "failure to pay"
                },
            ]
        );
    }

    #[test]
    fn test_multi_word_label() {
        let text = "[force majeure (unforeseeable circumstances)] and [intellectual property (creations of the mind)]";
        assert_eq!(count_terms(text), 2);
        let labels: Vec<&str> = parse_annotations(text)
            .into_iter()
            .filter_map(|s| match s {
                Segment::Term { label, .. } => Some(label),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["force majeure", "intellectual property"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(parse_annotations("").is_empty());
        assert_eq!(count_terms(""), 0);
    }

    proptest! {
        /// The count always agrees with the number of parsed term segments
        #[test]
        fn count_matches_segments(text in "[a-z \\[\\]()\n]{0,60}") {
            let terms = parse_annotations(&text)
                .iter()
                .filter(|s| matches!(s, Segment::Term { .. }))
                .count();
            prop_assert_eq!(terms, count_terms(&text));
        }

        /// Text without annotations survives parsing unchanged
        #[test]
        fn plain_text_round_trips(text in "[a-zA-Z0-9 .,\n]{0,80}") {
            let rebuilt: String = parse_annotations(&text)
                .iter()
                .map(|s| match s {
                    Segment::Text(t) => (*t).to_string(),
                    Segment::LineBreak => "\n".to_string(),
                    Segment::Term { .. } => unreachable!(),
                })
                .collect();
            prop_assert_eq!(rebuilt, text);
        }

        /// Every generated annotation is found with its trimmed label
        #[test]
        fn generated_annotations_are_found(
            labels in proptest::collection::vec("[a-z]{1,8}( [a-z]{1,8})?", 1..5),
        ) {
            let text = labels
                .iter()
                .map(|l| format!("[{} (meaning of {})]", l, l))
                .collect::<Vec<_>>()
                .join(" ");
            prop_assert_eq!(count_terms(&text), labels.len());
        }
    }
}
