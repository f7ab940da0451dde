//! Preview pane rendering for upload results

use shared_types::{parse_annotations, AnalysisResult, AnalysisStats, Segment};

use crate::node::{el, ElementNode, ViewNode};
use crate::LEGAL_TERM_CLASS;

const NO_SUMMARY: &str = "No summary available";
const NO_SIMPLIFIED_TEXT: &str = "No simplified text available";
const NO_KEY_CLAUSES: &str = "No key clauses identified";
const NO_OBLIGATIONS: &str = "No specific obligations identified";
const NO_RISKS: &str = "No significant risks identified";

/// Build the complete analysis panel
pub fn render_analysis(result: &AnalysisResult) -> ViewNode {
    el("div")
        .class("space-y-8")
        .child(summary_section(result))
        .child(findings_section(result))
        .child(simplified_section(result))
        .child(stats_section(&result.stats()))
        .into()
}

/// Red notice shown in place of the analysis
pub fn render_error_notice(message: &str) -> ViewNode {
    el("p")
        .class("text-red-500")
        .text(format!("Error: {}", message))
        .into()
}

/// Bullet list of findings, or an italic placeholder when there are none
pub fn render_list(items: &[String], empty_message: &str) -> ViewNode {
    if items.is_empty() {
        return placeholder(empty_message).into();
    }

    el("ul")
        .class("list-disc pl-5 space-y-1")
        .children(
            items
                .iter()
                .map(|item| el("li").class("text-gray-700").text(item.as_str())),
        )
        .into()
}

/// Simplified text with annotated terms as hoverable spans
pub fn render_simplified_text(text: Option<&str>) -> ViewNode {
    let Some(text) = text else {
        return el("p")
            .class("text-gray-500")
            .text(NO_SIMPLIFIED_TEXT)
            .into();
    };

    let children = parse_annotations(text).into_iter().map(|segment| match segment {
        Segment::Text(run) => ViewNode::from(run),
        Segment::LineBreak => el("br").into(),
        Segment::Term { label, definition } => el("span")
            .class(format!(
                "{} relative inline-block border-b border-dashed border-indigo-500 cursor-help",
                LEGAL_TERM_CLASS
            ))
            .attr("title", definition)
            .text(label)
            .into(),
    });

    el("div")
        .class("whitespace-pre-wrap")
        .children(children)
        .into()
}

fn summary_section(result: &AnalysisResult) -> ElementNode {
    let body = el("div").class("text-gray-700 leading-relaxed");
    let body = match result.summary() {
        Some(summary) => body.text(summary),
        None => body.child(placeholder(NO_SUMMARY)),
    };

    el("div")
        .class("bg-blue-50 border-l-4 border-blue-500 p-4 rounded-r-lg")
        .child(heading(
            "font-semibold text-lg mb-3 text-blue-800 flex items-center",
            "fa-file-text",
            "Document Summary",
        ))
        .child(body)
}

fn findings_section(result: &AnalysisResult) -> ElementNode {
    el("div")
        .class("bg-green-50 border-l-4 border-green-500 p-4 rounded-r-lg")
        .child(heading(
            "font-semibold text-lg mb-4 text-green-800 flex items-center",
            "fa-search",
            "Legal Analysis",
        ))
        .child(
            el("div")
                .class("mb-6")
                .child(subheading("fa-list-ul", "Key Clauses Identified"))
                .child(render_list(result.key_clauses(), NO_KEY_CLAUSES)),
        )
        .child(
            el("div")
                .class("mb-6")
                .child(subheading("fa-exclamation-triangle", "Legal Obligations"))
                .child(render_list(result.obligations(), NO_OBLIGATIONS)),
        )
        .child(
            el("div")
                .child(subheading("fa-shield-alt", "Risk Factors"))
                .child(render_list(result.risks(), NO_RISKS)),
        )
}

fn simplified_section(result: &AnalysisResult) -> ElementNode {
    el("div")
        .class("bg-yellow-50 border-l-4 border-yellow-500 p-4 rounded-r-lg")
        .child(
            heading(
                "font-semibold text-lg mb-3 text-yellow-800 flex items-center",
                "fa-language",
                "Simplified Legal Text",
            )
            .child(
                el("span")
                    .class("text-sm font-normal ml-2 text-yellow-600")
                    .text("(Hover over underlined terms for explanations)"),
            ),
        )
        .child(
            el("div")
                .class("bg-white p-4 rounded border max-h-96 overflow-y-auto")
                .child(render_simplified_text(result.simplified_text())),
        )
}

fn stats_section(stats: &AnalysisStats) -> ElementNode {
    let tiles = [
        (stats.key_clauses, "text-indigo-600", "Key Clauses"),
        (stats.obligations, "text-orange-600", "Obligations"),
        (stats.risks, "text-red-600", "Risk Factors"),
        (stats.terms_simplified, "text-green-600", "Terms Simplified"),
    ];

    el("div")
        .class("bg-gray-50 border border-gray-200 p-4 rounded-lg")
        .child(heading(
            "font-semibold text-lg mb-3 text-gray-800 flex items-center",
            "fa-chart-bar",
            "Analysis Statistics",
        ))
        .child(
            el("div")
                .class("grid grid-cols-2 md:grid-cols-4 gap-4 text-center")
                .children(tiles.iter().map(|(count, color, label)| {
                    el("div")
                        .class("bg-white p-3 rounded shadow-sm")
                        .attr("data-stat", *label)
                        .child(
                            el("div")
                                .class(format!("stat-value text-2xl font-bold {}", color))
                                .text(count.to_string()),
                        )
                        .child(el("div").class("text-sm text-gray-600").text(*label))
                })),
        )
}

fn heading(class: &str, icon: &str, title: &str) -> ElementNode {
    el("h4")
        .class(class)
        .child(el("i").class(format!("fas {} mr-2", icon)))
        .text(title)
}

fn subheading(icon: &str, title: &str) -> ElementNode {
    el("h5")
        .class("font-medium text-md mb-2 text-green-700 flex items-center")
        .child(el("i").class(format!("fas {} mr-2 text-sm", icon)))
        .text(title)
}

fn placeholder(message: &str) -> ElementNode {
    el("p").class("text-gray-500 italic").text(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use shared_types::{LegalAnalysis, UploadResponse};

    fn stat_value(tree: &ViewNode, label: &str) -> String {
        tree.find_by_tag("div")
            .into_iter()
            .find(|tile| tile.get_attr("data-stat") == Some(label))
            .and_then(|tile| tile.children.first())
            .map(ViewNode::text_content)
            .unwrap_or_default()
    }

    #[test]
    fn test_reference_response_renders() {
        let result = UploadResponse::from_json(
            r#"{"summary":"S","simplified_text":"[rent (monthly payment)]","analysis":{"key_clauses":["a"],"obligations":[],"risks":[]}}"#,
        )
        .unwrap()
        .into_result()
        .unwrap();

        let tree = render_analysis(&result);
        let text = tree.text_content();

        let summary = tree.find_by_class("leading-relaxed");
        assert_eq!(ViewNode::Element(summary[0].clone()).text_content(), "S");

        let terms = tree.find_by_class(LEGAL_TERM_CLASS);
        assert_eq!(terms.len(), 1);
        assert_eq!(ViewNode::Element(terms[0].clone()).text_content(), "rent");
        assert_eq!(terms[0].get_attr("title"), Some("monthly payment"));

        let items: Vec<String> = tree
            .find_by_tag("li")
            .into_iter()
            .map(|li| ViewNode::Element(li.clone()).text_content())
            .collect();
        assert_eq!(items, vec!["a".to_string()]);

        assert!(text.contains(NO_OBLIGATIONS));
        assert!(text.contains(NO_RISKS));
        assert_eq!(stat_value(&tree, "Terms Simplified"), "1");
        assert_eq!(stat_value(&tree, "Key Clauses"), "1");
    }

    #[test]
    fn test_empty_result_uses_placeholders() {
        let tree = render_analysis(&AnalysisResult::default());
        let text = tree.text_content();

        for placeholder in [
            NO_SUMMARY,
            NO_KEY_CLAUSES,
            NO_OBLIGATIONS,
            NO_RISKS,
            NO_SIMPLIFIED_TEXT,
        ] {
            assert!(text.contains(placeholder), "missing {}", placeholder);
        }
        assert_eq!(stat_value(&tree, "Terms Simplified"), "0");
    }

    #[test]
    fn test_error_notice() {
        let notice = render_error_notice("bad file");
        let node = notice.as_element().unwrap();
        assert!(node.has_class("text-red-500"));
        assert_eq!(notice.text_content(), "Error: bad file");
    }

    #[test]
    fn test_simplified_text_line_breaks() {
        let tree = render_simplified_text(Some("first\nsecond [lease (contract)]"));
        assert_eq!(tree.find_by_tag("br").len(), 1);
        assert_eq!(tree.text_content(), "firstsecond lease");
        assert_eq!(tree.readable_text(), "first\nsecond lease");
    }

    #[test]
    fn test_readable_analysis_keeps_items_apart() {
        let result = AnalysisResult {
            summary: Some("The tenant pays.".to_string()),
            simplified_text: Some("first line\nsecond line".to_string()),
            analysis: Some(LegalAnalysis {
                key_clauses: Some(vec!["clause one".to_string(), "clause two".to_string()]),
                obligations: None,
                risks: None,
            }),
        };
        let text = render_analysis(&result).readable_text();

        assert!(text.contains("Document Summary\nThe tenant pays.\n"));
        assert!(text.contains("clause one\nclause two"));
        assert!(text.contains("first line\nsecond line"));
        assert!(text.contains("2\nKey Clauses"));
    }

    #[test]
    fn test_backend_markup_is_not_interpreted() {
        let result = AnalysisResult {
            summary: Some("<img src=x onerror=alert(1)>".to_string()),
            simplified_text: None,
            analysis: Some(LegalAnalysis {
                key_clauses: Some(vec!["<b>bold</b>".to_string()]),
                obligations: None,
                risks: None,
            }),
        };
        let tree = render_analysis(&result);
        assert!(tree.find_by_tag("img").is_empty());
        assert!(tree.find_by_tag("b").is_empty());
        assert!(tree.text_content().contains("<b>bold</b>"));
    }

    proptest! {
        /// A list renders one item per finding, or only the placeholder
        #[test]
        fn list_item_count_matches(items in proptest::collection::vec("[a-z ]{0,12}", 0..8)) {
            let tree = render_list(&items, "No findings.");
            let li = tree.find_by_tag("li").len();
            prop_assert_eq!(li, items.len());
            prop_assert_eq!(tree.text_content() == "No findings.", items.is_empty());
        }
    }
}
