//! Positional round-trip localization for HTML-like trees.
//!
//! Unlike scope extraction, which addresses content by what it says, this
//! module addresses content by where it sits: attributes and text nodes have
//! no stable content identity across structurally different siblings, so each
//! translatable unit gets a path key built from ordered sibling indices
//! (`"body/1/1/0"` for a text node, `"body/1/1/1#title"` for an attribute).
//! Extraction and reinsertion walk the tree identically, which is what makes
//! the round trip lossless.

use indexmap::IndexMap;

use crate::document::{Element, Node, is_non_translatable_tag, is_translatable_attribute};

/// Attribute stamped onto the root element on reinsertion to mark the output
/// with its target locale.
pub const LOCALE_ATTRIBUTE: &str = "lang";

/// Extracts all translatable units of the tree as a flat positional-key map.
///
/// Whitespace-only text nodes emit no key; `script`/`style` subtrees are
/// skipped entirely; only allowlisted attributes are eligible.
pub fn extract_units(root: &Node) -> IndexMap<String, String> {
    let mut units = IndexMap::new();
    for (path, el) in root_elements(root) {
        collect_units(el, &path, &mut units);
    }
    units
}

/// Rebuilds the tree with translated text substituted in place.
///
/// A new tree is returned; the input is never mutated. Units whose key is
/// absent from `translations` keep their original source text, so a partial
/// (or empty) map degrades to a structure-preserving copy. The root element
/// is stamped with `lang="<target_locale>"`.
pub fn reinsert(root: &Node, translations: &IndexMap<String, String>, target_locale: &str) -> Node {
    let mut rebuilt = match root {
        Node::Element(el) if el.tag == "html" => {
            let mut out = el.clone();
            out.children = el
                .children
                .iter()
                .map(|child| match child {
                    Node::Element(section) => {
                        Node::Element(rebuild_element(section, &section.tag, translations))
                    }
                    other => other.clone(),
                })
                .collect();
            Node::Element(out)
        }
        Node::Element(el) => Node::Element(rebuild_element(el, &el.tag, translations)),
        other => other.clone(),
    };

    if let Node::Element(el) = &mut rebuilt {
        el.attributes
            .insert(LOCALE_ATTRIBUTE.to_string(), target_locale.to_string());
    }
    rebuilt
}

/// The elements that anchor path keys, with their first path segment.
///
/// For an `html` root the addressable sections are its element children
/// (`head`, `body`), each keyed by tag; any other root anchors itself.
fn root_elements(root: &Node) -> Vec<(String, &Element)> {
    match root {
        Node::Element(el) if el.tag == "html" => el
            .children
            .iter()
            .filter_map(|child| match child {
                Node::Element(section) => Some((section.tag.clone(), section)),
                _ => None,
            })
            .collect(),
        Node::Element(el) => vec![(el.tag.clone(), el)],
        _ => Vec::new(),
    }
}

fn collect_units(el: &Element, path: &str, units: &mut IndexMap<String, String>) {
    if is_non_translatable_tag(&el.tag) {
        return;
    }

    for (name, value) in &el.attributes {
        if is_translatable_attribute(name) {
            units.insert(format!("{path}#{name}"), value.clone());
        }
    }

    for (index, child) in el.children.iter().enumerate() {
        let child_path = format!("{path}/{index}");
        match child {
            Node::Text(text) => {
                if !text.trim().is_empty() {
                    units.insert(child_path, text.clone());
                }
            }
            Node::Element(inner) => collect_units(inner, &child_path, units),
            // Expressions are opaque units: preserved, never translated.
            Node::Expression(_) => {}
        }
    }
}

fn rebuild_element(el: &Element, path: &str, translations: &IndexMap<String, String>) -> Element {
    if is_non_translatable_tag(&el.tag) {
        return el.clone();
    }

    let mut out = Element::new(el.tag.clone());
    for (name, value) in &el.attributes {
        let replacement = if is_translatable_attribute(name) {
            translations.get(&format!("{path}#{name}"))
        } else {
            None
        };
        out.attributes.insert(
            name.clone(),
            replacement.cloned().unwrap_or_else(|| value.clone()),
        );
    }

    for (index, child) in el.children.iter().enumerate() {
        let child_path = format!("{path}/{index}");
        let rebuilt = match child {
            Node::Text(text) if !text.trim().is_empty() => Node::Text(
                translations
                    .get(&child_path)
                    .cloned()
                    .unwrap_or_else(|| text.clone()),
            ),
            Node::Element(inner) => Node::Element(rebuild_element(inner, &child_path, translations)),
            other => other.clone(),
        };
        out.children.push(rebuilt);
    }
    out
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    use crate::document::{Element, Node};
    use crate::html::*;

    fn page() -> Node {
        Element::new("html")
            .child(
                Element::new("head")
                    .child(Element::new("title").text("My page").into())
                    .into(),
            )
            .child(
                Element::new("body")
                    .child(
                        Element::new("div")
                            .child(Element::new("h1").text("Welcome").into())
                            .child(
                                Element::new("img")
                                    .attr("src", "/logo.png")
                                    .attr("alt", "Company logo")
                                    .into(),
                            )
                            .into(),
                    )
                    .into(),
            )
            .into()
    }

    fn map(entries: &[(&str, &str)]) -> IndexMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_assigns_positional_keys() {
        let units = extract_units(&page());

        assert_eq!(
            units.get("head/0/0").map(String::as_str),
            Some("My page")
        );
        assert_eq!(
            units.get("body/0/0/0").map(String::as_str),
            Some("Welcome")
        );
        assert_eq!(
            units.get("body/0/1#alt").map(String::as_str),
            Some("Company logo")
        );
        assert_eq!(units.len(), 3);
    }

    #[test]
    fn test_non_html_root_uses_own_tag() {
        let tree: Node = Element::new("article")
            .attr("title", "Intro")
            .text("Read me")
            .into();

        let units = extract_units(&tree);
        assert_eq!(units.get("article#title").map(String::as_str), Some("Intro"));
        assert_eq!(units.get("article/0").map(String::as_str), Some("Read me"));
    }

    #[test]
    fn test_whitespace_only_text_emits_no_key() {
        let tree: Node = Element::new("body")
            .text("\n  ")
            .child(Element::new("br").into())
            .text("\t")
            .into();

        assert!(extract_units(&tree).is_empty());
    }

    #[test]
    fn test_script_and_style_are_skipped() {
        let tree: Node = Element::new("body")
            .child(
                Element::new("script")
                    .attr("title", "not for humans")
                    .text("var x = 'Hello';")
                    .into(),
            )
            .child(Element::new("style").text(".a { color: red }").into())
            .child(Element::new("p").text("Visible").into())
            .into();

        let units = extract_units(&tree);
        assert_eq!(units.len(), 1);
        assert_eq!(units.get("body/2/0").map(String::as_str), Some("Visible"));
    }

    #[test]
    fn test_structural_attributes_emit_no_key() {
        let tree: Node = Element::new("body")
            .child(
                Element::new("a")
                    .attr("href", "/about")
                    .attr("data-track", "nav")
                    .attr("title", "About us")
                    .text("About")
                    .into(),
            )
            .into();

        let units = extract_units(&tree);
        assert_eq!(units.len(), 2);
        assert!(units.contains_key("body/0#title"));
        assert!(units.contains_key("body/0/0"));
    }

    #[test]
    fn test_reinsert_substitutes_by_key() {
        let translated = map(&[
            ("head/0/0", "Meine Seite"),
            ("body/0/0/0", "Willkommen"),
            ("body/0/1#alt", "Firmenlogo"),
        ]);

        let localized = reinsert(&page(), &translated, "de");
        let round = extract_units(&localized);

        assert_eq!(round.get("head/0/0").map(String::as_str), Some("Meine Seite"));
        assert_eq!(round.get("body/0/0/0").map(String::as_str), Some("Willkommen"));
        assert_eq!(round.get("body/0/1#alt").map(String::as_str), Some("Firmenlogo"));
    }

    #[test]
    fn test_missing_keys_fall_back_to_source_text() {
        let translated = map(&[("body/0/0/0", "Willkommen")]);

        let localized = reinsert(&page(), &translated, "de");
        let round = extract_units(&localized);

        assert_eq!(round.get("head/0/0").map(String::as_str), Some("My page"));
        assert_eq!(
            round.get("body/0/1#alt").map(String::as_str),
            Some("Company logo")
        );
    }

    #[test]
    fn test_empty_map_preserves_structure_except_locale_stamp() {
        let original = page();
        let localized = reinsert(&original, &IndexMap::new(), "fr");

        let Node::Element(el) = &localized else {
            panic!("expected element root");
        };
        assert_eq!(el.attributes.get(LOCALE_ATTRIBUTE).map(String::as_str), Some("fr"));

        // Removing the stamp restores the original tree byte for byte.
        let mut unstamped = el.clone();
        unstamped.attributes.shift_remove(LOCALE_ATTRIBUTE);
        assert_eq!(Node::Element(unstamped), original);
    }

    #[test]
    fn test_expressions_are_preserved_untouched() {
        let tree: Node = Element::new("p")
            .text("Hello ")
            .child(Node::Expression("{name}".to_string()))
            .into();

        let units = extract_units(&tree);
        assert_eq!(units.len(), 1);

        let localized = reinsert(&tree, &map(&[("p/0", "Bonjour ")]), "fr");
        let Node::Element(el) = &localized else {
            panic!("expected element root");
        };
        assert_eq!(el.children[1], Node::Expression("{name}".to_string()));
    }

    #[test]
    fn test_text_root_passes_through() {
        let tree = Node::Text("loose".to_string());
        assert!(extract_units(&tree).is_empty());
        assert_eq!(reinsert(&tree, &IndexMap::new(), "fr"), tree);
    }
}
