//! ShaderToy embed rewriting.
//!
//! Prose and code cells may carry plain ShaderToy references, either a view
//! URL (`https://www.shadertoy.com/view/XdS3Dc`) or a shorthand marker
//! (`[shader:XdS3Dc]`). The rewrite pass replaces each reference with a live
//! embed iframe while leaving the surrounding text intact.

use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

use crate::utils;

const EMBED_CONTAINER_CLASS: &str = "shadertoy-embed-container";

/// One piece of a scanned text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, passed through untouched.
    Text(String),
    /// A reference to the shader with this id.
    Embed(String),
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Matches a view URL starting at `text[pos..]`, returning the shader id and
/// the matched length. The optional query string is consumed but ignored.
fn match_view_url(text: &str, pos: usize) -> Option<(String, usize)> {
    let rest = &text[pos..];
    let after_scheme = rest
        .strip_prefix("https://")
        .or_else(|| rest.strip_prefix("http://"))?;
    let after_host = after_scheme
        .strip_prefix("www.shadertoy.com/view/")
        .or_else(|| after_scheme.strip_prefix("shadertoy.com/view/"))?;
    let id: String = after_host.chars().take_while(|c| is_id_char(*c)).collect();
    if id.is_empty() {
        return None;
    }
    let mut len = rest.len() - after_host.len() + id.len();
    if rest[len..].starts_with('?') {
        len += rest[len..]
            .find(char::is_whitespace)
            .unwrap_or(rest.len() - len);
    }
    Some((id, len))
}

/// Matches a `[shader:ID]` or `[shadertoy:ID]` marker at `text[pos..]`.
fn match_marker(text: &str, pos: usize) -> Option<(String, usize)> {
    let rest = &text[pos..];
    let after_tag = rest
        .strip_prefix("[shadertoy:")
        .or_else(|| rest.strip_prefix("[shader:"))?;
    let id: String = after_tag.chars().take_while(|c| is_id_char(*c)).collect();
    if id.is_empty() || !after_tag[id.len()..].starts_with(']') {
        return None;
    }
    Some((id.clone(), rest.len() - after_tag.len() + id.len() + 1))
}

/// Splits a text run into literal fragments and shader references, in order.
/// Text with no references comes back as a single `Text` segment.
pub fn parse_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut pos = 0;
    while pos < text.len() {
        if !text.is_char_boundary(pos) {
            pos += 1;
            continue;
        }
        let matched = match_view_url(text, pos).or_else(|| match_marker(text, pos));
        if let Some((id, len)) = matched {
            if literal_start < pos {
                segments.push(Segment::Text(text[literal_start..pos].to_string()));
            }
            segments.push(Segment::Embed(id));
            pos += len;
            literal_start = pos;
        } else {
            pos += 1;
        }
    }
    if literal_start < text.len() {
        segments.push(Segment::Text(text[literal_start..].to_string()));
    }
    segments
}

/// Whether `text` carries at least one shader reference.
pub fn has_embed_refs(text: &str) -> bool {
    parse_segments(text)
        .iter()
        .any(|s| matches!(s, Segment::Embed(_)))
}

/// The shader id when the trimmed text is exactly one reference and nothing
/// else. Code cells holding a bare URL are replaced wholesale.
pub fn bare_shader_id(text: &str) -> Option<String> {
    match parse_segments(text.trim()).as_slice() {
        [Segment::Embed(id)] => Some(id.clone()),
        _ => None,
    }
}

/// The iframe src for a shader id.
pub fn embed_src(id: &str) -> String {
    format!("https://www.shadertoy.com/embed/{id}?gui=true&t=10&paused=false&muted=false")
}

/// Rewrites every shader reference under `body`. Idempotent: the embed
/// containers it produces are skipped on later passes.
pub fn rewrite_all() {
    let Some(doc) = utils::document() else {
        return;
    };
    let Some(body) = doc.body() else {
        return;
    };

    // 代码块里只有一个裸链接时整块替换
    for element in utils::query_all("pre, code") {
        if in_embed_container(&element) || element.query_selector("iframe").is_ok_and(|i| i.is_some())
        {
            continue;
        }
        let Some(id) = element.text_content().as_deref().and_then(bare_shader_id) else {
            continue;
        };
        let target = element
            .closest("figure.highlight, .code-block-container")
            .ok()
            .flatten()
            .unwrap_or(element);
        if let Some(container) = build_container(&id) {
            if let Some(parent) = target.parent_node() {
                let _ = parent.replace_child(&container, &target);
            }
        }
    }

    // 正文文本节点按片段切开，引用处插 iframe
    let mut text_nodes = Vec::new();
    collect_text_nodes(body.as_ref(), &mut text_nodes);
    for node in text_nodes {
        let text = node.text_content().unwrap_or_default();
        let segments = parse_segments(&text);
        if !segments.iter().any(|s| matches!(s, Segment::Embed(_))) {
            continue;
        }
        let Some(parent) = node.parent_node() else {
            continue;
        };
        for segment in segments {
            match segment {
                Segment::Text(literal) => {
                    let fragment = doc.create_text_node(&literal);
                    let _ = parent.insert_before(&fragment, Some(&node));
                },
                Segment::Embed(id) => {
                    if let Some(container) = build_container(&id) {
                        let _ = parent.insert_before(&container, Some(&node));
                    }
                },
            }
        }
        let _ = parent.remove_child(&node);
    }
}

fn in_embed_container(element: &Element) -> bool {
    matches!(
        element.closest(&format!(".{EMBED_CONTAINER_CLASS}")),
        Ok(Some(_))
    )
}

/// Depth-first collection of text nodes, skipping subtrees that never carry
/// prose references (scripts, styles, live embeds).
fn collect_text_nodes(node: &Node, out: &mut Vec<Node>) {
    if let Some(element) = node.dyn_ref::<Element>() {
        let tag = element.tag_name();
        if matches!(
            tag.as_str(),
            "SCRIPT" | "STYLE" | "NOSCRIPT" | "IFRAME" | "CANVAS" | "TEXTAREA"
        ) || element.class_list().contains(EMBED_CONTAINER_CLASS)
        {
            return;
        }
    }
    let children = node.child_nodes();
    for index in 0..children.length() {
        let Some(child) = children.item(index) else {
            continue;
        };
        match child.node_type() {
            Node::TEXT_NODE => {
                if child
                    .text_content()
                    .as_deref()
                    .is_some_and(has_embed_refs)
                {
                    out.push(child);
                }
            },
            Node::ELEMENT_NODE => collect_text_nodes(&child, out),
            _ => {},
        }
    }
}

fn build_container(id: &str) -> Option<Element> {
    let doc = utils::document()?;
    let container = doc.create_element("div").ok()?;
    container.set_class_name(EMBED_CONTAINER_CLASS);
    let iframe = doc.create_element("iframe").ok()?;
    let _ = iframe.set_attribute("src", &embed_src(id));
    let _ = iframe.set_attribute("frameborder", "0");
    let _ = iframe.set_attribute("allowfullscreen", "");
    let _ = iframe.set_attribute("loading", "lazy");
    let _ = iframe.set_attribute(
        "style",
        "width: 100%; height: 400px; border: none; border-radius: 8px;",
    );
    container.append_child(&iframe).ok()?;
    Some(container)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_urls_are_recognized_with_and_without_www() {
        assert_eq!(
            parse_segments("https://www.shadertoy.com/view/XdS3Dc"),
            vec![Segment::Embed("XdS3Dc".to_string())]
        );
        assert_eq!(
            parse_segments("http://shadertoy.com/view/ltfGzS"),
            vec![Segment::Embed("ltfGzS".to_string())]
        );
    }

    #[test]
    fn query_strings_are_consumed_with_the_url() {
        assert_eq!(
            parse_segments("see https://www.shadertoy.com/view/XdS3Dc?gui=true here"),
            vec![
                Segment::Text("see ".to_string()),
                Segment::Embed("XdS3Dc".to_string()),
                Segment::Text(" here".to_string()),
            ]
        );
    }

    #[test]
    fn markers_in_both_spellings_are_recognized() {
        assert_eq!(
            parse_segments("[shader:abc123]"),
            vec![Segment::Embed("abc123".to_string())]
        );
        assert_eq!(
            parse_segments("x [shadertoy:abc123] y"),
            vec![
                Segment::Text("x ".to_string()),
                Segment::Embed("abc123".to_string()),
                Segment::Text(" y".to_string()),
            ]
        );
    }

    #[test]
    fn malformed_markers_stay_literal() {
        assert_eq!(
            parse_segments("[shader:]"),
            vec![Segment::Text("[shader:]".to_string())]
        );
        assert_eq!(
            parse_segments("[shader:abc"),
            vec![Segment::Text("[shader:abc".to_string())]
        );
        assert!(!has_embed_refs("shadertoy.com/view/XdS3Dc"));
    }

    #[test]
    fn multiple_references_split_the_run_in_order() {
        let segments = parse_segments(
            "a https://www.shadertoy.com/view/AAA111 b [shader:BBB222] c",
        );
        assert_eq!(
            segments,
            vec![
                Segment::Text("a ".to_string()),
                Segment::Embed("AAA111".to_string()),
                Segment::Text(" b ".to_string()),
                Segment::Embed("BBB222".to_string()),
                Segment::Text(" c".to_string()),
            ]
        );
    }

    #[test]
    fn bare_urls_are_detected_only_when_alone() {
        assert_eq!(
            bare_shader_id("  https://www.shadertoy.com/view/XdS3Dc\n"),
            Some("XdS3Dc".to_string())
        );
        assert_eq!(bare_shader_id("see https://www.shadertoy.com/view/XdS3Dc"), None);
        assert_eq!(bare_shader_id("plain text"), None);
    }

    #[test]
    fn embed_src_carries_the_player_parameters() {
        assert_eq!(
            embed_src("XdS3Dc"),
            "https://www.shadertoy.com/embed/XdS3Dc?gui=true&t=10&paused=false&muted=false"
        );
    }
}
