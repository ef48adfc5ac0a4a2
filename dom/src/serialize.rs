use std::fmt::Write;

use crate::element::is_void_element;
use crate::node::NodeData;
use crate::{Dom, NodeId};

const RAW_TEXT_PARENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

// SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#escapingString
fn escape(text: &str, attribute_mode: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\u{A0}' => escaped.push_str("&nbsp;"),
            '"' if attribute_mode => escaped.push_str("&quot;"),
            '<' if !attribute_mode => escaped.push_str("&lt;"),
            '>' if !attribute_mode => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}

impl Dom {
    // SPECLINK: https://html.spec.whatwg.org/multipage/dynamic-markup-insertion.html#dom-element-innerhtml
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut html = String::new();
        for &child in self.children(node) {
            self.serialize_node(node, child, &mut html);
        }
        html
    }

    // SPECLINK: https://html.spec.whatwg.org/multipage/dynamic-markup-insertion.html#dom-element-outerhtml
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut html = String::new();
        match self.parent(node) {
            Some(parent) => self.serialize_node(parent, node, &mut html),
            None => self.serialize_node(node, node, &mut html),
        }
        html
    }

    // SPECLINK: https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments
    fn serialize_node(&self, parent: NodeId, node: NodeId, html: &mut String) {
        match &self.node(node).data {
            NodeData::Element(element) => {
                html.push('<');
                html.push_str(&element.local_name);
                for attribute in element.attributes() {
                    let _ = write!(html, " {}=\"{}\"", attribute.name, escape(&attribute.value, true));
                }
                html.push('>');

                if is_void_element(&element.local_name) {
                    return;
                }

                for &child in self.children(node) {
                    self.serialize_node(node, child, html);
                }

                html.push_str("</");
                html.push_str(&element.local_name);
                html.push('>');
            }
            NodeData::Text(data) => {
                if self.node(parent).is_element_with_one_of_tags(RAW_TEXT_PARENTS) {
                    html.push_str(data);
                } else {
                    html.push_str(&escape(data, false));
                }
            }
            NodeData::Comment(data) => {
                let _ = write!(html, "<!--{data}-->");
            }
            NodeData::Document { .. } | NodeData::DocumentFragment | NodeData::ShadowRoot { .. } => {
                for &child in self.children(node) {
                    self.serialize_node(node, child, html);
                }
            }
        }
    }

    /// Renders the shadow-including tree under `node` as an indented outline.
    pub fn dump(&self, node: NodeId) -> String {
        let mut output = String::new();
        self.internal_dump(node, "", &mut output);
        output
    }

    fn internal_dump(&self, node: NodeId, indentation: &str, output: &mut String) {
        let indent = "  ";

        let line = match &self.node(node).data {
            NodeData::Document { .. } => "#document".to_string(),
            NodeData::DocumentFragment => "#document-fragment".to_string(),
            NodeData::ShadowRoot { mode, .. } => {
                format!("#shadow-root ({})", format!("{mode:?}").to_ascii_lowercase())
            }
            NodeData::Element(element) => {
                let mut tag = format!("<{}", element.local_name);
                for attribute in element.attributes() {
                    let _ = write!(tag, " {}=\"{}\"", attribute.name, attribute.value);
                }
                tag.push('>');
                tag
            }
            NodeData::Text(data) => {
                if data.trim().is_empty() {
                    return;
                }
                format!("#text \"{}\"", data.trim())
            }
            NodeData::Comment(data) => format!("<!-- {} -->", data.trim()),
        };
        let _ = writeln!(output, "{indentation}{line}");

        let mut child_indentation = indentation.to_string();
        child_indentation.push_str(indent);

        if let Some(shadow_root) = self.shadow_root_unchecked(node) {
            self.internal_dump(shadow_root, &child_indentation, output);
        }
        for &child in self.children(node) {
            self.internal_dump(child, &child_indentation, output);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Dom, ShadowRootMode};

    #[test]
    fn inner_html_escapes_text_and_attributes() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let div = dom.create_element(document, "div").unwrap();
        dom.set_attribute(div, "title", "a \"b\" & c").unwrap();
        let text = dom.create_text_node(document, "1 < 2 & 3 > 2");
        dom.append_child(div, text).unwrap();
        let br = dom.create_element(document, "br").unwrap();
        dom.append_child(div, br).unwrap();

        let wrapper = dom.create_element(document, "section").unwrap();
        dom.append_child(wrapper, div).unwrap();

        assert_eq!(
            dom.inner_html(wrapper),
            "<div title=\"a &quot;b&quot; &amp; c\">1 &lt; 2 &amp; 3 &gt; 2<br></div>"
        );
        assert_eq!(dom.outer_html(div), dom.inner_html(wrapper));
    }

    #[test]
    fn raw_text_is_not_escaped() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let style = dom.create_element(document, "style").unwrap();
        let css = dom.create_text_node(document, "a > b { color: red }");
        dom.append_child(style, css).unwrap();
        assert_eq!(dom.inner_html(style), "a > b { color: red }");
    }

    #[test]
    fn dump_includes_shadow_roots() {
        let mut dom = Dom::new();
        let document = dom.create_document();
        let host = dom.create_element(document, "div").unwrap();
        dom.append_child(document, host).unwrap();
        let shadow = dom.attach_shadow(host, ShadowRootMode::Open).unwrap();
        let slot = dom.create_element(document, "slot").unwrap();
        dom.append_child(shadow, slot).unwrap();
        let whitespace = dom.create_text_node(document, "\n  ");
        dom.append_child(host, whitespace).unwrap();
        let comment = dom.create_comment(document, "note");
        dom.append_child(host, comment).unwrap();

        assert_eq!(
            dom.dump(document),
            "#document\n  <div>\n    #shadow-root (open)\n      <slot>\n    <!-- note -->\n"
        );
    }
}
