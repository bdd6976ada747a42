use std::fmt::Write;

use crate::document::Document;
use crate::types::{NodeKey, NodeKind};

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

pub fn first_styles(style: &[(String, String)]) -> String {
    let mut out = String::new();
    for (i, (k, v)) in style.iter().take(3).enumerate() {
        if i != 0 {
            out.push(' ');
        }
        let _ = write!(&mut out, r#"{k}: {v};"#);
    }
    out
}

fn push_preview(out: &mut String, s: &str) {
    for (i, ch) in s.chars().enumerate() {
        if i == PREVIEW_CHARS {
            out.push('…');
            break;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
}

/// One line per node, indented by depth; at most `cap` lines.
pub(crate) fn outline(doc: &Document, root: NodeKey, cap: usize) -> Vec<String> {
    fn walk(doc: &Document, key: NodeKey, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        let Ok(record) = doc.record(key) else {
            return;
        };
        let mut line = INDENT_STEP.repeat(depth);
        match &record.kind {
            NodeKind::Document => line.push_str("#document"),
            NodeKind::Element(element) => {
                line.push('<');
                line.push_str(&element.name);
                for attr in ["id", "class"] {
                    if let Some(v) = element.attribute(attr).filter(|v| !v.is_empty()) {
                        let _ = write!(&mut line, r#" {attr}="{v}""#);
                    }
                }
                line.push('>');
                let styles = first_styles(&element.style);
                if !styles.is_empty() {
                    let _ = write!(&mut line, "  /* {styles} */");
                }
            }
            NodeKind::Text { text } => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return;
                }
                line.push('"');
                push_preview(&mut line, trimmed);
                line.push('"');
            }
            NodeKind::Markup { html } => {
                line.push_str("#markup ");
                push_preview(&mut line, html.trim());
            }
        }
        *left -= 1;
        out.push(line);
        for &child in &record.children {
            walk(doc, child, depth + 1, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(doc, root, 0, &mut out, &mut left);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_shows_id_class_style_and_text() {
        let mut doc = Document::new();
        let div = doc.create_element("div").unwrap();
        doc.append_child(doc.body(), div).unwrap();
        doc.set_attribute(div, "id", "main").unwrap();
        doc.set_attribute(div, "class", "card").unwrap();
        doc.set_style(div, "color", "red").unwrap();
        doc.set_text_content(div, "  hello\nworld ").unwrap();

        assert_eq!(
            doc.outline(usize::MAX),
            vec![
                "#document".to_string(),
                "  <body>".to_string(),
                r#"    <div id="main" class="card">  /* color: red; */"#.to_string(),
                r#"      "hello world""#.to_string(),
            ]
        );
    }

    #[test]
    fn outline_respects_cap_and_truncates_previews() {
        let mut doc = Document::new();
        let p = doc.create_element("p").unwrap();
        doc.append_child(doc.body(), p).unwrap();
        doc.set_inner_html(p, &"x".repeat(50)).unwrap();

        let full = doc.outline(usize::MAX);
        assert_eq!(full[3], format!("      #markup {}…", "x".repeat(40)));
        assert_eq!(doc.outline(2).len(), 2);
    }
}
