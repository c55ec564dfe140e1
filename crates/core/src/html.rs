//! HTML assembly: serializes a laid-out `FlameBox` tree into one
//! self-contained document.

use crate::layout::FlameBox;

const STYLE: &str = "\
body { font-family: Verdana, sans-serif; font-size: 12px; }\n\
h1 { text-align: center; }\n\
#flamegraph { display: flex; flex-direction: column-reverse; align-items: flex-start; }\n\
.frame { display: flex; flex-direction: column-reverse; }\n\
.children { display: flex; flex-direction: row; }\n\
.label { display: block; height: 15px; line-height: 15px; margin: 1px; padding-left: 4px;\n\
  border-radius: 2px; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }\n";

/// Render the document around a laid-out graph.
///
/// The container is a `column-reverse` flex stack: the root box sits at
/// the bottom and callees climb upward, children left to right. `None`
/// (an entirely culled graph) still yields a complete page with an empty
/// container.
pub fn render_document(flame: Option<&FlameBox>) -> String {
    let mut html = String::with_capacity(1024);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Flame Graph</title>\n<style>\n");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<h1>Flame Graph</h1>\n<div id=\"flamegraph\">\n");
    if let Some(flame) = flame {
        write_box(&mut html, flame);
    }
    html.push_str("\n</div>\n</body>\n</html>\n");
    html
}

fn write_box(out: &mut String, flame: &FlameBox) {
    let label = escape_html(&flame.label);
    out.push_str(&format!(
        r#"<div class="frame" style="width:{}px">"#,
        flame.width,
    ));
    out.push_str(&format!(
        r#"<span class="label" style="background-color:{}" title="{} ({})">{}</span>"#,
        flame.color, label, flame.time_spent, label,
    ));
    if !flame.children.is_empty() {
        out.push_str(r#"<div class="children">"#);
        for child in &flame.children {
            write_box(out, child);
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
