//! End-to-end test: feed a real folded-stack trace through parse, tree
//! build, layout, and document assembly, and check the structural
//! contract (aggregated times, proportional widths, culling).

use flamefold_core::{
    RenderContext, RenderError, RenderOptions, StackTree, layout_tree, parse_folded,
    render_flame_html,
};

const TRACE: &str = "\
main (1) 1.04
main (1);Array#map (1) 4.52
main (1);Array#map (1);Integer#- (500) 25.35
main (1);puts (1) 3.09
";

fn options(width_budget: u32) -> RenderOptions {
    RenderOptions {
        width_budget,
        ..RenderOptions::default()
    }
}

#[test]
fn aggregates_the_sample_trace() {
    let tree = StackTree::from_paths(&parse_folded(TRACE)).unwrap();

    let root = tree.root();
    assert_eq!(root.name, "main (1)");
    assert_eq!(root.time_spent, 1.04);
    assert_eq!(tree.total_time(), 1.04);

    let map = root.child("Array#map (1)").unwrap();
    assert_eq!(map.time_spent, 4.52);
    assert_eq!(map.child("Integer#- (500)").unwrap().time_spent, 25.35);

    let puts = root.child("puts (1)").unwrap();
    assert_eq!(puts.time_spent, 3.09);
    assert!(puts.children.is_empty());
}

#[test]
fn lays_out_the_sample_trace_without_clamping() {
    let tree = StackTree::from_paths(&parse_folded(TRACE)).unwrap();
    let ctx = RenderContext::new(tree.total_time(), &options(1000));
    let flame = layout_tree(tree.root(), &ctx).unwrap().unwrap();

    assert_eq!(flame.width, 1000);
    let widths: Vec<u64> = flame.children.iter().map(|c| c.width).collect();
    // floor(1000 * 4.52 / 1.04) and floor(1000 * 3.09 / 1.04): children
    // overflow the budget because times are not normalized to the root.
    assert_eq!(widths, [4346, 2971]);
    assert_eq!(flame.children[0].children[0].width, 24375);
}

#[test]
fn renders_the_sample_trace_to_html() {
    let html = render_flame_html(TRACE, &options(1000)).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("main (1)"));
    assert!(html.contains("Array#map (1)"));
    assert!(html.contains("width:1000px"));
    assert!(html.contains("width:4346px"));
}

#[test]
fn culls_frames_below_the_visible_minimum() {
    let trace = format!("{TRACE}main (1);blip (1) 0.001\n");
    let html = render_flame_html(&trace, &options(1000)).unwrap();
    // floor(1000 * 0.001 / 1.04) = 0: the frame never reaches the page.
    assert!(!html.contains("blip"));
}

#[test]
fn thread_markers_never_reach_the_output() {
    let trace = "Thread:70366422536620;main (1) 1.04\nThread:70366422536620;main (1);work (1) 0.52\n";
    let html = render_flame_html(trace, &options(1000)).unwrap();
    assert!(!html.contains("Thread:"));
    assert!(html.contains("main (1)"));
    assert!(html.contains("work (1)"));
}

#[test]
fn empty_trace_is_refused() {
    assert!(matches!(
        render_flame_html("", &RenderOptions::default()),
        Err(RenderError::Tree(_)),
    ));
    // Lines that are nothing but execution-context markers count as empty.
    assert!(matches!(
        render_flame_html("Thread:1 1.0\nFiber:2 2.0\n", &RenderOptions::default()),
        Err(RenderError::Tree(_)),
    ));
}

#[test]
fn zero_total_time_is_refused() {
    assert!(matches!(
        render_flame_html("main 0\n", &RenderOptions::default()),
        Err(RenderError::Layout(_)),
    ));
}

#[test]
fn flame_boxes_serialize() {
    let tree = StackTree::from_paths(&parse_folded(TRACE)).unwrap();
    let ctx = RenderContext::new(tree.total_time(), &options(1000));
    let flame = layout_tree(tree.root(), &ctx).unwrap().unwrap();

    let json = serde_json::to_string(&flame).unwrap();
    let back: flamefold_core::FlameBox = serde_json::from_str(&json).unwrap();
    assert_eq!(back.label, "main (1)");
    assert_eq!(back.children.len(), 2);
}
