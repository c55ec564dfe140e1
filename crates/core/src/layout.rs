use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tree::FrameNode;

/// Fill colors cycled across stack depths. Purely cosmetic.
pub const FLAME_PALETTE: [&str; 5] = ["#9b2948", "#ff7251", "#ffca7b", "#ffcd74", "#ffedbf"];

pub const DEFAULT_WIDTH_BUDGET: u32 = 2000;
pub const DEFAULT_MIN_VISIBLE_WIDTH: u32 = 5;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("root frame has zero total time; widths cannot be scaled")]
    ZeroTotalTime,
}

/// Tunable knobs of the layout pass.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Horizontal budget for the whole graph, in pixels.
    pub width_budget: u32,
    /// Boxes whose allocated width does not exceed this are not emitted.
    pub min_visible_width: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width_budget: DEFAULT_WIDTH_BUDGET,
            min_visible_width: DEFAULT_MIN_VISIBLE_WIDTH,
        }
    }
}

/// Everything the recursive layout needs, threaded explicitly through
/// every call.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub total_time: f64,
    pub width_budget: u32,
    pub min_visible_width: u32,
    pub palette: &'a [&'a str],
}

impl<'a> RenderContext<'a> {
    pub fn new(total_time: f64, options: &RenderOptions) -> Self {
        Self {
            total_time,
            width_budget: options.width_budget,
            min_visible_width: options.min_visible_width,
            palette: &FLAME_PALETTE,
        }
    }
}

/// One positioned block of the flame graph, nesting its visible children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlameBox {
    pub label: String,
    pub time_spent: f64,
    /// Allocated width in pixels: `floor(budget * time / total)`. May
    /// exceed the budget, since per-frame times are not normalized
    /// against the root and widths are never clamped.
    pub width: u64,
    pub depth: u32,
    /// A palette entry; carries no meaning and never affects layout.
    pub color: String,
    pub children: Vec<FlameBox>,
}

/// Lay out a call tree as nested proportional boxes.
///
/// Returns `Ok(None)` when even the root falls below the visibility
/// cutoff. The tree is never mutated; apart from the palette cycling the
/// output is a pure function of tree and context.
pub fn layout_tree(root: &FrameNode, ctx: &RenderContext) -> Result<Option<FlameBox>, LayoutError> {
    if ctx.total_time <= 0.0 {
        return Err(LayoutError::ZeroTotalTime);
    }
    Ok(layout_node(root, 0, ctx))
}

fn layout_node(node: &FrameNode, depth: u32, ctx: &RenderContext) -> Option<FlameBox> {
    let width = allocated_width(node.time_spent, ctx);
    if width <= u64::from(ctx.min_visible_width) {
        return None;
    }

    let children = node
        .children
        .iter()
        .filter_map(|child| layout_node(child, depth + 1, ctx))
        .collect();

    Some(FlameBox {
        label: node.name.clone(),
        time_spent: node.time_spent,
        width,
        depth,
        color: ctx.palette[depth as usize % ctx.palette.len()].to_string(),
        children,
    })
}

fn allocated_width(time_spent: f64, ctx: &RenderContext) -> u64 {
    (f64::from(ctx.width_budget) * time_spent / ctx.total_time).floor() as u64
}
