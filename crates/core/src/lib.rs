//! flamefold-core: folded-stack traces in, flame graphs out.
//!
//! The pipeline is three pure stages plus serialization:
//! raw text → call paths ([`folded`]) → weighted tree ([`tree`]) →
//! proportional boxes ([`layout`]) → HTML document ([`html`]).
//! Each stage is usable on its own; [`render_flame_html`] composes them.

pub mod folded;
pub mod html;
pub mod layout;
pub mod tree;

use thiserror::Error;

pub use folded::{CallPath, parse_folded};
pub use layout::{FLAME_PALETTE, FlameBox, LayoutError, RenderContext, RenderOptions, layout_tree};
pub use tree::{FrameNode, StackTree, TreeBuildError};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("tree: {0}")]
    Tree(#[from] TreeBuildError),
    #[error("layout: {0}")]
    Layout(#[from] LayoutError),
}

/// Run the whole pipeline over one trace.
///
/// Malformed lines are tolerated and skipped; a trace with no usable
/// lines at all, or whose root frame recorded zero time, is refused.
pub fn render_flame_html(text: &str, options: &RenderOptions) -> Result<String, RenderError> {
    let paths = folded::parse_folded(text);
    let tree = StackTree::from_paths(&paths)?;
    let ctx = RenderContext::new(tree.total_time(), options);
    let flame = layout_tree(tree.root(), &ctx)?;
    Ok(html::render_document(flame.as_ref()))
}
