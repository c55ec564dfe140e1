use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::folded::CallPath;

#[derive(Debug, Error)]
pub enum TreeBuildError {
    #[error("no usable stack lines in trace")]
    EmptyTrace,
}

/// One call frame at one position in the aggregated tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameNode {
    pub name: String,
    /// Cumulative time attributed to this frame and everything it called.
    pub time_spent: f64,
    /// True once a stack line terminated exactly here: the time above is a
    /// direct measurement and pass-through lines no longer add to it.
    pub measured: bool,
    /// Child frames in first-encounter order; names are unique per parent.
    pub children: Vec<FrameNode>,
}

impl FrameNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            time_spent: 0.0,
            measured: false,
            children: Vec::new(),
        }
    }

    /// Child with the given name, if present.
    pub fn child(&self, name: &str) -> Option<&FrameNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Existing child by name, or a freshly inserted zero-time child.
    fn child_entry(&mut self, name: &str) -> &mut FrameNode {
        let idx = match self.children.iter().position(|c| c.name == name) {
            Some(idx) => idx,
            None => {
                self.children.push(FrameNode::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[idx]
    }
}

/// The aggregated call tree of a whole trace. The root is the first
/// distinct top-level frame encountered; its `time_spent` is the grand
/// total used to scale the layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackTree {
    root: FrameNode,
}

impl StackTree {
    /// Merge call paths into a weighted tree.
    ///
    /// Per path, the trailing time value of the final segment is parsed
    /// once and applied twice: added to every intermediate frame along the
    /// way (keyed by the segment's verbatim text) and written as the final
    /// frame's own time (keyed by the label with the value stripped).
    /// A frame whose time was written by a terminating path keeps it:
    /// later pass-through paths leave it alone, and a later terminating
    /// path replaces it outright. Paths with no segments or no parseable
    /// trailing value are skipped whole.
    pub fn from_paths(paths: &[CallPath]) -> Result<Self, TreeBuildError> {
        let mut accumulator = FrameNode::new("");

        for path in paths {
            let Some((last, ancestors)) = path.split_last() else {
                continue;
            };
            let Some((leaf_name, value)) = split_time_suffix(last) else {
                debug!("skipping stack line with unparseable tail {last:?}");
                continue;
            };

            let mut current = &mut accumulator;
            for segment in ancestors {
                current = current.child_entry(segment);
                if !current.measured {
                    current.time_spent += value;
                }
            }

            let leaf = current.child_entry(leaf_name);
            leaf.time_spent = value;
            leaf.measured = true;
        }

        if accumulator.children.len() > 1 {
            let extra: Vec<&str> = accumulator.children[1..]
                .iter()
                .map(|c| c.name.as_str())
                .collect();
            warn!("trace has multiple top-level frames; dropping {extra:?}");
        }

        match accumulator.children.into_iter().next() {
            Some(root) => Ok(Self { root }),
            None => Err(TreeBuildError::EmptyTrace),
        }
    }

    pub fn root(&self) -> &FrameNode {
        &self.root
    }

    /// Normalization denominator for proportional layout.
    pub fn total_time(&self) -> f64 {
        self.root.time_spent
    }
}

/// Split a trailing numeric suffix off a frame label.
///
/// Matches "label text, whitespace, then digits with at most one decimal
/// point, anchored at the end": `main (1) 1.04` becomes
/// `("main (1)", 1.04)`. Returns `None` when the text ends in anything
/// else. Both the leaf-naming and the time-extraction paths of the tree
/// builder go through here so they can never disagree.
pub fn split_time_suffix(text: &str) -> Option<(&str, f64)> {
    let (idx, sep) = text.char_indices().rev().find(|(_, c)| c.is_whitespace())?;
    if idx == 0 {
        return None;
    }
    let suffix = &text[idx + sep.len_utf8()..];
    if !is_plain_decimal(suffix) {
        return None;
    }
    Some((&text[..idx], suffix.parse().ok()?))
}

/// Digits, then optionally a single `.` and more digits. No signs, no
/// exponents, nothing else.
fn is_plain_decimal(text: &str) -> bool {
    let rest = text.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == text.len() {
        return false;
    }
    match rest.strip_prefix('.') {
        Some(frac) => frac.chars().all(|c| c.is_ascii_digit()),
        None => rest.is_empty(),
    }
}
