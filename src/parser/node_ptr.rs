//! Stable, thread-safe pointers to syntax nodes.

use rowan::NodeOrToken;
use text_size::TextRange;

use super::{SyntaxKind, SyntaxNode};

/// A `(kind, range)` handle to a node.
///
/// Unlike [`SyntaxNode`] it is `Send + Sync` and survives rebuilding the red
/// tree from the same green tree, so it can key caches and indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodePtr {
    kind: SyntaxKind,
    range: TextRange,
}

impl NodePtr {
    pub fn new(node: &SyntaxNode) -> Self {
        Self {
            kind: node.kind(),
            range: node.text_range(),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Find the node this pointer refers to inside `root`.
    pub fn to_node(&self, root: &SyntaxNode) -> Option<SyntaxNode> {
        if !root.text_range().contains_range(self.range) {
            return None;
        }
        let deepest = match root.covering_element(self.range) {
            NodeOrToken::Node(node) => node,
            NodeOrToken::Token(token) => token.parent()?,
        };
        deepest
            .ancestors()
            .skip_while(|node| node.text_range() != self.range)
            .take_while(|node| node.text_range() == self.range)
            .find(|node| node.kind() == self.kind)
    }
}
