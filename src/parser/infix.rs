//! Operand access for normalized infix nodes.
//!
//! Qualified aliases and remote calls keep their operator as a direct `.`
//! token child; operands are the nearest nodes on either side of it.

use super::{SyntaxElement, SyntaxKind, SyntaxNode};

/// Index of the operator token among `children`
pub fn operator_index(children: &[SyntaxElement]) -> Option<usize> {
    children.iter().position(|child| {
        child
            .as_token()
            .is_some_and(|token| token.kind() == SyntaxKind::DOT)
    })
}

/// Nearest node before the operator
pub fn left_operand(children: &[SyntaxElement], operator_index: usize) -> Option<SyntaxNode> {
    children[..operator_index]
        .iter()
        .rev()
        .find_map(|child| child.as_node().cloned())
}

/// Nearest node after the operator
pub fn right_operand(children: &[SyntaxElement], operator_index: usize) -> Option<SyntaxNode> {
    children
        .get(operator_index + 1..)?
        .iter()
        .find_map(|child| child.as_node().cloned())
}

/// Children of `node` including tokens, ready for the operand helpers
pub fn children(node: &SyntaxNode) -> Vec<SyntaxElement> {
    node.children_with_tokens().collect()
}
