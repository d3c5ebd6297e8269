//! Regex syntax tree: node type and stack-based construction from postfix.
//!
//! The postfix sequence from [`crate::postfix::to_postfix`] is scanned left
//! to right with an explicit stack of subtrees: symbols push leaves, `*`
//! pops one operand, `.` and `|` pop two (right operand first, preserving
//! the original left-to-right order). Exactly one tree must remain at the
//! end; anything else is malformed input.

use serde::Serialize;

use crate::CompileError;

/// Internal marker for the epsilon symbol in token streams. Never appears
/// in user-facing patterns, and the postfix translator emits only
/// alphanumerics and operators, so it never produces this marker either;
/// the tree builder accepts it so epsilon leaves can be built from
/// hand-assembled token sequences.
pub const EPSILON: char = '\0';

/// A node of the regex syntax tree.
///
/// A strict tree: each node owns its children exclusively, leaves carry no
/// children. Built bottom-up in a single pass over the postfix sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// A literal alphanumeric symbol.
    Symbol(char),
    /// The empty-string symbol ε.
    Epsilon,
    /// Sequential composition: left then right.
    Concat(Box<SyntaxNode>, Box<SyntaxNode>),
    /// Choice: left or right.
    Alternation(Box<SyntaxNode>, Box<SyntaxNode>),
    /// Kleene star: zero or more repetitions of the child.
    Star(Box<SyntaxNode>),
}

/// Build a syntax tree from a postfix token sequence.
///
/// # Errors
///
/// - [`CompileError::EmptyPattern`] if the sequence contains no tokens.
/// - [`CompileError::MissingOperand`] if an operator finds too few operands
///   on the stack (e.g. leading `*`, trailing `|`).
/// - [`CompileError::DanglingOperands`] if more than one subtree remains
///   after the scan (operands never joined by an operator).
pub fn build_syntax_tree(postfix: &str) -> Result<SyntaxNode, CompileError> {
    let mut stack: Vec<SyntaxNode> = Vec::new();

    for (position, token) in postfix.chars().enumerate() {
        if token.is_alphanumeric() {
            stack.push(SyntaxNode::Symbol(token));
        } else if token == EPSILON {
            stack.push(SyntaxNode::Epsilon);
        } else if token == '*' {
            let child = stack.pop().ok_or(CompileError::MissingOperand {
                operator: '*',
                position,
            })?;
            stack.push(SyntaxNode::Star(Box::new(child)));
        } else if token == '.' || token == '|' {
            // Right operand is on top of the stack.
            let right = stack.pop();
            let left = stack.pop();
            match (left, right) {
                (Some(left), Some(right)) => {
                    let node = if token == '.' {
                        SyntaxNode::Concat(Box::new(left), Box::new(right))
                    } else {
                        SyntaxNode::Alternation(Box::new(left), Box::new(right))
                    };
                    stack.push(node);
                }
                _ => {
                    return Err(CompileError::MissingOperand {
                        operator: token,
                        position,
                    })
                }
            }
        }
    }

    match stack.len() {
        0 => Err(CompileError::EmptyPattern),
        1 => Ok(stack.pop().expect("len checked above")),
        count => Err(CompileError::DanglingOperands { count }),
    }
}

/// Structural dump of a syntax tree for external visualization: preorder
/// node ids, the node's display value, and its children.
#[derive(Debug, Clone, Serialize)]
pub struct SyntaxTreeDump {
    pub id: usize,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<SyntaxTreeDump>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<SyntaxTreeDump>>,
}

impl SyntaxNode {
    /// Enumerate the tree as a nested dump with preorder node ids.
    pub fn dump(&self) -> SyntaxTreeDump {
        let mut counter = 0;
        self.dump_node(&mut counter)
    }

    fn dump_node(&self, counter: &mut usize) -> SyntaxTreeDump {
        let id = *counter;
        *counter += 1;

        let (value, left, right) = match self {
            SyntaxNode::Symbol(c) => (c.to_string(), None, None),
            SyntaxNode::Epsilon => ("ε".to_string(), None, None),
            SyntaxNode::Concat(l, r) => {
                (".".to_string(), Some(l.dump_node(counter)), Some(r.dump_node(counter)))
            }
            SyntaxNode::Alternation(l, r) => {
                ("|".to_string(), Some(l.dump_node(counter)), Some(r.dump_node(counter)))
            }
            SyntaxNode::Star(c) => ("*".to_string(), Some(c.dump_node(counter)), None),
        };

        SyntaxTreeDump {
            id,
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }
}
