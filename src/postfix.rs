//! Infix normalization and postfix translation.
//!
//! Two string-to-string passes that prepare a raw regex for tree building:
//!
//! 1. [`insert_concatenation`] makes the implicit concatenation operator
//!    explicit (`a(b|c)*d` → `a.(b|c)*.d`).
//! 2. [`to_postfix`] is the shunting-yard algorithm with regex precedence
//!    `*` (3) > `.` (2) > `|` (1), all binary operators left-associative
//!    (`a.b|c*` → `ab.c*|`).
//!
//! Parenthesis balance is checked here: both a stray `)` and a `(` that is
//! never closed are reported as [`CompileError::UnbalancedParen`]. Other
//! malformed shapes (dangling operators and the like) surface later, in the
//! tree builder.

use crate::CompileError;

/// Precedence for the binary regex operators; `(` and symbols get 0 so the
/// shunting-yard pop loop stops at them.
fn precedence(op: char) -> u8 {
    match op {
        '*' => 3,
        '.' => 2,
        '|' => 1,
        _ => 0,
    }
}

fn is_operator(c: char) -> bool {
    c == '*' || c == '.' || c == '|'
}

/// Insert the explicit concatenation operator `.` into an infix regex.
///
/// A `.` goes between adjacent tokens `A B` whenever `A` is alphanumeric,
/// `*` or `)`, and `B` is alphanumeric or `(`. No other positions change,
/// and no validation happens here — malformed input passes through and
/// fails in a later stage.
pub fn insert_concatenation(regex: &str) -> String {
    let chars: Vec<char> = regex.chars().collect();
    let mut result = String::with_capacity(chars.len() * 2);

    for (i, &curr) in chars.iter().enumerate() {
        result.push(curr);

        if let Some(&next) = chars.get(i + 1) {
            let curr_ends_atom = curr.is_alphanumeric() || curr == '*' || curr == ')';
            let next_starts_atom = next.is_alphanumeric() || next == '(';
            if curr_ends_atom && next_starts_atom {
                result.push('.');
            }
        }
    }

    result
}

/// Convert a normalized infix regex (explicit `.` concatenation) to postfix
/// token order using the shunting-yard algorithm.
///
/// - Symbols go straight to the output.
/// - `*` is a unary postfix operator and is already postfix-ordered, so it
///   goes straight to the output as well.
/// - `.` and `|` pop higher-or-equal-precedence operators before pushing.
/// - `(` is pushed; `)` pops down to the matching `(`.
///
/// # Errors
///
/// [`CompileError::UnbalancedParen`] if a `)` has no matching `(` or a `(`
/// is still on the stack at end of input. The offset is the char position
/// of the offending parenthesis in the normalized input.
pub fn to_postfix(regex: &str) -> Result<String, CompileError> {
    let mut output = String::with_capacity(regex.len());
    // Operator stack entries keep their source offset for error reporting.
    let mut operators: Vec<(char, usize)> = Vec::new();

    for (position, token) in regex.chars().enumerate() {
        if token.is_alphanumeric() {
            output.push(token);
        } else if token == '(' {
            operators.push((token, position));
        } else if token == ')' {
            loop {
                match operators.pop() {
                    Some(('(', _)) => break,
                    Some((op, _)) => output.push(op),
                    None => return Err(CompileError::UnbalancedParen { position }),
                }
            }
        } else if token == '*' {
            output.push(token);
        } else if is_operator(token) {
            while let Some(&(top, _)) = operators.last() {
                if precedence(top) >= precedence(token) {
                    output.push(top);
                    operators.pop();
                } else {
                    break;
                }
            }
            operators.push((token, position));
        }
        // Anything else (whitespace, stray bytes) is ignored here; the tree
        // builder only ever sees the tokens emitted above.
    }

    while let Some((op, position)) = operators.pop() {
        if op == '(' {
            return Err(CompileError::UnbalancedParen { position });
        }
        output.push(op);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_concatenation_adjacent_symbols() {
        assert_eq!(insert_concatenation("ab"), "a.b");
        assert_eq!(insert_concatenation("abc"), "a.b.c");
    }

    #[test]
    fn test_insert_concatenation_around_groups() {
        assert_eq!(insert_concatenation("a(b|c)*d"), "a.(b|c)*.d");
        assert_eq!(insert_concatenation("(ab)(cd)"), "(a.b).(c.d)");
    }

    #[test]
    fn test_insert_concatenation_after_star() {
        assert_eq!(insert_concatenation("a*b"), "a*.b");
        assert_eq!(insert_concatenation("a*(b)"), "a*.(b)");
    }

    #[test]
    fn test_insert_concatenation_no_insertion() {
        assert_eq!(insert_concatenation("a|b"), "a|b");
        assert_eq!(insert_concatenation("a*"), "a*");
        assert_eq!(insert_concatenation(""), "");
    }

    #[test]
    fn test_to_postfix_precedence() {
        // `.` binds tighter than `|`, `*` already postfix
        assert_eq!(to_postfix("a.b|c*").unwrap(), "ab.c*|");
    }

    #[test]
    fn test_to_postfix_grouping() {
        assert_eq!(to_postfix("a.(b|c)*.d").unwrap(), "abc|*.d.");
    }

    #[test]
    fn test_to_postfix_left_associative() {
        assert_eq!(to_postfix("a.b.c").unwrap(), "ab.c.");
        assert_eq!(to_postfix("a|b|c").unwrap(), "ab|c|");
    }

    #[test]
    fn test_to_postfix_unbalanced_close() {
        assert_eq!(
            to_postfix("a)b"),
            Err(CompileError::UnbalancedParen { position: 1 })
        );
    }

    #[test]
    fn test_to_postfix_unclosed_open() {
        assert_eq!(
            to_postfix("(a.b"),
            Err(CompileError::UnbalancedParen { position: 0 })
        );
    }

    #[test]
    fn test_to_postfix_empty() {
        assert_eq!(to_postfix("").unwrap(), "");
    }

    #[test]
    fn test_to_postfix_drops_untokenizable_chars() {
        // Only alphanumerics and operators reach the output; whitespace
        // and control characters (including the internal epsilon marker)
        // are dropped.
        assert_eq!(to_postfix("a. b").unwrap(), "ab.");
        assert_eq!(to_postfix("\0a").unwrap(), "a");
    }
}
