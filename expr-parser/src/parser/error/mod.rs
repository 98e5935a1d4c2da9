pub mod kind;

use crate::{parser::ast::Node, tokenizer::tokenize_complete};
pub use expr_error::Error;

/// Converts a byte offset into `source` to a character offset, which is what reports use.
fn char_offset(source: &str, byte_offset: usize) -> usize {
    source
        .char_indices()
        .take_while(|(i, _)| *i < byte_offset)
        .count()
}

/// Builds an [`Error`] for every [`Node::Error`] reachable from `tree`.
///
/// `source` must be the whitespace-stripped text the tree was parsed from (see
/// [`strip_whitespace`](super::strip_whitespace)), since that is what the stored offsets index.
pub fn parse_errors(tree: &Node, indeterminate: &str, source: &str) -> Vec<Error> {
    tree.error_offsets()
        .into_iter()
        .map(|offset| {
            let start = char_offset(source, offset);
            let token = tokenize_complete(source.get(offset..).unwrap_or_default())
                .first()
                .map(|token| token.lexeme.to_string());

            match token {
                Some(found) => Error::new(
                    vec![start..start + found.chars().count()],
                    kind::UnexpectedInput {
                        found,
                        indeterminate: indeterminate.to_string(),
                    },
                ),
                None => Error::new(vec![start..start], kind::UnexpectedEof),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, strip_whitespace};

    #[test]
    fn no_errors() {
        let tree = parse("x", "x + 1");
        assert!(parse_errors(&tree, "x", "x+1").is_empty());
    }

    #[test]
    fn unexpected_eof() {
        let tree = parse("x", "sin(");
        let errors = parse_errors(&tree, "x", "sin(");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].downcast_kind::<kind::UnexpectedEof>().is_some());
        assert_eq!(errors[0].spans, vec![4..4]);
    }

    #[test]
    fn unexpected_name() {
        let source = strip_whitespace("2 * y");
        let tree = parse("x", &source);
        let errors = parse_errors(&tree, "x", &source);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].downcast_kind::<kind::UnexpectedInput>(),
            Some(&kind::UnexpectedInput { found: "y".to_string(), indeterminate: "x".to_string() }),
        );
        assert_eq!(errors[0].spans, vec![2..3]);
    }

    #[test]
    fn offsets_after_wide_characters() {
        let source = "2×$";
        let tree = parse("x", source);
        assert_eq!(tree.error_offsets(), vec![3]);
        let errors = parse_errors(&tree, "x", source);
        assert_eq!(errors[0].spans, vec![2..3]);
    }
}
