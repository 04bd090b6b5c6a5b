//! Rule tree types shared between the parser and the layout engine

/// Rendering style for a terminal box
///
/// `Normal` covers terminals quoted with `"…"` or `'…'`; `Special` marks the
/// `?…?` convention used for descriptive text, which hosts render with
/// distinct styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum TerminalStyle {
    Normal,
    Special,
}

/// One node of a parsed grammar rule
///
/// Trees are built once by the parser and never mutated afterwards. `?`, `+`
/// and `*` repetition suffixes do not appear here: the parser desugars them
/// into `Choice`/`Loop` combinations before handing the tree out, so the
/// layout engine only ever sees these six shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal token, e.g. `"begin"` or `?any character?`
    Terminal { text: String, style: TerminalStyle },
    /// Reference to another rule by name
    NonTerminal(String),
    /// Zero-width placeholder (`_` in source, also the skip and loop-back
    /// paths produced by desugaring)
    Empty,
    /// Ordered concatenation (`a , b , c`)
    Sequence(Vec<Node>),
    /// Alternation in source order (`a | b | c`)
    Choice(Vec<Node>),
    /// One-or-more repetition with an explicit back path
    Loop { body: Box<Node>, back: Box<Node> },
}

impl Node {
    /// Terminal with `Normal` styling
    pub fn terminal(text: impl Into<String>) -> Self {
        Node::Terminal {
            text: text.into(),
            style: TerminalStyle::Normal,
        }
    }

    /// Terminal with `Special` styling (the `?…?` quoting convention)
    pub fn special(text: impl Into<String>) -> Self {
        Node::Terminal {
            text: text.into(),
            style: TerminalStyle::Special,
        }
    }

    pub fn non_terminal(name: impl Into<String>) -> Self {
        Node::NonTerminal(name.into())
    }

    /// One-or-more loop with an empty back path, as produced for `(x)+`
    pub fn looped(body: Node) -> Self {
        Node::Loop {
            body: Box::new(body),
            back: Box::new(Node::Empty),
        }
    }
}

/// One grammar rule: `name = rule ;`
///
/// `rule_text` is the literal rule body reconstructed during parsing with
/// insignificant whitespace removed; re-parsing it yields a tree equal to
/// `rule`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub name: String,
    pub rule: Node,
    pub rule_text: String,
}

/// A complete parsed grammar, statements in source order
#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    pub statements: Vec<Statement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_constructors() {
        assert_eq!(
            Node::terminal("a"),
            Node::Terminal {
                text: "a".to_string(),
                style: TerminalStyle::Normal
            }
        );
        assert_eq!(
            Node::special("any text"),
            Node::Terminal {
                text: "any text".to_string(),
                style: TerminalStyle::Special
            }
        );
    }

    #[test]
    fn test_looped_has_empty_back_path() {
        let node = Node::looped(Node::terminal("a"));
        match node {
            Node::Loop { body, back } => {
                assert_eq!(*body, Node::terminal("a"));
                assert_eq!(*back, Node::Empty);
            }
            other => panic!("expected loop, got {:?}", other),
        }
    }
}
