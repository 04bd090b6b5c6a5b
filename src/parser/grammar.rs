//! Parser implementation using chumsky
//!
//! The grammar is parsed character by character rather than through a
//! separate lexer: the `?…?` quoting convention and the `?` repetition
//! suffix share a leading character, and only the surrounding context (term
//! position vs. immediately after a closing parenthesis) decides which one
//! applies. A maximal-munch tokenizer gets this wrong, so each term parser
//! dispatches on the character it sees.
//!
//! Every sub-parser yields the constructed [`Node`] together with the
//! literal text it covered, reassembled without insignificant whitespace.
//! Joining term literals with the run operator reconstructs the canonical
//! rule body, which re-parses to an identical tree.

use chumsky::prelude::*;

use crate::error::ParseError;
use crate::parser::ast::{Grammar, Node, Statement, TerminalStyle};

type Extra<'a> = extra::Err<Rich<'a, char>>;

/// Parse a complete grammar: one or more `name = rule ;` statements
pub fn parse(input: &str) -> Result<Grammar, Vec<ParseError>> {
    let mut statements = Vec::new();
    let mut offset = 0;
    while !input[offset..].trim_start().is_empty() {
        let (stmt, consumed) = parse_statement(&input[offset..]).map_err(|errs| {
            errs.into_iter()
                .map(|e| e.shifted(offset))
                .collect::<Vec<_>>()
        })?;
        statements.push(stmt);
        offset += consumed;
    }
    Ok(Grammar { statements })
}

/// Parse a single statement off the front of `input`
///
/// Returns the statement and the number of bytes consumed (up to and
/// including the terminating `;`), so the caller can advance through the
/// grammar one statement at a time. Error spans are relative to `input`.
pub fn parse_statement(input: &str) -> Result<(Statement, usize), Vec<ParseError>> {
    statement_parser()
        .map_with(|stmt, e| (stmt, span_range(&e.span()).end))
        // Swallow whatever follows this statement; the caller re-enters at
        // the consumed offset, so later statements are parsed on their own.
        .then_ignore(any().repeated())
        .parse(input)
        .into_result()
        .map_err(|errs| errs.into_iter().map(ParseError::from).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn statement_parser<'a>() -> impl Parser<'a, &'a str, Statement, Extra<'a>> {
    text::whitespace()
        .ignore_then(identifier())
        .then_ignore(text::whitespace().then(just('=')))
        .then(rule_parser())
        .then_ignore(text::whitespace().then(just(';')))
        .map(|(name, (rule, rule_text))| Statement {
            name,
            rule,
            rule_text,
        })
}

/// `[A-Za-z0-9][A-Za-z0-9_]*` — digit-leading rule names are legal
fn identifier<'a>() -> impl Parser<'a, &'a str, String, Extra<'a>> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_alphanumeric())
        .then(
            any()
                .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
                .repeated()
                .collect::<String>(),
        )
        .map(|(head, tail)| {
            let mut name = String::with_capacity(tail.len() + 1);
            name.push(head);
            name.push_str(&tail);
            name
        })
        .labelled("identifier")
}

/// Quoted terminal: `"…"` and `'…'` are normal, `?…?` is special
///
/// An unterminated quote simply fails to match here; the term alternation
/// then reports a generic syntax error at the opening character.
fn quoted<'a>() -> impl Parser<'a, &'a str, (Node, String), Extra<'a>> + Clone {
    let delimited = |delim: char, style: TerminalStyle| {
        none_of(delim)
            .repeated()
            .collect::<String>()
            .delimited_by(just(delim), just(delim))
            .map(move |text| {
                let literal = format!("{delim}{text}{delim}");
                (Node::Terminal { text, style }, literal)
            })
    };

    choice((
        delimited('"', TerminalStyle::Normal),
        delimited('\'', TerminalStyle::Normal),
        delimited('?', TerminalStyle::Special),
    ))
    .labelled("quoted terminal")
}

/// A rule body: terms joined by a single consistent operator
///
/// The first operator seen fixes the operator for the whole run. A run
/// ends (without error) at the other operator, leaving it for the caller;
/// mixing operators at one level is only possible through explicit
/// grouping. A lone term is returned unwrapped.
fn rule_parser<'a>() -> impl Parser<'a, &'a str, (Node, String), Extra<'a>> + Clone {
    recursive(|rule| {
        // `( rule )` with an optional repetition suffix. The suffix must
        // follow the closing parenthesis immediately: whitespace detaches
        // it, because the suffix inspection is a single-character check,
        // not a whitespace-stripping sub-parse.
        let group = rule
            .delimited_by(just('('), text::whitespace().then(just(')')))
            .then(one_of("*+?").or_not())
            .map(|((node, text), suffix)| desugar(node, text, suffix));

        let empty_mark = just('_').map(|_| (Node::Empty, "_".to_string()));

        let non_terminal = identifier().map(|name| {
            let literal = name.clone();
            (Node::NonTerminal(name), literal)
        });

        // Term dispatch on the leading character; the alternatives have
        // disjoint first characters, so the order only shapes error output.
        let term = text::whitespace()
            .ignore_then(choice((group, quoted(), empty_mark, non_terminal)));

        // The first term is parsed exactly once; the tail alternatives
        // below commit or fail on the single operator character that
        // follows it, so nested groups cost work linear in depth. A tail
        // stops (without consuming) at the other operator, ending the run.
        let tail = |op: char, build: fn(Vec<Node>) -> Node| {
            text::whitespace()
                .ignore_then(just(op))
                .ignore_then(term.clone())
                .repeated()
                .at_least(1)
                .collect::<Vec<_>>()
                .map(move |rest| (op, build, rest))
        };

        term.clone()
            .then(choice((tail('|', Node::Choice), tail(',', Node::Sequence))).or_not())
            .map(|((first, first_text), run)| match run {
                None => (first, first_text),
                Some((op, build, rest)) => {
                    let mut nodes = Vec::with_capacity(rest.len() + 1);
                    let mut text = first_text;
                    nodes.push(first);
                    for (node, term_text) in rest {
                        text.push(op);
                        text.push_str(&term_text);
                        nodes.push(node);
                    }
                    (build(nodes), text)
                }
            })
    })
}

/// Expand a repetition suffix into the primitive tree shapes
///
/// `?` → skippable, `+` → one-or-more loop, `*` → skippable loop. A bare
/// group is transparent: the inner node passes through unchanged.
fn desugar(node: Node, text: String, suffix: Option<char>) -> (Node, String) {
    match suffix {
        None => (node, format!("({text})")),
        Some('?') => (
            Node::Choice(vec![node, Node::Empty]),
            format!("({text})?"),
        ),
        Some('+') => (Node::looped(node), format!("({text})+")),
        Some('*') => (
            Node::Choice(vec![Node::Empty, Node::looped(node)]),
            format!("({text})*"),
        ),
        Some(other) => unreachable!("suffix parser only yields * + ?, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_one(input: &str) -> Statement {
        let (stmt, _) = parse_statement(input).expect("should parse");
        stmt
    }

    #[test]
    fn test_sequence_of_terminals() {
        let stmt = parse_one(r#"S = "a", "b";"#);
        assert_eq!(stmt.name, "S");
        assert_eq!(
            stmt.rule,
            Node::Sequence(vec![Node::terminal("a"), Node::terminal("b")])
        );
        assert_eq!(stmt.rule_text, r#""a","b""#);
    }

    #[test]
    fn test_choice_of_terminals() {
        let stmt = parse_one(r#"S = "a" | "b" | "c";"#);
        assert_eq!(
            stmt.rule,
            Node::Choice(vec![
                Node::terminal("a"),
                Node::terminal("b"),
                Node::terminal("c"),
            ])
        );
        assert_eq!(stmt.rule_text, r#""a"|"b"|"c""#);
    }

    #[test]
    fn test_single_term_is_unwrapped() {
        let stmt = parse_one("S = other;");
        assert_eq!(stmt.rule, Node::non_terminal("other"));
        assert_eq!(stmt.rule_text, "other");
    }

    #[test]
    fn test_quoting_conventions() {
        let stmt = parse_one(r#"S = "a" | 'b' | ?any char?;"#);
        assert_eq!(
            stmt.rule,
            Node::Choice(vec![
                Node::terminal("a"),
                Node::terminal("b"),
                Node::special("any char"),
            ])
        );
        assert_eq!(stmt.rule_text, r#""a"|'b'|?any char?"#);
    }

    #[test]
    fn test_underscore_is_empty() {
        let stmt = parse_one("S = _ | x;");
        assert_eq!(
            stmt.rule,
            Node::Choice(vec![Node::Empty, Node::non_terminal("x")])
        );
    }

    #[test]
    fn test_digit_leading_identifier() {
        let stmt = parse_one("2fa = code;");
        assert_eq!(stmt.name, "2fa");
    }

    #[test]
    fn test_grouping_is_transparent() {
        let stmt = parse_one("S = (a);");
        assert_eq!(stmt.rule, Node::non_terminal("a"));
        assert_eq!(stmt.rule_text, "(a)");
    }

    #[test]
    fn test_optional_suffix_desugars_to_choice() {
        let stmt = parse_one("S = (a)?;");
        assert_eq!(
            stmt.rule,
            Node::Choice(vec![Node::non_terminal("a"), Node::Empty])
        );
        assert_eq!(stmt.rule_text, "(a)?");
    }

    #[test]
    fn test_plus_suffix_desugars_to_loop() {
        let stmt = parse_one("S = (a)+;");
        assert_eq!(stmt.rule, Node::looped(Node::non_terminal("a")));
    }

    #[test]
    fn test_star_suffix_desugars_to_skippable_loop() {
        let stmt = parse_one(r#"S = ("a")*;"#);
        assert_eq!(
            stmt.rule,
            Node::Choice(vec![Node::Empty, Node::looped(Node::terminal("a"))])
        );
        assert_eq!(stmt.rule_text, r#"("a")*"#);
    }

    #[test]
    fn test_suffix_must_follow_parenthesis_immediately() {
        // `(a) ?` is a bare group followed by stray text, not an optional
        assert!(parse_statement("S = (a) ?;").is_err());
    }

    #[test]
    fn test_grouped_choice_inside_sequence() {
        let stmt = parse_one("S = (A | B) , C;");
        assert_eq!(
            stmt.rule,
            Node::Sequence(vec![
                Node::Choice(vec![Node::non_terminal("A"), Node::non_terminal("B")]),
                Node::non_terminal("C"),
            ])
        );
        assert_eq!(stmt.rule_text, "(A|B),C");
    }

    #[test]
    fn test_mixed_operators_without_grouping_fail() {
        // The `|` run ends at `,`, which then trips the `;` requirement
        assert!(parse_statement("S = a | b , c;").is_err());
        assert!(parse_statement("S = a , b | c;").is_err());
    }

    #[test]
    fn test_missing_semicolon() {
        let errs = parse_statement(r#"S = "a" | "b""#).unwrap_err();
        assert!(errs
            .iter()
            .any(|e| e.to_string().contains("';' expected")));
    }

    #[test]
    fn test_missing_equals() {
        assert!(parse_statement("S \"a\";").is_err());
    }

    #[test]
    fn test_unmatched_parenthesis() {
        assert!(parse_statement("S = (a;").is_err());
    }

    #[test]
    fn test_unterminated_quote() {
        assert!(parse_statement(r#"S = "a;"#).is_err());
    }

    #[test]
    fn test_unrecognized_leading_character() {
        assert!(parse_statement("S = @;").is_err());
    }

    #[test]
    fn test_whitespace_is_insignificant() {
        let compact = parse_one("S=(A|B),C;");
        let spaced = parse_one("S\t=\n ( A |\r\n B ) ,\n C ;");
        assert_eq!(compact.rule, spaced.rule);
        assert_eq!(compact.rule_text, spaced.rule_text);
    }

    #[test]
    fn test_consumed_length_covers_semicolon() {
        let input = "S = a; T = b;";
        let (stmt, consumed) = parse_statement(input).expect("should parse");
        assert_eq!(stmt.name, "S");
        assert_eq!(&input[..consumed], "S = a;");
    }

    #[test]
    fn test_parse_whole_grammar() {
        let grammar = parse("A = x; B = y | z;").expect("should parse");
        assert_eq!(grammar.statements.len(), 2);
        assert_eq!(grammar.statements[0].name, "A");
        assert_eq!(grammar.statements[1].name, "B");
    }

    #[test]
    fn test_parse_empty_input() {
        let grammar = parse("  \n\t ").expect("should parse");
        assert!(grammar.statements.is_empty());
    }

    #[test]
    fn test_grammar_error_span_is_rebased() {
        let errs = parse("A = x; B = ;").unwrap_err();
        // The error points into the second statement, past the first one
        assert!(errs[0].span().start >= 6);
    }

    #[test]
    fn test_deeply_nested_groups_parse_quickly() {
        // Each nesting level used to re-derive its first term once per
        // alternation arm, multiplying the work per level; at this depth
        // that would run for years rather than milliseconds.
        let depth = 64;
        let input = format!("S = {}a{};", "(".repeat(depth), ")".repeat(depth));
        let started = std::time::Instant::now();
        let stmt = parse_one(&input);
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
        // plain groups are transparent, so the tree collapses to the name
        assert_eq!(stmt.rule, Node::non_terminal("a"));
    }

    #[test]
    fn test_rule_text_round_trip() {
        for input in [
            r#"S = "a", "b";"#,
            r#"S = "a" | 'b' | ?c?;"#,
            "S = (A | B) , C;",
            r#"S = ("a")*;"#,
            "S = (x)+ , _;",
        ] {
            let first = parse_one(input);
            let reparsed = parse_one(&format!("S = {};", first.rule_text));
            assert_eq!(first.rule, reparsed.rule, "round trip of {input}");
            assert_eq!(first.rule_text, reparsed.rule_text);
        }
    }
}
