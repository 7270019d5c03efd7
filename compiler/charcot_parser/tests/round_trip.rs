use charcot_ast::AstPrinter;
use charcot_lexer::{tokenize, Token, TokenType};
use charcot_parser::parse;
use proptest::prelude::*;

fn identifier() -> impl Strategy<Value = String> {
    prop_oneof![Just("x"), Just("dose"), Just("weight"), Just("a"), Just("b")]
        .prop_map(str::to_string)
}

fn string_literal() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![Just("a"), Just("b"), Just(" "), Just("\\\""), Just("\\n"), Just("\\\\")],
        0..6,
    )
    .prop_map(|parts| format!("\"{}\"", parts.concat()))
}

fn leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        identifier(),
        Just("42".to_string()),
        Just("3.5".to_string()),
        Just("5mg".to_string()),
        Just("120/80mmHg".to_string()),
        Just("2024-01-15".to_string()),
        string_literal(),
        identifier().prop_map(|name| format!("{name}.weight")),
    ]
}

fn expression() -> impl Strategy<Value = String> {
    leaf().prop_recursive(4, 24, 3, |inner| {
        let op = prop_oneof![
            Just("+"), Just("-"), Just("*"), Just("/"), Just("<"), Just(">="),
            Just("=="), Just("!="), Just("&&"), Just("||"),
        ];
        prop_oneof![
            (inner.clone(), op, inner.clone()).prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.clone().prop_map(|e| format!("!({e})")),
            inner.clone().prop_map(|e| format!("-({e})")),
            proptest::collection::vec(inner, 0..3)
                .prop_map(|args| format!("check({})", args.join(", "))),
        ]
    })
}

fn statement() -> impl Strategy<Value = String> {
    let ty = prop_oneof![Just("int"), Just("float"), Just("string")];
    prop_oneof![
        (identifier(), ty, expression()).prop_map(|(n, t, e)| format!("{n}: {t} = {e};")),
        (identifier(), expression()).prop_map(|(n, e)| format!("{n} = {e};")),
        expression().prop_map(|e| format!("{e};")),
        expression().prop_map(|e| format!("return {e};")),
        (expression(), expression(), expression())
            .prop_map(|(c, t, e)| format!("if ({c}) {{ x = {t}; }} else {{ {e}; }}")),
    ]
}

fn program() -> impl Strategy<Value = String> {
    (
        proptest::collection::vec(statement(), 0..5),
        proptest::collection::vec(expression(), 0..3),
    )
        .prop_map(|(body, globals)| {
            let mut source = String::new();
            for (i, init) in globals.iter().enumerate() {
                source.push_str(&format!("g{i}: float = {init}; /* global */\n"));
            }
            source.push_str("procedure p(a, b: Patient) {\n");
            for stmt in body {
                source.push_str(&format!("    {stmt} // step\n"));
            }
            source.push_str("}\n");
            source
        })
}

/// Source text for a token; strings get their quotes and escapes back.
fn spell(token: &Token) -> String {
    match &token.token_type {
        TokenType::String(value) => {
            let mut text = String::from("\"");
            for c in value.as_str().chars() {
                match c {
                    '"' => text.push_str("\\\""),
                    '\\' => text.push_str("\\\\"),
                    '\n' => text.push_str("\\n"),
                    '\t' => text.push_str("\\t"),
                    '\r' => text.push_str("\\r"),
                    other => text.push(other),
                }
            }
            text.push('"');
            text
        }
        _ => token.lexeme.to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rejoined_lexemes_parse_to_the_same_tree(source in program()) {
        let tokens = tokenize(&source).unwrap();
        let original = parse(&tokens).unwrap();

        let rejoined: Vec<String> = tokens.iter().filter(|t| !t.is_eof()).map(spell).collect();
        let reparsed = parse(&tokenize(&rejoined.join(" ")).unwrap()).unwrap();

        prop_assert_eq!(
            AstPrinter::new().print_program(&original),
            AstPrinter::new().print_program(&reparsed)
        );
    }
}
