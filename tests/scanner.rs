#[cfg(test)]
mod scanner_tests {
    use treelox::context::Diagnostics;
    use treelox::scanner::*;
    use treelox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    fn kinds(source: &str) -> Vec<TokenType> {
        let mut diagnostics = Diagnostics::new();
        scan(source, &mut diagnostics)
            .into_iter()
            .map(|t| t.token_type)
            .collect()
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_single_paren_and_empty_input() {
        assert_eq!(kinds("("), vec![TokenType::LEFT_PAREN, TokenType::EOF]);
        assert_eq!(kinds(""), vec![TokenType::EOF]);
    }

    #[test]
    fn test_two_character_operators() {
        assert_token_sequence(
            "! != = == < <= > >= ? :",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::QUESTION, "?"),
                (TokenType::COLON, ":"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let results: Vec<_> = Scanner::new(",.$(#").collect();

        // COMMA, DOT, error for '$', LEFT_PAREN, error for '#', EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();
        assert_eq!(errors.len(), 2, "Expected 2 error messages");

        for err in errors {
            assert_eq!(err.message, "Unexpected character.");
            assert_eq!(err.to_string(), "[line 1] Error: Unexpected character.");
        }
    }

    #[test]
    fn test_multibyte_character_reported_once() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan("é", &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_type, TokenType::EOF);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("and break class continue else false for fun if nil or print return super this true var while foo _bar"),
            vec![
                TokenType::AND,
                TokenType::BREAK,
                TokenType::CLASS,
                TokenType::CONTINUE,
                TokenType::ELSE,
                TokenType::FALSE,
                TokenType::FOR,
                TokenType::FUN,
                TokenType::IF,
                TokenType::NIL,
                TokenType::OR,
                TokenType::PRINT,
                TokenType::RETURN,
                TokenType::SUPER,
                TokenType::THIS,
                TokenType::TRUE,
                TokenType::VAR,
                TokenType::WHILE,
                TokenType::IDENTIFIER,
                TokenType::IDENTIFIER,
                TokenType::EOF,
            ]
        );
    }

    #[test]
    fn test_boolean_literals_are_eager() {
        let tokens: Vec<_> = Scanner::new("true false").filter_map(Result::ok).collect();

        assert_eq!(tokens[0].literal, Some(LiteralValue::True));
        assert_eq!(tokens[1].literal, Some(LiteralValue::False));
    }

    #[test]
    fn test_number_literals() {
        let tokens: Vec<_> = Scanner::new("3.14 42 7.").filter_map(Result::ok).collect();

        assert_eq!(tokens[0].literal, Some(LiteralValue::Number(3.14)));
        assert_eq!(tokens[1].literal, Some(LiteralValue::Number(42.0)));
        assert_eq!(tokens[2].literal, Some(LiteralValue::Number(7.0)));
        // A trailing dot is not part of the number.
        assert_eq!(tokens[3].token_type, TokenType::DOT);
        assert_eq!(tokens[1].to_string(), "NUMBER 42 42.0");
    }

    #[test]
    fn test_string_literal_spans_lines() {
        let tokens: Vec<_> = Scanner::new("\"a\nb\" x").filter_map(Result::ok).collect();

        assert_eq!(tokens[0].literal, Some(LiteralValue::Str("a\nb".into())));
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan("\"abc", &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().map(|d| d.message.as_str()),
            Some("Unterminated string.")
        );
        assert_eq!(tokens.last().map(|t| t.token_type), Some(TokenType::EOF));
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens: Vec<_> = Scanner::new("// line\n/* block\n comment */ x / y")
            .filter_map(Result::ok)
            .collect();

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].lexeme, "x");
        assert_eq!(tokens[0].line, 3);
        assert_eq!(tokens[1].token_type, TokenType::SLASH);
    }

    #[test]
    fn test_block_comment_stops_at_exact_terminator() {
        // A lone '*' or '/' inside the comment does not end it.
        assert_eq!(
            kinds("/* a * b / c */ x"),
            vec![TokenType::IDENTIFIER, TokenType::EOF]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan("x /* never closed\n", &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().map(|d| d.message.as_str()),
            Some("Unterminated block comment.")
        );
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_eof_carries_final_line() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan("a\nb\n\n", &mut diagnostics);

        assert_eq!(tokens.last().map(|t| t.line), Some(4));
    }

    fn assert_token_matches(
        result: &Result<Token, treelox::error::Diagnostic>,
        expected_type: TokenType,
        expected_lexeme: &str,
    ) {
        match result {
            Ok(token) => {
                assert_eq!(token.token_type, expected_type);
                assert_eq!(token.lexeme, expected_lexeme);
            }
            Err(e) => panic!("Expected token {:?}, got error: {}", expected_type, e),
        }
    }
}
