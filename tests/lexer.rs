//! Lexer edge cases.

use jcl::{Lexer, Span, Token, TokenKind, tokenize};

fn assert_tiles(input: &[u8]) {
    let tokens = tokenize(input);
    let mut pos = 0;
    for token in &tokens {
        assert_eq!(token.span.start, pos, "gap or overlap at {pos}");
        assert!(token.span.end > token.span.start, "empty token at {pos}");
        pos = token.span.end;
    }
    assert_eq!(pos, input.len());
}

// -----------------------------------------------------------
// Basic lexer behaviour.
// -----------------------------------------------------------

#[test]
fn lex_empty_input() {
    assert!(tokenize(b"").is_empty());
}

#[test]
fn lex_full_program() {
    let tokens = tokenize(b"{ echo 1; x }");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::Verbatim(b'{'),
            TokenKind::Whitespace,
            TokenKind::Symbol,
            TokenKind::Whitespace,
            TokenKind::Int,
            TokenKind::Verbatim(b';'),
            TokenKind::Whitespace,
            TokenKind::Symbol,
            TokenKind::Whitespace,
            TokenKind::Verbatim(b'}'),
        ]
    );
}

#[test]
fn lex_is_lazy() {
    let mut lexer = Lexer::new(b"a b");
    assert_eq!(lexer.next(), Some(Token::new(TokenKind::Symbol, 0, 1)));
    assert_eq!(lexer.pos(), 1);
    assert_eq!(lexer.next(), Some(Token::new(TokenKind::Whitespace, 1, 2)));
    assert_eq!(lexer.next(), Some(Token::new(TokenKind::Symbol, 2, 3)));
    assert_eq!(lexer.next(), None);
    assert_eq!(lexer.next(), None);
}

#[test]
fn lex_comment_then_code() {
    let src = b"echo # trailing words { ( \nnext";
    let tokens = tokenize(src);
    assert_eq!(tokens[2].kind, TokenKind::Comment);
    assert_eq!(tokens[2].text(src), b"# trailing words { ( ");
    assert_eq!(tokens[4].text(src), b"next");
}

#[test]
fn lex_symbol_never_starts_with_digit() {
    let src = b"9lives";
    let tokens = tokenize(src);
    assert_eq!(tokens[0], Token::new(TokenKind::Int, 0, 1));
    assert_eq!(tokens[1], Token::new(TokenKind::Symbol, 1, 6));
}

#[test]
fn lex_underscore_starts_symbol() {
    assert_eq!(tokenize(b"_9"), vec![Token::new(TokenKind::Symbol, 0, 2)]);
}

// -----------------------------------------------------------
// String literals.
// -----------------------------------------------------------

#[test]
fn lex_string_includes_quotes() {
    let src = br#"echo "hello world" x"#;
    let tokens = tokenize(src);
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].text(src), br#""hello world""#);
}

#[test]
fn lex_escaped_quote_does_not_terminate() {
    let src = br#""a\"b""#;
    assert_eq!(tokenize(src), vec![Token::new(TokenKind::String, 0, 6)]);
}

#[test]
fn lex_escaped_backslash_before_quote() {
    let src = br#""\\""#;
    assert_eq!(tokenize(src), vec![Token::new(TokenKind::String, 0, 4)]);
}

#[test]
fn lex_string_spans_newlines() {
    let src = b"\"a\nb\" c";
    let tokens = tokenize(src);
    assert_eq!(tokens[0], Token::new(TokenKind::String, 0, 5));
}

#[test]
fn lex_unterminated_string_reaches_end() {
    let src = b"x \"never closed { ]";
    let tokens = tokenize(src);
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2].span, Span::new(2, src.len()));
}

// -----------------------------------------------------------
// Never failing.
// -----------------------------------------------------------

#[test]
fn lex_non_ascii_bytes_are_verbatim() {
    let src = "é".as_bytes();
    let tokens = tokenize(src);
    assert_eq!(
        tokens,
        vec![
            Token::new(TokenKind::Verbatim(src[0]), 0, 1),
            Token::new(TokenKind::Verbatim(src[1]), 1, 2),
        ]
    );
}

#[test]
fn lex_spans_tile_input() {
    assert_tiles(b"");
    assert_tiles(b"echo 1; {x [y]} (z) # c\n\"s\\\"\" @!");
    assert_tiles(b"\"\\");
    assert_tiles(&[0, 255, b'"', b'\\', b'"']);
}
