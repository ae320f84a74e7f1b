use phylink::lexer::{CharTable, Lexer, TokenKind};
use phylink::newick::newick_char_table;

// --- TESTS TOKEN SHAPES ---
#[test]
fn test_basic_tokenization() {
    let tokens = Lexer::new(newick_char_table()).tokenize("(Kea:4.2,Kaka)Nestor;");

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind()).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::BracketOpen,
            TokenKind::Symbol,
            TokenKind::Number,
            TokenKind::Operator,
            TokenKind::Symbol,
            TokenKind::BracketClose,
            TokenKind::Symbol,
            TokenKind::Operator,
        ]
    );

    let texts: Vec<&str> = tokens.iter().map(|token| token.text()).collect();
    assert_eq!(texts, ["(", "Kea", "4.2", ",", "Kaka", ")", "Nestor", ";"]);

    assert!(tokens[3].is_operator(","));
    assert!(tokens[1].is_name());
    assert!(!tokens[2].is_name());
}

#[test]
fn test_number_shapes() {
    let tokens = Lexer::new(newick_char_table()).tokenize("1e-5 2.5E+3 -0.75 +4 .5 :3");

    assert!(tokens.iter().all(|token| token.kind() == TokenKind::Number));
    let texts: Vec<&str> = tokens.iter().map(|token| token.text()).collect();
    assert_eq!(texts, ["1e-5", "2.5E+3", "-0.75", "+4", ".5", "3"]);
}

#[test]
fn test_exponent_requires_digits() {
    // the trailing `e` is not part of the number
    let tokens = Lexer::new(newick_char_table()).tokenize("3e");

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind(), TokenKind::Number);
    assert_eq!(tokens[0].text(), "3");
    assert_eq!(tokens[1].kind(), TokenKind::Symbol);
}

#[test]
fn test_quoted_string_decoding() {
    let tokens = Lexer::new(newick_char_table()).tokenize("'Second''s taxon' \"King Kaka\"");

    assert_eq!(tokens[0].kind(), TokenKind::QuotedString);
    assert_eq!(tokens[0].text(), "Second's taxon");
    assert_eq!(tokens[1].kind(), TokenKind::QuotedString);
    assert_eq!(tokens[1].text(), "King Kaka");
}

#[test]
fn test_comment_and_tag_blocks_stripped() {
    let tokens = Lexer::new(newick_char_table()).tokenize("[a comment]{a tag}");

    assert_eq!(tokens[0].kind(), TokenKind::Comment);
    assert_eq!(tokens[0].text(), "a comment");
    assert_eq!(tokens[1].kind(), TokenKind::Tag);
    assert_eq!(tokens[1].text(), "a tag");
}

// --- TESTS LEXER CONFIGURATION ---
#[test]
fn test_whitespace_dropped_by_default() {
    let lexer = Lexer::new(newick_char_table());
    let tokens = lexer.tokenize("Kea Kaka");
    assert_eq!(tokens.len(), 2);

    let lexer = lexer.with_whitespace(true);
    let tokens = lexer.tokenize("Kea Kaka");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].kind(), TokenKind::Whitespace);
}

#[test]
fn test_comments_can_be_dropped() {
    let lexer = Lexer::new(newick_char_table()).with_comments(false);
    let tokens = lexer.tokenize("Kea[seen]{tagged}");

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind()).collect();
    assert_eq!(kinds, [TokenKind::Symbol, TokenKind::Tag]);
}

#[test]
fn test_sign_without_glue_is_an_operator() {
    let lexer = Lexer::new(newick_char_table()).with_glued_sign(false);
    let tokens = lexer.tokenize("-5");

    assert_eq!(tokens[0].kind(), TokenKind::Operator);
    assert_eq!(tokens[0].text(), "-");
    assert_eq!(tokens[1].kind(), TokenKind::Number);
    assert_eq!(tokens[1].text(), "5");
}

#[test]
fn test_base_table_leaves_delimiters_unmapped() {
    let tokens = Lexer::new(CharTable::base()).tokenize("Kea 42");
    assert_eq!(tokens[0].kind(), TokenKind::Symbol);
    assert_eq!(tokens[1].kind(), TokenKind::Number);

    // brackets only mean something once a format claims them
    let tokens = Lexer::new(CharTable::base()).tokenize("(");
    assert!(tokens[0].is_error());
}

// --- TESTS ERRORS AND POSITIONS ---
#[test]
fn test_error_stops_lexing() {
    let tokens = Lexer::new(newick_char_table()).tokenize("Kea%Kaka");

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].text(), "Kea");
    assert!(tokens[1].is_error());
    assert_eq!(tokens[1].text(), "invalid character '%'");
}

#[test]
fn test_unterminated_blocks_are_errors() {
    let tokens = Lexer::new(newick_char_table()).tokenize("[never closed");
    assert!(tokens[0].is_error());
    assert_eq!(tokens[0].text(), "unterminated comment");

    let tokens = Lexer::new(newick_char_table()).tokenize("'no end");
    assert!(tokens[0].is_error());
    assert_eq!(tokens[0].text(), "unterminated quoted string");
}

#[test]
fn test_token_positions() {
    let tokens = Lexer::new(newick_char_table()).tokenize("(Kea,\n Kaka);");

    assert_eq!(tokens[1].line(), 1);
    assert_eq!(tokens[1].column(), 2);
    assert_eq!(tokens[3].text(), "Kaka");
    assert_eq!(tokens[3].line(), 2);
    assert_eq!(tokens[3].column(), 2);
}

#[test]
fn test_crlf_counts_as_one_line_break() {
    let tokens = Lexer::new(newick_char_table()).tokenize("Kea\r\nKaka");

    assert_eq!(tokens[1].text(), "Kaka");
    assert_eq!(tokens[1].line(), 2);
    assert_eq!(tokens[1].column(), 1);
}
