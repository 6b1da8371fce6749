//! Token model shared by the lexer and the parser.
//!
//! A [`Token`] is produced once by the lexer and never mutated afterwards. The
//! `line`/`column` fields are 1-based and only used for diagnostics.

use std::fmt;

/// The kind of a lexical token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    DoubleColon,
    // type tags
    Bool,
    Str,
    Num,
    Fl,
    Ml,
    Class,
    List,
    Dynamic,
    // delimiters
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    // literals
    String,
    MultilineString,
    PlainString,
    Number,
    Float,
    Boolean,
    Comment,
    Newline,
    Eof,
}

impl TokenKind {
    /// Maps a reserved word to its type-tag kind.
    #[must_use]
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "bool" => TokenKind::Bool,
            "str" => TokenKind::Str,
            "num" => TokenKind::Num,
            "fl" => TokenKind::Fl,
            "ml" => TokenKind::Ml,
            "class" => TokenKind::Class,
            "list" => TokenKind::List,
            "dynamic" => TokenKind::Dynamic,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns `true` for the eight type-tag keywords.
    #[inline]
    #[must_use]
    pub const fn is_type_tag(self) -> bool {
        matches!(
            self,
            TokenKind::Bool
                | TokenKind::Str
                | TokenKind::Num
                | TokenKind::Fl
                | TokenKind::Ml
                | TokenKind::Class
                | TokenKind::List
                | TokenKind::Dynamic
        )
    }

    /// Newlines and comments carry no grammar meaning for the lexer's context
    /// decisions.
    #[inline]
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Comment)
    }

    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::DoubleColon => "'::'",
            TokenKind::Bool => "'bool'",
            TokenKind::Str => "'str'",
            TokenKind::Num => "'num'",
            TokenKind::Fl => "'fl'",
            TokenKind::Ml => "'ml'",
            TokenKind::Class => "'class'",
            TokenKind::List => "'list'",
            TokenKind::Dynamic => "'dynamic'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::String => "string",
            TokenKind::MultilineString => "multiline string",
            TokenKind::PlainString => "plain string",
            TokenKind::Number => "number",
            TokenKind::Float => "float",
            TokenKind::Boolean => "boolean",
            TokenKind::Comment => "comment",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Decoded payload of a token.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    None,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

/// A single lexical token with its source position.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: Literal,
    pub line: usize,
    pub column: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, literal: Literal, line: usize, column: usize) -> Self {
        Token {
            kind,
            literal,
            line,
            column,
        }
    }

    /// Returns the textual payload of identifiers, keywords, strings and comments.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.literal {
            Literal::Text(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("class"), Some(TokenKind::Class));
        assert_eq!(TokenKind::keyword("dynamic"), Some(TokenKind::Dynamic));
        assert_eq!(TokenKind::keyword("Class"), None);
        assert_eq!(TokenKind::keyword("yes"), None);
    }

    #[test]
    fn test_classification() {
        assert!(TokenKind::Ml.is_type_tag());
        assert!(!TokenKind::Identifier.is_type_tag());
        assert!(TokenKind::Comment.is_trivia());
        assert!(!TokenKind::RBracket.is_trivia());
    }
}
