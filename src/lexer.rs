use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenType {
    LeftParen,
    RightParen,
    Colon,
    Equal,
    /// Any run of non-whitespace, non-punctuation characters. Whether it is
    /// a number, a variable name or a keyword is decided by the parser.
    Literal(String),
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenType::LeftParen => write!(f, "'('"),
            TokenType::RightParen => write!(f, "')'"),
            TokenType::Colon => write!(f, "':'"),
            TokenType::Equal => write!(f, "'='"),
            TokenType::Literal(text) => write!(f, "'{}'", text),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Token {
    pub token_type: TokenType,
    pub line: usize,
    pub column: usize,
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: String) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Convert the whole input into a token stream. Whitespace is never
    /// emitted; a pending literal is always flushed before punctuation, a
    /// line break and the end of input, so no character is ever dropped.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }

            let token = self.next_token();
            tokens.push(token);
        }

        tokens
    }

    fn next_token(&mut self) -> Token {
        let line = self.line;
        let column = self.column;

        let token_type = match self.current_char() {
            '(' => {
                self.advance();
                TokenType::LeftParen
            }
            ')' => {
                self.advance();
                TokenType::RightParen
            }
            ':' => {
                self.advance();
                TokenType::Colon
            }
            '=' => {
                self.advance();
                TokenType::Equal
            }
            _ => self.read_literal(),
        };

        Token {
            token_type,
            line,
            column,
        }
    }

    fn read_literal(&mut self) -> TokenType {
        let mut value = String::new();

        while !self.is_at_end()
            && !self.current_char().is_whitespace()
            && !Self::is_punctuation(self.current_char())
        {
            value.push(self.current_char());
            self.advance();
        }

        TokenType::Literal(value)
    }

    fn is_punctuation(ch: char) -> bool {
        matches!(ch, '(' | ')' | ':' | '=')
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    fn current_char(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.input[self.position]
        }
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            if self.current_char() == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}
