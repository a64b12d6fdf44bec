use serde::{Deserialize, Serialize};

pub use Keyword as Kw;
pub use TokenKind as TKind;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Token {
    kind: TokenKind,
    line: usize,
    column: usize,
}

impl Token {
    pub(super) fn new(kind: TokenKind, line: usize, column: usize) -> Token {
        Token { kind, line, column }
    }

    pub fn get_kind(&self) -> &TokenKind {
        &self.kind
    }

    pub fn get_pos(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum TokenKind {
    Keyword(Keyword),
    Mac(String),
    Host(String),
    Number(String),
    Identifier(String),
    Str(String),
    Punct(char),
}

impl TokenKind {
    pub fn any_mac() -> TokenKind {
        TokenKind::Mac("".to_string())
    }

    pub fn any_host() -> TokenKind {
        TokenKind::Host("".to_string())
    }

    pub fn any_number() -> TokenKind {
        TokenKind::Number("".to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Keyword {
    Type(Type),
    Dir(Direction),
    Proto(Protocol),
    Connective(Connective),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Type {
    Host,
    Net,
    Port,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Direction {
    Src,
    Dst,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Protocol {
    Tcp,
    Udp,
    Ether,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Connective {
    And,
    Or,
}
