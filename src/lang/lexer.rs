use super::tokens::*;

#[derive(Debug, PartialEq)]
pub struct LexicalError {
    pub token: String,
    pub line: usize,
    pub column: usize,
}

pub fn extract_tokens(src: &str) -> (Vec<Token>, Vec<LexicalError>) {
    let mut tokens: Vec<Token> = vec![];
    let mut errors = vec![];

    for (line, line_str) in src.lines().enumerate() {
        let chars: Vec<char> = line_str.chars().collect();
        let mut column = 0;

        while column < chars.len() {
            let char = chars[column];

            if char.is_whitespace() {
                column += 1;
                continue;
            }

            let start = column;

            if char == '"' {
                match scan_string(&chars, start) {
                    Some((value, end)) => {
                        tokens.push(Token::new(
                            TokenKind::Str(value),
                            line + 1,
                            start + 1,
                        ));
                        column = end;
                    },
                    None => {
                        errors.push(LexicalError {
                            token: chars[start..].iter().collect(),
                            line: line + 1,
                            column: start + 1,
                        });
                        column = chars.len();
                    },
                }
            } else if char.is_ascii_alphabetic() || char == '_' {
                let mut end = start + 1;
                while end < chars.len() && is_word_char(chars[end]) {
                    end += 1;
                }

                let word: String = chars[start..end].iter().collect();

                // the MAC marker outranks plain identifiers
                if word == "af" && end < chars.len() && chars[end] == ':' {
                    end += 1;
                    tokens.push(Token::new(
                        TokenKind::Mac("af:".to_string()),
                        line + 1,
                        start + 1,
                    ));
                } else {
                    tokens.push(Token::new(
                        classify_word(&word),
                        line + 1,
                        start + 1,
                    ));
                }

                column = end;
            } else if char.is_ascii_digit() || char == '.' || char == '+' || char == '-' {
                let mut end = start;
                if char == '+' || char == '-' {
                    end += 1;
                }

                while end < chars.len() && (chars[end].is_ascii_digit() || chars[end] == '.') {
                    end += 1;
                }

                // a lone sign is just punctuation
                if end == start + 1 && (char == '+' || char == '-') {
                    tokens.push(Token::new(
                        TokenKind::Punct(char),
                        line + 1,
                        start + 1,
                    ));
                    column = end;
                    continue;
                }

                let text: String = chars[start..end].iter().collect();
                let kind = if is_host(&text) {
                    TokenKind::Host(text)
                } else {
                    TokenKind::Number(text)
                };

                tokens.push(Token::new(kind, line + 1, start + 1));
                column = end;
            } else if char.is_ascii_punctuation() {
                tokens.push(Token::new(
                    TokenKind::Punct(char),
                    line + 1,
                    start + 1,
                ));
                column += 1;
            } else {
                let mut end = start + 1;
                while end < chars.len() && !chars[end].is_whitespace() && !starts_class(chars[end]) {
                    end += 1;
                }

                errors.push(LexicalError {
                    token: chars[start..end].iter().collect(),
                    line: line + 1,
                    column: start + 1,
                });
                column = end;
            }
        }
    }

    (tokens, errors)
}

fn is_word_char(char: char) -> bool {
    char.is_ascii_alphanumeric() || char == '_'
}

fn starts_class(char: char) -> bool {
    char.is_ascii_alphabetic()
        || char.is_ascii_digit()
        || char.is_ascii_punctuation()
        || char == '_'
}

fn scan_string(chars: &[char], start: usize) -> Option<(String, usize)> {
    let mut value = String::new();
    let mut pos = start + 1;

    while pos < chars.len() {
        match chars[pos] {
            '"' => return Some((value, pos + 1)),
            '\\' if pos + 1 < chars.len() => {
                value.push(chars[pos + 1]);
                pos += 2;
            },
            char => {
                value.push(char);
                pos += 1;
            },
        }
    }

    None
}

fn classify_word(word: &str) -> TokenKind {
    let keyword = |kw| TokenKind::Keyword(kw);

    match word.to_ascii_lowercase().as_str() {
        "host" => keyword(Kw::Type(Type::Host)),
        "net" => keyword(Kw::Type(Type::Net)),
        "port" => keyword(Kw::Type(Type::Port)),

        "src" => keyword(Kw::Dir(Direction::Src)),
        "dst" => keyword(Kw::Dir(Direction::Dst)),

        "tcp" => keyword(Kw::Proto(Protocol::Tcp)),
        "udp" => keyword(Kw::Proto(Protocol::Udp)),
        "ether" => keyword(Kw::Proto(Protocol::Ether)),

        "and" => keyword(Kw::Connective(Connective::And)),
        "or" => keyword(Kw::Connective(Connective::Or)),

        _ => TokenKind::Identifier(word.to_lowercase()),
    }
}

// Near-misses like `10.10` or `256.1.1.1` are not hosts and lex as numbers.
fn is_host(text: &str) -> bool {
    let octets: Vec<&str> = text.split('.').collect();
    if octets.len() != 4 {
        return false;
    }

    octets.iter().all(|octet| is_octet(octet))
}

fn is_octet(octet: &str) -> bool {
    let digits: Vec<char> = octet.chars().collect();

    match digits[..] {
        [d1] => d1.is_ascii_digit(),
        [d1, d2] => matches!(d1, '1'..='9') && d2.is_ascii_digit(),
        ['1', d2, d3] => d2.is_ascii_digit() && d3.is_ascii_digit(),
        ['2', '5', d3] => matches!(d3, '0'..='5'),
        ['2', d2, d3] => matches!(d2, '0'..='4') && d3.is_ascii_digit(),
        _ => false,
    }
}
