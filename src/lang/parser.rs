use super::filter::{Expression, Filter, Primitive, Qualifier, Term};
use super::lexer::extract_tokens;
use super::tokens::{Connective, Direction, Kw, Protocol, TKind, Token, Type};

#[derive(Debug, PartialEq)]
pub enum ParseError {
    UnexpectedToken { found: Token, expected: Vec<TKind> },
    UnexpectedEnd { expected: Vec<TKind> },
    UnrecognizedToken { token: String, line: usize, column: usize },
}

fn unexp_token(found: &Token, expected: Vec<TKind>) -> ParseError {
    ParseError::UnexpectedToken {
        found: found.clone(),
        expected,
    }
}

fn qualifier_kinds() -> Vec<TKind> {
    vec![
        TKind::Keyword(Kw::Type(Type::Host)),
        TKind::Keyword(Kw::Type(Type::Net)),
        TKind::Keyword(Kw::Type(Type::Port)),
        TKind::Keyword(Kw::Dir(Direction::Src)),
        TKind::Keyword(Kw::Dir(Direction::Dst)),
        TKind::Keyword(Kw::Proto(Protocol::Tcp)),
        TKind::Keyword(Kw::Proto(Protocol::Udp)),
        TKind::Keyword(Kw::Proto(Protocol::Ether)),
    ]
}

fn id_kinds() -> Vec<TKind> {
    vec![TKind::any_mac(), TKind::any_host(), TKind::any_number()]
}

fn connective_kinds() -> Vec<TKind> {
    vec![
        TKind::Keyword(Kw::Connective(Connective::And)),
        TKind::Keyword(Kw::Connective(Connective::Or)),
    ]
}

/// Parses a filter expression into a `Filter`. Lexes the source first and
/// reports the first unrecognized character run, then matches the token
/// stream against the grammar. Parsing is all-or-nothing: the first
/// non-match fails the whole input, and the error is returned to the
/// caller with the offending position and the alternatives expected there.
pub fn parse(src: &str) -> Result<Filter, ParseError> {
    let (tokens, errors) = extract_tokens(src);

    if let Some(error) = errors.into_iter().next() {
        return Err(ParseError::UnrecognizedToken {
            token: error.token,
            line: error.line,
            column: error.column,
        });
    }

    build_filter(tokens.iter())
}

pub fn build_filter<'a>(mut tokens: impl Iterator<Item = &'a Token>) -> Result<Filter, ParseError> {
    let mut terms = vec![];

    loop {
        let primitive = parse_primitive(&mut tokens)?;

        match tokens.next() {
            None => {
                terms.push(Term::new(primitive, None));
                break;
            },
            Some(token) => match token.get_kind() {
                TKind::Keyword(Kw::Connective(connective)) => {
                    terms.push(Term::new(primitive, Some(connective.clone())));
                },
                _ => return Err(unexp_token(token, connective_kinds())),
            },
        }
    }

    Ok(Filter::new(Expression::new(terms)))
}

fn parse_primitive<'a>(tokens: &mut impl Iterator<Item = &'a Token>) -> Result<Primitive, ParseError> {
    let mut qualifiers: Vec<Qualifier> = vec![];

    loop {
        let token = match tokens.next() {
            Some(token) => token,
            None => {
                return Err(ParseError::UnexpectedEnd {
                    expected: expected_in_primitive(&qualifiers),
                });
            },
        };

        match token.get_kind() {
            TKind::Keyword(Kw::Type(qtype)) => {
                qualifiers.push(Qualifier::Type(qtype.clone()));
            },
            TKind::Keyword(Kw::Dir(dir)) => {
                qualifiers.push(Qualifier::Dir(dir.clone()));
            },
            TKind::Keyword(Kw::Proto(proto)) => {
                qualifiers.push(Qualifier::Proto(proto.clone()));
            },

            TKind::Mac(id) | TKind::Host(id) | TKind::Number(id)
                if !qualifiers.is_empty() =>
            {
                return Ok(Primitive::new(qualifiers, id.clone()));
            },

            _ => return Err(unexp_token(token, expected_in_primitive(&qualifiers))),
        }
    }
}

fn expected_in_primitive(qualifiers: &[Qualifier]) -> Vec<TKind> {
    let mut kinds = qualifier_kinds();

    // an id only becomes valid once at least one qualifier scopes it
    if !qualifiers.is_empty() {
        kinds.append(&mut id_kinds());
    }

    kinds
}
