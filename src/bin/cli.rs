use bpfx::lang::{
    tokens::{Connective, Direction, Kw, Protocol, TKind, Type},
    Filter, LexicalError, ParseError,
};

use clap::{AppSettings, Clap};
use colored::*;
use human_panic::setup_panic;

#[derive(Clap, Debug)]
#[clap(
    about,
    version,
    setting=AppSettings::ColoredHelp,
    setting=AppSettings::GlobalVersion,
    setting=AppSettings::VersionlessSubcommands,
)]
struct Arguments {
    #[clap(subcommand)]
    command: Command,

    /// Print intermediate data structures
    #[clap(short, long)]
    debug: bool,
}

#[derive(Clap, Debug)]
enum Command {
    Check(Check),
    Qualifiers(Qualifiers),
}

/// Checks syntax of a filter expression
#[derive(Clap, Debug)]
struct Check {
    /// Filter expression, e.g. `dst host 192.168.1.10 and tcp 80`
    expression: Vec<String>,
}

/// Lists the ids referenced by each qualifier of a filter expression
#[derive(Clap, Debug)]
struct Qualifiers {
    /// Filter expression, e.g. `dst host 192.168.1.10 and tcp 80`
    expression: Vec<String>,
}

fn main() {
    setup_panic!();

    let mut eprint = ErrorPrinter::new();

    let args = Arguments::parse();
    match args.command {
        Command::Check(check) => {
            let src = check.expression.join(" ");
            if let Err(()) = parse_expression(&mut eprint, &src, args.debug) {
                std::process::exit(1);
            }

            println!("{}", "Filter is valid".bold().green());
        },
        Command::Qualifiers(qualifiers) => {
            let src = qualifiers.expression.join(" ");
            let filter = match parse_expression(&mut eprint, &src, args.debug) {
                Ok(filter) => filter,
                Err(()) => std::process::exit(1),
            };

            let map = filter.qualifiers();
            let mut keys: Vec<_> = map.keys().collect();
            keys.sort();

            for key in keys {
                println!("{}: {}", key.bold(), map[key].join(", "));
            }
        },
    }
}

fn parse_expression(eprint: &mut ErrorPrinter, src: &str, debug: bool) -> Result<Filter, ()> {
    eprint.set_src(src);

    let (tokens, errors) = bpfx::lang::lexer::extract_tokens(src);
    if debug {
        println!("{}", "Tokens:".bold());
        tokens.iter().for_each(|t| println!("{:?}", t));
        println!();
    }

    for error in errors.iter() {
        eprint.lexical_error(error);
    }

    if errors.len() > 0 {
        return Err(());
    }

    let filter = match bpfx::lang::parser::build_filter(tokens.iter()) {
        Ok(filter) => filter,
        Err(error) => {
            eprint.parser_error(&error);
            return Err(());
        },
    };

    if debug {
        println!("{}", "Filter:".bold());
        println!("{:#?}\n", filter);
    }

    Ok(filter)
}

struct ErrorPrinter {
    first_error: bool,
    src: Option<String>,
}

impl ErrorPrinter {
    fn new() -> ErrorPrinter {
        ErrorPrinter {
            first_error: true,
            src: None,
        }
    }

    fn set_src(&mut self, src: &str) {
        self.src = Some(src.to_string());
    }

    fn check_line(&mut self) {
        if self.first_error {
            self.first_error = false;
        } else {
            eprintln!();
        }
    }

    fn error(&mut self, msg: &str) {
        self.first_error = false;

        eprintln!(
            "{}{}",
            "error: ".bold().red(),
            msg.bold(),
        );
    }

    fn error_pos(&mut self, msg: &str, line: usize, column: usize) {
        self.check_line();

        if let Some(src) = &self.src {
            let src_line = src.lines().nth(line - 1);
            if let Some(src_line) = src_line {
                let line_str = line.to_string();
                let line_prefix = format!(
                    "{}{}{}",
                    "line ".bold().dimmed(),
                    line_str.bold().dimmed(),
                    ":  ".bold().dimmed(),
                );

                eprintln!(
                    "{}{}",
                    &line_prefix,
                    src_line.trim(),
                );

                let diff = src_line.chars().count() - src_line.trim_start().chars().count();
                let pos_offset = column - 1 + line_str.len() - diff + 5 + 3;
                eprintln!("{}{}", " ".repeat(pos_offset), "^".yellow());
            }
        }

        self.error(msg);
    }

    fn lexical_error(&mut self, error: &LexicalError) {
        let msg = format!("unrecognized token `{}`", error.token);
        self.error_pos(&msg, error.line, error.column);
    }

    fn tkind_name(kind: &TKind) -> &'static str {
        match kind {
            TKind::Mac(_) => "MAC id",
            TKind::Host(_) => "host address",
            TKind::Number(_) => "number",
            TKind::Identifier(_) => "identifier",
            TKind::Str(_) => "string",
            TKind::Punct(_) => "punctuation",
            TKind::Keyword(kw) => match kw {
                Kw::Type(qtype) => match qtype {
                    Type::Host => "host",
                    Type::Net => "net",
                    Type::Port => "port",
                },
                Kw::Dir(dir) => match dir {
                    Direction::Src => "src",
                    Direction::Dst => "dst",
                },
                Kw::Proto(proto) => match proto {
                    Protocol::Tcp => "tcp",
                    Protocol::Udp => "udp",
                    Protocol::Ether => "ether",
                },
                Kw::Connective(connective) => match connective {
                    Connective::And => "and",
                    Connective::Or => "or",
                },
            },
        }
    }

    fn expected_list(expected: &[TKind]) -> String {
        expected.iter()
            .map(|tk| ErrorPrinter::tkind_name(tk))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn parser_error(&mut self, error: &ParseError) {
        match error {
            ParseError::UnexpectedToken { found, expected } => {
                let (line, column) = found.get_pos();

                let found_str = ErrorPrinter::tkind_name(found.get_kind());
                let expected_str = ErrorPrinter::expected_list(expected);

                let mut msg = format!("encountered an unexpected token {} while expecting ", found_str);
                if expected.len() > 1 {
                    let end = format!("one of: {}", expected_str);
                    msg += &end;
                } else {
                    msg += &expected_str;
                };

                self.error_pos(&msg, line, column);
            },
            ParseError::UnexpectedEnd { expected } => {
                let expected_str = ErrorPrinter::expected_list(expected);
                let msg = format!(
                    "unexpected end of expression while expecting one of: {}",
                    expected_str,
                );

                let mut line = 0;
                let mut column = 0;

                if let Some(src) = &self.src {
                    line = src.lines().count();
                    if let Some(last) = src.lines().last() {
                        column = last.chars().count() + 1;
                    }
                }

                if line > 0 {
                    self.error_pos(&msg, line, column);
                } else {
                    self.error(&msg);
                }
            },
            ParseError::UnrecognizedToken { token, line, column } => {
                let msg = format!("unrecognized token `{}`", token);
                self.error_pos(&msg, *line, *column);
            },
        }
    }
}
