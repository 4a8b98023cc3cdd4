use std::rc::Rc;

use logos::Logos;

use crate::{
    error::SyntaxError,
    interpreter::{
        context::Context,
        parser::ParseResult,
        token::{BinaryOperator, Token},
    },
};

/// Represents a raw lexical unit of an expression.
///
/// Lexemes know nothing about the registries; [`tokenize`] resolves them into
/// [`Token`]s. Whitespace is skipped.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Lexeme {
    /// Anything that starts like a number, such as `1`, `0.5`, `.5`, `1e-3`.
    /// Trailing letters are swallowed so that `2x` is reported as an invalid
    /// literal instead of silently becoming `2 x`.
    #[regex(r"\.?[0-9]([A-Za-z0-9_.]|[eE][+-][0-9])*", |lex| lex.slice().to_string())]
    Number(String),
    /// Identifier lexemes; function, constant or variable names.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// A run of operator characters such as `&`, `!=` or `&!`. Split into
    /// operators during resolution.
    #[regex(r"[!$%&*+\-/:;<=>?@\\^|~\[\]{}]+", |lex| lex.slice().to_string())]
    Symbols(String),
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
}

/// Splits the source into lexemes paired with their 1-based column.
///
/// # Errors
/// Returns `SyntaxError::UnexpectedCharacter` for a character that starts no
/// lexeme.
pub fn scan(source: &str) -> ParseResult<Vec<(Lexeme, usize)>> {
    let mut lexemes = Vec::new();
    let mut lexer = Lexeme::lexer(source);

    while let Some(lexeme) = lexer.next() {
        let column = lexer.span().start + 1;
        if let Ok(lexeme) = lexeme {
            lexemes.push((lexeme, column));
        } else {
            let character = lexer.slice().chars().next().unwrap_or_default();
            return Err(SyntaxError::UnexpectedCharacter { character, column });
        }
    }

    Ok(lexemes)
}

/// Converts an expression into resolved tokens paired with their column.
///
/// Numbers go through the context's literal parser. An identifier directly
/// followed by `(` that names a function becomes a function token, which
/// absorbs the parenthesis. Any other identifier is looked up in the variable
/// arena; unknown names are handed to the unknown-identifier handler, which
/// creates a new free variable. Symbol runs are split into operators
/// according to position: where an operand is expected only prefix
/// operators apply, elsewhere the longest registered infix operator wins.
///
/// # Errors
/// Returns a `SyntaxError` for unknown characters, invalid literals and
/// symbols that match no operator.
///
/// # Example
/// ```
/// use trtbl::interpreter::{context::Context, lexer::tokenize, token::Token};
///
/// let mut context = Context::new();
/// let tokens = tokenize("a != !b", &mut context).unwrap();
///
/// assert!(matches!(tokens[1], (Token::BinaryOperator(ref op), 3) if op.identifier == "!="));
/// assert!(matches!(tokens[2], (Token::UnaryOperator(op), 6) if op.identifier == '!'));
/// assert_eq!(context.variables.free().collect::<Vec<_>>(), ["a", "b"]);
/// ```
pub fn tokenize(source: &str, context: &mut Context) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens: Vec<(Token, usize)> = Vec::new();
    let mut lexemes = scan(source)?.into_iter().peekable();

    while let Some((lexeme, column)) = lexemes.next() {
        match lexeme {
            Lexeme::Number(literal) => {
                let Some(value) = (context.literal_parser)(&literal) else {
                    return Err(SyntaxError::InvalidLiteral { literal, column });
                };
                tokens.push((Token::Value(value), column));
            },
            Lexeme::Identifier(name) => {
                if let Some((Lexeme::LParen, _)) = lexemes.peek()
                   && let Some(function) = context.function(&name)
                {
                    tokens.push((Token::Function(function.clone()), column));
                    lexemes.next();
                    continue;
                }
                let id = if let Some(id) = context.variables.lookup(&name) {
                    id
                } else {
                    log::trace!("new free variable '{name}'");
                    (context.unknown_identifier)(&mut context.variables, &name)
                };
                tokens.push((Token::Variable(id), column));
            },
            Lexeme::Symbols(run) => split_symbols(&run, column, context, &mut tokens)?,
            Lexeme::LParen => tokens.push((Token::LeftParen, column)),
            Lexeme::RParen => tokens.push((Token::RightParen, column)),
            Lexeme::Comma => tokens.push((Token::Comma, column)),
        }
    }

    Ok(tokens)
}

/// Returns `true` if the token leaves the expression waiting for an operand.
const fn expects_operand_after(token: &Token) -> bool {
    !matches!(token, Token::Value(_) | Token::Variable(_) | Token::RightParen)
}

/// Splits a run of operator characters into operator tokens.
///
/// After an operand the longest registered infix operator is taken; a prefix
/// operator is the fallback, which the parser then treats as the start of a
/// juxtaposed operand. Where an operand is expected only prefix operators
/// are considered.
fn split_symbols(run: &str,
                 column: usize,
                 context: &Context,
                 tokens: &mut Vec<(Token, usize)>)
                 -> ParseResult<()> {
    let mut rest = run;
    let mut column = column;

    while let Some(first) = rest.chars().next() {
        let expects_operand = tokens.last().is_none_or(|(token, _)| expects_operand_after(token));

        if !expects_operand && let Some((len, op)) = longest_binary_prefix(context, rest) {
            tokens.push((Token::BinaryOperator(op), column));
            rest = &rest[len..];
            column += len;
            continue;
        }

        if let Some(op) = context.unary_operator(first) {
            tokens.push((Token::UnaryOperator(*op), column));
            rest = &rest[first.len_utf8()..];
            column += first.len_utf8();
            continue;
        }

        return Err(SyntaxError::UnknownOperator { symbol: rest.to_string(),
                                                  column });
    }

    Ok(())
}

/// Finds the longest registered infix operator at the start of `rest`.
fn longest_binary_prefix(context: &Context, rest: &str) -> Option<(usize, Rc<BinaryOperator>)> {
    (1..=rest.len()).rev()
                    .filter(|&len| rest.is_char_boundary(len))
                    .find_map(|len| context.binary_operator(&rest[..len]).map(|op| (len, op.clone())))
}
