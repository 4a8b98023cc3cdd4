use std::{fmt, rc::Rc};

use crate::{
    error::SyntaxError,
    interpreter::{
        token::{Associativity, BinaryOperator, Function, Token, UnaryOperator},
        variables::{VariableId, Variables},
    },
};

pub type ParseResult<T> = Result<T, SyntaxError>;

/// A single step of a postfix program.
#[derive(Debug, Clone)]
pub enum Instruction {
    /// Pushes a literal value.
    Push(bool),
    /// Pushes the current value of a constant or free variable.
    Load {
        /// Slot in the variable arena.
        slot: VariableId,
        /// Name of the slot, kept for display and error messages.
        name: String,
    },
    /// Pops one operand and pushes the operator's result.
    Unary(UnaryOperator),
    /// Pops the right and then the left operand and pushes the result.
    Binary(Rc<BinaryOperator>),
    /// Pops `arguments` operands and pushes the function's result.
    Call {
        /// The called function.
        function:  Rc<Function>,
        /// Number of arguments written in the call.
        arguments: usize,
    },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push(value) => write!(f, "{}", u8::from(*value)),
            Self::Load { name, .. } => write!(f, "{name}"),
            Self::Unary(op) => write!(f, "{}", op.identifier),
            Self::Binary(op) if op.is_juxtaposition() => write!(f, "·"),
            Self::Binary(op) => write!(f, "{}", op.identifier),
            Self::Call { function,
                         arguments, } => write!(f, "{}/{arguments}", function.identifier),
        }
    }
}

/// An expression in postfix (reverse Polish) order.
///
/// Independent of variable values: parse once, then evaluate once per
/// assignment. Displays as space separated instructions, with function calls
/// written as `NAME/argument-count` and juxtaposition as `·`.
#[derive(Debug, Clone, Default)]
pub struct ParsedExpression {
    instructions: Vec<Instruction>,
}

impl ParsedExpression {
    /// Wraps an instruction sequence without validating it.
    #[must_use]
    pub const fn from_instructions(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// The instructions in execution order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

impl fmt::Display for ParsedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.instructions.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{instruction}")?;
        }
        Ok(())
    }
}

/// Entries of the operator stack.
enum StackEntry {
    Unary(UnaryOperator),
    Binary(Rc<BinaryOperator>),
    /// A plain `(`.
    Group { column: usize },
    /// The `(` of a function call; counts the commas seen so far.
    Call {
        function: Rc<Function>,
        commas:   usize,
        column:   usize,
    },
}

impl StackEntry {
    /// Precedence and associativity, or `None` for parenthesis markers.
    fn binding(&self) -> Option<(i32, Associativity)> {
        match self {
            Self::Unary(op) => Some((op.precedence, op.associativity)),
            Self::Binary(op) => Some((op.precedence, op.associativity)),
            Self::Group { .. } | Self::Call { .. } => None,
        }
    }
}

/// Shunting-yard state for one expression.
struct ShuntingYard<'a> {
    output:          Vec<Instruction>,
    stack:           Vec<StackEntry>,
    /// `true` when the next token must begin an operand.
    expects_operand: bool,
    /// `true` directly after a `(` or a function name.
    just_opened:     bool,
    juxtaposition:   Option<&'a Rc<BinaryOperator>>,
    variables:       &'a Variables,
}

/// Converts resolved tokens into a postfix program.
///
/// Implements the shunting-yard algorithm. Operands go straight to the
/// output. An incoming infix operator first pops every stacked operator that
/// binds tighter, or equally tight when the incoming operator is
/// left-associative or either operator declares `Any`. Prefix operators are
/// pushed without popping, as they have no left operand. Parentheses and
/// function calls are tracked as markers on the stack; a call's argument
/// count is checked against the function's arity when its `)` arrives.
///
/// When an operand follows a complete operand, the juxtaposition operator is
/// inserted between them, or a `SyntaxError::JuxtapositionDisabled` is
/// returned if there is none.
///
/// # Errors
/// Returns a `SyntaxError` for empty input, missing operands, unbalanced
/// parentheses, stray commas, wrong argument counts and juxtaposition while
/// disabled.
pub fn to_postfix(tokens: &[(Token, usize)],
                  juxtaposition: Option<&Rc<BinaryOperator>>,
                  variables: &Variables)
                  -> ParseResult<ParsedExpression> {
    let Some((_, last_column)) = tokens.last() else {
        return Err(SyntaxError::EmptyExpression);
    };

    let mut yard = ShuntingYard { output: Vec::with_capacity(tokens.len()),
                                  stack: Vec::new(),
                                  expects_operand: true,
                                  just_opened: false,
                                  juxtaposition,
                                  variables };

    for (token, column) in tokens {
        yard.push(token, *column)?;
    }

    yard.finish(*last_column)
}

impl ShuntingYard<'_> {
    fn push(&mut self, token: &Token, column: usize) -> ParseResult<()> {
        if !self.expects_operand && token.starts_operand() {
            let Some(op) = self.juxtaposition else {
                return Err(SyntaxError::JuxtapositionDisabled { column });
            };
            log::trace!("juxtaposition before column {column}");
            self.binary(op.clone());
        }

        let just_opened = self.just_opened;
        self.just_opened = false;

        match token {
            Token::Value(value) => self.operand(Instruction::Push(*value)),
            Token::Variable(slot) => {
                let name = self.variables.name(*slot).unwrap_or_default().to_string();
                self.operand(Instruction::Load { slot: *slot, name });
            },
            Token::UnaryOperator(op) => self.stack.push(StackEntry::Unary(*op)),
            Token::BinaryOperator(op) => {
                if self.expects_operand {
                    return Err(SyntaxError::MissingOperand { found: format!("operator {token}"),
                                                             column });
                }
                self.binary(op.clone());
            },
            Token::Function(function) => {
                self.stack.push(StackEntry::Call { function: function.clone(),
                                                   commas: 0,
                                                   column });
                self.just_opened = true;
            },
            Token::LeftParen => {
                self.stack.push(StackEntry::Group { column });
                self.just_opened = true;
            },
            Token::Comma => self.comma(column)?,
            Token::RightParen => self.close(column, just_opened)?,
        }

        Ok(())
    }

    fn operand(&mut self, instruction: Instruction) {
        self.output.push(instruction);
        self.expects_operand = false;
    }

    fn binary(&mut self, op: Rc<BinaryOperator>) {
        while let Some((precedence, associativity)) = self.stack.last().and_then(StackEntry::binding) {
            let pops = precedence > op.precedence
                       || (precedence == op.precedence
                           && (op.associativity == Associativity::Left
                               || associativity == Associativity::Any
                               || op.associativity == Associativity::Any));
            if !pops {
                break;
            }
            self.pop_operator();
        }
        self.stack.push(StackEntry::Binary(op));
        self.expects_operand = true;
    }

    /// Moves the operator on top of the stack to the output.
    fn pop_operator(&mut self) {
        match self.stack.pop() {
            Some(StackEntry::Unary(op)) => self.output.push(Instruction::Unary(op)),
            Some(StackEntry::Binary(op)) => self.output.push(Instruction::Binary(op)),
            Some(marker) => self.stack.push(marker),
            None => {},
        }
    }

    /// Moves operators to the output until a parenthesis marker (or the
    /// bottom of the stack) is on top.
    fn pop_to_marker(&mut self) {
        while self.stack.last().and_then(StackEntry::binding).is_some() {
            self.pop_operator();
        }
    }

    fn comma(&mut self, column: usize) -> ParseResult<()> {
        if self.expects_operand {
            return Err(SyntaxError::MissingOperand { found: "','".to_string(),
                                                     column });
        }
        self.pop_to_marker();
        match self.stack.last_mut() {
            Some(StackEntry::Call { commas, .. }) => *commas += 1,
            _ => return Err(SyntaxError::UnexpectedComma { column }),
        }
        self.expects_operand = true;
        Ok(())
    }

    fn close(&mut self, column: usize, just_opened: bool) -> ParseResult<()> {
        if self.expects_operand && !just_opened {
            return Err(SyntaxError::MissingOperand { found: "')'".to_string(),
                                                     column });
        }
        self.pop_to_marker();

        match self.stack.pop() {
            None => return Err(SyntaxError::UnmatchedParenthesis { column }),
            Some(StackEntry::Group { .. }) if just_opened => {
                return Err(SyntaxError::MissingOperand { found: "')'".to_string(),
                                                         column });
            },
            Some(StackEntry::Call { function,
                                    commas,
                                    column: call_column, }) => {
                let arguments = if just_opened { 0 } else { commas + 1 };
                if !function.arity.check(arguments) {
                    return Err(SyntaxError::ArgumentCountMismatch { function:
                                                                        function.identifier.clone(),
                                                                    expected: function.arity
                                                                                      .to_string(),
                                                                    found:    arguments,
                                                                    column:   call_column, });
                }
                self.output.push(Instruction::Call { function, arguments });
            },
            Some(_) => {},
        }

        self.expects_operand = false;
        Ok(())
    }

    fn finish(mut self, column: usize) -> ParseResult<ParsedExpression> {
        if self.expects_operand {
            return Err(SyntaxError::MissingOperand { found: "end of input".to_string(),
                                                     column });
        }

        while let Some(entry) = self.stack.pop() {
            match entry {
                StackEntry::Unary(op) => self.output.push(Instruction::Unary(op)),
                StackEntry::Binary(op) => self.output.push(Instruction::Binary(op)),
                StackEntry::Group { column } | StackEntry::Call { column, .. } => {
                    return Err(SyntaxError::UnmatchedParenthesis { column });
                },
            }
        }

        Ok(ParsedExpression { instructions: self.output })
    }
}
