use crate::{
    error::InternalError,
    interpreter::{
        parser::{Instruction, ParsedExpression},
        variables::Variables,
    },
};

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, InternalError>;

/// Runs a postfix program against the current variable values.
///
/// Walks the instructions once with an operand stack. Variables are only
/// read. Binary operators pop their right operand first; function calls take
/// the top `arguments` values, which are already in call order. Exactly one
/// value must remain at the end.
///
/// # Errors
/// Returns an `InternalError` on stack underflow, leftover operands, an
/// empty program, a call with an argument count its function rejects or a
/// read of an unbound variable. None of these occur for
/// a program produced by the parser and evaluated before the variable arena
/// is reset.
///
/// # Example
/// ```
/// use trtbl::interpreter::{context::Context, evaluator::evaluate};
///
/// let mut context = Context::new();
/// let parsed = context.parse("NAND(true, x)").unwrap();
///
/// context.assign(&[false]).unwrap();
/// assert_eq!(evaluate(&parsed, &context.variables), Ok(true));
///
/// context.assign(&[true]).unwrap();
/// assert_eq!(evaluate(&parsed, &context.variables), Ok(false));
/// ```
pub fn evaluate(parsed: &ParsedExpression, variables: &Variables) -> EvalResult<bool> {
    let mut stack: Vec<bool> = Vec::new();

    for instruction in parsed.instructions() {
        let value = match instruction {
            Instruction::Push(value) => *value,
            Instruction::Load { slot, name } => {
                variables.value(*slot)
                         .ok_or_else(|| InternalError::UnboundVariable { name: name.clone() })?
            },
            Instruction::Unary(op) => {
                let operand = pop(&mut stack, instruction)?;
                (op.callback)(operand)
            },
            Instruction::Binary(op) => {
                let right = pop(&mut stack, instruction)?;
                let left = pop(&mut stack, instruction)?;
                (op.callback)(left, right)
            },
            Instruction::Call { function, arguments } => {
                if !function.arity.check(*arguments) {
                    return Err(InternalError::ArgumentCount { function:
                                                                  function.identifier.clone(),
                                                              expected:
                                                                  function.arity.to_string(),
                                                              found:    *arguments, });
                }
                let split = stack.len()
                                 .checked_sub(*arguments)
                                 .ok_or_else(|| underflow(instruction))?;
                let result = (function.callback)(&stack[split..]);
                stack.truncate(split);
                result
            },
        };
        stack.push(value);
    }

    match stack.len() {
        0 => Err(InternalError::EmptyStack),
        1 => Ok(stack[0]),
        count => Err(InternalError::LeftoverOperands { count }),
    }
}

fn pop(stack: &mut Vec<bool>, instruction: &Instruction) -> EvalResult<bool> {
    stack.pop().ok_or_else(|| underflow(instruction))
}

fn underflow(instruction: &Instruction) -> InternalError {
    InternalError::StackUnderflow { instruction: instruction.to_string() }
}
