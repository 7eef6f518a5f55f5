use std::io;

use thiserror::Error;

use crate::token::Span;

/// Typed errors raised during evaluation. Each language-level failure keeps
/// the span of the operator or name token that triggered it so the reporter
/// can point back into the source.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Operand must be a number.")]
    UnaryOperandNotNumber { span: Span },
    #[error("Operands must be numbers.")]
    OperandsNotNumbers { span: Span },
    #[error("Operands must be two numbers or two strings.")]
    BadAdditionOperands { span: Span },
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable { name: String, span: Span },
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl RuntimeError {
    pub fn span(&self) -> Option<Span> {
        match self {
            RuntimeError::UnaryOperandNotNumber { span }
            | RuntimeError::OperandsNotNumbers { span }
            | RuntimeError::BadAdditionOperands { span }
            | RuntimeError::UndefinedVariable { span, .. } => Some(*span),
            RuntimeError::Io(_) => None,
        }
    }
}
