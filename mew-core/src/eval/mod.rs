pub mod error;


use std::io::Write;

use crate::{
    analyzer::Analyzed,
    environment::prelude::{from_bool, is_truthy, Environment, Value},
    parser::prelude::{
        Assignment, Block, Conditional, Expression, Infix, InfixOperator, Module, Prefix,
        PrefixOperator, Print, Program, Repeat, Statement
    },
    utils::prelude::Error
};

pub use error::RuntimeError;

pub type EvalResult<T> = Result<T, RuntimeError>;

/// Walks a program, reading and writing `env` and printing to `out`.
pub struct Evaluator<'a, W: Write> {
    env: &'a mut Environment,
    out: &'a mut W,
}

/// Evaluates a whole module. Stops at the first runtime error.
pub fn eval<W: Write>(module: &Module, env: &mut Environment, out: &mut W) -> EvalResult<()> {
    Evaluator::new(env, out).eval_program(&module.program)
}

/// Evaluates an analyzed module and attaches its source to a runtime error.
#[tracing::instrument(level = "debug", skip_all, fields(path = %analyzed.path.display()))]
pub fn run<W: Write>(analyzed: &Analyzed, env: &mut Environment, out: &mut W) -> Result<(), Error> {
    eval(&analyzed.module, env, out).map_err(|error| Error::Runtime {
        path: analyzed.path.clone(),
        src: analyzed.src.clone(),
        error
    })
}

impl<'a, W: Write> Evaluator<'a, W> {
    pub fn new(env: &'a mut Environment, out: &'a mut W) -> Self {
        Self { env, out }
    }

    pub fn eval_program(&mut self, program: &Program) -> EvalResult<()> {
        for statement in &program.statements {
            self.eval_statement(statement)?;
        }

        self.out.flush()?;

        Ok(())
    }

    pub fn eval_block(&mut self, block: &Block) -> EvalResult<()> {
        for statement in &block.statements {
            self.eval_statement(statement)?;
        }

        Ok(())
    }

    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<()> {
        match statement {
            Statement::Assignment(assignment) => self.eval_assignment(assignment),
            Statement::Print(print) => self.eval_print(print),
            Statement::Conditional(conditional) => self.eval_conditional(conditional).map(|_| ()),
            Statement::Repeat(repeat) => self.eval_repeat(repeat).map(|_| ())
        }
    }

    fn eval_assignment(&mut self, assignment: &Assignment) -> EvalResult<()> {
        let value = self.eval_expression(&assignment.value)?;

        tracing::debug!(name = %assignment.identifier.value, value, "assign");

        self.env.set(assignment.identifier.value.as_str(), value);

        Ok(())
    }

    fn eval_print(&mut self, print: &Print) -> EvalResult<()> {
        let value = self.eval_expression(&print.expression)?;

        tracing::debug!(value, "print");

        writeln!(self.out, "{value}")?;

        Ok(())
    }

    /// Runs the matching branch and returns the condition's value.
    pub fn eval_conditional(&mut self, conditional: &Conditional) -> EvalResult<Value> {
        let condition = self.eval_expression(&conditional.condition)?;

        tracing::debug!(condition, "conditional");

        match (is_truthy(condition), &conditional.alternative) {
            (true, _) => self.eval_block(&conditional.resolution)?,
            (false, Some(alternative)) => self.eval_block(alternative)?,
            (false, None) => {}
        }

        Ok(condition)
    }

    /// Runs the body `floor(count)` times and returns the count.
    ///
    /// The count is evaluated once, before the first iteration, so the body
    /// reassigning a variable used in the count has no effect on the loop.
    pub fn eval_repeat(&mut self, repeat: &Repeat) -> EvalResult<Value> {
        let count = self.eval_expression(&repeat.count)?;

        tracing::debug!(count, "repeat");

        let mut iteration: u64 = 1;

        while (iteration as Value) <= count {
            self.eval_block(&repeat.block)?;
            iteration += 1;
        }

        Ok(count)
    }

    pub fn eval_expression(&mut self, expression: &Expression) -> EvalResult<Value> {
        let value = match expression {
            Expression::Identifier(ident) => match self.env.get(&ident.value) {
                Some(value) => value,
                None => return Err(RuntimeError::UndeclaredVariable {
                    name: ident.value.clone(),
                    location: ident.location
                })
            },
            Expression::Number(number) => number.value(),
            Expression::Prefix(prefix) => self.eval_prefix(prefix)?,
            Expression::Infix(infix) => self.eval_infix(infix)?,
            Expression::Nested { expression, .. } => self.eval_expression(expression)?
        };

        tracing::trace!(%expression, value, "evaluated");

        Ok(value)
    }

    fn eval_prefix(&mut self, prefix: &Prefix) -> EvalResult<Value> {
        let value = self.eval_expression(&prefix.expression)?;

        Ok(match prefix.operator {
            PrefixOperator::Negate => -value,
            PrefixOperator::AbsoluteValue => value.abs()
        })
    }

    fn eval_infix(&mut self, infix: &Infix) -> EvalResult<Value> {
        let left = self.eval_expression(&infix.left)?;
        let right = self.eval_expression(&infix.right)?;

        Ok(match infix.operator {
            InfixOperator::Add => left + right,
            InfixOperator::Subtract => left - right,
            InfixOperator::Multiply => left * right,
            InfixOperator::Divide => left / right,
            InfixOperator::Modulo => modulo(left, right),
            InfixOperator::Power => left.powf(right),
            InfixOperator::Equal => from_bool(left == right),
            InfixOperator::NotEqual => from_bool(left != right),
            InfixOperator::LessThan => from_bool(left < right),
            InfixOperator::LessOrEqual => from_bool(left <= right),
            InfixOperator::GreaterThan => from_bool(left > right),
            InfixOperator::GreaterOrEqual => from_bool(left >= right)
        })
    }
}

/// Integer remainder of both operands truncated toward zero.
///
/// A zero divisor gives `NaN` instead of trapping.
pub fn modulo(left: Value, right: Value) -> Value {
    match (left as i64).checked_rem(right as i64) {
        Some(remainder) => remainder as Value,
        None => Value::NAN
    }
}
