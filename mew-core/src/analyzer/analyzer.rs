use std::collections::{HashMap, HashSet};

use crate::{
    analyzer::prelude::Warning,
    environment::prelude::{is_truthy, Environment, Value},
    eval::Evaluator,
    parser::prelude::{Block, Expression, Module, Statement},
    utils::prelude::{ModuleWarningEmitter, SrcSpan}
};

#[derive(Debug, Default)]
pub struct ModuleAnalyzer {
    warnings: Vec<Warning>,
    assigned: HashMap<String, SrcSpan>,
    read: HashSet<String>,
}

impl ModuleAnalyzer {
    /// Walks `module` and emits every warning found, ordered by position.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn analyze(module: &Module, warnings: &ModuleWarningEmitter) {
        let mut analyzer = ModuleAnalyzer::default();

        for statement in &module.program.statements {
            analyzer.analyze_statement(statement);
        }

        analyzer.collect_unused();

        analyzer.warnings.sort_by_key(|w| w.location().start);

        tracing::debug!(warnings = analyzer.warnings.len(), "analyzed module");

        for warning in analyzer.warnings {
            warnings.emit(warning);
        }
    }

    fn analyze_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Assignment(assignment) => {
                self.analyze_expression(&assignment.value);

                self.assigned
                    .entry(assignment.identifier.value.clone())
                    .or_insert(assignment.identifier.location);
            },
            Statement::Print(print) => self.analyze_expression(&print.expression),
            Statement::Conditional(conditional) => {
                self.analyze_expression(&conditional.condition);

                if let Some(condition) = fold(&conditional.condition) {
                    match (is_truthy(condition), &conditional.alternative) {
                        (true, Some(alternative)) => self.warnings.push(
                            Warning::UnreachableElseClause { location: alternative.location }
                        ),
                        (false, _) => self.warnings.push(
                            Warning::UnreachableIfClause { location: conditional.resolution.location }
                        ),
                        (true, None) => {}
                    }
                }

                self.analyze_block(&conditional.resolution);

                if let Some(alternative) = &conditional.alternative {
                    self.analyze_block(alternative);
                }
            },
            Statement::Repeat(repeat) => {
                self.analyze_expression(&repeat.count);

                if fold(&repeat.count).is_some_and(|count| !(count >= 1.0)) {
                    self.warnings.push(Warning::UnreachableLoopBody { location: repeat.block.location });
                }

                self.analyze_block(&repeat.block);
            }
        }
    }

    fn analyze_block(&mut self, block: &Block) {
        for statement in &block.statements {
            self.analyze_statement(statement);
        }
    }

    fn analyze_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Identifier(ident) => {
                self.read.insert(ident.value.clone());
            },
            Expression::Number(_) => {},
            Expression::Prefix(prefix) => self.analyze_expression(&prefix.expression),
            Expression::Infix(infix) => {
                self.analyze_expression(&infix.left);
                self.analyze_expression(&infix.right);
            },
            Expression::Nested { expression, .. } => self.analyze_expression(expression)
        }
    }

    fn collect_unused(&mut self) {
        for (name, location) in &self.assigned {
            if !self.read.contains(name) {
                self.warnings.push(Warning::UnusedVariable {
                    location: *location,
                    name: name.clone(),
                });
            }
        }
    }
}

/// Value of an expression without identifiers, computed by the evaluator itself.
fn fold(expression: &Expression) -> Option<Value> {
    if !expression.is_constant() {
        return None;
    }

    let mut env = Environment::new();
    let mut sink = std::io::sink();

    Evaluator::new(&mut env, &mut sink)
        .eval_expression(expression)
        .ok()
}
