use pretty_assertions::assert_eq;

use crate::{
    lexer::prelude::LexicalErrorType,
    parser::prelude::{
        parse_module, parse_module_from_stream, Expression, InfixOperator, Module, ParseError,
        ParseErrorType, PrefixOperator, Statement
    },
    utils::prelude::SrcSpan
};

fn statements(input: &str) -> Result<Vec<Statement>, ParseError> {
    Ok(parse_module(input)?.module.program.statements)
}

fn expression(input: &str) -> Result<Expression, ParseError> {
    let mut statements = statements(&format!("::{input};"))?;

    match statements.pop() {
        Some(Statement::Print(print)) => Ok(print.expression),
        other => panic!("expected a print statement, got {other:?}"),
    }
}

fn error(input: &str) -> ParseErrorType {
    match parse_module(input) {
        Err(err) => err.error,
        Ok(parsed) => panic!("expected `{input}` to fail, got {}", parsed.module.program),
    }
}

#[test]
fn test_assignment_and_print() -> Result<(), ParseError> {
    let input = r#"
        m = mewmew;
        ::m;
    "#;

    let parsed = parse_module(input)?;

    assert_eq!(parsed.module.program.to_string(), "m = mewmew;\n::m;");

    match &parsed.module.program.statements[0] {
        Statement::Assignment(assignment) => {
            assert_eq!(assignment.identifier.value, "m");
            assert!(matches!(&assignment.value, Expression::Number(number) if number.value() == 2.0));
        },
        other => panic!("expected an assignment, got {other:?}")
    }

    Ok(())
}

#[test]
fn test_module_is_the_program() -> Result<(), ParseError> {
    let parsed = parse_module("::mew;")?;
    let program = parsed.module.program.clone();

    assert_eq!(parsed.module, Module { program });

    Ok(())
}

#[test]
fn test_empty_program() -> Result<(), ParseError> {
    assert!(statements("")?.is_empty());
    assert!(statements("  // only a comment\n")?.is_empty());

    Ok(())
}

#[test]
fn test_comments_are_collected() -> Result<(), ParseError> {
    let parsed = parse_module("// one\n::mew; // two\n")?;

    assert_eq!(parsed.comments.len(), 2);
    assert_eq!(parsed.comments[0], SrcSpan { start: 0, end: 6 });
    assert_eq!(parsed.module.program.statements.len(), 1);

    Ok(())
}

#[test]
fn test_infixes_are_left_associative() -> Result<(), ParseError> {
    let expr = expression("mew + mewmew - mewmewmew")?;

    let Expression::Infix(outer) = expr else { panic!("expected infix") };
    assert_eq!(outer.operator, InfixOperator::Subtract);

    let Expression::Infix(inner) = *outer.left else { panic!("expected infix on the left") };
    assert_eq!(inner.operator, InfixOperator::Add);

    Ok(())
}

#[test]
fn test_precedence() -> Result<(), ParseError> {
    // mew + (mewmew * mewmewmew) == mew
    let expr = expression("mew + mewmew * mewmewmew == mew")?;

    let Expression::Infix(equal) = expr else { panic!("expected infix") };
    assert_eq!(equal.operator, InfixOperator::Equal);

    let Expression::Infix(sum) = *equal.left else { panic!("expected sum") };
    assert_eq!(sum.operator, InfixOperator::Add);

    let Expression::Infix(product) = *sum.right else { panic!("expected product") };
    assert_eq!(product.operator, InfixOperator::Multiply);

    // relational binds tighter than equality
    let expr = expression("mew < mewmew != mew")?;
    let Expression::Infix(not_equal) = expr else { panic!("expected infix") };
    assert_eq!(not_equal.operator, InfixOperator::NotEqual);
    assert!(matches!(*not_equal.left, Expression::Infix(ref lt) if lt.operator == InfixOperator::LessThan));

    // modulo sits with the products
    let expr = expression("mew + mewmew % mewmew")?;
    let Expression::Infix(sum) = expr else { panic!("expected infix") };
    assert_eq!(sum.operator, InfixOperator::Add);
    assert!(matches!(*sum.right, Expression::Infix(ref m) if m.operator == InfixOperator::Modulo));

    Ok(())
}

#[test]
fn test_power_is_right_associative() -> Result<(), ParseError> {
    let expr = expression("mewmew ** mewmew ** mewmewmew")?;

    let Expression::Infix(outer) = expr else { panic!("expected infix") };
    assert_eq!(outer.operator, InfixOperator::Power);
    assert!(matches!(*outer.left, Expression::Number(_)));
    assert!(matches!(*outer.right, Expression::Infix(ref inner) if inner.operator == InfixOperator::Power));

    let expr = expression("mewmew ** mewmew * mewmewmew")?;
    let Expression::Infix(outer) = expr else { panic!("expected infix") };
    assert_eq!(outer.operator, InfixOperator::Multiply);

    Ok(())
}

#[test]
fn test_prefix() -> Result<(), ParseError> {
    let expr = expression("-mew * mewmew")?;
    let Expression::Infix(product) = expr else { panic!("expected infix") };
    assert!(matches!(*product.left, Expression::Prefix(ref p) if p.operator == PrefixOperator::Negate));

    let expr = expression("-mew ** mewmew")?;
    let Expression::Prefix(negate) = expr else { panic!("expected prefix") };
    assert!(matches!(*negate.expression, Expression::Infix(ref i) if i.operator == InfixOperator::Power));

    let expr = expression("~-m")?;
    let Expression::Prefix(abs) = expr else { panic!("expected prefix") };
    assert_eq!(abs.operator, PrefixOperator::AbsoluteValue);
    assert!(matches!(*abs.expression, Expression::Prefix(ref p) if p.operator == PrefixOperator::Negate));

    Ok(())
}

#[test]
fn test_nested() -> Result<(), ParseError> {
    let expr = expression("(mew + mew) * mewmew")?;

    let Expression::Infix(product) = expr else { panic!("expected infix") };
    assert_eq!(product.operator, InfixOperator::Multiply);
    assert!(matches!(*product.left, Expression::Nested { .. }));
    assert_eq!(product.to_string(), "(mew + mew) * mewmew");

    Ok(())
}

#[test]
fn test_conditionals() -> Result<(), ParseError> {
    let input = r#"
        mewmew > mew ? ::mewmew; ;
        mewmew < mew ? ::mewmew; : ::mew; ;
    "#;

    let statements = statements(input)?;
    assert_eq!(statements.len(), 2);

    match &statements[0] {
        Statement::Conditional(conditional) => {
            assert_eq!(conditional.resolution.statements.len(), 1);
            assert!(conditional.alternative.is_none());
        },
        other => panic!("expected a conditional, got {other:?}")
    }

    match &statements[1] {
        Statement::Conditional(conditional) => {
            assert_eq!(conditional.resolution.statements.len(), 1);
            assert_eq!(conditional.alternative.as_ref().map(|alt| alt.statements.len()), Some(1));
        },
        other => panic!("expected a conditional, got {other:?}")
    }

    Ok(())
}

#[test]
fn test_blocks_end_at_empty_statement() -> Result<(), ParseError> {
    let input = r#"
        m == mew ? a = mew; b = mewmew; ::a + b; ;
        ::m;
    "#;

    let statements = statements(input)?;
    assert_eq!(statements.len(), 2);

    let Statement::Conditional(conditional) = &statements[0] else { panic!("expected a conditional") };
    assert_eq!(conditional.resolution.statements.len(), 3);
    assert!(matches!(statements[1], Statement::Print(_)));

    Ok(())
}

#[test]
fn test_repeat() -> Result<(), ParseError> {
    let input = r#"
        m = mew;
        @mewmewmew: m = m + mew; ;
        ::m;
    "#;

    let statements = statements(input)?;
    assert_eq!(statements.len(), 3);

    let Statement::Repeat(repeat) = &statements[1] else { panic!("expected a repeat") };
    assert!(matches!(&repeat.count, Expression::Number(number) if number.value() == 3.0));
    assert_eq!(repeat.block.statements.len(), 1);

    Ok(())
}

#[test]
fn test_nesting() -> Result<(), ParseError> {
    let input = "@mewmew: m > mew ? ::m; : @m: ::mew; ; ; ;";

    let statements = statements(input)?;
    assert_eq!(statements.len(), 1);

    let Statement::Repeat(repeat) = &statements[0] else { panic!("expected a repeat") };
    let Statement::Conditional(conditional) = &repeat.block.statements[0] else { panic!("expected a conditional") };
    let alternative = conditional.alternative.as_ref().expect("else branch");
    assert!(matches!(alternative.statements[0], Statement::Repeat(_)));

    Ok(())
}

#[test]
fn test_display_reparses() -> Result<(), ParseError> {
    let input = r#"
        m = -mew.mewmew;
        x = ~m ** (mewmew % mew);
        m <= x ? ::m; : @mewmew: ::x; ; ;
    "#;

    let parsed = parse_module(input)?;
    let printed = parsed.module.program.to_string();
    let reparsed = parse_module(&printed)?;

    assert_eq!(printed, reparsed.module.program.to_string());
    assert_eq!(
        printed,
        "m = -mew.mewmew;\nx = ~m ** (mewmew % mew);\nm <= x ? ::m; : @mewmew: ::x;;;"
    );

    Ok(())
}

#[test]
fn test_from_stream() -> Result<(), ParseError> {
    let input = "m = mewmew; // café\n::m;";

    let parsed = parse_module_from_stream(input.chars())?;
    assert_eq!(parsed.module.program.statements.len(), 2);

    let Statement::Print(print) = &parsed.module.program.statements[1] else { panic!("expected print") };
    assert_eq!(print.location.start as usize, input.find("::").unwrap_or_default());

    Ok(())
}

#[test]
fn test_errors() {
    assert_eq!(error("m = mew"), ParseErrorType::MissingSemicolon);
    assert_eq!(error("::mew ::mew;"), ParseErrorType::MissingSemicolon);
    assert_eq!(error("mew > mew ::mew;"), ParseErrorType::MissingQuestionMark);
    assert_eq!(error("mew > mew ? ;"), ParseErrorType::EmptyBlock);
    assert_eq!(error("@mew ::mew; ;"), ParseErrorType::MissingColon);
    assert_eq!(error("::(mew + mew;"), ParseErrorType::MissingRParen);
    assert_eq!(error("::;"), ParseErrorType::ExpectedExpression);
    assert_eq!(error("m = ;"), ParseErrorType::ExpectedExpression);
    assert_eq!(error("mew > mew ? ::mew;"), ParseErrorType::MissingSemicolon);
    assert_eq!(error("::-"), ParseErrorType::ExpectedExpression);
    assert!(matches!(error(";"), ParseErrorType::UnexpectedToken { .. }));
    assert!(matches!(error("::mew; )"), ParseErrorType::UnexpectedToken { .. }));
}

#[test]
fn test_lex_errors_win() {
    assert_eq!(
        error("m = 2;"),
        ParseErrorType::LexError { error: crate::lexer::prelude::LexicalError {
            error: LexicalErrorType::DigitLiteral { digit: '2' },
            location: SrcSpan { start: 4, end: 5 },
        } }
    );

    assert!(matches!(
        error("::mew.;"),
        ParseErrorType::LexError { error } if error.error == LexicalErrorType::MissingSyllablesAfterPeriod
    ));
}

#[test]
fn test_error_spans() {
    let err = parse_module("m = mew\n::m;").expect_err("missing semicolon");
    assert_eq!(err.error, ParseErrorType::MissingSemicolon);
    assert_eq!(err.span, SrcSpan { start: 7, end: 7 });

    let err = parse_module("::mew; $").expect_err("unknown character");
    assert_eq!(err.span, SrcSpan { start: 7, end: 8 });
}
