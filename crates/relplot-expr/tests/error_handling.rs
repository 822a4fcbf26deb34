//! Malformed input must fail with a positioned error, never a panic.

use relplot_expr::{compile, compile_relation, CompileError, Compiler, Environment, RelationError};

fn compile_error(source: &str) -> CompileError {
    let env = Environment::standard();
    match compile(source, &env) {
        Ok(program) => panic!("'{source}' should fail, compiled to: {program}"),
        Err(error) => error,
    }
}

fn relation_error(source: &str) -> RelationError {
    let env = Environment::standard();
    match compile_relation(source, &env) {
        Ok(relation) => panic!("'{source}' should fail, got kind {}", relation.kind()),
        Err(error) => error,
    }
}

// =============================================================================
// Expressions
// =============================================================================

#[test]
fn test_unknown_character() {
    let err = compile_error("2 $ 3");
    assert!(
        matches!(err, CompileError::Syntax { offset: 2, found: '$' }),
        "Should report syntax error at '$', got: {:?}",
        err
    );
}

#[test]
fn test_unknown_identifier() {
    let err = compile_error("x + foo");
    assert_eq!(err.offset(), 4, "got: {:?}", err);
}

#[test]
fn test_two_operands_in_a_row() {
    let err = compile_error("2 3");
    assert!(matches!(err, CompileError::Syntax { offset: 2, .. }), "got: {:?}", err);
}

#[test]
fn test_two_infix_operators_in_a_row() {
    let err = compile_error("2*/3");
    assert!(matches!(err, CompileError::Syntax { offset: 2, found: '/' }), "got: {:?}", err);
}

#[test]
fn test_empty_parentheses() {
    let err = compile_error("()");
    assert!(matches!(err, CompileError::Syntax { offset: 1, found: ')' }), "got: {:?}", err);
}

#[test]
fn test_unclosed_call() {
    let err = compile_error("sin(x");
    assert_eq!(err, CompileError::UnmatchedOpen { offset: 3 });
}

#[test]
fn test_call_without_argument() {
    let err = compile_error("sin(");
    assert_eq!(err, CompileError::UnexpectedEnd { offset: 4 });
}

#[test]
fn test_too_many_arguments() {
    let err = compile_error("sqrt(1, 2)");
    assert!(
        matches!(err, CompileError::ArgumentCount { expected: 1, found: 2, .. }),
        "got: {:?}",
        err
    );
}

#[test]
fn test_unicode_offsets_are_bytes() {
    // 'é' is two bytes long
    let err = compile_error("é");
    assert_eq!(err, CompileError::Syntax { offset: 0, found: 'é' });
    let err = compile_error("1+é");
    assert_eq!(err.offset(), 2);
}

#[test]
fn test_error_offset_matches_error() {
    let env = Environment::standard();
    let compiler = Compiler::new(&env);
    for source in ["", "2+", "(", ")", "x y", "log(1)", "1,2"] {
        let offset = compiler.error_offset(source);
        assert_eq!(offset, Some(compile_error(source).offset()), "source: {source:?}");
    }
}

// =============================================================================
// Relations
// =============================================================================

#[test]
fn test_unbalanced_relation_is_invalid() {
    let err = relation_error("2+(3");
    assert!(matches!(err, RelationError::NoRelationalOperator { .. }), "got: {:?}", err);
}

#[test]
fn test_empty_relation_is_invalid() {
    assert_eq!(relation_error(""), RelationError::NoRelationalOperator { offset: 0 });
}

#[test]
fn test_unbalanced_side_is_invalid() {
    let err = relation_error("y=2+(3");
    assert!(
        matches!(err, RelationError::Right(CompileError::UnmatchedOpen { offset: 4 })),
        "Right-side offsets should be relative to the full text, got: {:?}",
        err
    );
}

#[test]
fn test_empty_left_side() {
    let err = relation_error("=x");
    assert_eq!(err, RelationError::Left(CompileError::UnexpectedEnd { offset: 0 }));
}

#[test]
fn test_second_relational_operator_is_a_syntax_error() {
    // Only the first comparison splits; the right side then sees '<'.
    let err = relation_error("0<x<1");
    assert!(matches!(err, RelationError::Right(CompileError::Syntax { offset: 3, found: '<' })), "got: {:?}", err);
}
