//! Relations compile to a single `left - right` program.

use std::sync::Arc;

use relplot_expr::{compile_relation, Environment, Evaluator, Relation, RelationKind};

fn relation(source: &str, env: &Environment) -> Relation {
    compile_relation(source, env).unwrap_or_else(|e| panic!("'{source}' should compile, got: {e}"))
}

fn at(relation: &Relation, env: &Environment, x: f64, y: f64) -> f64 {
    env.axes().expect("axes registered").set(x, y);
    relation
        .evaluate(&mut Evaluator::new())
        .expect("compiled relations evaluate")
}

#[test]
fn test_circle_is_zero_on_the_curve() {
    let env = Environment::standard();
    let circle = relation("x^2+y^2=25", &env);
    assert_eq!(circle.kind(), RelationKind::Equal);
    assert_eq!(at(&circle, &env, 3.0, 4.0), 0.0);
    assert_eq!(at(&circle, &env, 0.0, 0.0), -25.0);
}

#[test]
fn test_relational_kinds() {
    let env = Environment::standard();
    let cases = [
        ("x<=5", RelationKind::LessEqual),
        ("x>=5", RelationKind::GreaterEqual),
        ("x<5", RelationKind::Less),
        ("x>5", RelationKind::Greater),
        ("x!=5", RelationKind::NotEqual),
        ("x=5", RelationKind::Equal),
    ];
    for (source, kind) in cases {
        let rel = relation(source, &env);
        assert_eq!(rel.kind(), kind, "source: {source}");
        assert_eq!(at(&rel, &env, 7.0, 0.0), 2.0, "source: {source}");
    }
}

#[test]
fn test_program_is_left_then_right_then_subtract() {
    let env = Environment::standard();
    let rel = relation("sin(x) < y", &env);
    assert_eq!(rel.program().to_string(), "x sin y -");
}

#[test]
fn test_sign_tracks_side_of_curve() {
    let env = Environment::standard();
    let rel = relation("y = sin(x)", &env);
    assert!(at(&rel, &env, 0.0, 1.0) > 0.0);
    assert!(at(&rel, &env, 0.0, -1.0) < 0.0);
    let below = at(&rel, &env, 0.0, -1.0);
    assert_eq!(rel.kind().is_satisfied_by(below), Some(false));
}

#[test]
fn test_programs_share_variable_cells() {
    let mut env = Environment::standard();
    let t = env.register_variable("t").unwrap();
    let a = relation("y = t*x", &env);
    let b = relation("x = t", &env);

    t.set(2.0);
    assert_eq!(at(&a, &env, 1.0, 0.0), -2.0);
    assert_eq!(at(&b, &env, 1.0, 0.0), -1.0);

    t.set(5.0);
    assert_eq!(at(&a, &env, 1.0, 0.0), -5.0);
    assert_eq!(at(&b, &env, 1.0, 0.0), -4.0);
    assert!(Arc::strong_count(&t) >= 3);
}

#[test]
fn test_subtraction_survives_custom_minus() {
    fn keep_left(args: &[f64]) -> f64 {
        args[0]
    }

    // With no infix '-' registered, relations still subtract.
    let mut env = Environment::new();
    let x = env.register_variable("x").unwrap();
    env.register_infix("#", 1, keep_left).unwrap();
    let rel = relation("x#1 = 3", &env);
    x.set(10.0);
    assert_eq!(rel.evaluate(&mut Evaluator::new()), Ok(7.0));
}

#[test]
fn test_not_equal_wins_over_suffix_bang() {
    fn factorial(args: &[f64]) -> f64 {
        (1..=args[0] as u64).map(|n| n as f64).product()
    }

    let mut env = Environment::standard();
    env.register_suffix("!", factorial).unwrap();

    let rel = relation("x!=5", &env);
    assert_eq!(rel.kind(), RelationKind::NotEqual);
    assert_eq!(rel.program().to_string(), "x 5 -");

    let rel = relation("x! = 6", &env);
    assert_eq!(rel.kind(), RelationKind::Equal);
    assert_eq!(at(&rel, &env, 3.0, 0.0), 0.0);
}
