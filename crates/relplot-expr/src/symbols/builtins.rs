//! Built-in vocabulary.
//!
//! Everything here is installed by [`Environment::with_builtins`]. The
//! engine does not treat these symbols specially; a host registering its own
//! operators through the same API gets identical behaviour.
//!
//! | Kind     | Symbols                                         | Priority |
//! |----------|-------------------------------------------------|----------|
//! | infix    | `+ -`                                           | 1        |
//! | infix    | `* / %`                                         | 2        |
//! | infix    | `^`                                             | 3        |
//! | prefix   | `- +`                                           | 2        |
//! | function | `sin cos tan asin acos atan sinh cosh tanh`     | max      |
//! | function | `sqrt abs lg ln log2`, `log(base, x)`           | max      |
//! | constant | `pi e`                                          |          |
//!
//! [`Environment::with_builtins`]: crate::Environment::with_builtins

use super::operator::OperatorFn;

pub(crate) const SUM_PRIORITY: u8 = 1;
pub(crate) const PRODUCT_PRIORITY: u8 = 2;
pub(crate) const POWER_PRIORITY: u8 = 3;
pub(crate) const PREFIX_PRIORITY: u8 = 2;

// === Infix ===

pub(crate) fn add(args: &[f64]) -> f64 {
    args[0] + args[1]
}

/// Also used to join the two sides of a relation.
pub(crate) fn subtract(args: &[f64]) -> f64 {
    args[0] - args[1]
}

pub(crate) fn multiply(args: &[f64]) -> f64 {
    args[0] * args[1]
}

pub(crate) fn divide(args: &[f64]) -> f64 {
    args[0] / args[1]
}

/// Floating remainder with the sign of the dividend, like C `fmod`.
pub(crate) fn remainder(args: &[f64]) -> f64 {
    args[0] % args[1]
}

pub(crate) fn power(args: &[f64]) -> f64 {
    args[0].powf(args[1])
}

pub(crate) const INFIX: &[(&str, u8, OperatorFn)] = &[
    ("+", SUM_PRIORITY, add),
    ("-", SUM_PRIORITY, subtract),
    ("*", PRODUCT_PRIORITY, multiply),
    ("/", PRODUCT_PRIORITY, divide),
    ("%", PRODUCT_PRIORITY, remainder),
    ("^", POWER_PRIORITY, power),
];

// === Prefix ===

fn negate(args: &[f64]) -> f64 {
    -args[0]
}

fn identity(args: &[f64]) -> f64 {
    args[0]
}

pub(crate) const PREFIX: &[(&str, OperatorFn)] = &[("-", negate), ("+", identity)];

// === Functions ===

macro_rules! unary_functions {
    ($($name:ident => $body:expr),* $(,)?) => {
        $(
            fn $name(args: &[f64]) -> f64 {
                let f: fn(f64) -> f64 = $body;
                f(args[0])
            }
        )*

        pub(crate) const UNARY_FUNCTIONS: &[(&str, OperatorFn)] = &[
            $((stringify!($name), $name)),*
        ];
    };
}

unary_functions! {
    sin => f64::sin,
    cos => f64::cos,
    tan => f64::tan,
    asin => f64::asin,
    acos => f64::acos,
    atan => f64::atan,
    sinh => f64::sinh,
    cosh => f64::cosh,
    tanh => f64::tanh,
    sqrt => f64::sqrt,
    abs => f64::abs,
    lg => f64::log10,
    ln => f64::ln,
    log2 => f64::log2,
}

/// `log(base, x)`: logarithm of `x` in an arbitrary base.
fn log(args: &[f64]) -> f64 {
    args[1].ln() / args[0].ln()
}

pub(crate) const BINARY_FUNCTIONS: &[(&str, OperatorFn)] = &[("log", log)];

// === Constants ===

pub(crate) const CONSTANTS: &[(&str, f64)] =
    &[("pi", std::f64::consts::PI), ("e", std::f64::consts::E)];

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> OperatorFn {
        UNARY_FUNCTIONS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, f)| *f)
            .unwrap()
    }

    #[test]
    fn test_remainder_keeps_dividend_sign() {
        assert_eq!(remainder(&[7.0, 3.0]), 1.0);
        assert_eq!(remainder(&[-7.0, 3.0]), -1.0);
    }

    #[test]
    fn test_log_any_base() {
        assert!((log(&[2.0, 8.0]) - 3.0).abs() < 1e-12);
        assert!((log(&[10.0, 1000.0]) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_unary_table_names_match_functions() {
        assert_eq!(lookup("lg")(&[100.0]), 2.0);
        assert_eq!(lookup("log2")(&[8.0]), 3.0);
        assert_eq!(lookup("abs")(&[-4.0]), 4.0);
        assert_eq!(UNARY_FUNCTIONS.len(), 14);
    }
}
