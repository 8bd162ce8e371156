//! Precedence climbing and literals.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::{condition, sexpr};

fn grouped(expr_text: &str) -> String {
    sexpr(&condition(expr_text))
}

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(grouped("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(grouped("1 * 2 + 3"), "(+ (* 1 2) 3)");
}

#[test]
fn test_parentheses_group() {
    assert_eq!(grouped("(1 + 2) * 3"), "(* (+ 1 2) 3)");
    assert_eq!(grouped("( ( 1 ) )"), "1");
}

#[test]
fn test_left_associativity() {
    assert_eq!(grouped("1 - 2 - 3"), "(- (- 1 2) 3)");
    assert_eq!(grouped("8 / 4 % 3"), "(% (/ 8 4) 3)");
}

#[test]
fn test_mixed_precedence_levels() {
    assert_eq!(
        grouped("1 * 2 + 3 * 4 == 14"),
        "(== (+ (* 1 2) (* 3 4)) 14)"
    );
    assert_eq!(grouped("$a || $b && $c"), "(|| $a (&& $b $c))");
    assert_eq!(
        grouped("$a == 1 && $b < 2 || !$c"),
        "(|| (&& (== $a 1) (< $b 2)) (! $c))"
    );
}

#[test]
fn test_two_character_operators() {
    assert_eq!(grouped("$a <= 2"), "(<= $a 2)");
    assert_eq!(grouped("$a < 2"), "(< $a 2)");
    assert_eq!(grouped("$a >= 2"), "(>= $a 2)");
    assert_eq!(grouped("$a>2"), "(> $a 2)");
    assert_eq!(grouped("$a != 2"), "(!= $a 2)");
    assert_eq!(grouped("$a==2"), "(== $a 2)");
}

#[test]
fn test_negative_literals() {
    assert_eq!(grouped("-5 - -3"), "(- -5 -3)");
    assert_eq!(grouped("1-2"), "(- 1 2)");
}

#[test]
fn test_not() {
    assert_eq!(grouped("!!$a"), "(! (! $a))");
    assert_eq!(grouped("!($a && $b)"), "(! (&& $a $b))");
    assert_eq!(grouped("!$a && $b"), "(&& (! $a) $b)");
}

#[test]
fn test_keyword_literals() {
    assert_eq!(grouped("true && false"), "(&& true false)");
}

#[test]
fn test_list_and_range_literals() {
    assert_eq!(grouped("[1, 2, $x]"), "[1 2 $x]");
    assert_eq!(grouped("[]"), "[]");
    assert_eq!(grouped("[ ]"), "[]");
    assert_eq!(grouped("[1..$n]"), "[1..$n]");
    assert_eq!(grouped("[ 3 .. 1 ]"), "[3..1]");
}

#[test]
fn test_reference_operands() {
    assert_eq!(grouped("$a.b + $c[0]"), "(+ $a.b $c[0])");
    assert_eq!(grouped("${a} * $!b"), "(* $a $!b)");
}
