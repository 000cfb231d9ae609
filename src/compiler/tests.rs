//! Unit tests for the code generation module.
//!
//! Each test compiles a small program and compares the exact instruction
//! sequence, focusing on widening placement and label allocation.

use std::rc::Rc;

use crate::{
    lexer::lexer::tokenize,
    parser::parser::parse,
    vm::instruction::Instruction,
};

use super::compiler::compile;

fn generate(source: &str) -> Vec<String> {
    let tokens = tokenize(source.to_string(), Some("test.sl".to_string())).unwrap();
    let program = parse(tokens, Rc::new("test.sl".to_string())).unwrap();
    compile(&program)
        .instructions
        .iter()
        .map(|instruction| instruction.to_string())
        .collect()
}

fn count_itof(lines: &[String]) -> usize {
    lines.iter().filter(|line| *line == "itof").count()
}

#[test]
fn test_declaration_pushes_zero_values() {
    assert_eq!(generate("int a; float b; bool c; string d;"), vec![
        "push I 0", "save a",
        "push F 0.0", "save b",
        "push B false", "save c",
        "push S \"\"", "save d",
    ]);
}

#[test]
fn test_multiple_identifiers_in_one_declaration() {
    assert_eq!(generate("int a, b;"), vec!["push I 0", "save a", "push I 0", "save b"]);
}

#[test]
fn test_integer_assignment_and_write() {
    assert_eq!(generate("int x; x = 2 + 3; write x;"), vec![
        "push I 0", "save x",
        "push I 2", "push I 3", "add", "save x", "load x", "pop",
        "load x", "print 1",
    ]);
}

#[test]
fn test_mixed_addition_widens_left_operand() {
    let lines = generate("float y; y = 1 + 2.5;");
    assert_eq!(lines, vec![
        "push F 0.0", "save y",
        "push I 1", "itof", "push F 2.5", "add", "save y", "load y", "pop",
    ]);
    assert_eq!(count_itof(&lines), 1);
}

#[test]
fn test_mixed_operands_widen_right_operand() {
    let lines = generate("2.5 * 2;");
    assert_eq!(lines, vec!["push F 2.5", "push I 2", "itof", "mul", "pop"]);
}

#[test]
fn test_widening_with_compound_left_operand() {
    let lines = generate("(1 + 2) / 4.0;");
    assert_eq!(lines, vec![
        "push I 1", "push I 2", "add", "itof", "push F 4.0", "div", "pop",
    ]);
    assert_eq!(count_itof(&lines), 1);
}

#[test]
fn test_int_assigned_to_float_variable_is_widened() {
    assert_eq!(generate("float f; f = 3;"), vec![
        "push F 0.0", "save f",
        "push I 3", "itof", "save f", "load f", "pop",
    ]);
}

#[test]
fn test_no_widening_for_modulo_and_concat() {
    assert_eq!(generate("7 % 2;"), vec!["push I 7", "push I 2", "mod", "pop"]);
    assert_eq!(generate("\"a\" . \"b\";"), vec!["push S \"a\"", "push S \"b\"", "concat", "pop"]);
}

#[test]
fn test_comparison_tags_follow_widened_left_type() {
    assert_eq!(generate("1 < 2;"), vec!["push I 1", "push I 2", "lt I", "pop"]);
    assert_eq!(generate("1 > 2.0;"), vec!["push I 1", "itof", "push F 2.0", "gt F", "pop"]);
    assert_eq!(generate("\"a\" == \"b\";"), vec!["push S \"a\"", "push S \"b\"", "eq S", "pop"]);
}

#[test]
fn test_not_equal_is_negated_equality() {
    assert_eq!(generate("1 != 2;"), vec!["push I 1", "push I 2", "eq I", "not", "pop"]);
}

#[test]
fn test_logical_and_prefix_operators() {
    assert_eq!(generate("!true && false || true;"), vec![
        "push B true", "not", "push B false", "and", "push B true", "or", "pop",
    ]);
    assert_eq!(generate("-5;"), vec!["push I 5", "uminus", "pop"]);
}

#[test]
fn test_if_else_labels() {
    assert_eq!(generate("if (true) write 1; else write 2;"), vec![
        "push B true", "fjmp 0",
        "push I 1", "print 1", "jmp 1",
        "label 0",
        "push I 2", "print 1",
        "label 1",
    ]);
}

#[test]
fn test_if_without_else() {
    assert_eq!(generate("if (false) ;"), vec!["push B false", "fjmp 0", "jmp 1", "label 0", "label 1"]);
}

#[test]
fn test_while_loop() {
    assert_eq!(generate("int i; while (i < 3) i = i + 1;"), vec![
        "push I 0", "save i",
        "label 0",
        "load i", "push I 3", "lt I", "fjmp 1",
        "load i", "push I 1", "add", "save i", "load i", "pop",
        "jmp 0",
        "label 1",
    ]);
}

#[test]
fn test_for_loop() {
    assert_eq!(generate("int i; for (i = 0; i < 2; i = i + 1) write i;"), vec![
        "push I 0", "save i",
        "push I 0", "save i", "load i", "pop",
        "label 0",
        "load i", "push I 2", "lt I", "fjmp 1",
        "load i", "print 1",
        "load i", "push I 1", "add", "save i", "load i", "pop",
        "jmp 0",
        "label 1",
    ]);
}

#[test]
fn test_nested_constructs_allocate_labels_in_order() {
    let lines = generate("while (true) { if (false) ; }");
    assert_eq!(lines, vec![
        "label 0",
        "push B true", "fjmp 1",
        "push B false", "fjmp 2", "jmp 3", "label 2", "label 3",
        "jmp 0",
        "label 1",
    ]);
}

#[test]
fn test_every_label_is_defined_once() {
    let tokens = tokenize(
        "int i; for (i = 0; i < 3; i = i + 1) { if (i == 1) write i; else { while (false) ; } }".to_string(),
        None,
    )
    .unwrap();
    let program = parse(tokens, Rc::new("shell".to_string())).unwrap();
    let compiler = compile(&program);

    for id in 0..compiler.label_counter {
        let definitions = compiler
            .instructions
            .iter()
            .filter(|instruction| **instruction == Instruction::Label(id))
            .count();
        assert_eq!(definitions, 1, "label {} defined {} times", id, definitions);
    }
    assert_eq!(compiler.label_counter, 6);
}

#[test]
fn test_ternary_widens_int_branch() {
    assert_eq!(generate("write true ? 1 : 2.0;"), vec![
        "push B true", "fjmp 0",
        "push I 1", "itof", "jmp 1",
        "label 0",
        "push F 2.0",
        "label 1",
        "print 1",
    ]);
    assert_eq!(generate("write false ? 1.5 : 2;"), vec![
        "push B false", "fjmp 0",
        "push F 1.5", "jmp 1",
        "label 0",
        "push I 2", "itof",
        "label 1",
        "print 1",
    ]);
}

#[test]
fn test_read_uses_storage_tag() {
    assert_eq!(generate("float f; string s; read f, s;"), vec![
        "push F 0.0", "save f",
        "push S \"\"", "save s",
        "read F", "save f",
        "read S", "save s",
    ]);
}

#[test]
fn test_write_multiple_expressions() {
    assert_eq!(generate("write \"a\", 1, 2.5;"), vec!["push S \"a\"", "push I 1", "push F 2.5", "print 3"]);
}
