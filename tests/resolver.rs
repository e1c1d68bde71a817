use treelox::context::Diagnostics;
use treelox::parser::{parse, Parsed};
use treelox::resolver::{resolve, resolve_expression, Locals};
use treelox::scanner::scan;

fn resolve_source(source: &str) -> (Locals, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let tokens = scan(source, &mut diagnostics);

    let locals = match parse(tokens, true, &mut diagnostics) {
        Parsed::Statements(stmts) => resolve(&stmts, &mut diagnostics),
        Parsed::Expression(expr) => resolve_expression(&expr, &mut diagnostics),
    };

    (locals, diagnostics)
}

fn messages(diagnostics: &Diagnostics) -> Vec<String> {
    diagnostics.iter().map(|d| d.message.clone()).collect()
}

fn hop_counts(locals: &Locals) -> Vec<usize> {
    let mut hops: Vec<usize> = locals.values().copied().collect();
    hops.sort_unstable();
    hops
}

#[test]
fn simple_expression_has_no_errors() {
    let (locals, diagnostics) = resolve_source("1 + 2");

    assert!(locals.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn globals_are_not_recorded() {
    let (locals, diagnostics) = resolve_source("var x = 1; x;");

    assert!(locals.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn block_local_resolves_at_zero() {
    let (locals, diagnostics) = resolve_source("{ var x = 1; x; }");

    assert!(diagnostics.is_empty());
    assert_eq!(hop_counts(&locals), vec![0]);
}

#[test]
fn variable_one_block_deeper_resolves_at_one() {
    let (locals, diagnostics) = resolve_source("{ { var x = 1; { x; } } }");

    assert!(diagnostics.is_empty());
    assert_eq!(hop_counts(&locals), vec![1]);
}

#[test]
fn innermost_declaration_wins() {
    let (locals, diagnostics) = resolve_source("{ var x = 1; { var x = 2; print x; } print x; }");

    assert!(diagnostics.is_empty());
    assert_eq!(hop_counts(&locals), vec![0, 0]);
}

#[test]
fn redeclaration_in_same_scope() {
    let (_, diagnostics) = resolve_source("{ var x = 1; var x = 2; }");

    // One for the redeclaration, one because `x` is never read.
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        messages(&diagnostics),
        vec![
            "Variable x already declared in this scope.".to_string(),
            "Local variable x is never used.".to_string()
        ]
    );
}

#[test]
fn shadowing_across_scopes_is_fine() {
    let (_, diagnostics) = resolve_source("var a = 1; { var a = 2; print a; }");

    assert!(diagnostics.is_empty());
}

#[test]
fn globals_may_be_redeclared_and_unused() {
    let (_, diagnostics) = resolve_source("var a = 1; var a = 2;");

    assert!(diagnostics.is_empty());
}

#[test]
fn reading_local_in_own_initializer() {
    let (_, diagnostics) = resolve_source("{ var a = a; }");

    assert_eq!(
        messages(&diagnostics),
        vec!["Can't read local variable a in its own initializer.".to_string()]
    );
}

#[test]
fn unused_locals_are_reported_in_source_order() {
    let (_, diagnostics) = resolve_source("{\nvar b = 1;\nvar a = 2;\n}");

    let reported: Vec<(usize, String)> = diagnostics
        .iter()
        .map(|d| (d.line, d.message.clone()))
        .collect();

    assert_eq!(
        reported,
        vec![
            (2, "Local variable b is never used.".to_string()),
            (3, "Local variable a is never used.".to_string())
        ]
    );
}

#[test]
fn assignment_alone_does_not_count_as_use() {
    let (_, diagnostics) = resolve_source("{ var a; a = 1; }");

    assert_eq!(
        messages(&diagnostics),
        vec!["Local variable a is never used.".to_string()]
    );
}

#[test]
fn parameters_are_never_reported_unused() {
    let (_, diagnostics) = resolve_source("fun f(a, b) {}");

    assert!(diagnostics.is_empty());
}

#[test]
fn this_outside_class() {
    let (_, diagnostics) = resolve_source("print this;");

    assert_eq!(
        messages(&diagnostics),
        vec!["Can't use 'this' outside of a class.".to_string()]
    );
}

#[test]
fn this_in_plain_function() {
    let (_, diagnostics) = resolve_source("fun notAMethod() { print this; }");

    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn this_in_method_resolves_one_hop_out() {
    let (locals, diagnostics) = resolve_source("class A { m() { return this; } }");

    assert!(diagnostics.is_empty());
    assert_eq!(hop_counts(&locals), vec![1]);
}

#[test]
fn super_in_method_resolves_two_hops_out() {
    let (locals, diagnostics) =
        resolve_source("class A { m() {} } class B < A { m() { super.m(); } }");

    assert!(diagnostics.is_empty());
    assert_eq!(hop_counts(&locals), vec![2]);
}

#[test]
fn super_without_superclass() {
    let (_, diagnostics) = resolve_source("class A { m() { super.m(); } }");

    assert_eq!(
        messages(&diagnostics),
        vec!["Can't use 'super' in a class with no superclass.".to_string()]
    );
}

#[test]
fn super_outside_class() {
    let (_, diagnostics) = resolve_source("super.m();");

    assert_eq!(
        messages(&diagnostics),
        vec!["Can't use 'super' outside of a class.".to_string()]
    );
}

#[test]
fn static_methods_have_no_receiver() {
    let (_, diagnostics) =
        resolve_source("class A {} class B < A { class s() { this; super.s(); } }");

    assert_eq!(
        messages(&diagnostics),
        vec![
            "Can't use 'this' in a static method.".to_string(),
            "Can't use 'super' in a static method.".to_string()
        ]
    );
}

#[test]
fn return_at_top_level() {
    let (_, diagnostics) = resolve_source("return 1;");

    assert_eq!(
        messages(&diagnostics),
        vec!["Can't return from top-level code.".to_string()]
    );
}

#[test]
fn return_value_from_initializer() {
    let (_, diagnostics) = resolve_source("class A { init() { return 1; } }");

    assert_eq!(
        messages(&diagnostics),
        vec!["Can't return a value from an initializer.".to_string()]
    );
}

#[test]
fn bare_return_in_initializer_is_fine() {
    let (_, diagnostics) = resolve_source("class A { init() { return; } }");

    assert!(diagnostics.is_empty());
}

#[test]
fn class_inheriting_from_itself() {
    let (_, diagnostics) = resolve_source("class A < A {}");

    assert_eq!(
        messages(&diagnostics),
        vec!["A class can't inherit from itself.".to_string()]
    );
}

#[test]
fn closure_reference_counts_function_scopes() {
    let (locals, diagnostics) = resolve_source(
        "fun outer() { var x = 1; fun inner() { return x; } return inner; }",
    );

    assert!(diagnostics.is_empty());
    // `x` from inside `inner` is one scope out; `inner` is read in its own scope.
    assert_eq!(hop_counts(&locals), vec![0, 1]);
}

#[test]
fn errors_do_not_stop_the_walk() {
    let (_, diagnostics) = resolve_source("return 1; print this; { var unused = 1; }");

    assert_eq!(diagnostics.len(), 3);
}
