use treelox::context::Diagnostics;
use treelox::expr::Expr;
use treelox::parser::{parse, Parsed};
use treelox::printer::{AstPrinter, RpnPrinter};
use treelox::scanner::scan;
use treelox::stmt::Stmt;

/// The first expression in `source`, whether or not it ends with `;`.
fn expr(source: &str) -> Expr {
    let mut diagnostics = Diagnostics::new();
    let tokens = scan(source, &mut diagnostics);

    match parse(tokens, true, &mut diagnostics) {
        Parsed::Expression(expr) => expr,
        Parsed::Statements(mut stmts) => match stmts.remove(0) {
            Stmt::Expression(expr) => expr,
            other => panic!("expected an expression statement, got {:?}", other),
        },
    }
}

#[test]
fn prefix_textbook_example() {
    assert_eq!(AstPrinter::print(&expr("-123 * (45.67)")), "(* (- 123) (group 45.67))");
}

#[test]
fn prefix_covers_other_forms() {
    assert_eq!(AstPrinter::print(&expr("a ? b : c")), "(?: a b c)");
    assert_eq!(AstPrinter::print(&expr("x = f(1, \"s\")")), "(= x (call f 1 s))");
    assert_eq!(AstPrinter::print(&expr("a.b = nil")), "(= (. a b) nil)");
    assert_eq!(AstPrinter::print(&expr("fun (a, b) {}")), "(fun (a b))");
    assert_eq!(AstPrinter::print(&expr("*3;")), "(error * 3)");
}

#[test]
fn rpn_textbook_example() {
    assert_eq!(
        RpnPrinter::print(&expr("(1 + 2) * (4 - 3)")).unwrap(),
        "1 2 + 4 3 - *"
    );
}

#[test]
fn rpn_conditional() {
    assert_eq!(RpnPrinter::print(&expr("c ? a : b")).unwrap(), "c a b ?");
    assert_eq!(RpnPrinter::print(&expr("-x")).unwrap(), "x -");
}

#[test]
fn rpn_rejects_binary_error() {
    assert!(RpnPrinter::print(&expr("*3;")).is_err());
}
