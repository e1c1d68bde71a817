use treelox::environment::Environment;
use treelox::token::{Token, TokenType};
use treelox::value::Value;

fn ident(name: &str) -> Token {
    Token::new(TokenType::IDENTIFIER, name, None, 1)
}

#[test]
fn define_then_get() {
    let env = Environment::new();
    env.define(&ident("a"), Some(Value::Number(1.0))).unwrap();

    assert_eq!(env.get(&ident("a")).unwrap(), Value::Number(1.0));
}

#[test]
fn unassigned_is_distinct_from_undefined() {
    let env = Environment::new();
    env.define(&ident("x"), None).unwrap();

    let unassigned = env.get(&ident("x")).unwrap_err();
    assert_eq!(unassigned.message, "Unassigned variable x");

    let undefined = env.get(&ident("y")).unwrap_err();
    assert_eq!(undefined.message, "Undefined variable y");
}

#[test]
fn nil_initializer_is_assigned() {
    let env = Environment::new();
    env.define(&ident("x"), Some(Value::Nil)).unwrap();

    assert_eq!(env.get(&ident("x")).unwrap(), Value::Nil);
}

#[test]
fn redefinition_in_same_scope_fails() {
    let env = Environment::new();
    env.define(&ident("a"), Some(Value::Nil)).unwrap();

    let error = env.define(&ident("a"), Some(Value::Nil)).unwrap_err();
    assert_eq!(error.message, "Variable a already defined");
}

#[test]
fn shadowing_in_child_scope() {
    let outer = Environment::new();
    outer.define(&ident("a"), Some(Value::Number(1.0))).unwrap();

    let inner = outer.child();
    inner.define(&ident("a"), Some(Value::Number(2.0))).unwrap();

    assert_eq!(inner.get(&ident("a")).unwrap(), Value::Number(2.0));
    assert_eq!(outer.get(&ident("a")).unwrap(), Value::Number(1.0));
}

#[test]
fn lookup_and_assignment_recurse_outward() {
    let outer = Environment::new();
    outer.define(&ident("a"), None).unwrap();

    let inner = outer.child().child();
    inner.assign(&ident("a"), Value::Bool(true)).unwrap();

    assert_eq!(outer.get(&ident("a")).unwrap(), Value::Bool(true));
    assert_eq!(inner.get(&ident("a")).unwrap(), Value::Bool(true));
}

#[test]
fn assigning_undefined_fails() {
    let env = Environment::new().child();

    let error = env.assign(&ident("nope"), Value::Nil).unwrap_err();
    assert_eq!(error.message, "Undefined variable nope");
}

#[test]
fn distance_indexed_access() {
    let global = Environment::new();
    global.define(&ident("a"), Some(Value::Number(1.0))).unwrap();

    let middle = global.child();
    middle.define(&ident("a"), Some(Value::Number(2.0))).unwrap();

    let inner = middle.child();

    assert_eq!(inner.get_at(1, &ident("a")).unwrap(), Value::Number(2.0));
    assert_eq!(inner.get_at(2, &ident("a")).unwrap(), Value::Number(1.0));

    inner.assign_at(2, &ident("a"), Value::Number(10.0)).unwrap();
    assert_eq!(global.get(&ident("a")).unwrap(), Value::Number(10.0));
    assert_eq!(middle.get(&ident("a")).unwrap(), Value::Number(2.0));
}

#[test]
fn get_at_does_not_search_other_scopes() {
    let global = Environment::new();
    global.define(&ident("a"), Some(Value::Nil)).unwrap();
    let inner = global.child();

    assert!(inner.get_at(0, &ident("a")).is_err());
    assert!(inner.get_at(5, &ident("a")).is_err());
}

#[test]
fn clones_share_the_same_scope() {
    let env = Environment::new();
    let alias = env.clone();

    alias.define(&ident("a"), Some(Value::String("shared".into()))).unwrap();

    assert_eq!(env.get(&ident("a")).unwrap(), Value::String("shared".into()));
}
