//! Whole programs through the full pipeline.

use treelox::context::CaptureContext;
use treelox::lox::Lox;

fn output(source: &str) -> Vec<String> {
    let context = CaptureContext::new();
    let mut lox = Lox::new(Box::new(context.clone()));

    if let Err(e) = lox.run(source) {
        panic!("program failed: {}", e);
    }

    context.output()
}

#[test]
fn counter_closure() {
    let source = r#"
        fun makeCounter() {
            var i = 0;
            fun count() {
                i = i + 1;
                print i;
            }
            return count;
        }

        var counter = makeCounter();
        counter();
        counter();
    "#;

    assert_eq!(output(source), vec!["1", "2"]);
}

#[test]
fn independent_closures() {
    let source = r#"
        fun makeCounter() {
            var i = 0;
            return fun () { i = i + 1; return i; };
        }

        var a = makeCounter();
        var b = makeCounter();
        a();
        a();
        print a();
        print b();
    "#;

    assert_eq!(output(source), vec!["3", "1"]);
}

#[test]
fn recursive_fibonacci() {
    let source = r#"
        fun fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }

        print fib(6);
        print fib(6) == 8;
    "#;

    assert_eq!(output(source), vec!["8", "true"]);
}

#[test]
fn forward_reference_to_global_function() {
    let source = r#"
        fun first() { return second(); }
        fun second() { return "second"; }
        print first();
    "#;

    assert_eq!(output(source), vec!["second"]);
}

#[test]
fn instance_without_init() {
    assert_eq!(
        output("class Bagel {} print Bagel(); print Bagel;"),
        vec!["instance of Bagel", "Bagel"]
    );
}

#[test]
fn initializer_fields_and_methods() {
    let source = r#"
        class Point {
            init(x, y) {
                this.x = x;
                this.y = y;
            }

            sum() {
                return this.x + this.y;
            }
        }

        var p = Point(1, 2);
        print p.sum();
        p.x = 10;
        print p.sum();
        print p.init(3, 4) == p;
        print p.x;
    "#;

    assert_eq!(output(source), vec!["3", "12", "true", "3"]);
}

#[test]
fn early_return_from_initializer_yields_instance() {
    let source = r#"
        class A {
            init() {
                this.v = 1;
                return;
            }
        }

        print A().v;
    "#;

    assert_eq!(output(source), vec!["1"]);
}

#[test]
fn bound_method_remembers_receiver() {
    let source = r#"
        class Person {
            init(name) { this.name = name; }
            greet() { print "hi " + this.name; }
        }

        var greet = Person("ada").greet;
        greet();
    "#;

    assert_eq!(output(source), vec!["hi ada"]);
}

#[test]
fn fields_shadow_methods() {
    let source = r#"
        class A {
            m() { return "method"; }
        }

        var a = A();
        a.m = fun () { return "field"; };
        print a.m();
    "#;

    assert_eq!(output(source), vec!["field"]);
}

#[test]
fn inherited_method() {
    let source = r#"
        class Doughnut {
            cook() { print "Fry until golden brown."; }
        }

        class BostonCream < Doughnut {}

        BostonCream().cook();
    "#;

    assert_eq!(output(source), vec!["Fry until golden brown."]);
}

#[test]
fn super_call_runs_superclass_method_once() {
    let source = r#"
        class A {
            method() { print "A method"; }
        }

        class B < A {
            method() {
                super.method();
                print "B method";
            }
        }

        class C < B {}

        C().method();
    "#;

    assert_eq!(output(source), vec!["A method", "B method"]);
}

#[test]
fn inherited_initializer() {
    let source = r#"
        class Base {
            init(v) { this.v = v; }
        }

        class Derived < Base {
            init(v) {
                super.init(v * 2);
            }
        }

        print Derived(21).v;
    "#;

    assert_eq!(output(source), vec!["42"]);
}

#[test]
fn static_methods() {
    let source = r#"
        class Math {
            class square(n) { return n * n; }
        }

        print Math.square(3);
        Math.pi = 3.14;
        print Math.pi;
    "#;

    assert_eq!(output(source), vec!["9", "3.14"]);
}

#[test]
fn while_and_for_loops() {
    let source = r#"
        var i = 0;
        while (i < 3) {
            print i;
            i = i + 1;
        }

        for (var j = 0; j < 2; j = j + 1) print j;
    "#;

    assert_eq!(output(source), vec!["0", "1", "2", "0", "1"]);
}

#[test]
fn break_and_continue() {
    let source = r#"
        for (var i = 0; i < 10; i = i + 1) {
            if (i == 1) continue;
            if (i == 4) break;
            print i;
        }

        var n = 0;
        while (true) {
            n = n + 1;
            if (n > 2) break;
        }
        print n;
    "#;

    assert_eq!(output(source), vec!["0", "2", "3", "3"]);
}

#[test]
fn return_from_inside_loop() {
    let source = r#"
        fun find() {
            for (var i = 0; i < 10; i = i + 1) {
                if (i == 3) return i;
            }
            return -1;
        }

        print find();
    "#;

    assert_eq!(output(source), vec!["3"]);
}

#[test]
fn closures_in_loop_capture_each_iteration_scope() {
    let source = r#"
        var first;
        for (var i = 0; i < 2; i = i + 1) {
            var j = i;
            fun show() { print j; }
            if (i == 0) first = show;
        }

        first();
    "#;

    assert_eq!(output(source), vec!["0"]);
}

#[test]
fn anonymous_function_arguments() {
    let source = r#"
        fun apply(f, x) { return f(x); }
        print apply(fun (n) { return n + 1; }, 41);
    "#;

    assert_eq!(output(source), vec!["42"]);
}
