// ABOUTME: Constants shared by the REPL/CLI shell

pub const VERSION: &str = "0.1.0";
pub const WELCOME_MESSAGE: &str = "Lispy v0.1";
pub const WELCOME_SUBTITLE: &str = "An embeddable Scheme-flavored Lisp in Rust";

pub const HELP_TEXT: &str = r#"
Available commands:
  (quit) or (exit)     - Exit the REPL
  (help)               - Show this help message
  (builtins)           - List the standard procedure library
  (kernel:debug)       - Toggle evaluator trace output
  (kernel:debug? )     - Inspect the trace flag

Type any Lisp expression to evaluate it. Use Ctrl-D or (quit) to exit.
"#;

pub const BUILTINS_SUMMARY: &str = r#"
Standard procedure library:

Arithmetic:     + - * /
Comparison:     = != === !== < <= > >=
Logic:          and or not
Types:          number? string? list? tuple? dict? symbol? bool? lambda? macro? env? procedure? null? typeof
Lists:          car head cdr tail cons concat length list tuple index last map each reduce slice
Strings:        to_s to_string
I/O:            print
Environments:   env:new env:current env:get env:define env:defined? env:set env:update
                env:parent env:parent? env:toplevel env:keys env:dump
Dicts:          dict:new dict:get dict:set dict:update dict:key? dict:keys
Meta:           eval parse inspect
Closures:       lambda:new lambda:args lambda:body lambda:env lambda:evaluator
                macro:new macro:args macro:body macro:env macro:evaluator
Errors:         error error:custom error:name error:message error:stack error:code
Kernel:         kernel:debug? kernel:debug
Special forms:  quote if define defined? set! lambda macro begin try
"#;
