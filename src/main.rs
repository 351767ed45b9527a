use clap::Parser;
use lispy::{config, evaluate, make_standard_environment, parse};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Embeddable Scheme-flavored Lisp: run a script, or drop into a REPL.
#[derive(Parser, Debug)]
#[command(name = "lispy")]
#[command(version = config::VERSION)]
#[command(about = "An embeddable Scheme-flavored Lisp interpreter")]
struct CliArgs {
    /// Script file to execute (optional - if not provided, starts REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let env = make_standard_environment();

    if let Some(script_path) = args.script {
        let contents = std::fs::read_to_string(&script_path)
            .map_err(|e| format!("cannot read script file {}: {}", script_path.display(), e))?;
        let expr = parse(&contents).map_err(|e| format!("parse error: {}", e))?;
        evaluate(expr, env).map_err(|e| format!("evaluation error: {}", e))?;
        return Ok(());
    }

    let mut rl = DefaultEditor::new()?;
    let history_file = ".lispy_history";
    let _ = rl.load_history(history_file);

    println!("{}", config::WELCOME_MESSAGE);
    println!("{}", config::WELCOME_SUBTITLE);

    loop {
        let readline = rl.readline("lispy> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                if line.trim().is_empty() {
                    continue;
                }
                match line.trim() {
                    "(quit)" | "(exit)" => {
                        println!("Goodbye!");
                        break;
                    }
                    "(help)" => {
                        println!("{}", config::HELP_TEXT);
                        continue;
                    }
                    "(builtins)" => {
                        println!("{}", config::BUILTINS_SUMMARY);
                        continue;
                    }
                    _ => {}
                }
                match parse(&line) {
                    Ok(expr) => match evaluate(expr, env.clone()) {
                        Ok(result) => println!("=> {}", result.to_display_string(true)),
                        Err(e) => eprintln!("Error: {}", e),
                    },
                    Err(e) => eprintln!("Parse error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
    Ok(())
}
