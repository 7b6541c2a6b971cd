// zlisp - A small Lisp interpreter
// Copyright (c) 2025 Tom Waddington. MIT licensed.

mod report;

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::process;

use zlisp_core::{
    Env, Error, Symbol, Value, apply, eval_forms, eval_source, init_prelude, register_builtins,
    with_eval_stack,
};
use zlisp_parser::parse;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "\
Usage: zlisp [options] [script [args...]]

Options:
  -h, --help       Print this help message
  -v, --version    Print the version
  --no-prelude     Do not load the bootstrap definitions

Without a script, an interactive shell starts.

Environment:
  ZLISP_LOG        Log filter (default: warn)
  NO_COLOR         Disable coloured diagnostics";

struct Options {
    no_prelude: bool,
    /// Script path followed by its arguments
    free: Vec<String>,
}

enum Command {
    Help,
    Version,
    Run(Options),
}

fn parse_args() -> Result<Command, String> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(Command::Help);
    }
    if args.contains(["-v", "--version"]) {
        return Ok(Command::Version);
    }
    let no_prelude = args.contains("--no-prelude");
    let free = args
        .finish()
        .into_iter()
        .map(OsString::into_string)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|arg| format!("argument is not valid UTF-8: {:?}", arg))?;
    if let Some(flag) = free.iter().take(1).find(|a| a.starts_with('-')) {
        return Err(format!("unknown option '{}'", flag));
    }
    Ok(Command::Run(Options { no_prelude, free }))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("ZLISP_LOG", "warn"))
        .init();

    let options = match parse_args() {
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return;
        }
        Ok(Command::Version) => {
            println!("zLisp v{}", VERSION);
            return;
        }
        Ok(Command::Run(options)) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    match with_eval_stack(move || run(options)) {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: could not start evaluator thread: {}", e);
            process::exit(1);
        }
    }
}

/// Build the global environment, then run the script or the shell.
/// Returns the process exit code.
fn run(options: Options) -> i32 {
    let env = Env::new();
    register_builtins(&env);
    if !options.no_prelude
        && let Err(e) = init_prelude(&env)
    {
        eprintln!("Failed to load prelude: {}", e);
        return 1;
    }

    match options.free.first() {
        Some(path) => match run_script(path, &options.free, &env) {
            Ok(()) => 0,
            Err(e) => {
                report_error(&e);
                1
            }
        },
        None => {
            run_repl(&env);
            0
        }
    }
}

/// Bind `ARGV` and evaluate the script at `path`.
fn run_script(path: &str, argv: &[String], env: &Env) -> Result<(), Error> {
    let argv = argv.iter().map(|a| Value::string(a.as_str())).collect();
    env.set(Symbol::new("ARGV"), Value::list(argv));
    log::debug!("running script {}", path);

    match env.lookup(&Symbol::new("load-file")) {
        Some(load_file) => apply(&load_file, &[Value::string(path)]).map(|_| ()),
        // Without the prelude there is no load-file
        None => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| Error::Io(format!("'{}': {}", path, e)))?;
            eval_source(&text, env).map(|_| ())
        }
    }
}

fn report_error(e: &Error) {
    match e {
        Error::Read(diagnostics) => report::report_all(diagnostics),
        other => eprintln!("Error: {}", other),
    }
}

/// Read, evaluate and print until end of input.
fn run_repl(env: &Env) {
    println!("zLisp v{}", VERSION);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("zlisp> ");
        if let Err(e) = io::stdout().flush() {
            log::warn!("could not flush stdout: {}", e);
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Error: {}", e);
                break;
            }
            None => {
                println!();
                break;
            }
        };

        let (doc, sink) = parse(&line);
        if !sink.is_empty() {
            report::report_all(sink.iter());
            continue;
        }
        let Some(doc) = doc else { continue };
        if doc.children.is_empty() {
            continue;
        }
        match eval_forms(&doc.children, env) {
            Ok(result) => println!("{}", result),
            Err(e) => report_error(&e),
        }
    }
}
