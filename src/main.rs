use std::{env, fs::read_to_string, path::Path, process::ExitCode, rc::Rc, time::Instant};

use cact::{
    display_error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::{type_check, TypeCheckOptions},
};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

const USAGE: &str = "usage: cact <file> [--no-builtins] [--dump]";

struct Args {
    file_path: String,
    register_builtins: bool,
    dump: bool,
}

fn parse_args() -> Option<Args> {
    let mut file_path = None;
    let mut register_builtins = true;
    let mut dump = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--no-builtins" => register_builtins = false,
            "--dump" => dump = true,
            flag if flag.starts_with("--") => return None,
            _ if file_path.is_none() => file_path = Some(arg),
            _ => return None,
        }
    }

    Some(Args {
        file_path: file_path?,
        register_builtins,
        dump,
    })
}

fn main() -> ExitCode {
    // Logging stays off unless CACT_LOG is set, e.g. CACT_LOG=cact=trace
    if let Ok(filter) = EnvFilter::try_from_env("CACT_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
            .init();
    }

    let Some(args) = parse_args() else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let file_name = Path::new(&args.file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file_path.clone());

    let source = match read_to_string(&args.file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", args.file_path, error);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(source.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, &args.file_path, &source);
            return ExitCode::FAILURE;
        }
    };

    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let (_, parsed) = parse(tokens, Rc::new(file_name));

    println!("Parsed in {:?}", parse_start.elapsed());

    let mut ast = match parsed {
        Ok(ast) => ast,
        Err(error) => {
            display_error(&error, &args.file_path, &source);
            return ExitCode::FAILURE;
        }
    };

    let type_check_start = Instant::now();
    let options = TypeCheckOptions {
        register_builtins: args.register_builtins,
    };
    let (type_checker, error) = type_check(&mut ast, &options);

    println!("Type checked in {:?}", type_check_start.elapsed());

    if let Some(error) = error {
        display_error(&error, &args.file_path, &source);
        return ExitCode::FAILURE;
    }

    if args.dump {
        println!("{:#?}", ast);
        println!("{:#?}", type_checker.registry);
    }

    println!(
        "Checked {} functions in {} scopes, total time: {:?}",
        type_checker.registry.functions().len(),
        type_checker.registry.scopes().len(),
        start.elapsed()
    );

    ExitCode::SUCCESS
}
