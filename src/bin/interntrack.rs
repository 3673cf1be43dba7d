// Binary entry point: a line-based prompt over the command interface.
use anyhow::{Context, Result};
use interntrack::cli;
use interntrack::context::{AppContext, StandardContext};
use interntrack::logic::Logic;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let binary_name = args
        .first()
        .and_then(|a| std::path::Path::new(a).file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("interntrack")
        .to_string();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        cli::print_help(&binary_name);
        return Ok(());
    }

    let mut override_root: Option<PathBuf> = None;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--root" | "-r" => {
                if i + 1 < args.len() {
                    override_root = Some(args[i + 1].clone().into());
                    i += 1;
                } else {
                    eprintln!("--root needs a path");
                    std::process::exit(2);
                }
            }
            "--verbose" | "-v" => verbose = true,
            other => eprintln!("Ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    let ctx = StandardContext::new(override_root);
    init_logging(&ctx, verbose);

    let mut logic = Logic::load(&ctx)?;
    run_prompt(&mut logic)?;

    if let Err(e) = logic.shutdown(&ctx) {
        log::error!("Failed to save preferences: {:#}", e);
        eprintln!("Could not save preferences: {:#}", e);
    }
    Ok(())
}

fn init_logging(ctx: &dyn AppContext, verbose: bool) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        LevelFilter::Warn,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));

    let file_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    match open_log_file(ctx) {
        Ok(file) => loggers.push(WriteLogger::new(file_level, config, file)),
        Err(e) => eprintln!("Logging to file disabled: {:#}", e),
    }

    // Only fails if a logger is already installed.
    let _ = CombinedLogger::init(loggers);
}

fn open_log_file(ctx: &dyn AppContext) -> Result<std::fs::File> {
    let path = ctx
        .get_log_file_path()
        .context("No data directory for the log file")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open '{}'", path.display()))
}

fn run_prompt(logic: &mut Logic) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("Welcome to InternTrack. Type `help` for the list of commands.");

    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match logic.execute(&line) {
            Ok(result) => {
                println!("{}", cli::render(&result));
                if result.is_exit() {
                    break;
                }
            }
            Err(e) => println!("{}", e),
        }
    }
    Ok(())
}
