use serde::Serialize;
use std::env;
use std::path::PathBuf;
use toker::config::RuntimeConfig;
use toker::logging::{self, codes};
use toker::tokens::{classify_token, TokenCategory};
use toker::{log_info, log_success, SemiExpression, Tokenizer};

#[derive(Debug, Default)]
struct CliOptions {
    input: PathBuf,
    config_path: Option<PathBuf>,
    show_tokens: bool,
    show_comments: bool,
    find_classes: bool,
    json: bool,
}

#[derive(Serialize)]
struct TokenRecord {
    line: usize,
    category: Option<TokenCategory>,
    text: String,
}

#[derive(Serialize)]
struct SemiRecord {
    line: usize,
    tokens: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <source-file> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let options = parse_options(&args[1], &args[2..]);

    let mut config = match &options.config_path {
        Some(path) => RuntimeConfig::from_toml_file(path).map_err(|e| {
            eprintln!("Error [{}]: {}", e.error_code(), e);
            e
        })?,
        None => RuntimeConfig::default(),
    };
    if options.show_comments {
        config.tokenizer.return_comments = true;
    }

    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;

    if options.config_path.is_some() {
        log_success!(codes::success::CONFIG_LOADED, "Runtime configuration loaded",
            "config" => logging::config::get_config_summary()
        );
    }

    log_info!("Processing source",
        "path" => options.input.display(),
        "mode" => if options.show_tokens { "tokens" } else { "semi" }
    );

    if options.show_tokens {
        list_tokens(&options, &config)
    } else {
        list_semi_expressions(&options, &config)
    }
}

fn print_help(program_name: &str) {
    println!("toker v{}", env!("CARGO_PKG_VERSION"));
    println!("State-based tokenizer and semi-expression splitter for C-family sources");
    println!();
    println!("USAGE:");
    println!("    {} <source-file> [options]", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --tokens            List tokens instead of semi-expressions");
    println!("    --semi              List semi-expressions (default)");
    println!("    --comments          Keep comment tokens");
    println!("    --find-classes      Only show semi-expressions that open a class");
    println!("    --json              Emit JSON instead of text");
    println!("    --config FILE       Load preferences from a TOML file");
    println!();
    println!("ENVIRONMENT:");
    println!("    TOKER_RETURN_COMMENTS          true|false");
    println!("    TOKER_EXTRA_ONE_CHAR_TOKENS    e.g. \"! ?\"");
    println!("    TOKER_EXTRA_TWO_CHAR_TOKENS    e.g. \"-> !=\"");
    println!("    TOKER_LOGGING_MIN_LEVEL        error|warning|info|debug");
    println!("    TOKER_LOGGING_USE_STRUCTURED   true|false");
}

fn parse_options(input: &str, args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        input: PathBuf::from(input),
        ..CliOptions::default()
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--tokens" => options.show_tokens = true,
            "--semi" => options.show_tokens = false,
            "--comments" => options.show_comments = true,
            "--find-classes" => options.find_classes = true,
            "--json" => options.json = true,
            "--config" => {
                if i + 1 < args.len() {
                    options.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    eprintln!("Warning: --config requires a file path");
                }
            }
            _ => {
                eprintln!("Warning: Unknown option '{}'", args[i]);
            }
        }
        i += 1;
    }

    for conflict in conflicting_options(&options) {
        eprintln!("Warning: {}", conflict);
    }

    options
}

/// Flags that have no effect in the selected listing mode
fn conflicting_options(options: &CliOptions) -> Vec<&'static str> {
    let mut conflicts = Vec::new();
    if options.show_tokens && options.find_classes {
        conflicts.push("--find-classes applies to semi-expression listings and is ignored with --tokens");
    }
    conflicts
}

fn list_tokens(
    options: &CliOptions,
    config: &RuntimeConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut tokenizer = Tokenizer::with_preferences(&config.tokenizer);
    tokenizer.try_open(&options.input).map_err(|e| {
        eprintln!("Error [{}]: {}", e.error_code(), e);
        e
    })?;

    let mut records = Vec::new();
    while let Some(text) = tokenizer.get_token() {
        records.push(TokenRecord {
            line: tokenizer.line_count(),
            category: classify_token(&text),
            text,
        });
    }
    tokenizer.close();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for record in &records {
        let category = record.category.map(|c| c.as_str()).unwrap_or("unknown");
        println!("{:>5}  {:<20} {:?}", record.line, category, record.text);
    }
    println!();
    println!("{} tokens", records.len());

    Ok(())
}

fn list_semi_expressions(
    options: &CliOptions,
    config: &RuntimeConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut semi = SemiExpression::with_preferences(&config.tokenizer);
    semi.try_open(&options.input).map_err(|e| {
        eprintln!("Error [{}]: {}", e.error_code(), e);
        e
    })?;

    let mut records = Vec::new();
    while !semi.is_done() {
        semi.get_tokens();
        if semi.is_empty() {
            continue;
        }
        if options.find_classes && !semi.has_sequence(&["class", "{"]) {
            continue;
        }
        records.push(SemiRecord {
            line: semi.line_count(),
            tokens: semi.tokens().to_vec(),
        });
    }
    semi.close();

    if options.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for record in &records {
        println!("{:>5}  {}", record.line, record.tokens.join(" "));
    }
    println!();
    println!("{} semi-expressions", records.len());

    Ok(())
}
