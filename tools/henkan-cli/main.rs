use clap::Parser;
use henkan::prelude::*;
use std::fs;
use std::time::Instant;

/// A workflow graph conversion CLI: editor JSON in, API prompt JSON out
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the editor workflow JSON file
    input: String,

    /// Path to write the API prompt JSON (stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// Path to the engine's introspection document (object_info JSON)
    #[arg(long)]
    object_info: Option<String>,

    /// Path to a parameter overrides JSON file
    #[arg(long)]
    overrides: Option<String>,

    /// Pretty-print the output JSON
    #[arg(short, long)]
    pretty: bool,

    /// Exit nonzero if any error-severity issue is reported
    #[arg(long)]
    strict: bool,
}

fn main() {
    run_conversion(Cli::parse());
}

fn run_conversion(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let workflow_json = fs::read_to_string(&cli.input).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read workflow file '{}': {}",
            &cli.input, e
        ))
    });
    let object_info_json = cli.object_info.as_ref().map(|path| {
        fs::read_to_string(path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to read introspection file '{}': {}",
                path, e
            ))
        })
    });
    let overrides_json = cli.overrides.as_ref().map(|path| {
        fs::read_to_string(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to read overrides file '{}': {}", path, e))
        })
    });

    // --- 2. Parsing ---
    let workflow = UiWorkflow::from_json(&workflow_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse workflow: {}", e)));

    let schemas = SchemaCache::new();
    if let Some(json) = &object_info_json {
        let doc: serde_json::Value = serde_json::from_str(json).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to parse introspection document: {}", e))
        });
        schemas.populate(&doc);
        eprintln!("Loaded schemas for {} node classes", schemas.len());
    }

    let overrides = overrides_json.as_ref().map(|json| {
        ParamOverrides::from_json(json)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse overrides: {}", e)))
    });

    // --- 3. Conversion ---
    let convert_start = Instant::now();
    let converter = GraphConverter::new(&schemas);
    let outcome = converter
        .compile(&workflow, overrides.as_ref())
        .unwrap_or_else(|e| exit_with_error(&format!("Conversion failed: {}", e)));
    let convert_duration = convert_start.elapsed();

    for issue in &outcome.issues {
        eprintln!("[{}] {}", issue.severity(), issue);
    }

    // --- 4. Output ---
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&outcome.workflow)
    } else {
        serde_json::to_string(&outcome.workflow)
    }
    .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize output: {}", e)));

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write output file '{}': {}", path, e))
            });
            eprintln!(
                "Wrote API prompt for {} nodes to '{}'",
                outcome.workflow.len(),
                path
            );
        }
        None => println!("{}", rendered),
    }

    eprintln!(
        "Converted {} nodes in {:?} ({} issues, {:?} total)",
        outcome.workflow.len(),
        convert_duration,
        outcome.issues.len(),
        total_start.elapsed()
    );

    if cli.strict && outcome.has_errors() {
        exit_with_error("strict mode: error-severity issues were reported");
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
