//! EBNF railroad CLI
//!
//! Reads a grammar from a file or stdin, lays out one railroad diagram per
//! rule and dumps the resulting geometry — as an indented tree by default,
//! or as JSON with `--json` for downstream renderers.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use ebnf_railroad::layout::{Content, Geometry, StackKind};
use ebnf_railroad::{assemble, Diagram, DiagramError, GlyphMetrics, LayoutConfig};

#[derive(Parser)]
#[command(name = "ebnf-railroad")]
#[command(about = "Lay out EBNF grammars as railroad diagram geometry")]
struct Cli {
    /// Input grammar file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Text metrics file (TOML format)
    #[arg(short, long)]
    metrics: Option<PathBuf>,

    /// Emit diagrams as JSON instead of the textual tree dump
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    // Load metrics
    let metrics = match &cli.metrics {
        Some(path) => match GlyphMetrics::from_file(path) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Error loading metrics '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => GlyphMetrics::default(),
    };

    // Read input
    let (source, source_name) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut sink: Vec<Diagram> = Vec::new();
    if let Err(e) = assemble(&source, &metrics, &LayoutConfig::default(), &mut sink) {
        match e {
            DiagramError::Parse(errors) => {
                for error in errors {
                    eprintln!("{}", error.format(&source, &source_name));
                }
            }
            DiagramError::Layout(error) => {
                eprintln!("Error: {}", error);
            }
        }
        std::process::exit(1);
    }

    if cli.json {
        match serde_json::to_string_pretty(&sink) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing diagrams: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        for diagram in &sink {
            print_diagram(diagram);
        }
    }
}

fn print_diagram(diagram: &Diagram) {
    println!("== {} = {}", diagram.name, diagram.rule_text);
    print_tree(&diagram.geometry, 0.0, 0.0, 1);
}

fn print_tree(geom: &Geometry, x: f64, y: f64, depth: usize) {
    let indent = "  ".repeat(depth);
    println!(
        "{}[{}] x={:.1} y={:.1} w={:.1} h={:.1} base={:.1}",
        indent,
        label(&geom.content),
        x,
        y,
        geom.width,
        geom.height,
        geom.baseline
    );
    for child in &geom.children {
        print_tree(&child.geometry, x + child.dx, y + child.dy, depth + 1);
    }
}

fn label(content: &Content) -> String {
    match content {
        Content::Terminal { text, .. } => format!("terminal {:?}", text),
        Content::NonTerminal { name } => format!("rule {}", name),
        Content::Empty => "empty".to_string(),
        Content::Sequence => "sequence".to_string(),
        Content::Stack {
            kind: StackKind::Choice,
        } => "choice".to_string(),
        Content::Stack {
            kind: StackKind::Loop,
        } => "loop".to_string(),
    }
}
