//! protog: a protobuf file generator for the command line
//!
//! Builds a schema from command-line declarations and renders it to a
//! `.proto` file named after the package, or to stdout with `--dryrun`.
//!
//! Usage:
//!   protog Greet.v1 -m HelloRequest[data:string] -s Greeter[SayHello:HelloRequest]

#![deny(missing_docs)]

use anyhow::Context;
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use protog::{Renderer, Schema};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod output;
mod parser;
mod style;

#[derive(Parser, Debug)]
#[command(name = "protog", version)]
#[command(about = "protog is a protobuf file generator for the command line")]
#[command(after_help = "Example: protog Greet.v1 -m HelloRequest[data:string]")]
struct Args {
    /// Package name; also names the output file
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    name: String,

    /// Message declaration
    #[arg(short, long = "message", value_name = "Name[field:type,...]")]
    messages: Vec<String>,

    /// Service declaration; a leading `+` on a type marks a stream
    #[arg(short, long = "service", value_name = "Name[method:in:out,...]")]
    services: Vec<String>,

    /// File option
    #[arg(long = "option", value_name = "name:value")]
    options: Vec<String>,

    /// Syntax declaration
    #[arg(long, default_value = "proto3")]
    syntax: String,

    /// Output directory for the generated proto
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Overwrite the file if it already exists
    #[arg(short, long)]
    force: bool,

    /// Print the generated proto to stdout instead of writing a file
    #[arg(short, long)]
    dryrun: bool,

    /// Render without line breaks or indentation
    #[arg(long)]
    compact: bool,

    /// Do not tab-indent fields and methods
    #[arg(long)]
    no_indent: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let schema = build_schema(&args)?;

    for hint in style::check(&schema) {
        tracing::warn!(
            kind = hint.kind,
            name = %hint.name,
            suggestion = %hint.suggestion,
            "name does not follow protobuf naming convention"
        );
    }

    let renderer = Renderer::new()
        .compact(args.compact)
        .indent(!args.no_indent);
    let proto = renderer.render(&schema);

    if args.dryrun {
        println!("{proto}");
        return Ok(());
    }

    let path = output::proto_path(&args.output, &args.name);
    output::write_proto(&path, proto.as_bytes(), args.force)
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote proto file");
    Ok(())
}

/// Logs go to stderr so `--dryrun` output stays clean
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build the schema from parsed command-line declarations
fn build_schema(args: &Args) -> anyhow::Result<Schema> {
    let mut schema = Schema::new()
        .with_syntax(args.syntax.as_str())
        .with_package(args.name.as_str());

    for decl in &args.options {
        let (name, value) = parser::parse_option(decl)?;
        schema = schema.option(name, value);
    }

    for decl in &args.messages {
        let message = parser::parse_message(decl)?;
        tracing::debug!(message = %message.name, fields = message.fields.len(), "parsed message");
        schema = schema.message(message);
    }

    for decl in &args.services {
        let service = parser::parse_service(decl)?;
        tracing::debug!(service = %service.name, methods = service.methods.len(), "parsed service");
        schema = schema.service(service);
    }

    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("protog").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = args(&["Greet.v1"]);
        assert_eq!(args.syntax, "proto3");
        assert_eq!(args.output, PathBuf::from("."));
        assert!(!args.force && !args.dryrun && !args.compact && !args.no_indent);
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(Args::try_parse_from(["protog", ""]).is_err());
    }

    #[test]
    fn test_build_schema() {
        let args = args(&[
            "Hello",
            "-m",
            "HelloRequest[data:string]",
            "-s",
            "HelloService[SayHello:HelloRequest]",
            "--option",
            "go_package:proto",
        ]);
        let schema = build_schema(&args).unwrap();

        assert_eq!(schema.syntax.as_deref(), Some("proto3"));
        assert_eq!(schema.package.as_deref(), Some("Hello"));
        assert_eq!(schema.options.len(), 1);
        assert_eq!(schema.messages.len(), 1);
        assert_eq!(schema.services.len(), 1);
        assert!(
            Renderer::new()
                .render(&schema)
                .contains("import \"google/protobuf/empty.proto\";")
        );
    }

    #[test]
    fn test_build_schema_parse_error() {
        let args = args(&["Hello", "-m", "HelloRequest"]);
        let err = build_schema(&args).unwrap_err();
        assert!(err.to_string().contains("error parsing message"));
    }

    #[test]
    fn test_args_verify() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
