use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fusion_query::{FilterFragment, ParamSpec, QueryLibrary, RawQuery, Token};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fusion-query")]
#[command(about = "Look up canned queries and compile them into Fusion filter syntax")]
#[command(version)]
struct Args {
    /// Query library YAML to use instead of the bundled one
    #[arg(long, global = true, env = "FUSION_QUERY_LIBRARY")]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every query path in the library
    List,
    /// Print a raw query and its units
    Lookup {
        /// Category path, e.g. `emissions co2_emissions`
        #[arg(required = true)]
        path: Vec<String>,
    },
    /// Compile a query with filter parameters
    Compose {
        /// Category path of a library query
        path: Vec<String>,

        /// Raw query text to compile instead of a library query
        #[arg(long, conflicts_with = "path")]
        query: Option<String>,

        /// Filter parameter as TAG=TOKEN,TOKEN,... e.g. `year=>=,2020` or `region==~,^US`
        #[arg(long = "param", value_name = "TAG=TOKENS")]
        params: Vec<String>,

        /// YAML or JSON file of parameters (`--param` entries override it)
        #[arg(long)]
        params_file: Option<PathBuf>,

        /// Use set-data rules instead of get-data rules
        #[arg(long)]
        set: bool,
    },
    /// Break a compiled filter fragment into its parts
    Inspect {
        /// Fragment such as `[+YearFilter,IntEquals,2020]`
        fragment: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Commands::List => {
            let library = load_library(args.library.as_deref())?;
            for path in library.query_paths() {
                println!("{}", path.join(" "));
            }
        }
        Commands::Lookup { path } => {
            let library = load_library(args.library.as_deref())?;
            let query = library.lookup(path.as_slice())?;
            println!("{}", query);
            if let Some(units) = query.units() {
                println!("units: {}", units);
            }
        }
        Commands::Compose { path, query, params, params_file, set } => {
            let raw = match query {
                Some(text) => RawQuery::new(text),
                None if path.is_empty() => bail!("either a query path or --query is required"),
                None => load_library(args.library.as_deref())?.lookup(path.as_slice())?,
            };

            let mut spec = match params_file {
                Some(file) => ParamSpec::from_file(&file)
                    .with_context(|| format!("loading parameters from {}", file.display()))?,
                None => ParamSpec::new(),
            };
            for param in &params {
                let (tag, tokens) = parse_param(param)?;
                spec.insert(tag, tokens);
            }

            debug!(query = %raw, params = spec.len(), set, "composing query");
            println!("{}", raw.compile(&spec, !set)?);
            if let Some(units) = raw.units() {
                eprintln!("units: {}", units);
            }
        }
        Commands::Inspect { fragment } => {
            let parsed: FilterFragment = fragment.parse()?;
            println!("kind:       {}", parsed.kind);
            println!("comparator: {}", parsed.comparator);
            println!("operand:    {}", parsed.operand.as_deref().unwrap_or("-"));
            println!("column:     {}", if parsed.inclusion.is_included() { "yes" } else { "no" });
        }
    }

    Ok(())
}

fn load_library(path: Option<&Path>) -> Result<Cow<'static, QueryLibrary>> {
    match path {
        Some(path) => {
            let library = QueryLibrary::from_file(path)
                .with_context(|| format!("loading query library {}", path.display()))?;
            Ok(Cow::Owned(library))
        }
        None => Ok(Cow::Borrowed(QueryLibrary::bundled())),
    }
}

/// Parse `TAG=TOKEN,TOKEN,...`; the first `=` separates the tag from its tokens
fn parse_param(param: &str) -> Result<(String, Vec<Token>)> {
    let Some((tag, tokens)) = param.split_once('=') else {
        bail!("parameter '{}' must be TAG=TOKENS", param);
    };
    let tag = tag.trim();
    if tag.is_empty() {
        bail!("parameter '{}' has an empty tag", param);
    }

    let tokens = tokens
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(Token::from)
        .collect();
    Ok((tag.to_string(), tokens))
}
