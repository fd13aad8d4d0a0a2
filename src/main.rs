use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use prd_issues::{Config, Error, IssueOptions, OutputFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "prd-to-issues")]
#[command(about = "Turn PRD markdown files into GitHub issues")]
#[command(arg_required_else_help = true)]
#[command(after_help = "\
Headings become issues: ## headers become issue titles, the text under them
becomes the body, nested ### headers become task checklists, and keywords in
titles add labels (feature, bug, api, ui, ...).

Examples:
  prd-to-issues prd.md --json > issues.json
  prd-to-issues prd.md --gh | bash")]
struct Cli {
    /// Input PRD markdown file
    input: PathBuf,

    /// Write issues to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Shallowest heading level to convert
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    min_level: Option<u8>,

    /// Deepest heading level to convert
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    max_level: Option<u8>,

    /// Label added in front of every issue's labels
    #[arg(long = "label", value_name = "PREFIX")]
    label_prefix: Option<String>,

    /// Output as a JSON array
    #[arg(long, conflicts_with = "gh")]
    json: bool,

    /// Output as gh CLI commands
    #[arg(long)]
    gh: bool,

    /// Print the parsed section tree as JSON instead of issues
    #[arg(long)]
    outline: bool,

    /// Config file (defaults to prd-to-issues.toml in the current directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> prd_issues::Result<()> {
    // An explicit --config must exist; the implicit one is optional
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(prd_issues::CONFIG_FILE))?,
    };

    let markdown = fs::read_to_string(&cli.input).map_err(|source| Error::ReadInput {
        path: cli.input.clone(),
        source,
    })?;

    let sections = prd_issues::parse(&markdown);

    if cli.outline {
        let json = serde_json::to_string_pretty(&sections)?;
        return emit(&json, cli.output.as_deref(), "outline");
    }

    let (options, format) = resolve(&cli, &config);
    tracing::debug!(?options, ?format, "resolved options");

    let issues = prd_issues::to_issues(&sections, &options);
    if issues.is_empty() {
        return Err(Error::NoIssues);
    }

    let rendered = prd_issues::render(&issues, format)?;
    emit(&rendered, cli.output.as_deref(), &format!("{} issues", issues.len()))
}

/// Command line wins over config, which already carries the compiled defaults.
fn resolve(cli: &Cli, config: &Config) -> (IssueOptions, OutputFormat) {
    let mut options = config.issue_options();
    if let Some(min_level) = cli.min_level {
        options.min_level = min_level;
    }
    if let Some(max_level) = cli.max_level {
        options.max_level = max_level;
    }
    if let Some(prefix) = &cli.label_prefix {
        options.label_prefix = prefix.clone();
    }

    let format = if cli.json {
        OutputFormat::Json
    } else if cli.gh {
        OutputFormat::Gh
    } else {
        config.output.format
    };
    (options, format)
}

fn emit(text: &str, output: Option<&Path>, what: &str) -> prd_issues::Result<()> {
    match output {
        Some(path) => {
            tracing::debug!(path = %path.display(), "writing output");
            fs::write(path, text).map_err(|source| Error::WriteOutput {
                path: path.to_path_buf(),
                source,
            })?;
            println!("Generated {} → {}", what, path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use clap::error::ErrorKind;
    use rstest::rstest;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("prd-to-issues").chain(["prd.md"]).chain(args.iter().copied()))
    }

    fn config(toml: &str) -> Config {
        toml::from_str(toml).unwrap()
    }

    #[rstest]
    #[case(&[], "", 2, 3, "")]
    #[case(&[], "[issues]\nmax_level = 2", 2, 2, "")]
    #[case(&["--max-level", "4"], "[issues]\nmax_level = 2", 2, 4, "")]
    #[case(&["--min-level", "1"], "[issues]\nmin_level = 3", 1, 3, "")]
    #[case(&[], "[issues]\nlabel_prefix = \"prd\"", 2, 3, "prd")]
    #[case(&["--label", "cli"], "[issues]\nlabel_prefix = \"prd\"", 2, 3, "cli")]
    fn command_line_overrides_config(
        #[case] args: &[&str],
        #[case] toml: &str,
        #[case] min_level: u8,
        #[case] max_level: u8,
        #[case] label_prefix: &str,
    ) {
        let (options, _) = resolve(&cli(args), &config(toml));
        assert_eq!(
            options,
            IssueOptions {
                min_level,
                max_level,
                label_prefix: label_prefix.to_string(),
            }
        );
    }

    #[rstest]
    #[case(&[], "", OutputFormat::Markdown)]
    #[case(&[], "[output]\nformat = \"gh\"", OutputFormat::Gh)]
    #[case(&["--json"], "[output]\nformat = \"gh\"", OutputFormat::Json)]
    #[case(&["--gh"], "[output]\nformat = \"json\"", OutputFormat::Gh)]
    fn format_flags_override_config(#[case] args: &[&str], #[case] toml: &str, #[case] expected: OutputFormat) {
        let (_, format) = resolve(&cli(args), &config(toml));
        assert_eq!(format, expected);
    }

    #[test]
    fn no_arguments_shows_help() {
        let err = Cli::try_parse_from(["prd-to-issues"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand);
    }

    #[test]
    fn explicit_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("prd.md");
        std::fs::write(&input, "## B\ncontent").unwrap();
        let missing = dir.path().join("does-not-exist.toml");

        let cli = Cli::parse_from([
            OsStr::new("prd-to-issues"),
            input.as_os_str(),
            OsStr::new("--config"),
            missing.as_os_str(),
        ]);
        assert!(matches!(run(cli), Err(Error::Config { .. })));
    }
}
