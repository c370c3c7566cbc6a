use clap::{Parser, Subcommand};
use postpress::{build, compile, config, frontmatter, output, watch};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "postpress")]
#[command(about = "Markdown-to-JSON compiler for content-driven front ends")]
#[command(long_about = "\
Markdown-to-JSON compiler for content-driven front ends

Your documents are markdown files opening with a front-matter heading.
Postpress compiles each into a JSON artifact and generates paginated
navigation indices, so the rendering application only ever reads JSON.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── hello-world.md               # Documents at any depth
  └── birds/
      └── why ravens hoard.md      # Paths may contain spaces; URLs are encoded

Document format:

  <!--
  title: Why Ravens Hoard
  datetime: Mon, 01 Jan 2024 12:00:00 +0000   # RFC 2822
  tags: [birds, essays]
  precompile: true                 # render body to HTML at compile time
  attr: { cover: ravens.avif }     # free-form, passed through untouched
  -->
  The markdown body starts after the closing marker.

Output (under <output>/content/):

  Per-document artifacts mirroring the source tree, index.json pages for
  the timeline, tag-<tag>.json and archive-<year>.json chains, and a
  root.json manifest referencing every page.

Run 'postpress gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory (overrides config.toml)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile all documents and generate index files
    Build,
    /// Validate every document's front matter without writing output
    Check,
    /// Build, then rebuild whenever the content directory changes
    Watch,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = config::load_config(&cli.source)?;
    if let Some(output_dir) = &cli.output {
        config.output = output_dir.clone();
    }

    match cli.command {
        Command::Build => {
            let (run, manifest) = build::build_site(&cli.source, &config)?;
            output::print_build_output(&run, &manifest);
        }
        Command::Check => {
            let documents = compile::collect_documents(&cli.source)?;
            for path in &documents {
                let text = std::fs::read_to_string(path)?;
                frontmatter::resolve(&text)
                    .map_err(|e| format!("{}: {e}", path.display()))?;
            }
            output::print_check_output(&documents, &cli.source);
        }
        Command::Watch => watch::watch_and_rebuild(&cli.source, &config)?,
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}
