use clap::{Parser, Subcommand};
use atelier::{config, content, generate, load, output};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "atelier")]
#[command(about = "Static single-page portfolio for 3D modeling and AI art")]
#[command(long_about = "\
Static single-page portfolio for 3D modeling and AI art

Everything the page says lives in one content.toml. Every project image,
3D model and video gets its own viewer page; gallery filters are plain links,
so the site works without JavaScript.

Content structure:

  content/
  ├── content.toml                 # Profile, galleries, services, contact (required)
  ├── config.toml                  # Colors, layout, hero particles (optional)
  └── assets/                      # Copied verbatim → dist/assets/
      ├── modeling/
      │   ├── gearbox-1.png
      │   └── gearbox.stl
      └── ai/
          └── dragon.png

Media URLs starting with '/' refer to files under content/; anything else is
linked as-is. Missing local files do not fail the build: the viewer shows its
error state and the file is reported.

Run 'atelier gen-content' for a complete example content.toml and
'atelier gen-config' for a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".atelier-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and validate content into a manifest
    Load,
    /// Produce the final HTML site from the manifest
    Generate,
    /// Run the full pipeline: load → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print an example content.toml covering every section
    GenContent,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("atelier=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Load => {
            let manifest = load::load(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_load_output(&manifest);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let site = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            let manifest_content = std::fs::read_to_string(&manifest_path)?;
            let manifest: load::Manifest = serde_json::from_str(&manifest_content)?;
            output::print_generate_output(&site, &manifest);
        }
        Command::Build => {
            println!("==> Stage 1: Loading {}", cli.source.display());
            let manifest = load::load(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            output::print_load_output(&manifest);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let site = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&site, &manifest);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = load::load(&cli.source)?;
            output::print_load_output(&manifest);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenContent => {
            print!("{}", content::stock_content_toml());
        }
    }

    Ok(())
}

/// Write the load manifest as pretty JSON; returns its path.
fn write_manifest(manifest: &load::Manifest, temp_dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest).map_err(std::io::Error::other)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}
