use clap::{Parser, Subcommand};
use plot_atlas::app::{App, Browse};
use plot_atlas::filter::{FilterSelection, LevelChoice};
use plot_atlas::imaging::RustBackend;
use plot_atlas::{config, download, output, render};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "plot-atlas")]
#[command(about = "Browse a directory tree of plot images by facet and keyword")]
#[command(long_about = "\
Browse a directory tree of plot images by facet and keyword

Your filesystem is the catalog. Every .png, .jpg, .jpeg or .gif below the
root is listed by its relative path, and the first four directory levels
become filters.

Catalog structure:

  images/
  ├── config.toml                  # Browser config (optional)
  ├── pbmc3k/                      # Level 1
  │   ├── leiden/                  # Level 2
  │   │   └── umap.png             # Caption: pbmc3k / leiden / umap.png
  │   └── louvain/
  │       └── umap.png
  └── tabula/
      └── umap.jpg

Selecting levels:
  --select pbmc3k --select '*' --select umap.png
  Each --select fills the next level; '*' keeps every value.

Search:
  --search 'leiden umap'  keeps file names containing every keyword (case-insensitive)

Downloads are re-encoded in their detected format and named after their path
with '/' replaced by '_' (pbmc3k/leiden/umap.png → pbmc3k_leiden_umap.png).

Run 'plot-atlas gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Catalog root directory
    #[arg(long, default_value = "images", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every image in the catalog
    Scan {
        /// Print the catalog as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the values available at each directory level
    Facets,
    /// Filter the catalog and show one page of results
    Browse {
        /// Value for the next directory level ('*' for all); repeat per level
        #[arg(long = "select", value_name = "VALUE")]
        select: Vec<LevelChoice>,
        /// Whitespace-separated keywords; every keyword must appear in the file name
        #[arg(long, default_value = "")]
        search: String,
        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Also write the page as an HTML image grid
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,
        /// Export every image on the page into this directory
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
    },
    /// Export one catalog image under its flattened name
    Download {
        /// Image path relative to the root, e.g. pbmc3k/leiden/umap.png
        path: String,
        /// Directory to write into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan { json } => {
            let mut app = open_app(&cli.root)?;
            let catalog = app.catalog()?;
            if json {
                println!("{}", serde_json::to_string_pretty(catalog)?);
            } else {
                output::print_scan_output(catalog);
            }
        }
        Command::Facets => {
            let mut app = open_app(&cli.root)?;
            output::print_facets(&app.facets()?);
        }
        Command::Browse {
            select,
            search,
            page,
            html,
            download_dir,
        } => {
            let mut app = open_app(&cli.root)?;
            let atlas_config = app.config().clone();
            let selection = FilterSelection::from_choices(select)?.with_search(search);
            let backend = RustBackend::new();

            match app.browse(&selection, page)? {
                Browse::NoResults => {
                    output::print_no_results(&selection);
                    if let Some(path) = html {
                        let markup = render::render_no_results(&atlas_config, &selection);
                        render::write_html(&path, &markup)?;
                        println!("Wrote {}", path.display());
                    }
                }
                Browse::Page(view) => {
                    output::print_page(&selection, &view);
                    if let Some(path) = html {
                        let asset_base = render::file_url(&std::fs::canonicalize(&cli.root)?);
                        let tiles =
                            render::build_tiles(&backend, app.catalog()?, &view, &asset_base);
                        let markup =
                            render::render_page(&atlas_config, &selection, &view, &tiles);
                        render::write_html(&path, &markup)?;
                        println!("Wrote {}", path.display());
                    }
                    if let Some(dir) = download_dir {
                        let results =
                            download::export_all(&backend, app.catalog()?, &view.items, &dir);
                        output::print_export_results(&results);
                    }
                }
            }
            println!("Catalog: {}", app.cache().stats());
        }
        Command::Download { path, out } => {
            let mut app = open_app(&cli.root)?;
            let download = app.download(&RustBackend::new(), &path)?;
            let written = download::save_download(&download, &out)?;
            output::print_download(&download, &written);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `config.toml` from the catalog root and set up the application state.
fn open_app(root: &Path) -> Result<App, config::ConfigError> {
    Ok(App::new(root, config::load_config(root)?))
}
