use clap::{Parser, Subcommand};
use combo_pages::{config, enumerate, output, pipeline};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "combo-pages")]
#[command(about = "Generate SEO landing pages from a dimension catalog")]
#[command(long_about = "\
Generate SEO landing pages from a dimension catalog

Every configured pattern is expanded into the cartesian product of its
dimensions' values. Each distinct combination becomes one static page, and
every page is listed in a sharded sitemap.

Output structure:

  dist/
  ├── sitemap.xml                  # Sitemap index
  ├── sitemap-main.xml             # Tool root URL
  ├── sitemap-pages-1.xml          # Up to max_urls_per_file pages each
  ├── robots.txt
  ├── harsh-slow-service/
  │   └── index.html
  └── slow-service-restaurants-yelp/
      └── index.html

Slugs join value ids in the order a pattern lists its dimensions:
  [tone, complaint]    harsh + slow-service → harsh-slow-service
  [complaint, tone]    harsh + slow-service → slow-service-harsh

Run 'combo-pages gen-config' to generate a documented pages.toml.")]
#[command(version)]
struct Cli {
    /// Config document (TOML, or JSON when the path ends in .json)
    #[arg(long, default_value = "pages.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate every page and sitemap into the output directory
    Build,
    /// Validate the config and report the plan without writing anything
    Check,
    /// Print every planned page slug and title
    List {
        /// Print page metadata as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock pages.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Loading {}", cli.config.display());
            let (site_config, catalog) = pipeline::load(&cli.config)?;
            output::print_warnings(&catalog.warnings());
            init_thread_pool(&site_config.processing);

            println!("==> Planning");
            let plan = enumerate::enumerate(&catalog);
            output::print_plan(&plan.stats);

            println!("==> Publishing → {}", cli.output.display());
            let generated = chrono::Utc::now().date_naive();
            let report = pipeline::build(&site_config, &plan, &cli.output, generated)?;
            output::print_build_report(&report);
        }
        Command::Check => {
            println!("==> Loading {}", cli.config.display());
            let (_, catalog) = pipeline::load(&cli.config)?;
            output::print_warnings(&catalog.warnings());

            println!("==> Planning");
            output::print_plan(&enumerate::enumerate(&catalog).stats);
            println!("==> Config is valid");
        }
        Command::List { json } => {
            let (site_config, catalog) = pipeline::load(&cli.config)?;
            init_thread_pool(&site_config.processing);
            let plan = enumerate::enumerate(&catalog);
            let pages = pipeline::page_metas(&site_config, &plan);
            if json {
                println!("{}", serde_json::to_string_pretty(&pages)?);
            } else {
                output::print_warnings(&catalog.warnings());
                output::print_page_list(&pages);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
