use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use delimlist::layout::LayoutTree;
use delimlist::registry::{Registry, global};
use delimlist::{Config, Result, diagnostics, model, render};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dlist")]
#[command(about = "Inspect delimited lists, registries and layout trees", long_about = None)]
struct Cli {
    /// TOML configuration layered over the built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG still wins when set).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the registry as a ListOfLists plus one summary line per list.
    Lists {
        /// Extra list files, one definition per line.
        #[arg(long)]
        file: Vec<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// Print a registered list, or one of its entries by name or ordinal.
    Show {
        list: String,
        entry: Option<String>,

        #[arg(long)]
        file: Vec<PathBuf>,

        /// Order entries by description.
        #[arg(long)]
        sorted: bool,

        #[arg(long)]
        json: bool,
    },
    /// Link a layout file into a tree and print it.
    Tree {
        layout: PathBuf,

        #[arg(long)]
        json: bool,

        /// Print selection rows instead of the tree dump.
        #[arg(long)]
        options: bool,

        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
    /// Emit Rust constants for every registered list.
    Defines {
        #[arg(long)]
        file: Vec<PathBuf>,

        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

// Configured lists first, then files named on the command line.
fn install_registry(cfg: &Config, files: &[PathBuf]) -> Result<()> {
    let mut registry: Registry = cfg.build_registry()?;
    for file in files {
        registry.load_file(file)?;
    }
    if !global::install(registry) {
        diagnostics::warn("registry was already initialized; configured lists not applied");
    }
    Ok(())
}

fn emit(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text).with_context(|| {
                diagnostics::error_message(format!("write {}", path.display()))
            })?;
            println!("Wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = Config::load(cli.config.as_deref())?;
    let pretty = cfg.render.pretty_json;

    match cli.cmd {
        Commands::Lists { file, json } => {
            install_registry(&cfg, &file)?;
            let Some(registry) = global::read() else {
                bail!(diagnostics::error_message("registry not initialized"));
            };
            let view = model::registry_view(&registry);
            if json {
                println!("{}", render::render_json(&view, pretty)?);
            } else {
                println!("{}", view.list_of_lists);
                for list in &view.lists {
                    println!(
                        "{:>3} {}:{} {:?} count={}",
                        list.ordinal, list.name, list.description, list.kind, list.ordinal_count
                    );
                }
            }
        }

        Commands::Show {
            list,
            entry,
            file,
            sorted,
            json,
        } => {
            install_registry(&cfg, &file)?;
            let Some(registry) = global::read() else {
                bail!(diagnostics::error_message("registry not initialized"));
            };
            let Some(target) = registry.list(&list) else {
                bail!(diagnostics::error_message(format!("no list named {list}")));
            };

            match entry {
                Some(key) => {
                    let found = if !key.is_empty() && key.chars().all(|c| c.is_ascii_digit()) {
                        let name = target.name_of(key.parse().unwrap_or(0));
                        registry.entry(&list, name)
                    } else {
                        registry.entry(&list, &key)
                    };
                    let Some(found) = found else {
                        bail!(diagnostics::error_message(format!("{list} has no entry {key}")));
                    };
                    if json {
                        println!("{}", render::render_json(&model::entry_view(&found), pretty)?);
                    } else {
                        println!("{}", found.to_line(Some('|')));
                        if let Some(err) = found.format().and_then(|f| f.error()) {
                            diagnostics::warn(format!("{list}.{key}: {err}"));
                        }
                    }
                }
                None if json => {
                    let view = model::list_view(target, Some(&*registry));
                    println!("{}", render::render_json(&view, pretty)?);
                }
                None => {
                    let entries = if sorted {
                        target.sorted_entries()
                    } else {
                        target.entries(None)
                    };
                    for e in &entries {
                        println!("{}", e.to_line(Some('|')));
                    }
                }
            }
        }

        Commands::Tree {
            layout,
            json,
            options,
            out,
        } => {
            let tree = LayoutTree::load_file(&layout)?;
            let text = if options {
                let rows = model::tree_select_options(&tree, cfg.render.indent_width);
                if json {
                    render::render_json(&rows, pretty)? + "\n"
                } else {
                    rows.iter().map(|r| format!("{}\t{}\n", r.value, r.text)).collect::<String>()
                }
            } else if json {
                render::render_json(&model::tree_view(&tree), pretty)? + "\n"
            } else {
                render::render_tree_text(&tree)
            };
            emit(out.as_deref(), &text)?;
        }

        Commands::Defines { file, out } => {
            install_registry(&cfg, &file)?;
            let Some(registry) = global::read() else {
                bail!(diagnostics::error_message("registry not initialized"));
            };
            emit(out.as_deref(), &render::render_defines(&registry))?;
        }
    }

    Ok(())
}
