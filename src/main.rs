use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

use painting_gallery::config::Config;
use painting_gallery::error::Result;
use painting_gallery::logging;
use painting_gallery::state::csv_io::EXPORT_FILE_NAME;
use painting_gallery::state::library::Library;
use painting_gallery::state::locations::MAP_ZOOM;
use painting_gallery::state::options::{Category, OptionStore};
use painting_gallery::state::sync::PaintingDetail;
use painting_gallery::{AddPainting, IntentOutcome, Painting, Status, Synchronizer};

#[derive(Parser)]
#[command(name = "gallery")]
#[command(about = "Painting gallery catalog with CSV import/export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Catalog database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Dropdown options file
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the painting table
    List,

    /// Show the gallery grid (id and image URL of every painting)
    Gallery,

    /// Show the detail card of one painting
    Show {
        id: i64,
    },

    /// Add a new painting
    Add(AddArgs),

    /// Replace the table with an edited copy (JSON array of paintings)
    Save {
        table: PathBuf,
    },

    /// Replace the table with the contents of a CSV file
    Import {
        file: PathBuf,
    },

    /// Write the table as CSV
    Export {
        /// Output file ("-" for stdout)
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },

    /// Show the dropdown option lists
    Options,
}

#[derive(clap::Args)]
struct AddArgs {
    #[arg(long, default_value = "")]
    title: String,
    #[arg(long, default_value = "")]
    artist: String,
    #[arg(long, default_value = "")]
    year: String,
    /// Material from the dropdown (repeatable)
    #[arg(long = "material")]
    materials: Vec<String>,
    #[arg(long, default_value = "")]
    movement: String,
    #[arg(long, default_value = "")]
    image_url: String,
    #[arg(long, default_value = "")]
    genre: String,
    #[arg(long, default_value = "")]
    country: String,
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Material not yet in the dropdown
    #[arg(long, default_value = "")]
    new_material: String,
    /// Movement not yet in the dropdown (overrides --movement)
    #[arg(long, default_value = "")]
    new_movement: String,
    /// Genre not yet in the dropdown (overrides --genre)
    #[arg(long, default_value = "")]
    new_genre: String,
}

impl From<AddArgs> for AddPainting {
    fn from(args: AddArgs) -> Self {
        Self {
            title: args.title,
            artist: args.artist,
            year: args.year,
            materials: args.materials,
            movement: args.movement,
            image_url: args.image_url,
            genre: args.genre,
            country: args.country,
            location: args.location,
            description: args.description,
            new_material: args.new_material,
            new_movement: args.new_movement,
            new_genre: args.new_genre,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "gallery command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(options) = cli.options {
        config.options_path = options;
    }

    let library = Library::open(&config.db_path)?;
    let options = OptionStore::load(&config.options_path);
    let mut sync = Synchronizer::new(library, options);

    let json = cli.json;
    match cli.command {
        Commands::List => Ok(report(&sync.list(), json)),

        Commands::Gallery => {
            let outcome = sync.gallery();
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                for tile in &outcome.tiles {
                    println!("{:>5}  {}", tile.id, tile.image_url);
                }
                print_status(&outcome.status);
            }
            Ok(exit_code(&outcome.status))
        }

        Commands::Show { id } => {
            let outcome = sync.painting_detail(id);
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else if let Some(detail) = &outcome.detail {
                print_card(detail);
                for unmatched in sync.unmatched_references(&detail.painting) {
                    println!("  (note: {} \"{}\" is not a known value)", unmatched.field, unmatched.value);
                }
            } else {
                print_status(&outcome.status);
            }

            // A missing id is not a failure of the intent, but there is no card to show
            if outcome.detail.is_none() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(exit_code(&outcome.status))
            }
        }

        Commands::Add(args) => Ok(report(&sync.add_painting(&args.into()), json)),

        Commands::Save { table } => {
            let content = std::fs::read_to_string(&table)?;
            let table: Vec<Painting> = serde_json::from_str(&content)?;
            Ok(report(&sync.save_edits(table), json))
        }

        Commands::Import { file } => {
            let bytes = std::fs::read(&file)?;
            Ok(report(&sync.import_csv(&bytes), json))
        }

        Commands::Export { output } => {
            let outcome = sync.list();
            if !outcome.status.is_success() {
                return Ok(report(&outcome, json));
            }

            let export = sync.export_csv(&outcome.paintings);
            if !export.status.is_success() {
                print_status(&export.status);
                return Ok(ExitCode::FAILURE);
            }

            if output.as_os_str() == "-" {
                use std::io::Write;
                std::io::stdout().write_all(&export.csv)?;
            } else {
                std::fs::write(&output, &export.csv)?;
                println!("Saved {} paintings to {}", outcome.paintings.len(), output.display());
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Options => {
            if json {
                println!("{}", serde_json::to_string_pretty(sync.options().options())?);
            } else {
                for category in Category::ALL {
                    println!("{}: {}", category, sync.options().values(category).join(", "));
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Print the table and status of an intent, like the editor would redraw it
fn report(outcome: &IntentOutcome, json: bool) -> ExitCode {
    if json {
        match serde_json::to_string_pretty(outcome) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("Error: {e}"),
        }
    } else {
        for painting in &outcome.paintings {
            let d = &painting.details;
            println!("{:>5}  {} | {} | {} | {}", painting.id, d.title, d.artist, d.year, d.materials);
        }
        print_status(&outcome.status);
    }

    exit_code(&outcome.status)
}

fn print_status(status: &Status) {
    if !status.message().is_empty() {
        println!("{}", status.message());
    }
}

fn exit_code(status: &Status) -> ExitCode {
    if status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_card(detail: &PaintingDetail) {
    let d = &detail.painting.details;
    println!("{}", d.title);
    println!("  Artist:      {}", d.artist);
    println!("  Year:        {}", d.year);
    println!("  Materials:   {}", d.materials);
    println!("  Genre:       {}", d.genre);
    println!("  Movement:    {}", d.movement);
    println!("  Country:     {}", d.country);
    println!("  Description: {}", d.description);
    println!("  Location:    {}", d.location);
    println!("  Image:       {}", d.image_url);

    if let Some(coords) = detail.coordinates {
        println!(
            "  Map:         {:.6}, {:.6} (zoom {})",
            coords.latitude, coords.longitude, MAP_ZOOM
        );
    }
}
