//! StoryHoard CLI - create, list and inspect branching stories

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storyhoard::config::{self, StoryhoardConfig};
use storyhoard::graph::GraphStats;
use storyhoard::ui::{self, Icons};
use storyhoard::{
    Chapter, Choice, Controller, Database, EntityId, EntityType, Media, MediaRole, Registry,
    Story,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "storyhoard")]
#[command(version)]
#[command(about = "Branching story persistence - chapters, choices and media in SQLite")]
#[command(long_about = r#"
StoryHoard keeps choose-your-own-adventure stories in a local SQLite database:
  • Stories you wrote and stories cached from elsewhere
  • Chapters linked by reader choices (loops allowed)
  • Photos and illustrations attached to chapters

Example usage:
  storyhoard init
  storyhoard new-story --title "My Frog"
  storyhoard show --story <id>
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to ./storyhoard.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides the config)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config with a fresh owner tag and create the database
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// List stories
    Stories {
        /// Which stories: created, cached or published
        #[arg(short, long, default_value = "published")]
        kind: String,
    },

    /// Find stories by exact title
    Search {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "published")]
        kind: String,
    },

    /// Assemble and print a complete story
    Show {
        /// Story id
        #[arg(short, long)]
        story: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Create a story owned by this device
    NewStory {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        author: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Path of the cover image
        #[arg(long)]
        cover: Option<String>,
    },

    /// Add a chapter to a story
    NewChapter {
        /// Story id
        #[arg(short, long)]
        story: String,

        #[arg(short, long)]
        text: String,

        /// Make this the story's entry chapter
        #[arg(long)]
        entry: bool,
    },

    /// Link two chapters with a choice
    NewChoice {
        /// Origin chapter id
        #[arg(long)]
        from: String,

        /// Destination chapter id
        #[arg(long)]
        to: String,

        #[arg(short, long)]
        text: String,
    },

    /// Attach an image to a chapter
    NewMedia {
        /// Chapter id
        #[arg(long)]
        chapter: String,

        #[arg(short, long)]
        path: String,

        /// photo or illustration
        #[arg(short, long, default_value = "illustration")]
        role: String,
    },

    /// Show row counts per entity kind
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);

    let database = cli.database.as_deref();
    let open = || open_controller(&config_path, database);

    match cli.command {
        Commands::Init { force } => run_init(&config_path, database, force)?,

        Commands::Stories { kind } => {
            let tag = story_tag(&kind)?;
            let stories = open()?.all_stories(tag)?;
            print_stories(&format!("{} stories", tag), &stories);
        }

        Commands::Search { title, kind } => {
            let tag = story_tag(&kind)?;
            let stories = open()?.search_stories(&title, tag)?;
            print_stories(&format!("{} '{}'", Icons::SEARCH, title), &stories);
        }

        Commands::Show { story, format } => {
            let id = EntityId::parse(&story)?;
            let story = open()?.complete_story(&id)?;
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&story)?);
            } else {
                print_story(&story);
            }
        }

        Commands::NewStory { title, author, description, cover } => {
            let controller = open()?;
            let mut story = Story::new(title, controller.owner());
            story.author = author;
            story.description = description;
            story.cover_image = cover;
            controller.add(story.clone(), EntityType::CreatedStory)?;
            ui::success(&format!("Created story {}", story.id));
        }

        Commands::NewChapter { story, text, entry } => {
            let chapter = Chapter::new(EntityId::parse(&story)?, text);
            let controller = open()?;
            if entry {
                controller.add_entry_chapter(&chapter)?;
            } else {
                controller.add(chapter.clone(), EntityType::Chapter)?;
            }
            ui::success(&format!("Created chapter {}", chapter.id));
        }

        Commands::NewChoice { from, to, text } => {
            let choice = Choice::new(EntityId::parse(&from)?, EntityId::parse(&to)?, text);
            open()?.add(choice.clone(), EntityType::Choice)?;
            ui::success(&format!("Created choice {}", choice.id));
        }

        Commands::NewMedia { chapter, path, role } => {
            let role: MediaRole = role.parse()?;
            let media = Media::new(EntityId::parse(&chapter)?, path, role);
            open()?.add(media.clone(), EntityType::Media)?;
            ui::success(&format!("Attached {} {}", media.role, media.id));
        }

        Commands::Stats => {
            let stats = open()?.stats()?;
            ui::header(&format!("{} StoryHoard Statistics", Icons::STATS));
            println!("{}", ui::stats_table(&stats));
        }
    }

    Ok(())
}

fn run_init(config_path: &Path, database: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let mut config = StoryhoardConfig::generated(Path::new("."));
    if let Some(db) = database {
        config.database = Some(db.to_string_lossy().to_string());
    }
    config::write_config(config_path, &config, force)?;

    let db_path = resolve_database(&config, None);
    config::ensure_db_dir(&db_path)?;
    Database::open(&db_path)?;

    ui::success(&format!("Wrote {}", config_path.display()));
    ui::status(Icons::DATABASE, "Database", &db_path.display().to_string());
    ui::status(Icons::PERSON, "Owner", config.owner.as_deref().unwrap_or("-"));
    Ok(())
}

fn open_controller(config_path: &Path, database: Option<&Path>) -> anyhow::Result<Controller> {
    let config = config::load_config(Some(config_path))?.with_context(|| {
        format!(
            "no config at {} (run `storyhoard init` first)",
            config_path.display()
        )
    })?;
    let owner = config
        .owner
        .clone()
        .with_context(|| format!("{} has no owner tag", config_path.display()))?;

    let db_path = resolve_database(&config, database);
    config::ensure_db_dir(&db_path)?;
    let db = Database::open(&db_path)?;
    Ok(Controller::new(Arc::new(Registry::new(db)), owner))
}

fn resolve_database(config: &StoryhoardConfig, cli_override: Option<&Path>) -> PathBuf {
    cli_override
        .map(Path::to_path_buf)
        .or_else(|| config.database.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| config::default_database_path_in(Path::new(".")))
}

fn story_tag(kind: &str) -> anyhow::Result<EntityType> {
    let tag: EntityType = kind.parse()?;
    if !tag.is_story() {
        anyhow::bail!("'{}' is not a story kind (use created, cached or published)", kind);
    }
    Ok(tag)
}

fn print_stories(title: &str, stories: &[Story]) {
    ui::header(title);
    if stories.is_empty() {
        println!("{}", ui::muted("No stories found."));
    } else {
        println!("{}", ui::stories_table(stories));
    }
}

fn print_story(story: &Story) {
    ui::header(&story.title);
    if let Some(author) = &story.author {
        ui::summary_row("by", author);
    }
    if let Some(description) = &story.description {
        ui::summary_row("about", description);
    }
    ui::summary_row("owner", &story.owner);

    // Entry chapter first, the rest by id for stable output
    let mut chapters: Vec<&Chapter> = story.chapters.values().collect();
    chapters.sort_by_key(|c| (story.first_chapter_id.as_ref() != Some(&c.id), c.id.clone()));

    ui::section("Chapters");
    for chapter in chapters {
        ui::chapter_line(story, chapter);
        for choice in &chapter.choices {
            ui::choice_line(story, choice);
        }
        for media in chapter.media() {
            ui::media_line(media);
        }
    }

    if story.first_chapter_id.is_some() && story.entry_chapter().is_none() {
        ui::warn("Entry chapter is not part of this story");
    }

    let stats = GraphStats::of(story);
    ui::section("Summary");
    print!("{}", stats);
}
