//! Gunsmith - Weapon attachment workshop
//!
//! Headless driver: loads settings and a catalog, spawns the primary weapon
//! into an in-memory scene and plays a command script against the workshop.
//!
//! Commands (as arguments, or a built-in demo script when none are given):
//! `category <name>`, `item <id>`, `equip`, `back`, `drag <pixels>`, `frame`,
//! `save-settings`.

mod console;
mod settings;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gunsmith_engine::{
    Catalog, CatalogProvider, Category, HeadlessScene, IconLookup, JsonCatalog, Projection,
    StarterCatalog, Workshop,
};

use crate::console::ConsoleView;
use crate::settings::WorkshopSettings;

const DEMO_SCRIPT: &[&str] = &[
    "frame",
    "category sight",
    "item sight_thermal",
    "equip",
    "category mag",
    "item mag_bulletstorm",
    "drag 150",
    "back",
    "frame",
];

/// One scripted user action
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Category(Category),
    Item(String),
    Equip,
    Back,
    Drag(f32),
    Frame,
    SaveSettings,
}

impl Command {
    fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default();
        let arg = words.next();
        let command = match (verb, arg) {
            ("category", Some(name)) => Self::Category(parse_category(name)?),
            ("item", Some(id)) => Self::Item(id.to_string()),
            ("equip", None) => Self::Equip,
            ("back", None) => Self::Back,
            ("drag", Some(pixels)) => {
                Self::Drag(pixels.parse().with_context(|| format!("Invalid drag amount '{pixels}'"))?)
            }
            ("frame", None) => Self::Frame,
            ("save-settings", None) => Self::SaveSettings,
            _ => bail!("Unknown command '{line}'"),
        };
        Ok(command)
    }
}

fn parse_category(name: &str) -> Result<Category> {
    Category::ALL
        .into_iter()
        .find(|c| c.name().eq_ignore_ascii_case(name))
        .with_context(|| format!("Unknown category '{name}'"))
}

fn load_catalog(settings: &WorkshopSettings) -> Result<Catalog> {
    let provider: Box<dyn CatalogProvider> = match &settings.catalog.path {
        Some(path) => {
            info!("Using catalog file {:?}", path);
            Box::new(JsonCatalog::new(path))
        }
        None => Box::new(StarterCatalog),
    };
    Catalog::load(provider.as_ref()).context("Failed to load attachment catalog")
}

fn run(workshop: &mut Workshop, settings: &WorkshopSettings, command: Command) -> Result<()> {
    match command {
        Command::Category(category) => workshop.select_category(category),
        Command::Item(id) => {
            if !workshop.select_item_id(&id) {
                warn!("Cannot preview '{}' here", id);
            }
        }
        Command::Equip => {
            workshop.equip();
        }
        Command::Back => {
            workshop.return_to_inventory();
        }
        Command::Drag(pixels) => workshop.drag(pixels),
        Command::Frame => workshop.on_frame_rendered(),
        Command::SaveSettings => settings.save().context("Failed to save settings")?,
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Gunsmith workshop...");

    let settings = WorkshopSettings::load();
    let catalog = load_catalog(&settings)?;
    let icons = IconLookup::new(
        &settings.catalog.icon_dir,
        settings.catalog.fallback_icon.clone(),
        &catalog,
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let script: Vec<String> = if args.is_empty() {
        DEMO_SCRIPT.iter().map(|s| s.to_string()).collect()
    } else {
        args
    };
    let commands = script
        .iter()
        .map(|line| Command::parse(line))
        .collect::<Result<Vec<_>>>()?;

    let mut workshop = Workshop::new(catalog, settings.stats, settings.camera.clone());
    workshop.attach_scene(Box::new(HeadlessScene::primary_weapon(Projection::default())));
    workshop.attach_view(Box::new(ConsoleView::new(icons)));
    workshop.spawn_model();

    for command in commands {
        info!("> {:?}", command);
        run(&mut workshop, &settings, command)?;
    }

    let snapshot = workshop.snapshot();
    for (category, id) in &snapshot.equipped {
        info!("{:<9} {}", category.name(), id);
    }
    if let Some(camera) = workshop.scene().map(|s| s.camera_pose()) {
        info!("Camera at {:?}", camera.position);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("category Sight").unwrap(), Command::Category(Category::Sight));
        assert_eq!(Command::parse("item mag_quickload").unwrap(), Command::Item("mag_quickload".into()));
        assert_eq!(Command::parse("drag -40").unwrap(), Command::Drag(-40.0));
        assert_eq!(Command::parse("back").unwrap(), Command::Back);
        assert!(Command::parse("category scope").is_err());
        assert!(Command::parse("equip now").is_err());
        assert!(Command::parse("").is_err());
    }

    #[test]
    fn test_demo_script_parses() {
        for line in DEMO_SCRIPT {
            assert!(Command::parse(line).is_ok(), "{line}");
        }
    }
}
