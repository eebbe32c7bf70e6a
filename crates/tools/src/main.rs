use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use controller::headless::{HeadlessCamera, HeadlessHost};
use controller::host::Camera;
use controller::{Key, PanelContent, RouterState, SyncConfig, Viewer};
use formats::config::{DEFAULT_HOME_HEIGHT_M, Home};
use foundation::math::{Ecef, Geodetic, ecef_to_geodetic};
use foundation::time::Time;
use scene::entity::EntityKind;
use scene::world::World;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect travel map data and replay selection tours")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a CZML document (and optional POIs / viewer config) as JSON
    Inspect {
        /// CZML file with photos and tracks
        czml: PathBuf,

        /// GeoJSON FeatureCollection of points of interest
        #[arg(long)]
        pois: Option<PathBuf>,

        /// Viewer config with `home` or `home_rect`
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Step through the photos with a headless viewer, one JSON line per step
    Tour {
        czml: PathBuf,

        #[arg(long)]
        pois: Option<PathBuf>,

        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of "next" presses after the first photo
        #[arg(long, default_value_t = 5)]
        steps: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match args.command {
        Command::Inspect { czml, pois, config } => {
            cmd_inspect(&czml, pois.as_deref(), config.as_deref())
        }
        Command::Tour {
            czml,
            pois,
            config,
            steps,
        } => cmd_tour(&czml, pois.as_deref(), config.as_deref(), steps),
    }
}

fn load_world(czml: &Path, pois: Option<&Path>) -> Result<World> {
    let text = fs::read_to_string(czml).with_context(|| format!("read {czml:?}"))?;
    let mut world = formats::czml::load_world(&text).with_context(|| format!("parse {czml:?}"))?;
    if let Some(path) = pois {
        let text = fs::read_to_string(path).with_context(|| format!("read {path:?}"))?;
        let added = formats::geojson::load_pois(&text, &mut world)
            .with_context(|| format!("parse {path:?}"))?;
        info!(count = added, path = %path.display(), "loaded points of interest");
    }
    Ok(world)
}

fn load_home(config: Option<&Path>) -> Result<Option<Home>> {
    let Some(path) = config else {
        return Ok(None);
    };
    let text = fs::read_to_string(path).with_context(|| format!("read {path:?}"))?;
    formats::config::parse_home(&text).with_context(|| format!("parse {path:?}"))
}

#[derive(Debug, Serialize)]
struct InspectReport {
    entities: usize,
    photos: usize,
    tracks: usize,
    pois: usize,
    markers: usize,
    start: Option<String>,
    end: Option<String>,
    home: Option<HomeReport>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum HomeReport {
    Position { lon: f64, lat: f64, height: f64 },
    Rect { west: f64, south: f64, east: f64, north: f64 },
}

impl From<Home> for HomeReport {
    fn from(home: Home) -> Self {
        match home {
            Home::Position(geo) => HomeReport::Position {
                lon: geo.lon_deg(),
                lat: geo.lat_deg(),
                height: geo.alt_m,
            },
            Home::Rect(r) => HomeReport::Rect {
                west: r.west.to_degrees(),
                south: r.south.to_degrees(),
                east: r.east.to_degrees(),
                north: r.north.to_degrees(),
            },
        }
    }
}

fn cmd_inspect(czml: &Path, pois: Option<&Path>, config: Option<&Path>) -> Result<()> {
    let world = load_world(czml, pois)?;
    let home = load_home(config)?;
    let span = world.time_span();

    let report = InspectReport {
        entities: world.len(),
        photos: world.count(EntityKind::Photo),
        tracks: world.count(EntityKind::Track),
        pois: world.count(EntityKind::Poi),
        markers: world.count(EntityKind::Marker),
        start: span.and_then(|s| s.start.to_iso8601()),
        end: span.and_then(|s| s.end.to_iso8601()),
        home: home.map(HomeReport::from),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("encode report")?
    );
    Ok(())
}

#[derive(Debug, Serialize)]
struct TourStep {
    step: usize,
    selected: Option<String>,
    state: String,
    clock: Option<String>,
    panel: Option<String>,
    camera_lon: f64,
    camera_lat: f64,
    camera_height: f64,
}

fn cmd_tour(czml: &Path, pois: Option<&Path>, config: Option<&Path>, steps: usize) -> Result<()> {
    let world = load_world(czml, pois)?;
    let home = load_home(config)?;
    let sync = SyncConfig::from_env().context("read TRAVELMAP_* overrides")?;

    let start = world
        .time_span()
        .map(|s| s.start)
        .unwrap_or(Time(0.0));
    let camera = HeadlessCamera::above(Geodetic::from_degrees(0.0, 0.0, DEFAULT_HOME_HEIGHT_M));
    let mut viewer = Viewer::new(HeadlessHost::new(camera, start), world, &sync);

    if let Some(home) = home {
        viewer.apply_config(home);
        land(&mut viewer);
    }

    let Some(first) = viewer.lists().photos.iter().next().cloned() else {
        anyhow::bail!("{czml:?} contains no photos");
    };

    viewer.on_filmstrip_click(&first);
    land(&mut viewer);
    print_step(&viewer, 0)?;

    for step in 1..=steps {
        viewer.on_key(Key::ArrowRight);
        land(&mut viewer);
        print_step(&viewer, step)?;
    }
    Ok(())
}

/// Lets a pending flight arrive, as the engine would once the animation ends.
fn land(viewer: &mut Viewer<HeadlessHost>) {
    if viewer.host_mut().camera.finish_flight() {
        viewer.on_camera_move_end();
    }
}

fn print_step(viewer: &Viewer<HeadlessHost>, step: usize) -> Result<()> {
    let host = viewer.host();
    let geo = ecef_to_geodetic(Ecef::from(host.camera.position()));
    let panel = host.panel.content.as_ref().map(|content| match content {
        PanelContent::Photo { caption, .. } => caption.clone(),
        PanelContent::Track(table) => table.get("Distance").unwrap_or("-").to_string(),
        PanelContent::Poi { label } => label.clone(),
    });
    let row = TourStep {
        step,
        selected: viewer.selected().map(|id| id.to_string()),
        state: state_name(viewer.router_state()).to_string(),
        clock: host.clock.time.to_iso8601(),
        panel,
        camera_lon: geo.lon_deg(),
        camera_lat: geo.lat_deg(),
        camera_height: geo.alt_m,
    };
    println!("{}", serde_json::to_string(&row).context("encode step")?);
    Ok(())
}

fn state_name(state: RouterState) -> &'static str {
    match state {
        RouterState::Idle => "idle",
        RouterState::PhotoSelected => "photo",
        RouterState::TrackSelected => "track",
        RouterState::PoiSelected => "poi",
    }
}
