use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use cursorsnap_base::pos2;
use cursorsnap_scene::{Scene, demo_scene};
use cursorsnap_snap::{SnapConfig, SnapHit, SnapTier};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "cursorsnap")]
#[command(about = "Occlusion-aware 3D cursor snapping")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the demo scene to a JSON file.
    Generate(GenerateArgs),
    /// Resolve a screen coordinate against a scene file.
    Snap(SnapArgs),
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args)]
struct SnapArgs {
    #[arg(long)]
    scene: PathBuf,
    #[arg(long, allow_negative_numbers = true)]
    x: f32,
    #[arg(long, allow_negative_numbers = true)]
    y: f32,
    #[arg(long, value_enum, default_value_t = TierArg::All)]
    tier: TierArg,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Store the result as the scene cursor and rewrite the scene file.
    #[arg(long)]
    apply: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TierArg {
    All,
    Vertex,
    EdgeFace,
    Curve,
    FreeSpace,
}

impl From<TierArg> for SnapTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::All => SnapTier::All,
            TierArg::Vertex => SnapTier::Vertex,
            TierArg::EdgeFace => SnapTier::EdgeOrFace,
            TierArg::Curve => SnapTier::Curve,
            TierArg::FreeSpace => SnapTier::FreeSpace,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Snap(args) => {
            let hit = snap(&args)?;
            println!("{}", serde_json::to_string(&hit)?);
            Ok(())
        }
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    demo_scene()
        .save(&args.out)
        .with_context(|| format!("failed to write scene {}", args.out.display()))?;
    info!(path = %args.out.display(), "demo scene written");
    Ok(())
}

/// `None` only when a single tier was requested and it found nothing.
fn snap(args: &SnapArgs) -> Result<Option<SnapHit>> {
    let mut scene = Scene::load(&args.scene)
        .with_context(|| format!("failed to load scene {}", args.scene.display()))?;
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SnapConfig::default(),
    };

    let mouse = pos2(args.x, args.y);
    let hit = {
        let snapshot = scene.snapshot();
        snapshot.snapper(&config).resolve_tier(mouse, args.tier.into())
    };

    match hit {
        Some(hit) => info!(kind = ?hit.kind, position = ?hit.position, "snapped"),
        None => info!(tier = ?args.tier, "no snap target"),
    }

    if args.apply {
        let Some(hit) = hit else {
            bail!("nothing to apply: the {:?} tier found no target", args.tier);
        };
        scene.set_cursor(hit.position);
        scene
            .save(&args.scene)
            .with_context(|| format!("failed to write scene {}", args.scene.display()))?;
        info!(path = %args.scene.display(), "cursor stored");
    }
    Ok(hit)
}

fn load_config(path: &Path) -> Result<SnapConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: SnapConfig = serde_json::from_str(&text).context("invalid snap config")?;
    config.validate().context("invalid snap config")?;
    Ok(config)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursorsnap_base::Vec3;
    use cursorsnap_snap::{Projector, SnapKind};

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("cursorsnap_cli_{}_{name}", std::process::id()));
        path
    }

    fn parse(args: &[&str]) -> Result<SnapArgs> {
        match Cli::try_parse_from(args)?.command {
            Command::Snap(args) => Ok(args),
            Command::Generate(_) => bail!("expected the snap command"),
        }
    }

    #[test]
    fn parses_snap_arguments() -> Result<()> {
        let args = parse(&["cursorsnap", "snap", "--scene", "s.json", "--x", "12.5", "--y", "-3"])?;
        assert_eq!(args.scene, PathBuf::from("s.json"));
        assert_eq!((args.x, args.y), (12.5, -3.0));
        assert_eq!(args.tier, TierArg::All);
        assert!(!args.apply);
        assert!(args.config.is_none());

        let args = parse(&[
            "cursorsnap", "snap", "--scene", "s.json", "--x", "1", "--y", "2", "--tier",
            "edge-face", "--apply",
        ])?;
        assert_eq!(SnapTier::from(args.tier), SnapTier::EdgeOrFace);
        assert!(args.apply);
        Ok(())
    }

    #[test]
    fn rejects_unknown_tier() {
        let result = Cli::try_parse_from([
            "cursorsnap", "snap", "--scene", "s.json", "--x", "1", "--y", "2", "--tier", "grid",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn generate_then_snap_and_apply() -> Result<()> {
        let path = temp_path("scene.json");
        generate(GenerateArgs { out: path.clone() })?;

        let scene = Scene::load(&path)?;
        let corner = Vec3::new(1.0, 1.0, 1.0);
        let Some(mouse) = scene.view.project(corner) else {
            bail!("cube corner is off screen");
        };

        let args = SnapArgs {
            scene: path.clone(),
            x: mouse.x,
            y: mouse.y,
            tier: TierArg::All,
            config: None,
            apply: true,
        };
        let hit = snap(&args)?.context("no hit")?;
        assert_eq!(hit.kind, SnapKind::Vertex);
        assert!(hit.position.distance(corner) < 1.0e-9);

        let stored = Scene::load(&path)?;
        assert_eq!(stored.cursor(), hit.position);

        let _ = std::fs::remove_file(&path);
        Ok(())
    }

    #[test]
    fn apply_without_a_target_fails() -> Result<()> {
        let path = temp_path("empty.json");
        generate(GenerateArgs { out: path.clone() })?;

        let args = SnapArgs {
            scene: path.clone(),
            x: 2.0,
            y: 2.0,
            tier: TierArg::Vertex,
            config: None,
            apply: true,
        };
        assert!(snap(&args).is_err());
        assert_eq!(Scene::load(&path)?.cursor(), Vec3::ZERO);

        let _ = std::fs::remove_file(&path);
        Ok(())
    }

    #[test]
    fn config_file_overrides_radii() -> Result<()> {
        let path = temp_path("config.json");
        std::fs::write(&path, r#"{ "vertex_radius": 5.0, "curve_match": "nearest" }"#)?;
        let config = load_config(&path)?;
        assert_eq!(config.vertex_radius, 5.0);
        assert_eq!(config.edge_radius, SnapConfig::default().edge_radius);

        std::fs::write(&path, r#"{ "free_space_distance": -1.0 }"#)?;
        assert!(load_config(&path).is_err());

        let _ = std::fs::remove_file(&path);
        Ok(())
    }
}
