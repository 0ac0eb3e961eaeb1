use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tokio::io::AsyncBufReadExt as _;

#[derive(Parser, Debug)]
#[command(name = "arwah", version, about = "Memorial card compositor")]
struct Cli {
    /// JSON config file (template path, font dirs, debounce, output naming).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one card and write it as a PNG.
    Compose(ComposeArgs),
    /// Interactive preview: read control commands from stdin, re-render after each change.
    Preview(PreviewArgs),
}

#[derive(clap::Args, Debug)]
struct CardArgs {
    /// Portrait photo (JPEG/PNG).
    #[arg(long)]
    photo: PathBuf,

    /// Template image; overrides the config file.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Caption drawn under the portrait.
    #[arg(long)]
    name: Option<String>,

    /// Circle radius, percent of the template's smaller side (10-30).
    #[arg(long, default_value_t = 18.0)]
    size: f64,

    /// Edge feather, percent (0-100).
    #[arg(long, default_value_t = 30.0)]
    feather: f64,

    /// Extra directory of caption fonts; may be repeated.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Do not load installed system fonts.
    #[arg(long)]
    no_system_fonts: bool,
}

#[derive(clap::Args, Debug)]
struct ComposeArgs {
    #[command(flatten)]
    card: CardArgs,

    /// Output PNG path.
    #[arg(long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// Output directory; the file is named after the caption.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    card: CardArgs,

    /// Preview PNG, rewritten after every settled change.
    #[arg(long)]
    out: PathBuf,

    /// Debounce delay in milliseconds; overrides the config file.
    #[arg(long)]
    debounce_ms: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("build tokio runtime")?;

    match cli.cmd {
        Command::Compose(args) => rt.block_on(cmd_compose(cfg, args)),
        Command::Preview(args) => rt.block_on(cmd_preview(cfg, args)),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<arwah::CompositorConfig> {
    match path {
        Some(p) => arwah::CompositorConfig::load(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(arwah::CompositorConfig::default()),
    }
}

fn apply_card_overrides(cfg: &mut arwah::CompositorConfig, card: &CardArgs) {
    if let Some(t) = &card.template {
        cfg.template = t.clone();
    }
    cfg.font_dirs.extend(card.font_dirs.iter().cloned());
    if card.no_system_fonts {
        cfg.system_fonts = false;
    }
}

fn card_params(card: &CardArgs) -> anyhow::Result<arwah::CompositionParams> {
    Ok(arwah::CompositionParams::from_percent(
        card.size,
        card.feather,
        card.name.clone(),
    )?)
}

async fn cmd_compose(mut cfg: arwah::CompositorConfig, args: ComposeArgs) -> anyhow::Result<()> {
    apply_card_overrides(&mut cfg, &args.card);
    let params = card_params(&args.card)?;

    let compositor = Arc::new(
        arwah::Compositor::from_config(&cfg)
            .with_context(|| format!("load template '{}'", cfg.template.display()))?,
    );
    let photo = arwah::load_image(&args.card.photo)
        .with_context(|| format!("load photo '{}'", args.card.photo.display()))?;

    let output = arwah::FinalRender::new()
        .trigger(compositor, Arc::new(photo), params.clone())
        .await?;

    let path = match args.out {
        Some(p) => p,
        None => args
            .out_dir
            .unwrap_or_else(|| cfg.output_dir.clone())
            .join(arwah::output_file_name(&cfg.file_prefix, params.caption_text())),
    };
    write_png(&path, &output.png)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

async fn cmd_preview(mut cfg: arwah::CompositorConfig, args: PreviewArgs) -> anyhow::Result<()> {
    apply_card_overrides(&mut cfg, &args.card);
    if let Some(ms) = args.debounce_ms {
        cfg.preview_debounce_ms = ms;
    }
    let params = card_params(&args.card)?;

    let compositor = Arc::new(
        arwah::Compositor::from_config(&cfg)
            .with_context(|| format!("load template '{}'", cfg.template.display()))?,
    );
    let mut session = arwah::CardSession::new(compositor, &cfg)?;
    session.set_circle_size_percent(params.circle_size_fraction() * 100.0)?;
    session.set_feather_percent(params.feather_fraction() * 100.0)?;
    session.set_caption(params.caption().unwrap_or_default());
    let photo = arwah::load_image(&args.card.photo)
        .with_context(|| format!("load photo '{}'", args.card.photo.display()))?;
    session.set_photo(photo);

    let mut preview_rx = session.subscribe_preview();
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            changed = preview_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = preview_rx.borrow_and_update().clone();
                publish_preview(&args.out, &state)?;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("read stdin")? else {
                    break;
                };
                match parse_control(&line) {
                    Ok(None) => {}
                    Ok(Some(Control::Quit)) => break,
                    Ok(Some(control)) => {
                        if let Err(err) = apply_control(&mut session, &cfg, control).await {
                            tracing::warn!("{err:#}");
                        }
                    }
                    Err(err) => tracing::warn!("{err:#}"),
                }
            }
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
enum Control {
    Size(f64),
    Feather(f64),
    Name(String),
    Photo(PathBuf),
    Generate(Option<PathBuf>),
    Reset,
    Quit,
}

fn parse_control(line: &str) -> anyhow::Result<Option<Control>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let number = |what: &str| -> anyhow::Result<f64> {
        rest.parse::<f64>()
            .with_context(|| format!("{what} expects a number, got '{rest}'"))
    };

    let control = match cmd {
        "size" => Control::Size(number("size")?),
        "feather" => Control::Feather(number("feather")?),
        "name" => Control::Name(rest.to_string()),
        "photo" if !rest.is_empty() => Control::Photo(PathBuf::from(rest)),
        "photo" => anyhow::bail!("photo expects a path"),
        "generate" => Control::Generate((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "reset" => Control::Reset,
        "quit" | "exit" => Control::Quit,
        other => anyhow::bail!("unknown command '{other}'"),
    };
    Ok(Some(control))
}

async fn apply_control(
    session: &mut arwah::CardSession,
    cfg: &arwah::CompositorConfig,
    control: Control,
) -> anyhow::Result<()> {
    match control {
        Control::Size(pct) => session.set_circle_size_percent(pct)?,
        Control::Feather(pct) => session.set_feather_percent(pct)?,
        Control::Name(name) => session.set_caption(name),
        Control::Photo(path) => {
            let bytes =
                std::fs::read(&path).with_context(|| format!("read photo '{}'", path.display()))?;
            session.load_photo(&bytes)?;
        }
        Control::Generate(path) => {
            let output = session.generate().await?;
            let path = path.unwrap_or_else(|| cfg.output_dir.join(session.download_name()));
            write_png(&path, &output.png)?;
            eprintln!("wrote {}", path.display());
        }
        Control::Reset => session.reset(),
        Control::Quit => {}
    }
    Ok(())
}

fn publish_preview(out: &Path, state: &arwah::PreviewState) -> anyhow::Result<()> {
    match state {
        arwah::PreviewState::Ready { generation, output } => {
            write_png(out, &output.png)?;
            tracing::info!(generation, path = %out.display(), "preview updated");
        }
        arwah::PreviewState::Failed {
            generation,
            message,
        } => {
            tracing::warn!(generation, %message, "preview failed");
        }
        arwah::PreviewState::Empty => {
            if out.exists() {
                std::fs::remove_file(out)
                    .with_context(|| format!("remove preview '{}'", out.display()))?;
            }
        }
    }
    Ok(())
}

fn write_png(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let tmp = path.with_extension("png.part");
    std::fs::write(&tmp, bytes).with_context(|| format!("write png '{}'", tmp.display()))?;
    std::fs::rename(&tmp, path).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
