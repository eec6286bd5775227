use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};
use crate::script::{load_script, replay};
use panelkit_core::raster::{ImageProvider, PageRaster};
use panelkit_core::storage::{FileStorage, Storage};
use panelkit_core::{Document, EditorConfig, EditorSession, Keymap, Numbering};
use panelkit_render::{DirectoryImageProvider, DrawListRenderer, RenderContext, Renderer};

#[derive(Debug, Parser)]
#[command(
    name = "panelkit",
    about = "Inspect and edit comic panel annotations",
    version
)]
pub struct Cli {
    /// Editor configuration file (JSON).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log progress at info level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize pages, panels and coverage.
    Info {
        document: PathBuf,
        /// Directory holding the page images.
        #[arg(long)]
        images: Option<PathBuf>,
    },

    /// Sort every page's panels into reading order.
    Sort {
        document: PathBuf,
        /// Override each page's own numbering.
        #[arg(long, value_enum)]
        direction: Option<Direction>,
        /// Write here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply a scripted editing session and export the result.
    Replay {
        document: PathBuf,
        script: PathBuf,
        /// Page the session starts on.
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also save the result into the document store under this id.
        #[arg(long)]
        save_as: Option<String>,
        /// Document store directory (defaults to the per-user data directory).
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Print what the renderer would draw for a page.
    Plan {
        document: PathBuf,
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(long)]
        images: Option<PathBuf>,
        /// Script to replay before planning.
        #[arg(long)]
        script: Option<PathBuf>,
    },

    /// List documents in the document store.
    Stored {
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Print keyboard shortcuts.
    Shortcuts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl From<Direction> for Numbering {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Ltr => Numbering::Ltr,
            Direction::Rtl => Numbering::Rtl,
        }
    }
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    match cli.command {
        Commands::Info { document, images } => run_info(&document, images.as_deref(), out),
        Commands::Sort {
            document,
            direction,
            output,
        } => run_sort(&document, direction, output.as_deref(), config, out),
        Commands::Replay {
            document,
            script,
            page,
            output,
            save_as,
            store,
        } => {
            let session = replayed_session(&document, Some(&script), page, config)?;
            let history = session.history();
            writeln!(
                out,
                "{} undo step(s), {} redo step(s)",
                history.undo_depth(),
                history.redo_depth()
            )?;
            let result = session.into_document();
            if let Some(id) = save_as {
                let storage = open_store(store)?;
                pollster::block_on(storage.save(&id, &result))?;
                writeln!(out, "saved as {}", id)?;
            }
            export(&result, output.as_deref(), out)
        }
        Commands::Plan {
            document,
            page,
            images,
            script,
        } => {
            let session = replayed_session(&document, script.as_deref(), page, config)?;
            let provider = DirectoryImageProvider::new(images.unwrap_or_else(|| parent_dir(&document)));
            let mut renderer = DrawListRenderer::new();
            renderer.build_scene(&RenderContext::new(&session, &provider))?;
            for command in renderer.commands() {
                writeln!(out, "{}", command)?;
            }
            Ok(())
        }
        Commands::Stored { store } => {
            let storage = open_store(store)?;
            for id in pollster::block_on(storage.list())? {
                writeln!(out, "{}", id)?;
            }
            Ok(())
        }
        Commands::Shortcuts => {
            for shortcut in Keymap::all() {
                writeln!(out, "{:<14} {}", shortcut.format(), shortcut.description)?;
            }
            Ok(())
        }
    }
}

fn run_info(path: &Path, images: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let document = Document::load(path)?;
    let provider = images.map(|dir| DirectoryImageProvider::new(dir));
    writeln!(
        out,
        "{} page(s), {} panel(s)",
        document.len(),
        document.panel_count()
    )?;
    for (index, page) in document.pages.iter().enumerate() {
        let coverage = page
            .panel_coverage()
            .map(|c| format!("{:.2}%", c))
            .unwrap_or_else(|| "-".to_string());
        write!(
            out,
            "{:>3}  {}  {}x{}  {} panel(s)  coverage {}",
            index,
            page.filename,
            page.size.width,
            page.size.height,
            page.panels.len(),
            coverage
        )?;
        if let Some(numbering) = page.numbering {
            write!(out, "  {}", if numbering == Numbering::Rtl { "rtl" } else { "ltr" })?;
        }
        if let Some(provider) = &provider {
            match provider.raster(&page.filename) {
                PageRaster::Available { width, height } => write!(out, "  image {}x{}", width, height)?,
                PageRaster::Missing => write!(out, "  image missing")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn run_sort(
    path: &Path,
    direction: Option<Direction>,
    output: Option<&Path>,
    config: EditorConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let document = Document::load(path)?;
    let pages = document.len();
    let mut session = EditorSession::new(document, config);
    let mut sorted = 0;
    for index in 0..pages {
        session.go_to_page(index);
        if session.sort_reading_order(direction.map(Numbering::from)) {
            sorted += 1;
        }
    }
    log::info!("Reordered panels on {} of {} page(s)", sorted, pages);
    export(&session.into_document(), output, out)
}

fn replayed_session(
    path: &Path,
    script: Option<&Path>,
    page: usize,
    config: EditorConfig,
) -> Result<EditorSession> {
    let document = Document::load(path)?;
    let pages = document.len();
    if page >= pages {
        return Err(CliError::PageOutOfRange { index: page, pages });
    }
    let mut session = EditorSession::new(document, config);
    session.go_to_page(page);
    if let Some(script) = script {
        let summary = replay(&mut session, load_script(script)?);
        log::info!(
            "Replayed {} step(s), {} changed the session",
            summary.steps,
            summary.applied
        );
    }
    Ok(session)
}

fn export(document: &Document, output: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    match output {
        Some(path) => document.save(path)?,
        None => writeln!(out, "{}", document.to_json()?)?,
    }
    Ok(())
}

fn open_store(store: Option<PathBuf>) -> Result<FileStorage> {
    Ok(match store {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::default_location()?,
    })
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"[
        {"filename": "001.jpg", "size": [800, 600], "numbering": "rtl",
         "panels": [[0, 0, 400, 300], [400, 0, 400, 300], [0, 300, 800, 300]]},
        {"filename": "002.jpg", "size": [800, 600], "panels": []}
    ]"#;

    fn cli(command: Commands) -> Cli {
        Cli {
            config: None,
            verbose: false,
            command,
        }
    }

    fn run_to_string(cli: Cli) -> Result<String> {
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    fn sample_file(dir: &Path) -> PathBuf {
        let path = dir.join("book.json");
        std::fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn info_lists_pages() {
        let dir = tempdir().unwrap();
        let output = run_to_string(cli(Commands::Info {
            document: sample_file(dir.path()),
            images: Some(dir.path().to_path_buf()),
        }))
        .unwrap();

        assert!(output.starts_with("2 page(s), 3 panel(s)"));
        assert!(output.contains("001.jpg  800x600  3 panel(s)  coverage 100.00%  rtl  image missing"));
        assert!(output.contains("coverage 0.00%"));
    }

    #[test]
    fn sort_uses_page_numbering() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("sorted.json");
        run_to_string(cli(Commands::Sort {
            document: sample_file(dir.path()),
            direction: None,
            output: Some(output_path.clone()),
        }))
        .unwrap();

        let sorted = Document::load(&output_path).unwrap();
        let panels: Vec<[i32; 4]> = sorted.pages[0].panels.iter().map(|&p| p.into()).collect();
        assert_eq!(panels, vec![[400, 0, 400, 300], [0, 0, 400, 300], [0, 300, 800, 300]]);
    }

    #[test]
    fn replay_exports_and_stores() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("script.json");
        std::fs::write(
            &script,
            r#"[{"command": {"command": "add_panel"}}, {"command": {"command": "undo"}}]"#,
        )
        .unwrap();
        let store = dir.path().join("store");

        let output = run_to_string(cli(Commands::Replay {
            document: sample_file(dir.path()),
            script,
            page: 1,
            output: None,
            save_as: Some("book".to_string()),
            store: Some(store.clone()),
        }))
        .unwrap();

        assert!(output.starts_with("0 undo step(s), 1 redo step(s)"));
        assert!(output.contains("saved as book"));
        let listed = run_to_string(cli(Commands::Stored { store: Some(store) })).unwrap();
        assert_eq!(listed, "book\n");
    }

    #[test]
    fn plan_prints_draw_list() {
        let dir = tempdir().unwrap();
        let output = run_to_string(cli(Commands::Plan {
            document: sample_file(dir.path()),
            page: 0,
            images: None,
            script: None,
        }))
        .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "placeholder 001.jpg [0, 0, 800, 600]");
        assert!(lines[1].starts_with("outline panel 1 [0, 0, 400, 300] #00FF00"));
    }

    #[test]
    fn page_out_of_range() {
        let dir = tempdir().unwrap();
        let err = run_to_string(cli(Commands::Plan {
            document: sample_file(dir.path()),
            page: 9,
            images: None,
            script: None,
        }))
        .unwrap_err();
        assert!(matches!(err, CliError::PageOutOfRange { index: 9, pages: 2 }));
    }

    #[test]
    fn invalid_config_is_reported() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"handle_size": 0}"#).unwrap();
        let err = run_to_string(Cli {
            config: Some(config),
            verbose: false,
            command: Commands::Shortcuts,
        })
        .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn shortcuts_table() {
        let output = run_to_string(cli(Commands::Shortcuts)).unwrap();
        assert!(output.lines().next().unwrap_or_default().starts_with("Ctrl+Z"));
        assert!(output.contains("Merge selected panels"));
    }

    #[test]
    fn parses_arguments() {
        let cli = Cli::try_parse_from(["panelkit", "sort", "book.json", "--direction", "rtl", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Sort {
                direction: Some(Direction::Rtl),
                ..
            }
        ));
    }
}
