//! Command handlers.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use auspex::domain::{Aspect, House, Object, Sign};
use auspex::{FolderConfig, Interpreter};
use serde::Serialize;
use serde_json::json;

use crate::cli::{Command, Source};
use crate::output::{render_listing, terminal_width, OutputMode, Palette};

/// What a handler produced.
#[derive(Debug)]
pub enum Output {
    /// Text ready for stdout.
    Render(String),
    /// A value to serialize in JSON mode.
    Json(serde_json::Value),
}

/// The outcome of one query.
#[derive(Debug, Serialize)]
struct Answer<'a> {
    style: &'a str,
    key: String,
    text: Option<&'a str>,
}

pub fn run(command: Command, config: FolderConfig, mode: OutputMode) -> Result<Output> {
    let mut interp = Interpreter::new(config);

    match command {
        Command::List => list(&mut interp, mode),
        Command::Combo {
            object,
            sign,
            house,
            source,
        } => {
            select(&mut interp, &source)?;
            answer(&interp, combo_key(object, sign, house), mode, |i| {
                i.resolve_combo(object.id(), sign.id(), house.id())
            })
        }
        Command::AspectCombo {
            first,
            second,
            aspect,
            source,
        } => {
            select(&mut interp, &source)?;
            let key = format!("{}+{}+{}", first.name(), second.name(), aspect.name());
            answer(&interp, key, mode, |i| {
                i.resolve_aspect_combo(first.id(), second.id(), aspect.id())
            })
        }
        Command::Aspect {
            aspect,
            orb,
            source,
        } => {
            select(&mut interp, &source)?;
            answer(&interp, aspect_key(aspect), mode, |i| {
                i.resolve_aspect(aspect.id(), orb)
            })
        }
        Command::Path { kind, object } => {
            interp.scan_folders()?;
            let path = interp
                .object_file_path(kind, object)
                .context("no style folder is active")?;
            if mode.is_json() {
                Ok(Output::Json(json!({ "path": path })))
            } else {
                Ok(Output::Render(format!("{}\n", path.display())))
            }
        }
        Command::Install { package } => {
            let steps = install_steps(&package, &interp.folders().config().styles_dir());
            Err(anyhow!(steps).context("installing style packages is not supported"))
        }
        Command::Migrate => Err(anyhow!(MIGRATE_STEPS).context("migrating style files is not supported")),
    }
}

const MIGRATE_STEPS: &str = "existing style files keep working with --file <path>";

fn install_steps(package: &Path, styles_dir: &Path) -> String {
    format!(
        "to install {} manually:\n  1. extract it into {}/\n  2. run `auspex list` to confirm it is found",
        package.display(),
        styles_dir.display()
    )
}

fn list(interp: &mut Interpreter, mode: OutputMode) -> Result<Output> {
    interp.scan_folders()?;
    let folders = interp.available_styles();
    if mode.is_json() {
        return Ok(Output::Json(serde_json::to_value(folders)?));
    }
    let styles_dir = interp.folders().config().styles_dir();
    Ok(Output::Render(render_listing(
        folders,
        &styles_dir,
        &Palette::for_mode(mode),
        terminal_width(),
    )))
}

/// Makes the requested style current: a file, a named folder or the folder
/// marked active.
fn select(interp: &mut Interpreter, source: &Source) -> Result<()> {
    if let Some(path) = &source.file {
        interp
            .load_style_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
        return Ok(());
    }

    let name = match &source.style {
        Some(name) => name.clone(),
        None => {
            interp.scan_folders()?;
            match interp.folders().active() {
                Some(folder) => folder.name.clone(),
                None => bail!("no style selected; pass --style <name> or --file <path>"),
            }
        }
    };
    interp.activate_style(&name)?;
    Ok(())
}

fn answer<'a>(
    interp: &'a Interpreter,
    key: String,
    mode: OutputMode,
    query: impl FnOnce(&'a Interpreter) -> Option<&'a str>,
) -> Result<Output> {
    let style = interp.current_style().map_or("", |s| s.filename());
    let text = query(interp);

    if mode.is_json() {
        let answer = Answer { style, key, text };
        return Ok(Output::Json(serde_json::to_value(answer)?));
    }
    match text {
        Some(text) => Ok(Output::Render(format!("{text}\n"))),
        None => {
            let palette = Palette::for_mode(mode);
            Ok(Output::Render(format!(
                "{}\n",
                palette.dim(&format!("No interpretation for {key}."))
            )))
        }
    }
}

fn combo_key(object: Object, sign: Sign, house: House) -> String {
    format!("{}+{}+{}", object.name(), sign.name(), house.id())
}

fn aspect_key(aspect: Aspect) -> String {
    aspect.name().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn base_with_style() -> TempDir {
        let base = TempDir::new().unwrap();
        let folder = base.path().join("styles").join("modern");
        fs::create_dir_all(folder.join("signs")).unwrap();
        fs::write(folder.join("style.conf"), "[metadata]\nname: Modern\n").unwrap();
        fs::write(
            folder.join("signs").join("Sun.ais"),
            "[combinations]\n1+5+10: Applause follows you.\n",
        )
        .unwrap();
        base
    }

    fn render(output: Output) -> String {
        match output {
            Output::Render(text) => text,
            Output::Json(value) => panic!("expected text, got {value}"),
        }
    }

    #[test]
    fn test_combo_from_named_style() {
        let base = base_with_style();
        let command = Command::Combo {
            object: Object::new(1).unwrap(),
            sign: Sign::new(5).unwrap(),
            house: House::new(10).unwrap(),
            source: Source {
                style: Some("Modern".into()),
                file: None,
            },
        };
        let out = run(command, FolderConfig::new(base.path()), OutputMode::Text).unwrap();
        assert_eq!(render(out), "Applause follows you.\n");
    }

    #[test]
    fn test_combo_json_miss() {
        let base = base_with_style();
        let command = Command::Combo {
            object: Object::new(2).unwrap(),
            sign: Sign::new(5).unwrap(),
            house: House::new(10).unwrap(),
            source: Source {
                style: Some("modern".into()),
                file: None,
            },
        };
        let out = run(command, FolderConfig::new(base.path()), OutputMode::Json).unwrap();
        match out {
            Output::Json(value) => {
                assert_eq!(value["style"], "Modern");
                assert_eq!(value["key"], "Moon+Leo+10");
                assert!(value["text"].is_null());
            }
            Output::Render(text) => panic!("expected json, got {text}"),
        }
    }

    #[test]
    fn test_query_without_selection_fails() {
        let base = base_with_style();
        let command = Command::Aspect {
            aspect: Aspect::new(4).unwrap(),
            orb: 0,
            source: Source {
                style: None,
                file: None,
            },
        };
        let err = run(command, FolderConfig::new(base.path()), OutputMode::Text).unwrap_err();
        assert!(err.to_string().contains("no style selected"));
    }

    #[test]
    fn test_list_text() {
        let base = base_with_style();
        let out = run(Command::List, FolderConfig::new(base.path()), OutputMode::Text).unwrap();
        assert!(render(out).contains("   modern (Modern)\n"));
    }

    #[test]
    fn test_install_reports_manual_steps() {
        let base = TempDir::new().unwrap();
        let command = Command::Install {
            package: "modern.tar.gz".into(),
        };
        let err = run(command, FolderConfig::new(base.path()), OutputMode::Json).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("installing style packages is not supported: "));
        assert!(message.contains("to install modern.tar.gz manually"));
        assert!(message.contains(&format!("extract it into {}/", base.path().join("styles").display())));
    }

    #[test]
    fn test_migrate_reports_manual_steps() {
        let base = TempDir::new().unwrap();
        let err = run(Command::Migrate, FolderConfig::new(base.path()), OutputMode::Text).unwrap_err();
        assert_eq!(err.to_string(), "migrating style files is not supported");
        assert!(format!("{err:#}").ends_with(MIGRATE_STEPS));
    }
}
