//! shape-grid - block shape planner
//!
//! Rasterizes a ring, a star, or both onto a cell grid using the saved
//! parameters, prints the block counts, and optionally writes SVG/PNG.
//!
//! ```text
//! shape-grid [--shape circle|star|both] [--set NS.KEY=VALUE]...
//!            [--svg PATH] [--png PATH] [--controls] [--save]
//! ```

use std::path::PathBuf;

use thiserror::Error;

use shape_grid::render::{save_png, SvgRenderer};
use shape_grid::settings::Settings;
use shape_grid::shapes::{Circle, ControlKind, ControlValue, Controllable, Scene, Star};
use shape_grid::{ExportError, ShapeError};

const USAGE: &str = "usage: shape-grid [--shape circle|star|both] [--set NS.KEY=VALUE]... \
                     [--svg PATH] [--png PATH] [--controls] [--save]";

#[derive(Error, Debug)]
enum CliError {
    #[error("{0}\n{usage}", usage = USAGE)]
    Usage(String),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Which generators to put in the scene
#[derive(Clone, Copy, PartialEq, Debug)]
enum ShapeChoice {
    Circle,
    Star,
    Both,
}

impl ShapeChoice {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "circle" => Some(ShapeChoice::Circle),
            "star" => Some(ShapeChoice::Star),
            "both" => Some(ShapeChoice::Both),
            _ => None,
        }
    }
}

/// One `--set ns.key=value` override
#[derive(Debug)]
struct Override {
    namespace: String,
    key: String,
    value: ControlValue,
}

impl Override {
    fn parse(text: &str) -> Option<Self> {
        let (path, value) = text.split_once('=')?;
        let (namespace, key) = path.split_once('.')?;
        Some(Self {
            namespace: namespace.to_string(),
            key: key.to_string(),
            value: ControlValue::parse(value),
        })
    }
}

#[derive(Debug)]
struct Options {
    shape: ShapeChoice,
    overrides: Vec<Override>,
    svg: Option<PathBuf>,
    png: Option<PathBuf>,
    list_controls: bool,
    save: bool,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, CliError> {
        let mut options = Options {
            shape: ShapeChoice::Circle,
            overrides: Vec::new(),
            svg: None,
            png: None,
            list_controls: false,
            save: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--shape" => {
                    let name = next_value(&arg, &mut args)?;
                    options.shape = ShapeChoice::parse(&name)
                        .ok_or_else(|| CliError::Usage(format!("unknown shape '{}'", name)))?;
                }
                "--set" => {
                    let text = next_value(&arg, &mut args)?;
                    let parsed = Override::parse(&text)
                        .ok_or_else(|| CliError::Usage(format!("bad override '{}'", text)))?;
                    options.overrides.push(parsed);
                }
                "--svg" => options.svg = Some(next_value(&arg, &mut args)?.into()),
                "--png" => options.png = Some(next_value(&arg, &mut args)?.into()),
                "--controls" => options.list_controls = true,
                "--save" => options.save = true,
                other => return Err(CliError::Usage(format!("unknown argument '{}'", other))),
            }
        }

        Ok(options)
    }
}

fn next_value(flag: &str, args: &mut impl Iterator<Item = String>) -> Result<String, CliError> {
    args.next()
        .ok_or_else(|| CliError::Usage(format!("{} needs a value", flag)))
}

fn print_controls<C: Controllable + ?Sized>(owner: &str, controls: &C) {
    for control in controls.controls() {
        let kind = match &control.kind {
            ControlKind::Number => "number".to_string(),
            ControlKind::Range { min, max, step } => {
                format!("range {}..={} step {}", min, max, step)
            }
            ControlKind::Checkbox => "checkbox".to_string(),
            ControlKind::Select { options } => format!("one of {}", options.join("|")),
        };
        println!(
            "  [{}] {}.{} = {:?} ({})",
            control.group, owner, control.label, control.initial, kind
        );
    }
}

fn run(options: Options) -> Result<(), CliError> {
    let settings = Settings::load();

    let mut scene = Scene::new("shape-grid");
    if matches!(options.shape, ShapeChoice::Circle | ShapeChoice::Both) {
        scene.add("circle", Circle::new(settings.item("circle")));
    }
    if matches!(options.shape, ShapeChoice::Star | ShapeChoice::Both) {
        scene.add("star", Star::new(settings.item("star")));
    }
    let mut renderer = SvgRenderer::new(settings.item("svg"));

    for o in options.overrides {
        log::debug!("Applying {}.{} = {:?}", o.namespace, o.key, o.value);
        if o.namespace == "svg" {
            renderer.apply_control(&o.key, o.value)?;
            continue;
        }
        let index = scene
            .position(&o.namespace)
            .ok_or_else(|| ShapeError::UnknownControl(format!("{}.{}", o.namespace, o.key)))?;
        scene.apply_control(index, &o.key, o.value)?;
    }

    if options.list_controls {
        println!("controls:");
        for entry in scene.iter() {
            print_controls(entry.name(), entry.generator());
        }
        print_controls("svg", &renderer);
    }

    let raster = scene.refresh()?;
    println!(
        "{}x{} grid, {}",
        raster.width(),
        raster.height(),
        raster.stats()
    );

    renderer.render(raster);
    if let Some(path) = &options.svg {
        renderer.save(path)?;
    }
    if let Some(path) = &options.png {
        save_png(raster, path)?;
    }

    if options.save {
        settings.save();
    }
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting shape-grid");

    let result = Options::parse(std::env::args().skip(1)).and_then(run);
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, CliError> {
        Options::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]).unwrap();
        assert_eq!(options.shape, ShapeChoice::Circle);
        assert!(options.overrides.is_empty());
        assert!(!options.save);
    }

    #[test]
    fn test_full_command_line() {
        let options = parse(&[
            "--shape", "both", "--set", "star.points=8", "--svg", "out.svg", "--save",
        ])
        .unwrap();
        assert_eq!(options.shape, ShapeChoice::Both);
        assert_eq!(options.overrides.len(), 1);
        assert_eq!(options.overrides[0].namespace, "star");
        assert_eq!(options.overrides[0].key, "points");
        assert_eq!(options.overrides[0].value, ControlValue::Number(8.0));
        assert_eq!(options.svg, Some(PathBuf::from("out.svg")));
        assert!(options.save);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(matches!(parse(&["--shape", "hexagon"]), Err(CliError::Usage(_))));
        assert!(matches!(parse(&["--set", "points=8"]), Err(CliError::Usage(_))));
        assert!(matches!(parse(&["--png"]), Err(CliError::Usage(_))));
        assert!(matches!(parse(&["--wat"]), Err(CliError::Usage(_))));
    }
}
