//! Command implementations for the `pathplanner` binary.
//!
//! Commands write their results to the supplied writer so they can be
//! driven from tests; logging goes through `tracing`.

use anyhow::{bail, Context as _, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use pathplanner_settings::PlannerConfig;
use pathplanner_spline::{PathFile, PathPoint, Spline};

use crate::cli::{Cli, Commands};

/// Configuration in effect for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: PlannerConfig,
    /// Where changes to the configuration are written back, if anywhere
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Resolve the configuration for `cli`.
    ///
    /// An explicit `--config` file is loaded if present and becomes the
    /// write-back target. Otherwise the default location is used, and
    /// only written back to if it already exists.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let (path, persist) = match &cli.config {
            Some(path) => (Some(path.clone()), true),
            None => {
                let path = PlannerConfig::default_path().ok();
                let exists = path.as_deref().is_some_and(Path::exists);
                (path, exists)
            }
        };
        let config = match &path {
            Some(path) => PlannerConfig::load_or_default(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => PlannerConfig::default(),
        };
        Ok(Self {
            config,
            config_path: path.filter(|_| persist),
        })
    }
}

/// One path point as printed by `sample` and `follow`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PointRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<f64>,
    field_x: f64,
    field_y: f64,
    field_heading: f64,
    speed_forward: f64,
    speed_strafe: f64,
    speed_rotation: f64,
}

impl PointRecord {
    fn new(point: &PathPoint, time: Option<f64>) -> Self {
        Self {
            time,
            field_x: point.field_x,
            field_y: point.field_y,
            field_heading: point.field_heading,
            speed_forward: point.speed_forward,
            speed_strafe: point.speed_strafe,
            speed_rotation: point.speed_rotation,
        }
    }
}

/// Run the command selected by `cli`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let mut context = Context::resolve(cli)?;
    match &cli.command {
        Commands::Info { file } => info_command(file, out),
        Commands::Sample { file, interval } => {
            let interval = interval.unwrap_or(context.config.path.sample_interval);
            sample_command(file, interval, out)
        }
        Commands::Follow { file, times } => follow_command(file, times, out),
        Commands::Mirror {
            input,
            output,
            axis,
        } => {
            let axis = axis.unwrap_or(context.config.path.mirror_axis);
            mirror_command(&mut context, input, output, axis, out)
        }
        Commands::Pick { file, x, y } => {
            pick_command(file, *x, *y, context.config.path.hit_tolerance, out)
        }
    }
}

fn load(file: &Path) -> Result<Spline> {
    Spline::load_from_file(file).with_context(|| format!("loading path {}", file.display()))
}

fn info_command(file: &Path, out: &mut impl Write) -> Result<()> {
    let spline = load(file)?;
    writeln!(out, "title:        {}", spline.title())?;
    writeln!(out, "description:  {}", spline.description())?;
    writeln!(out, "points:       {}", spline.len())?;
    writeln!(out, "duration:     {:.3} s", spline.duration())?;
    Ok(())
}

fn sample_command(file: &Path, interval: f64, out: &mut impl Write) -> Result<()> {
    let spline = load(file)?;
    let mut count = 0usize;
    for point in spline.curve_segments(interval)? {
        serde_json::to_writer(&mut *out, &PointRecord::new(&point, None))?;
        writeln!(out)?;
        count += 1;
    }
    debug!("Sampled {} points at {} s", count, interval);
    Ok(())
}

fn follow_command(file: &Path, times: &[f64], out: &mut impl Write) -> Result<()> {
    if let Some(pair) = times.windows(2).find(|pair| pair[1] < pair[0]) {
        bail!("times must not decrease ({} follows {})", pair[1], pair[0]);
    }
    let spline = load(file)?;
    let mut follower = spline.path_follower();
    for &time in times {
        match follower.point_at(time) {
            Some(point) => {
                serde_json::to_writer(&mut *out, &PointRecord::new(&point, Some(time)))?;
                writeln!(out)?;
            }
            None => writeln!(out, "end of path")?,
        }
    }
    Ok(())
}

fn mirror_command(
    context: &mut Context,
    input: &Path,
    output: &Path,
    axis: f64,
    out: &mut impl Write,
) -> Result<()> {
    let mut file = PathFile::load_from_file(input)
        .with_context(|| format!("loading path {}", input.display()))?;
    // reject documents that would not load as a path before writing anything
    file.to_spline()
        .with_context(|| format!("checking path {}", input.display()))?;
    file.mirror_about_x(axis);
    file.save_to_file(output, context.config.output.pretty_json)
        .with_context(|| format!("writing path {}", output.display()))?;
    writeln!(
        out,
        "mirrored {} control points about x = {} into {}",
        file.control_points.len(),
        axis,
        output.display()
    )?;

    if let Some(config_path) = &context.config_path {
        context.config.add_recent_file(output.to_path_buf());
        context
            .config
            .save_to_file(config_path)
            .with_context(|| format!("saving configuration {}", config_path.display()))?;
        info!("Recorded {} in recent files", output.display());
    }
    Ok(())
}

fn pick_command(file: &Path, x: f64, y: f64, tolerance: f64, out: &mut impl Write) -> Result<()> {
    let spline = load(file)?;
    let mut found = false;
    for (index, cp) in spline.control_points().enumerate() {
        let hits = [
            ("control point", cp.test_over_control_point(x, y, tolerance)),
            (
                "tangent handle of control point",
                cp.test_over_tangent_point(x, y, tolerance),
            ),
            (
                "heading handle of control point",
                cp.test_over_heading_point(x, y, tolerance),
            ),
        ];
        for (what, hit) in hits {
            if hit {
                writeln!(
                    out,
                    "{} {} at ({:.3}, {:.3}) t={:.3}",
                    what,
                    index,
                    cp.field_x(),
                    cp.field_y(),
                    cp.time()
                )?;
                found = true;
            }
        }
    }
    if !found {
        writeln!(out, "nothing within {} m of ({}, {})", tolerance, x, y)?;
    }
    Ok(())
}
