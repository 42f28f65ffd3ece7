// ============================================================================
// Pigment CLI — headless batch filtering via command-line arguments
// ============================================================================
//
// Usage examples:
//   pigment --input photo.png --filter invert --output result.png
//   pigment -i photo.png -f gaussian-blur --radius 4 -o blurred.png
//   pigment -i "shots/*.jpg" -f posterize --bins 4 --output-dir processed/
//   pigment -i scan.png -f motion-blur --radius 6 --angle 45 -o streaked.png
//
// Everything runs synchronously on the current thread; only convolution
// filters fan out internally.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crate::editor::Editor;
use crate::ops::filters::Filter;
use crate::{log_err, log_info};

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// Pigment headless image processor.
///
/// Apply a filter to image files and convert between formats — no GUI
/// required.
#[derive(Parser, Debug)]
#[command(
    name = "pigment",
    about = "Pigment headless batch image filter",
    long_about = "Apply one of the engine's filters to image files without opening a GUI.\n\
                  Formats are whatever the image crate decodes; output format follows the\n\
                  output path's extension.\n\n\
                  Filters: saturation, channels, invert, brightness-contrast, posterize,\n\
                  threshold, gaussian-blur, motion-blur, sharpen, edge-detect.\n\n\
                  Example:\n  \
                  pigment --input photo.png --filter sharpen --radius 2 --output crisp.png"
)]
pub struct CliArgs {
    /// Input file(s). Glob patterns accepted (e.g. "*.png", "shots/*.jpg").
    #[arg(short, long, required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Filter name. When omitted, images are only decoded and re-encoded
    /// (useful for format conversion).
    #[arg(short, long, value_name = "NAME")]
    pub filter: Option<String>,

    /// Saturation scale: 0 = grayscale, 1 = unchanged, above 1 oversaturates.
    #[arg(long, value_name = "SCALE")]
    pub scale: Option<f64>,

    /// Per-channel multipliers for the channels filter.
    #[arg(long, value_name = "R,G,B")]
    pub channels: Option<String>,

    /// Brightness offset in [-1, 1].
    #[arg(long, allow_hyphen_values = true, value_name = "AMOUNT")]
    pub brightness: Option<f64>,

    /// Contrast adjustment in [-1, 1].
    #[arg(long, allow_hyphen_values = true, value_name = "AMOUNT")]
    pub contrast: Option<f64>,

    /// Kernel radius for gaussian-blur, motion-blur and sharpen.
    #[arg(short, long, value_name = "PIXELS")]
    pub radius: Option<u32>,

    /// Motion-blur direction in degrees.
    #[arg(long, allow_hyphen_values = true, value_name = "DEGREES")]
    pub angle: Option<f64>,

    /// Posterize level count (at least 2).
    #[arg(long, value_name = "N")]
    pub bins: Option<u32>,

    /// Threshold luminance cutoff in [0, 1].
    #[arg(long, value_name = "LUM")]
    pub cutoff: Option<f64>,

    /// Output file path. Only valid for single-file input.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing. Files keep their names.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print per-file timing information.
    #[arg(short, long)]
    pub verbose: bool,
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run all CLI processing and return an OS exit code.
/// `0` = all files succeeded, `1` = one or more files failed.
pub fn run(args: CliArgs) -> ExitCode {
    let inputs = resolve_inputs(&args.input);
    if inputs.is_empty() {
        eprintln!("error: no input files matched the given pattern(s).");
        return ExitCode::FAILURE;
    }

    if inputs.len() > 1 && args.output.is_some() && args.output_dir.is_none() {
        eprintln!(
            "error: {} input files given but --output only accepts a single file path.\n\
             Use --output-dir to specify a destination directory for batch processing.",
            inputs.len()
        );
        return ExitCode::FAILURE;
    }
    if args.output.is_none() && args.output_dir.is_none() {
        eprintln!("error: no destination given; pass --output or --output-dir.");
        return ExitCode::FAILURE;
    }

    let filter = match parse_filter(&args) {
        Ok(f) => f,
        Err(msg) => {
            eprintln!("error: {}", msg);
            return ExitCode::FAILURE;
        }
    };

    let mut failures = 0usize;
    for input in &inputs {
        let started = Instant::now();
        match process_file(input, filter.as_ref(), &args) {
            Ok(dest) => {
                log_info!("processed {} -> {}", input.display(), dest.display());
                if args.verbose {
                    println!(
                        "{} -> {} ({} ms)",
                        input.display(),
                        dest.display(),
                        started.elapsed().as_millis()
                    );
                }
            }
            Err(msg) => {
                log_err!("{}", msg);
                eprintln!("error: {}", msg);
                failures += 1;
            }
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn process_file(
    input: &Path,
    filter: Option<&Filter>,
    args: &CliArgs,
) -> Result<PathBuf, String> {
    let mut editor = Editor::open(input)?;
    if let Some(filter) = filter {
        editor.apply_filter(filter);
    }

    let dest = match (&args.output, &args.output_dir) {
        (Some(path), None) => path.clone(),
        (_, Some(dir)) => {
            let name = input
                .file_name()
                .ok_or_else(|| format!("input '{}' has no file name", input.display()))?;
            dir.join(name)
        }
        (None, None) => unreachable!("checked in run()"),
    };
    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("could not create '{}': {}", parent.display(), e))?;
    }
    editor.save(&dest)?;
    Ok(dest)
}

// ============================================================================
// Argument resolution
// ============================================================================

/// Expand glob patterns and literal paths into concrete files.
fn resolve_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for pattern in patterns {
        match glob::glob(pattern) {
            Ok(matches) => {
                let mut any = false;
                for entry in matches.flatten() {
                    if entry.is_file() {
                        files.push(entry);
                        any = true;
                    }
                }
                // a literal path with no glob metacharacters still matched
                // zero entries if the file is missing; keep it so the error
                // surfaces per-file
                if !any && !pattern.contains(['*', '?', '[']) {
                    files.push(PathBuf::from(pattern));
                }
            }
            Err(_) => files.push(PathBuf::from(pattern)),
        }
    }
    files
}

/// Build the typed filter from the flag soup, or a usage error.
fn parse_filter(args: &CliArgs) -> Result<Option<Filter>, String> {
    let Some(name) = args.filter.as_deref() else {
        return Ok(None);
    };

    let filter = match name {
        "saturation" => Filter::Saturation { scale: args.scale.unwrap_or(1.0) },
        "channels" => {
            let spec = args
                .channels
                .as_deref()
                .ok_or("channels filter needs --channels R,G,B")?;
            let parts: Vec<f64> = spec
                .split(',')
                .map(|p| p.trim().parse::<f64>())
                .collect::<Result<_, _>>()
                .map_err(|e| format!("bad --channels value '{}': {}", spec, e))?;
            let [r, g, b] = parts[..] else {
                return Err(format!("--channels wants three values, got {}", parts.len()));
            };
            Filter::Channels { r, g, b }
        }
        "invert" => Filter::Invert,
        "brightness-contrast" => Filter::BrightnessContrast {
            brightness: args.brightness.unwrap_or(0.0),
            contrast: args.contrast.unwrap_or(0.0),
        },
        "posterize" => {
            let bins = args.bins.unwrap_or(4);
            if bins < 2 {
                return Err("--bins must be at least 2".to_string());
            }
            Filter::Posterize { bins }
        }
        "threshold" => Filter::Threshold { cutoff: args.cutoff.unwrap_or(0.5) },
        "gaussian-blur" => Filter::GaussianBlur { radius: args.radius.unwrap_or(3) },
        "motion-blur" => Filter::MotionBlur {
            radius: args.radius.unwrap_or(5),
            angle: args.angle.unwrap_or(0.0).to_radians(),
        },
        "sharpen" => Filter::Sharpen { radius: args.radius.unwrap_or(1) },
        "edge-detect" => Filter::EdgeDetect,
        other => {
            return Err(format!(
                "unknown filter '{}'; see --help for the filter list",
                other
            ));
        }
    };
    Ok(Some(filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> CliArgs {
        CliArgs::parse_from(argv)
    }

    #[test]
    fn parses_a_convolution_filter() {
        let a = args(&["pigment", "-i", "in.png", "-f", "gaussian-blur", "--radius", "4"]);
        let filter = parse_filter(&a).unwrap();
        assert_eq!(filter, Some(Filter::GaussianBlur { radius: 4 }));
    }

    #[test]
    fn motion_blur_angle_is_degrees() {
        let a = args(&[
            "pigment", "-i", "in.png", "-f", "motion-blur", "--radius", "6", "--angle", "90",
        ]);
        match parse_filter(&a).unwrap() {
            Some(Filter::MotionBlur { radius: 6, angle }) => {
                assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn channels_spec_is_comma_separated() {
        let a = args(&["pigment", "-i", "in.png", "-f", "channels", "--channels", "1.5,1.0,0.5"]);
        assert_eq!(
            parse_filter(&a).unwrap(),
            Some(Filter::Channels { r: 1.5, g: 1.0, b: 0.5 })
        );
    }

    #[test]
    fn posterize_rejects_degenerate_bins() {
        let a = args(&["pigment", "-i", "in.png", "-f", "posterize", "--bins", "1"]);
        assert!(parse_filter(&a).is_err());
    }

    #[test]
    fn unknown_filter_is_an_error() {
        let a = args(&["pigment", "-i", "in.png", "-f", "swirl"]);
        assert!(parse_filter(&a).is_err());
    }

    #[test]
    fn no_filter_means_passthrough() {
        let a = args(&["pigment", "-i", "in.png", "-o", "out.png"]);
        assert_eq!(parse_filter(&a).unwrap(), None);
    }
}
