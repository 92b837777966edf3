use std::path::PathBuf;

use clap::{Parser, Subcommand};
use remap_core::{Projection, RadialFade, StereoLayout};
use remap_render::Filter;

#[derive(Parser, Debug)]
#[command(
    name = "remap360",
    author,
    version,
    about = "Panoramic re-projection toolkit",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Re-project a panoramic image between projections.
    Convert(ConvertArgs),
    /// Run a conversion described by a TOML job file.
    Run(RunJobArgs),
    /// List the legacy effect presets and their parameters.
    Effects,
    /// Print the GLSL shader pair implementing the transform.
    Shader(ShaderArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Input image path.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output image path (PNG keeps the alpha channel).
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Projection of the input image.
    #[arg(long = "from", value_name = "PROJECTION", value_parser = parse_projection)]
    pub source: Projection,

    /// Projection to produce.
    #[arg(long = "to", value_name = "PROJECTION", value_parser = parse_projection)]
    pub target: Projection,

    /// Camera pitch in degrees.
    #[arg(long, value_name = "DEGREES", default_value_t = 0.0, allow_negative_numbers = true)]
    pub pitch: f32,

    /// Camera yaw in degrees.
    #[arg(long, value_name = "DEGREES", default_value_t = 0.0, allow_negative_numbers = true)]
    pub yaw: f32,

    /// Camera roll in degrees.
    #[arg(long, value_name = "DEGREES", default_value_t = 0.0, allow_negative_numbers = true)]
    pub roll: f32,

    /// Source-side field of view in degrees (default depends on the
    /// source projection).
    #[arg(long, value_name = "DEGREES")]
    pub fov_in: Option<f32>,

    /// Destination-side field of view in degrees (default depends on the
    /// target projection).
    #[arg(long, value_name = "DEGREES")]
    pub fov_out: Option<f32>,

    /// Output resolution (defaults to the input's).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Stereoscopic frame packing of both images.
    #[arg(long, value_name = "LAYOUT", value_parser = parse_stereo, default_value = "mono")]
    pub stereo: StereoLayout,

    /// Radial fade bounds over a fisheye source, e.g. `0.8:1.0`.
    #[arg(long, value_name = "INNER:OUTER", value_parser = parse_fade)]
    pub fade: Option<RadialFade>,

    /// Sampling filter: `bilinear` or `nearest`.
    #[arg(long, value_name = "FILTER", value_parser = parse_filter, default_value = "bilinear")]
    pub filter: Filter,

    /// Worker threads (0 = one per CPU).
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    pub threads: usize,
}

#[derive(Parser, Debug)]
pub struct RunJobArgs {
    /// Path to the TOML job file.
    #[arg(value_name = "JOB")]
    pub job: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ShaderArgs {
    /// Which stage to print: `fragment` or `vertex`.
    #[arg(long, value_name = "STAGE", default_value = "fragment", value_parser = parse_stage)]
    pub stage: ShaderStageArg,

    /// Write the source to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Run the naga validator over the emitted source.
    #[arg(long)]
    pub validate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStageArg {
    Fragment,
    Vertex,
}

fn parse_projection(value: &str) -> Result<Projection, String> {
    value.parse::<Projection>().map_err(|err| err.to_string())
}

fn parse_stereo(value: &str) -> Result<StereoLayout, String> {
    value.parse::<StereoLayout>().map_err(|err| err.to_string())
}

fn parse_filter(value: &str) -> Result<Filter, String> {
    value.parse::<Filter>()
}

fn parse_stage(value: &str) -> Result<ShaderStageArg, String> {
    match value.to_ascii_lowercase().as_str() {
        "fragment" | "frag" => Ok(ShaderStageArg::Fragment),
        "vertex" | "vert" => Ok(ShaderStageArg::Vertex),
        other => Err(format!("unknown stage '{other}'; expected fragment or vertex")),
    }
}

pub fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("size '{value}' is not of the form WIDTHxHEIGHT"))?;
    let width = width
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid width in '{value}'"))?;
    let height = height
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid height in '{value}'"))?;
    if width == 0 || height == 0 {
        return Err(format!("size '{value}' must be at least 1x1"));
    }
    Ok((width, height))
}

pub fn parse_fade(value: &str) -> Result<RadialFade, String> {
    let (inner, outer) = value
        .split_once(':')
        .ok_or_else(|| format!("fade '{value}' is not of the form INNER:OUTER"))?;
    let inner = inner
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("invalid inner fade bound in '{value}'"))?;
    let outer = outer
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("invalid outer fade bound in '{value}'"))?;
    if !(0.0..=1.0).contains(&inner) || !(0.0..=1.0).contains(&outer) || outer < inner {
        return Err(format!(
            "fade '{value}' must satisfy 0 <= inner <= outer <= 1"
        ));
    }
    Ok(RadialFade::new(inner, outer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_parse_and_reject_garbage() {
        assert_eq!(parse_size("1920x1080").unwrap(), (1920, 1080));
        assert_eq!(parse_size("64X64").unwrap(), (64, 64));
        assert!(parse_size("1920").is_err());
        assert!(parse_size("0x10").is_err());
        assert!(parse_size("axb").is_err());
    }

    #[test]
    fn fades_parse_and_enforce_ordering() {
        assert_eq!(parse_fade("0.8:1.0").unwrap(), RadialFade::new(0.8, 1.0));
        assert!(parse_fade("1.0:0.5").is_err());
        assert!(parse_fade("0.5").is_err());
        assert!(parse_fade("-0.1:0.5").is_err());
    }

    #[test]
    fn convert_command_parses_a_full_invocation() {
        let cli = Cli::parse_from([
            "remap360",
            "convert",
            "--input",
            "in.png",
            "--output",
            "out.png",
            "--from",
            "equirectangular",
            "--to",
            "fisheye",
            "--yaw",
            "-90",
            "--size",
            "512x512",
            "--stereo",
            "over-under",
        ]);
        let Command::Convert(args) = cli.command else {
            panic!("expected convert command");
        };
        assert_eq!(args.source, Projection::Equirectangular);
        assert_eq!(args.target, Projection::Fisheye);
        assert_eq!(args.yaw, -90.0);
        assert_eq!(args.size, Some((512, 512)));
        assert_eq!(args.stereo, StereoLayout::OverUnder);
    }
}
