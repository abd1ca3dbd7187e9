mod codec;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use spatializer_core::{
    AmplitudeDomain, AppConfig, EffectEngine, EffectParameters, Pattern, RoundingPolicy,
};
use tracing_subscriber::EnvFilter;

fn main() -> spatializer_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => run_convert(args),
        Commands::Patterns => {
            for pattern in Pattern::ALL {
                println!("{pattern}");
            }
            Ok(())
        }
    }
}

fn run_convert(args: ConvertArgs) -> spatializer_core::Result<()> {
    let config = args.apply_to(settings::load(args.config.as_deref())?);
    let params = config.effect_parameters();
    if !params.is_in_ui_range() {
        tracing::warn!(
            speed = params.speed,
            min = EffectParameters::MIN_SPEED,
            max = EffectParameters::MAX_SPEED,
            "speed outside the usual range"
        );
    }

    tracing::info!(
        input = ?args.input,
        output = ?args.output,
        pattern = %params.pattern,
        "converting"
    );

    let buffer = codec::decode_file(&args.input)?.into_buffer(config.working_domain)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let engine = EffectEngine::with_config(config.engine);
    let rendered = engine.render(&buffer, &params, &mut rng)?;
    if rendered.clipped_samples > 0 {
        tracing::info!(clipped = rendered.clipped_samples, "output was saturated");
    }

    codec::write_wav(&args.output, &rendered.buffer)?;
    tracing::info!(
        pattern = %rendered.pattern,
        seconds = rendered.buffer.duration_seconds(),
        output = %args.output.display(),
        "audio converted"
    );
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert audio into animated 3D/8D stereo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply a spatial pattern to an audio file and save the result as WAV.
    Convert(ConvertArgs),
    /// List the available pattern names.
    Patterns,
}

#[derive(clap::Args, Debug)]
struct ConvertArgs {
    /// Source audio file (WAV or MP3).
    input: PathBuf,
    /// Destination WAV file.
    output: PathBuf,
    /// Pattern name, e.g. "Circular" or "Echo Effect". Unknown names use Circular.
    #[arg(short, long)]
    pattern: Option<String>,
    /// Modulation speed in cycles per second (usually 0.01 to 1.5).
    #[arg(short, long)]
    speed: Option<f64>,
    /// Seed for the random patterns, for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Amplitude domain used while processing.
    #[arg(long, value_enum)]
    domain: Option<DomainArg>,
    /// How fractional samples become integers.
    #[arg(long, value_enum)]
    rounding: Option<RoundingArg>,
    /// JSON settings file; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ConvertArgs {
    fn apply_to(&self, mut config: AppConfig) -> AppConfig {
        if let Some(pattern) = &self.pattern {
            config.pattern = pattern.clone();
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(domain) = self.domain {
            config.working_domain = domain.into();
        }
        if let Some(rounding) = self.rounding {
            config.engine.rounding = rounding.into();
        }
        config
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DomainArg {
    Raw,
    Normalized,
}

impl From<DomainArg> for AmplitudeDomain {
    fn from(value: DomainArg) -> Self {
        match value {
            DomainArg::Raw => AmplitudeDomain::RawInteger,
            DomainArg::Normalized => AmplitudeDomain::Normalized,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RoundingArg {
    TowardZero,
    NearestEven,
}

impl From<RoundingArg> for RoundingPolicy {
    fn from(value: RoundingArg) -> Self {
        match value {
            RoundingArg::TowardZero => RoundingPolicy::TowardZero,
            RoundingArg::NearestEven => RoundingPolicy::NearestEven,
        }
    }
}
