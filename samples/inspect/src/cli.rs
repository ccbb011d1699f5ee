use meshfold::RenderMode;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum Shape {
    /// Axis-aligned cube made of quads
    Cube,
    /// Prism over a regular polygon, with n-gon caps
    Prism,
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,meshfold=debug,inspect=info",
        env = "INSPECT_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    /// Shapes to build and inspect
    #[arg(num_args = 1.., required = true, value_enum)]
    pub shapes: Vec<Shape>,
    /// Crease angle, in degrees; values outside [0, 180) smooth every edge
    #[arg(short, long, default_value_t = 180.0, allow_negative_numbers = true)]
    pub crease_angle: f32,
    /// Number of sides of each prism
    #[arg(short, long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(3..))]
    pub sides: u32,
    /// Edge length of each shape
    #[arg(long, default_value_t = 1.0)]
    pub size: f32,
    /// Render mode to report for each mesh
    #[arg(short, long, default_value_t = RenderMode::Smooth)]
    pub render_mode: RenderMode,
}

/// Set up pretty log output
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}
