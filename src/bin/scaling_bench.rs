use clap::{Parser, Subcommand, ValueEnum};
use scaling_bench::harness::{BenchConfig, Profile};
use scaling_bench::schema::{RunMeta, ScalingBenchReport};
use scaling_bench::{workloads, Notice, ReportBuilder, ReportConfig, Session, WorkloadFamily};
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileArg {
    Quick,
    Full,
}

impl From<ProfileArg> for Profile {
    fn from(v: ProfileArg) -> Self {
        match v {
            ProfileArg::Quick => Profile::Quick,
            ProfileArg::Full => Profile::Full,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count occurrences of each word: per-unique-word scan vs hash map.
    Count,

    /// Words of one list present in another: linear scan vs hash set vs intersections.
    Within,

    /// Cumulative sum: re-summed prefixes vs a single accumulator.
    Cumsum,

    /// Simple moving average (window 20): re-summed windows vs running sum.
    MovingAverage,

    /// Run every workload family in one session.
    Suite {
        /// Restrict the suite to one family.
        #[arg(long, value_enum, default_value_t = WorkloadFamily::All)]
        family: WorkloadFamily,
    },
}

impl Command {
    fn family(&self) -> WorkloadFamily {
        match self {
            Command::Count => WorkloadFamily::Count,
            Command::Within => WorkloadFamily::Within,
            Command::Cumsum => WorkloadFamily::Cumsum,
            Command::MovingAverage => WorkloadFamily::MovingAverage,
            Command::Suite { family } => *family,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "scaling-bench")]
#[command(about = "Time workload variants at growing input sizes and compare how they scale")]
struct Args {
    #[arg(long, value_enum, default_value_t = ProfileArg::Quick, global = true)]
    profile: ProfileArg,

    #[arg(long, default_value_t = 0, global = true)]
    seed: u64,

    /// Where to write the JSON report. If omitted, prints to stdout.
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// Directory for the log-log SVG charts. If omitted, no charts are written.
    #[arg(long, value_name = "DIR", global = true)]
    chart_dir: Option<PathBuf>,

    /// Suppress the per-sample progress notice and console tables.
    #[arg(long, default_value_t = false, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

fn now_utc_rfc3339() -> String {
    // Avoid adding chrono dependency; this is "good enough" for reports.
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("unix:{secs}")
}

fn git_sha_short() -> Option<String> {
    // Best-effort: read from environment set by CI/build scripts.
    std::env::var("GIT_SHA")
        .ok()
        .or_else(|| std::env::var("GITHUB_SHA").ok())
        .map(|s| s.chars().take(12).collect())
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let cfg = BenchConfig {
        profile: args.profile.into(),
        seed: args.seed,
    };
    let family = args.cmd.family();

    let builder = ReportBuilder::new(ReportConfig {
        chart_dir: args.chart_dir.clone(),
        print_table: !args.quiet,
    });
    let notice = if args.quiet { Notice::Quiet } else { Notice::Verbose };

    tracing::info!(?family, profile = cfg.profile.as_str(), seed = cfg.seed, "starting session");
    let ((), summary) = Session::begin(builder)
        .with_notice(notice)
        .run(|rec| {
            workloads::run(&cfg, family, rec);
            Ok::<_, io::Error>(())
        })?;

    let report = ScalingBenchReport {
        run: RunMeta {
            schema_version: 1,
            bench_version: env!("CARGO_PKG_VERSION").to_string(),
            profile: cfg.profile.as_str().to_string(),
            seed: cfg.seed,
            timestamp_utc: now_utc_rfc3339(),
            git_sha: git_sha_short(),
        },
        samples: summary.samples,
    };

    let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;
    if let Some(out) = args.out {
        fs::write(out, json)?;
    } else {
        println!("{json}");
    }

    Ok(())
}
