mod config;
mod output;

use std::cmp::max;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use salat_base::{
    AsrConvention, CalculationMethod, Location, ObservedTimes, PrayerSettings, compute_month,
    compute_prayer_times, qibla, reverse_calculate,
};
use salat_time::{CalendarDate, jd_to_hijri};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

use crate::config::FileConfig;

/// Islamic prayer times, Qibla direction and Hijri dates.
#[derive(Parser, Debug)]
#[command(name = "salat", version, about, long_about = None)]
struct Cli {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct GlobalOpts {
    /// TOML file with default settings, UTC offset and elevation.
    #[arg(global = true, long)]
    config: Option<PathBuf>,

    /// Enable debug logging (at least `debug` level).
    #[arg(global = true, long, default_value_t = false)]
    debug: bool,

    /// Log level.
    #[arg(global = true, long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    /// Disable colored log output.
    #[arg(global = true, long, default_value_t = false)]
    no_colors: bool,
}

#[derive(Args, Debug, Clone)]
struct LocationArgs {
    /// Latitude in degrees, north positive
    #[arg(allow_negative_numbers = true)]
    lat: f64,
    /// Longitude in degrees, east positive
    #[arg(allow_negative_numbers = true)]
    lon: f64,
    /// Elevation in metres
    #[arg(long)]
    elevation: Option<f64>,
}

#[derive(Args, Debug, Clone, Default)]
struct SettingsArgs {
    /// Calculation method key (see `salat methods`)
    #[arg(long)]
    method: Option<CalculationMethod>,
    /// Asr convention: standard or hanafi
    #[arg(long)]
    asr: Option<AsrConvention>,
    /// Whole-day Hijri correction
    #[arg(long, allow_negative_numbers = true)]
    hijri_correction: Option<i32>,
    /// Custom Fajr angle in degrees
    #[arg(long)]
    fajr_angle: Option<f64>,
    /// Custom Isha angle in degrees
    #[arg(long, conflicts_with = "isha_interval")]
    isha_angle: Option<f64>,
    /// Fixed Isha delay after Maghrib in minutes
    #[arg(long)]
    isha_interval: Option<u32>,
}

impl SettingsArgs {
    /// Apply flags on top of file settings.
    fn merge(&self, mut base: PrayerSettings) -> PrayerSettings {
        if let Some(m) = self.method {
            base.method = m;
        }
        if let Some(a) = self.asr {
            base.asr = a;
        }
        if let Some(c) = self.hijri_correction {
            base.hijri_correction = c;
        }
        if self.fajr_angle.is_some() {
            base.fajr_angle = self.fajr_angle;
        }
        if self.isha_angle.is_some() {
            base.isha_angle = self.isha_angle;
            base.isha_interval = None;
        }
        if self.isha_interval.is_some() {
            base.isha_interval = self.isha_interval;
            base.isha_angle = None;
        }
        base
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prayer times for one day
    Times {
        #[command(flatten)]
        location: LocationArgs,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: CalendarDate,
        /// Hours east of UTC
        #[arg(long, allow_negative_numbers = true)]
        utc_offset: Option<f64>,
        #[command(flatten)]
        settings: SettingsArgs,
        /// Show seconds instead of rounding to the minute
        #[arg(long)]
        precise: bool,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Prayer times for every day of a month
    Month {
        #[command(flatten)]
        location: LocationArgs,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Hours east of UTC
        #[arg(long, allow_negative_numbers = true)]
        utc_offset: Option<f64>,
        #[command(flatten)]
        settings: SettingsArgs,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Qibla bearing from a location
    Qibla {
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert a Gregorian date to the tabular Hijri calendar
    Hijri {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: CalendarDate,
        /// Whole-day correction
        #[arg(long, allow_negative_numbers = true)]
        hijri_correction: Option<i32>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// List calculation methods
    Methods,
    /// Infer Fajr and Isha angles from an observed timetable
    Reverse {
        #[command(flatten)]
        location: LocationArgs,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: CalendarDate,
        /// Hours east of UTC
        #[arg(long, allow_negative_numbers = true)]
        utc_offset: Option<f64>,
        /// Observed Fajr (HH:MM[:SS])
        #[arg(long)]
        fajr: String,
        /// Observed Maghrib (HH:MM[:SS])
        #[arg(long)]
        maghrib: String,
        /// Observed Isha (HH:MM[:SS])
        #[arg(long)]
        isha: String,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse `HH:MM` or `HH:MM:SS` into fractional hours.
fn parse_clock(s: &str) -> Result<f64> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        bail!("invalid time '{s}', expected HH:MM or HH:MM:SS");
    }
    let mut fields = [0u32; 3];
    for (slot, part) in fields.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .with_context(|| format!("invalid time '{s}'"))?;
    }
    let [h, m, sec] = fields;
    if h > 23 || m > 59 || sec > 59 {
        bail!("invalid time '{s}', out of range");
    }
    Ok(f64::from(h) + f64::from(m) / 60.0 + f64::from(sec) / 3600.0)
}

fn init_logger(opts: &GlobalOpts) -> Result<()> {
    let level = if opts.debug {
        max(LevelFilter::Debug, opts.log_level)
    } else {
        opts.log_level
    };

    let mut builder = simplelog::ConfigBuilder::new();
    if opts.debug {
        builder.set_time_level(LevelFilter::Error);
        builder.set_time_format_rfc3339();
        builder.set_target_level(LevelFilter::Error);
        builder.set_location_level(LevelFilter::Error);
    } else {
        builder.set_time_level(LevelFilter::Off);
        builder.set_target_level(LevelFilter::Off);
        builder.set_location_level(LevelFilter::Off);
    }
    builder.set_thread_level(LevelFilter::Off);

    let colors = if opts.no_colors {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    TermLogger::init(level, builder.build(), TerminalMode::Stderr, colors)?;
    Ok(())
}

fn location(args: &LocationArgs, file: &FileConfig) -> Result<Location> {
    let elevation = args.elevation.or(file.elevation).unwrap_or(0.0);
    Ok(Location::validated(args.lat, args.lon, elevation)?)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let file = match &cli.global_opts.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    log::debug!("config: {file:?}");

    match cli.command {
        Commands::Times {
            location: loc_args,
            date,
            utc_offset,
            settings,
            precise,
            json,
        } => {
            let loc = location(&loc_args, &file)?;
            let settings = settings.merge(file.settings);
            let tz = utc_offset.or(file.utc_offset).unwrap_or(0.0);
            let result = compute_prayer_times(&loc, date, tz, &settings)
                .with_context(|| format!("computing prayer times for {date}"))?;
            if json {
                print_json(&result)?;
            } else {
                print!(
                    "{}",
                    output::render_times(&result, &loc, settings.method, precise)?
                );
            }
        }

        Commands::Month {
            location: loc_args,
            year,
            month,
            utc_offset,
            settings,
            json,
        } => {
            let loc = location(&loc_args, &file)?;
            let settings = settings.merge(file.settings);
            let tz = utc_offset.or(file.utc_offset).unwrap_or(0.0);
            let days = compute_month(&loc, year, month, tz, &settings)?;
            for (date, r) in &days {
                if let Err(e) = r {
                    log::warn!("{date}: {e}");
                }
            }
            if json {
                let ok: Vec<_> = days.iter().filter_map(|(_, r)| r.as_ref().ok()).collect();
                print_json(&ok)?;
            } else {
                print!("{}", output::render_month(&days)?);
            }
        }

        Commands::Qibla { lat, lon, json } => {
            let loc = Location::validated(lat, lon, 0.0)?;
            let q = qibla(loc.latitude_deg, loc.longitude_deg);
            if json {
                print_json(&q)?;
            } else {
                println!("{}", output::format_qibla(q));
            }
        }

        Commands::Hijri {
            date,
            hijri_correction,
            json,
        } => {
            let correction = hijri_correction.unwrap_or(file.settings.hijri_correction);
            let hijri = jd_to_hijri(date.to_jd(), correction);
            if json {
                print_json(&serde_json::json!({ "gregorian": date, "hijri": hijri }))?;
            } else {
                print!("{}", output::render_hijri(date, hijri));
            }
        }

        Commands::Methods => print!("{}", output::render_methods()?),

        Commands::Reverse {
            location: loc_args,
            date,
            utc_offset,
            fajr,
            maghrib,
            isha,
            json,
        } => {
            let loc = location(&loc_args, &file)?;
            let tz = utc_offset.or(file.utc_offset).unwrap_or(0.0);
            let observed = ObservedTimes {
                fajr: parse_clock(&fajr)?,
                maghrib: parse_clock(&maghrib)?,
                isha: parse_clock(&isha)?,
            };
            let result = reverse_calculate(&loc, date, tz, observed)?;
            if json {
                print_json(&result)?;
            } else {
                print!("{}", output::render_reverse(&result)?);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(&cli.global_opts)?;
    log::debug!("parsed arguments: {cli:?}");
    run(cli)
}
