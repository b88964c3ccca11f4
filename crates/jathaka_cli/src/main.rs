use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use jathaka_rs::{
    BirthData, Chart, CivilDateTime, CivilTimeNormalizer, ConfigError, Gazetteer, GeoLocation,
    Geocoder, Instant, Jathaka, JathakaConfig, JathakaError, Occupant, SouthIndianGrid,
    UtcOffset, ZoneTableNormalizer, compatibility, current_periods, south_indian_grid,
};
use jathaka_time::{TimeError, jd_to_calendar};
use jathaka_vedic_base::{
    AyanamshaModel, AyanamshaSystem, DashaTimeline, PeriodSpan, deg_to_dms,
    nakshatra_from_longitude, rashi_from_longitude, vaar_at,
};
use log::{LevelFilter, warn};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "jathaka", about = "Vedic birth chart, dasha and porutham calculator")]
struct Cli {
    /// JSON configuration file (else $JATHAKA_CONFIG, else defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra places for the gazetteer (JSON array)
    #[arg(long, global = true)]
    places: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct LocationArgs {
    /// Place name, resolved with the gazetteer
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    place: Option<String>,
    /// Latitude in degrees (north positive)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Longitude in degrees (east positive)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,
}

#[derive(Args, Clone)]
struct BirthArgs {
    /// Local birth date and time (YYYY-MM-DD HH:MM[:SS])
    #[arg(long)]
    date: String,
    #[command(flatten)]
    location: LocationArgs,
    /// UTC offset (+05:30) or zone name; defaults to the place's zone,
    /// required with --lat/--lon
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Birth chart: grahas, lagna, sign grid and dasha balance
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Vimshottari dasha timeline and the periods running at a given time
    Dasha {
        #[command(flatten)]
        birth: BirthArgs,
        /// Query time in UTC (YYYY-MM-DD HH:MM); defaults to now
        #[arg(long)]
        at: Option<String>,
        /// List the bhuktis of every dasha
        #[arg(long)]
        bhuktis: bool,
    },
    /// Ten-rule porutham between two births, each "YYYY-MM-DD HH:MM@Place"
    Porutham {
        /// Bride's birth
        first: String,
        /// Groom's birth
        second: String,
    },
    /// Positions of all grahas at a given time
    Transits {
        #[command(flatten)]
        location: LocationArgs,
        /// Time in UTC (YYYY-MM-DD HH:MM); defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// Rashi from sidereal longitude
    Rashi {
        /// Sidereal ecliptic longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
    /// Nakshatra and pada from sidereal longitude
    Nakshatra {
        /// Sidereal ecliptic longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
    /// Convert degrees to DMS
    Dms {
        /// Angle in decimal degrees
        #[arg(allow_hyphen_values = true)]
        deg: f64,
    },
    /// Julian Day of a civil date and time
    Jd {
        /// Date and time (YYYY-MM-DD HH:MM[:SS])
        datetime: String,
        /// UTC offset of `datetime`
        #[arg(long, default_value = "+00:00", allow_hyphen_values = true)]
        offset: String,
    },
    /// Ayanamsha value at a Julian Day
    Ayanamsha {
        /// Julian Day (UT)
        jd: f64,
        /// Lahiri, KP, Raman, FaganBradley or Yukteshwar; defaults to the configured model
        #[arg(long)]
        system: Option<String>,
    },
}

#[derive(Serialize)]
struct DashaOutput<'a> {
    timeline: &'a DashaTimeline,
    current: Option<jathaka_rs::CurrentPeriods>,
}

#[derive(Serialize)]
struct JdOutput {
    jd: f64,
    weekday: jathaka_rs::Vaar,
}

#[derive(Serialize)]
struct AyanamshaOutput {
    jd: f64,
    degrees: f64,
    dms: jathaka_rs::Dms,
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbose {
        0 if std::env::var_os("RUST_LOG").is_none() => {
            builder.filter_level(LevelFilter::Warn);
        }
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        _ => {
            builder.filter_level(LevelFilter::Debug);
        }
    }
    let _ = builder.try_init();
}

fn config_path(cli: &Cli) -> Option<PathBuf> {
    cli.config
        .clone()
        .or_else(|| std::env::var_os("JATHAKA_CONFIG").map(PathBuf::from))
}

fn load_config(path: Option<&Path>) -> Result<JathakaConfig, JathakaError> {
    match path {
        Some(p) => Ok(JathakaConfig::load(p)?),
        None => Ok(JathakaConfig::default()),
    }
}

fn load_gazetteer(path: Option<&Path>) -> Result<Gazetteer, JathakaError> {
    let mut g = Gazetteer::builtin();
    if let Some(p) = path {
        let text = std::fs::read_to_string(p).map_err(ConfigError::from)?;
        g.merge(Gazetteer::from_json_str(&text)?);
    }
    Ok(g)
}

/// `(location, timezone, approximated)` for the given location flags.
///
/// Bare coordinates carry no timezone.
fn resolve_location<G: Geocoder>(
    engine: &Jathaka,
    places: &G,
    args: &LocationArgs,
) -> (GeoLocation, Option<String>, bool) {
    match (&args.place, args.lat, args.lon) {
        (Some(name), _, _) => {
            let r = engine.resolve_place(places, name);
            (r.place.location, Some(r.place.timezone), r.approximated)
        }
        (None, Some(lat), Some(lon)) => (GeoLocation::new(lat, lon), None, false),
        _ => {
            let p = engine.fallback_place();
            warn!("no place given; using {}", p.name);
            (p.location, Some(p.timezone.clone()), true)
        }
    }
}

fn birth_data<G: Geocoder>(
    engine: &Jathaka,
    places: &G,
    args: &BirthArgs,
) -> Result<BirthData, JathakaError> {
    let civil: CivilDateTime = args.date.parse()?;
    let (location, zone, approximated) = resolve_location(engine, places, &args.location);
    let zone = args
        .offset
        .as_deref()
        .or(zone.as_deref())
        .ok_or_else(|| TimeError::InvalidOffset("--lat/--lon need an explicit --offset".into()))?;
    let offset = ZoneTableNormalizer.utc_offset(zone, &civil)?;
    Ok(BirthData {
        civil,
        offset,
        location,
        approximated_location: approximated,
    })
}

/// Parse `YYYY-MM-DD HH:MM@Place`.
fn person_birth<G: Geocoder>(
    engine: &Jathaka,
    places: &G,
    spec: &str,
) -> Result<BirthData, JathakaError> {
    let (date, place) = spec.split_once('@').unwrap_or((spec, ""));
    let args = BirthArgs {
        date: date.trim().to_string(),
        location: LocationArgs {
            place: Some(place.trim().to_string()),
            lat: None,
            lon: None,
        },
        offset: None,
    };
    birth_data(engine, places, &args)
}

/// UTC query time, or now.
fn query_instant(at: Option<&str>) -> Result<Instant, JathakaError> {
    match at {
        Some(s) => {
            let civil: CivilDateTime = s.parse()?;
            Ok(Instant::from_civil(&civil, UtcOffset::UTC)?)
        }
        None => Ok(Instant::now()),
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn date_string(jd: f64) -> String {
    let (y, m, d) = jd_to_calendar(jd);
    format!("{y:04}-{m:02}-{:02}", d.floor() as u32)
}

fn cell_text(occupants: &[Occupant]) -> String {
    occupants
        .iter()
        .map(|o| o.label())
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_grid(grid: &SouthIndianGrid) {
    let rule = "+".to_string() + &"-".repeat(14) + "+";
    let line = rule.repeat(4).replace("++", "+");
    println!("{line}");
    for row in grid {
        let mut names = String::from("|");
        let mut contents = String::from("|");
        for cell in row {
            match cell {
                Some(c) => {
                    names.push_str(&format!(" {:<12} |", c.rashi.name()));
                    contents.push_str(&format!(" {:<12} |", cell_text(&c.occupants)));
                }
                None => {
                    names.push_str(&format!(" {:<12} |", ""));
                    contents.push_str(&format!(" {:<12} |", ""));
                }
            }
        }
        println!("{names}");
        println!("{contents}");
        println!("{line}");
    }
}

fn print_chart(chart: &Chart) {
    let b = &chart.birth;
    println!("Birth:      {} {} (JD {:.6})", b.civil, b.offset, chart.instant.jd());
    println!(
        "Location:   {:.4}, {:.4}{}",
        b.location.latitude_deg,
        b.location.longitude_deg,
        if chart.approximated_location {
            "  [approximated]"
        } else {
            ""
        }
    );
    println!(
        "Weekday:    {} ({}), lord {}",
        chart.weekday.name(),
        chart.weekday.english_name(),
        chart.weekday.lord()
    );
    println!("Ayanamsha:  {} ({:.6} deg)", chart.ayanamsha_dms(), chart.ayanamsha_deg);
    let asc = &chart.ascendant;
    println!(
        "Lagna:      {} {} ({} pada {}), lord {}",
        asc.rashi(),
        deg_to_dms(asc.degree_in_sign),
        asc.nakshatra(),
        asc.pada,
        chart.lagna_lord()
    );
    println!("Midheaven:  {} {}", chart.midheaven.rashi(), deg_to_dms(chart.midheaven.degree_in_sign));
    println!();
    println!("{:<9} {:<10} {:>12}  {:<18} {}", "Graha", "Rashi", "Degree", "Nakshatra", "Pada");
    for g in &chart.grahas {
        println!(
            "{:<9} {:<10} {:>12}  {:<18} {}",
            g.graha.name(),
            g.rashi().name(),
            g.dms_in_sign().to_string(),
            g.position.nakshatra().name(),
            g.position.pada
        );
    }
    println!();
    print_grid(&south_indian_grid(chart));
    let bal = &chart.balance;
    println!(
        "Dasha balance at birth: {} {}y {}m {}d",
        bal.lord, bal.breakdown.years, bal.breakdown.months, bal.breakdown.days
    );
}

fn print_dasha(timeline: &DashaTimeline, bhuktis: bool) {
    println!("{:<9} {:<10} {:<10} {:>8}", "Dasha", "Start", "End", "Years");
    for p in &timeline.periods {
        println!(
            "{:<9} {:<10} {:<10} {:>8.3}",
            p.lord.name(),
            date_string(p.start_jd),
            date_string(p.end_jd),
            p.duration_years
        );
        if bhuktis {
            for b in &p.bhuktis {
                println!(
                    "  {:<7} {:<10} {:<10} {:>8.3}",
                    b.lord.name(),
                    date_string(b.start_jd),
                    date_string(b.end_jd),
                    b.duration_years()
                );
            }
        }
    }
}

fn run(cli: &Cli) -> Result<(), JathakaError> {
    let config = || load_config(config_path(cli).as_deref());
    let places = || load_gazetteer(cli.places.as_deref());

    match &cli.command {
        Commands::Chart { birth } => {
            let engine = Jathaka::from_config(&config()?)?;
            let birth = birth_data(&engine, &places()?, birth)?;
            let chart = engine.compute_chart(&birth)?;
            if cli.json {
                print_json(&chart);
            } else {
                print_chart(&chart);
            }
        }

        Commands::Dasha { birth, at, bhuktis } => {
            let engine = Jathaka::from_config(&config()?)?;
            let birth = birth_data(&engine, &places()?, birth)?;
            let chart = engine.compute_chart(&birth)?;
            let query = query_instant(at.as_deref())?;
            let current = current_periods(&chart, query).ok();
            if cli.json {
                print_json(&DashaOutput {
                    timeline: &chart.dasha,
                    current,
                });
                return Ok(());
            }
            let bal = &chart.balance;
            println!(
                "Moon: {} pada {}; balance {} {}y {}m {}d",
                chart.moon.nakshatra(),
                chart.moon.pada,
                bal.lord,
                bal.breakdown.years,
                bal.breakdown.months,
                bal.breakdown.days
            );
            println!();
            print_dasha(&chart.dasha, *bhuktis);
            println!();
            match current {
                Some(c) => println!(
                    "At {}: {} dasha ({:.0} days left), {} bhukti ({:.0} days left)",
                    date_string(query.jd()),
                    c.dasha_lord(),
                    c.snapshot.dasha.remaining_days,
                    c.bhukti_lord(),
                    c.snapshot.bhukti.remaining_days
                ),
                None => println!("At {}: outside the 120-year cycle", date_string(query.jd())),
            }
        }

        Commands::Porutham { first, second } => {
            let engine = Jathaka::from_config(&config()?)?;
            let places = places()?;
            let a = engine.compute_chart(&person_birth(&engine, &places, first)?)?;
            let b = engine.compute_chart(&person_birth(&engine, &places, second)?)?;
            let result = compatibility(&a, &b);
            if cli.json {
                print_json(&result);
                return Ok(());
            }
            println!(
                "First:  {} / {}",
                a.moon.nakshatra(),
                a.moon.rashi()
            );
            println!(
                "Second: {} / {}",
                b.moon.nakshatra(),
                b.moon.rashi()
            );
            println!();
            for o in &result.outcomes {
                println!("{:<14} {}", o.rule.name(), if o.pass { "pass" } else { "fail" });
            }
            println!();
            println!("Total: {}/10 ({})", result.total, result.verdict);
        }

        Commands::Transits { location, at } => {
            let engine = Jathaka::from_config(&config()?)?;
            let (loc, _, _) = resolve_location(&engine, &places()?, location);
            let instant = query_instant(at.as_deref())?;
            let t = engine.transits(instant, &loc)?;
            if cli.json {
                print_json(&t);
                return Ok(());
            }
            println!("Transits at {} (ayanamsha {})", t.instant, deg_to_dms(t.ayanamsha_deg));
            for g in &t.grahas {
                println!(
                    "{:<9} {:<10} {:>12}  {}",
                    g.graha.name(),
                    g.rashi().name(),
                    g.dms_in_sign().to_string(),
                    g.position.nakshatra().name()
                );
            }
        }

        Commands::Rashi { lon } => {
            let info = rashi_from_longitude(*lon);
            if cli.json {
                print_json(&info);
            } else {
                println!(
                    "{} ({}) - {} ({:.4} deg in rashi)",
                    info.rashi.name(),
                    info.rashi.western_name(),
                    info.dms,
                    info.degrees_in_rashi
                );
            }
        }

        Commands::Nakshatra { lon } => {
            let info = nakshatra_from_longitude(*lon);
            if cli.json {
                print_json(&info);
            } else {
                println!(
                    "{} (index {}) - Pada {} ({:.4} deg in nakshatra, {:.4} deg in pada), lord {}",
                    info.nakshatra.name(),
                    info.nakshatra_index,
                    info.pada,
                    info.degrees_in_nakshatra,
                    info.degrees_in_pada,
                    info.nakshatra.lord()
                );
            }
        }

        Commands::Dms { deg } => {
            let dms = deg_to_dms(*deg);
            if cli.json {
                print_json(&dms);
            } else {
                println!("{dms}");
            }
        }

        Commands::Jd { datetime, offset } => {
            let civil: CivilDateTime = datetime.parse()?;
            let offset: UtcOffset = offset.parse()?;
            let instant = Instant::from_civil(&civil, offset)?;
            let weekday = vaar_at(instant, offset);
            if cli.json {
                print_json(&JdOutput {
                    jd: instant.jd(),
                    weekday,
                });
            } else {
                println!("JD {:.6} ({}, {})", instant.jd(), weekday.name(), weekday.english_name());
            }
        }

        Commands::Ayanamsha { jd, system } => {
            let model = match system {
                Some(s) => AyanamshaModel::for_system(s.parse::<AyanamshaSystem>()?),
                None => config()?.ayanamsha.model()?,
            };
            let degrees = model.value_deg(*jd);
            let dms = deg_to_dms(degrees);
            if cli.json {
                print_json(&AyanamshaOutput {
                    jd: *jd,
                    degrees,
                    dms,
                });
            } else {
                println!("{dms} ({degrees:.6} deg)");
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
