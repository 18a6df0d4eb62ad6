use std::error::Error;

use clap::{Parser, Subcommand};
use itertools::Itertools;
use num_format::{Locale, ToFormattedString};
use simple_logger::SimpleLogger;
use tinytemplate::TinyTemplate;

use flight_emissions::*;

static TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/bin/co2_template.md"
));
static TEMPLATE_NAME: &'static str = "t";

const ABOUT: &'static str = r#"Estimates the emissions (CO2e) of an air itinerary, in total and per passenger, and
what they cost at a given carbon price. The emissions of each leg follow the fuel burn
of an average aircraft, split between its passengers according to their cabin class.
"#;

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
enum Format {
    Json,
    Markdown,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Computes the emissions of an itinerary
    Itinerary {
        /// A segment in format `FROM-TO` (IATA codes, e.g. `SOF-VAR`), in flight order
        #[arg(short, long = "segment", value_parser = parse_segment, required = true)]
        segments: Vec<Segment>,
        /// The cabin class: economy, business or first
        #[arg(short, long, default_value = "economy")]
        cabin: String,
        /// The number of passengers
        #[arg(short, long, default_value = "1")]
        pax: String,
        /// Whether the itinerary is flown back
        #[arg(short, long)]
        roundtrip: bool,
        /// A JSON file overriding some of the assumptions of the model
        #[arg(long)]
        assumptions: Option<String>,
        /// The carbon price in EUR per metric ton. Defaults to the last known price.
        #[arg(long)]
        carbon_price: Option<f64>,
        #[arg(short, long, value_enum, default_value_t = Format::Markdown)]
        format: Format,
    },
    /// Lists airports whose IATA code, city or name match a query
    Search {
        query: String,
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
}

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// The airports, as JSON or CSV
    #[arg(short, long, default_value = "src/airports.json")]
    airports: String,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

fn parse_segment(arg: &str) -> Result<Segment, String> {
    let (from, to) = arg
        .split_once('-')
        .ok_or_else(|| format!("{arg} is not in format `FROM-TO`"))?;
    Ok(Segment::new(from.trim(), to.trim()))
}

#[derive(::serde::Serialize)]
struct LegContext {
    from: String,
    to: String,
    haul: String,
    gcd_km: String,
    fuel_kg: String,
    co2e_kg: String,
}

#[derive(::serde::Serialize)]
struct Context {
    route: String,
    cabin: String,
    pax: u32,
    co2_kg: String,
    co2_t: String,
    distance_km: String,
    great_circle_km: String,
    per_pax_kg: String,
    legs: Vec<LegContext>,
    carbon_price: CarbonPrice,
    cost_eur: String,
    warnings: Vec<String>,
}

#[derive(::serde::Serialize)]
struct Output<'a> {
    result: &'a ItineraryResult,
    carbon_price: &'a CarbonPrice,
    cost_eur: f64,
}

fn kg(value: f64) -> String {
    (value.round() as u64).to_formatted_string(&Locale::en)
}

fn render(
    request: &ItineraryRequest,
    result: &ItineraryResult,
    carbon_price: CarbonPrice,
) -> Result<String, Box<dyn Error>> {
    let pax = clamp_pax(request.pax);
    let context = Context {
        route: result
            .legs
            .iter()
            .map(|leg| format!("{} → {}", leg.from, leg.to))
            .join(", "),
        cabin: result
            .legs
            .first()
            .map(|leg| leg.allocation.cabin.clone())
            .unwrap_or_default(),
        pax,
        co2_kg: kg(result.co2_kg_total),
        co2_t: format!("{:.3}", result.co2_t_total),
        distance_km: format!("{:.1}", result.distance_km_used),
        great_circle_km: format!("{:.1}", result.great_circle_km),
        per_pax_kg: format!("{:.2}", result.per_pax_kg),
        legs: result
            .legs
            .iter()
            .map(|leg| LegContext {
                from: leg.from.clone(),
                to: leg.to.clone(),
                haul: format!("{:?}", leg.haul).to_lowercase(),
                gcd_km: format!("{:.1}", leg.gcd_km),
                fuel_kg: kg(leg.fuel_kg),
                co2e_kg: format!("{:.2}", leg.co2e_kg()),
            })
            .collect(),
        cost_eur: format!("{:.2}", emissions_cost_eur(result, &carbon_price)),
        carbon_price,
        warnings: result.warnings.clone(),
    };

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(TEMPLATE_NAME, TEMPLATE)?;

    Ok(tt.render(TEMPLATE_NAME, &context)?)
}

#[allow(clippy::too_many_arguments)]
fn itinerary(
    airports: &Airports,
    segments: Vec<Segment>,
    cabin: String,
    pax: &str,
    roundtrip: bool,
    assumptions: Option<String>,
    carbon_price: Option<f64>,
    format: Format,
) -> Result<(), Box<dyn Error>> {
    let assumptions = assumptions
        .map(|path| load_assumptions(&path))
        .transpose()?
        .unwrap_or_default();

    let request = ItineraryRequest {
        segments,
        cabin,
        pax: parse_pax(pax) as i64,
        roundtrip,
    };
    let result = calculate_itinerary(&request, airports, &assumptions)?;
    for warning in &result.warnings {
        log::warn!("{warning}");
    }
    if !result.is_usable() {
        return Err("Cannot calculate.".into());
    }

    let carbon_price = carbon_price
        .map(|claim| Fact {
            claim,
            source: "command line".to_string(),
            date: "".to_string(),
        })
        .unwrap_or_else(fallback_carbon_price);
    log::info!(
        "Carbon price: {} EUR/t ({})",
        carbon_price.claim,
        carbon_price.source
    );

    match format {
        Format::Json => {
            let output = Output {
                result: &result,
                carbon_price: &carbon_price,
                cost_eur: emissions_cost_eur(&result, &carbon_price),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Markdown => println!("{}", render(&request, &result, carbon_price)?),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init()?;

    let airports = load_airports(&cli.airports)?;

    match cli.command {
        Command::Itinerary {
            segments,
            cabin,
            pax,
            roundtrip,
            assumptions,
            carbon_price,
            format,
        } => itinerary(
            &airports,
            segments,
            cabin,
            &pax,
            roundtrip,
            assumptions,
            carbon_price,
            format,
        ),
        Command::Search { query, limit } => {
            for airport in search(&query, &airports, limit) {
                println!(
                    "{} — {}, {} · {}",
                    airport.iata, airport.city, airport.country, airport.name
                );
            }
            Ok(())
        }
    }
}
