use std::error::Error;

use flight_emissions::*;

fn abs_difference<T: std::ops::Sub<Output = T> + PartialOrd>(x: T, y: T) -> T {
    if x < y {
        y - x
    } else {
        x - y
    }
}

fn request(
    segments: &[(&str, &str)],
    cabin: &str,
    pax: i64,
    roundtrip: bool,
) -> ItineraryRequest {
    ItineraryRequest {
        segments: segments
            .iter()
            .map(|(from, to)| Segment::new(*from, *to))
            .collect(),
        cabin: cabin.to_string(),
        pax,
        roundtrip,
    }
}

/// Verifies the reference example: SOF -> VAR, economy, 1 passenger, one way
/// is a short-haul flight whose emissions follow the short-haul polynomial at `gcd + 50`.
#[test]
fn acceptance_sof_var() -> Result<(), Box<dyn Error>> {
    let airports = load_airports("src/airports.json")?;
    let result = calculate_itinerary(
        &request(&[("SOF", "VAR")], "economy", 1, false),
        &airports,
        &Assumptions::default(),
    )?;

    assert!(result.ok);
    assert!(result.warnings.is_empty());
    assert_eq!(result.legs.len(), 1);

    let gcd = result.great_circle_km;
    assert!(gcd > 365.0 && gcd < 375.0, "{gcd}");
    assert_eq!(result.legs[0].haul, Haul::Short);
    assert_eq!(result.distance_km_used, gcd + 50.0);

    let x = gcd + 50.0;
    let fuel = 3.87871e-5 * x * x + 2.9866 * x + 1263.42;
    let expected = (fuel * 3.15 * 2.0 + fuel * 0.51) * (1.0 - 0.049) / (158.44 * 0.77) * 0.96;

    let accepted_error = 1e-9;
    assert!(abs_difference(result.co2_kg_total, expected) / expected < accepted_error);
    assert_eq!(result.per_pax_kg, result.co2_kg_total);
    assert_eq!(result.co2_t_total, result.co2_kg_total / 1000.0);
    Ok(())
}

/// An economy return flight BER <-> BRU emits a few hundred kg of CO2e per passenger
#[test]
fn acceptance_ber_bru_magnitude() -> Result<(), Box<dyn Error>> {
    let airports = load_airports("src/airports.json")?;
    let result = calculate_itinerary(
        &request(&[("BER", "BRU")], "economy", 1, true),
        &airports,
        &Assumptions::default(),
    )?;
    let co2 = result.co2_kg_total;
    assert!(co2 > 150.0 && co2 < 500.0, "{co2}");
    Ok(())
}

#[test]
fn roundtrip_is_twice_one_way() -> Result<(), Box<dyn Error>> {
    let airports = load_airports("src/airports.json")?;
    let assumptions = Assumptions::default();
    for (from, to) in [("SOF", "VAR"), ("LHR", "SOF"), ("LHR", "JFK"), ("SYD", "DXB")] {
        let one_way = request(&[(from, to)], "business", 3, false);
        let one_way = calculate_itinerary(&one_way, &airports, &assumptions)?;
        let roundtrip = request(&[(from, to)], "business", 3, true);
        let roundtrip = calculate_itinerary(&roundtrip, &airports, &assumptions)?;

        assert_eq!(roundtrip.legs.len(), 2);
        assert_eq!(roundtrip.legs[1].from, to);
        assert_eq!(roundtrip.legs[1].to, from);
        let expected = 2.0 * one_way.co2_kg_total;
        assert!(abs_difference(roundtrip.co2_kg_total, expected) / expected < 1e-12);
        let gcd = roundtrip.great_circle_km;
        assert!(abs_difference(gcd, 2.0 * one_way.great_circle_km) < 1e-9);
    }
    Ok(())
}

#[test]
fn regimes() -> Result<(), Box<dyn Error>> {
    let airports = load_airports("src/airports.json")?;
    let result = calculate_itinerary(
        &request(&[("MAD", "LHR"), ("LHR", "SOF"), ("SOF", "DXB")], "first", 1, false),
        &airports,
        &Assumptions::default(),
    )?;
    let hauls = result.legs.iter().map(|leg| leg.haul).collect::<Vec<_>>();
    assert_eq!(hauls, vec![Haul::Short, Haul::Transition, Haul::Long]);

    let transition = &result.legs[1];
    let correction = transition.distance_correction_km;
    assert!(correction > 50.0 && correction < 125.0);
    let w = transition.per_passenger.by_cabin_kg;
    assert!(w.economy < w.business && w.business < w.first);

    let sum = result.legs.iter().map(|leg| leg.co2e_kg()).sum::<f64>();
    assert_eq!(result.co2_kg_total, sum);
    Ok(())
}

#[test]
fn unknown_airport_is_skipped() -> Result<(), Box<dyn Error>> {
    let airports = load_airports("src/airports.json")?;
    let assumptions = Assumptions::default();
    let result = calculate_itinerary(
        &request(&[("ZZZ", "VAR"), ("SOF", "VAR")], "economy", 1, false),
        &airports,
        &assumptions,
    )?;
    let only_sof_var = calculate_itinerary(
        &request(&[("SOF", "VAR")], "economy", 1, false),
        &airports,
        &assumptions,
    )?;

    assert!(result.ok);
    assert!(result.is_usable());
    assert_eq!(result.warnings, vec!["unknown IATA: ZZZ".to_string()]);
    assert_eq!(result.legs.len(), 1);
    assert_eq!(result.co2_kg_total, only_sof_var.co2_kg_total);
    assert_eq!(result.great_circle_km, only_sof_var.great_circle_km);
    Ok(())
}

/// When every leg fails the result is still `ok` with zero totals; it is flagged
/// through its warnings and [`ItineraryResult::is_usable`].
#[test]
fn all_legs_fail() -> Result<(), Box<dyn Error>> {
    let airports = load_airports("src/airports.json")?;
    let result = calculate_itinerary(
        &request(&[("ZZZ", "YYY")], "economy", 2, true),
        &airports,
        &Assumptions::default(),
    )?;

    assert!(result.ok);
    assert!(!result.is_usable());
    assert_eq!(result.co2_kg_total, 0.0);
    assert_eq!(result.per_pax_kg, 0.0);
    assert_eq!(
        result.warnings,
        vec![
            "unknown IATA: ZZZ".to_string(),
            "unknown IATA: YYY".to_string(),
            "unknown IATA: YYY".to_string(),
            "unknown IATA: ZZZ".to_string(),
            NO_LEG_WARNING.to_string(),
        ]
    );
    Ok(())
}

#[test]
fn no_valid_segment() -> Result<(), Box<dyn Error>> {
    let airports = load_airports("src/airports.json")?;
    let result = calculate_itinerary(
        &request(&[("", ""), ("SOF", "")], "economy", 1, false),
        &airports,
        &Assumptions::default(),
    );
    assert_eq!(result, Err(flight_emissions::Error::EmptyItinerary));
    assert_eq!(
        flight_emissions::Error::EmptyItinerary.to_string(),
        "no valid segment"
    );
    Ok(())
}

#[test]
fn incomplete_segment_is_skipped() -> Result<(), Box<dyn Error>> {
    let airports = load_airports("src/airports.json")?;
    let result = calculate_itinerary(
        &request(&[("SOF", ""), ("SOF", "VAR")], "economy", 1, false),
        &airports,
        &Assumptions::default(),
    )?;
    assert_eq!(result.legs.len(), 1);
    assert_eq!(result.warnings, vec!["incomplete segment #1 skipped".to_string()]);
    Ok(())
}

#[test]
fn per_pax() -> Result<(), Box<dyn Error>> {
    let airports = load_airports("src/airports.json")?;
    let assumptions = Assumptions::default();
    let single = request(&[("CDG", "ATH")], "business", 1, true);
    let single = calculate_itinerary(&single, &airports, &assumptions)?;
    for pax in [-1, 0, 1, 2, 7] {
        let result = request(&[("CDG", "ATH")], "business", pax, true);
        let result = calculate_itinerary(&result, &airports, &assumptions)?;
        assert_eq!(result.per_pax_kg, result.co2_kg_total / pax.max(1) as f64);
        assert!(abs_difference(result.per_pax_kg, single.per_pax_kg) < 1e-9);
        assert!(result
            .legs
            .iter()
            .all(|leg| leg.allocation.pax_count == pax.max(1) as u32));
    }
    Ok(())
}

#[test]
fn unknown_cabin() -> Result<(), Box<dyn Error>> {
    let airports = load_airports("src/airports.json")?;
    let assumptions = Assumptions::default();
    let premium = request(&[("FRA", "CPH")], "Premium", 1, true);
    let premium = calculate_itinerary(&premium, &airports, &assumptions)?;
    let economy = request(&[("FRA", "CPH")], "ECONOMY", 1, true);
    let economy = calculate_itinerary(&economy, &airports, &assumptions)?;

    assert_eq!(premium.co2_kg_total, economy.co2_kg_total);
    assert!(economy.warnings.is_empty());
    // once per leg
    assert_eq!(premium.warnings.len(), 2);
    assert!(premium.warnings[0].starts_with("unknown cabin: premium"));
    Ok(())
}

#[test]
fn empty_cabin() -> Result<(), Box<dyn Error>> {
    let airports = load_airports("src/airports.json")?;
    let result = calculate_itinerary(
        &request(&[("SOF", "VAR")], "", 1, false),
        &airports,
        &Assumptions::default(),
    )?;
    assert!(result.warnings.is_empty());
    assert_eq!(result.legs[0].allocation.cabin, "economy");
    Ok(())
}

#[test]
fn overrides() -> Result<(), Box<dyn Error>> {
    let airports = load_airports("src/airports.json")?;
    let baseline = Assumptions::default();
    let no_uplift = baseline.with_override(&AssumptionsOverride {
        include_non_co2: Some(false),
        ..Default::default()
    });
    let request = request(&[("LHR", "JFK")], "economy", 1, false);

    let with = calculate_itinerary(&request, &airports, &baseline)?;
    let without = calculate_itinerary(&request, &airports, &no_uplift)?;

    assert!(without.co2_kg_total < with.co2_kg_total);
    assert_eq!(without.legs[0].aircraft.non_co2_multiplier_used, 1.0);
    assert_eq!(without.legs[0].fuel_kg, with.legs[0].fuel_kg);
    assert!(!without.assumptions_used.include_non_co2);
    // (3.15 * 2 + 0.51) / (3.15 + 0.51)
    let ratio = with.co2_kg_total / without.co2_kg_total;
    assert!(abs_difference(ratio, 6.81 / 3.66) < 1e-9);
    Ok(())
}

#[test]
fn output_contract() -> Result<(), Box<dyn Error>> {
    let airports = load_airports("src/airports.json")?;
    let result = calculate_itinerary(
        &request(&[("SOF", "VAR")], "economy", 1, false),
        &airports,
        &Assumptions::default(),
    )?;
    let json = serde_json::to_value(&result)?;
    for key in [
        "ok",
        "co2_kg_total",
        "co2_t_total",
        "distance_km_used",
        "great_circle_km",
        "per_pax_kg",
        "legs",
        "assumptions_used",
        "warnings",
    ] {
        assert!(json.get(key).is_some(), "{key}");
    }
    let leg = &json["legs"][0];
    assert_eq!(leg["from"], "SOF");
    assert_eq!(leg["haul"], "short");
    assert!(leg["aircraft"]["combustion_with_uplift_kg"].is_f64());
    assert!(leg["per_passenger"]["by_cabin_kg"]["business"].is_f64());
    assert_eq!(leg["allocation"]["cabin"], "economy");
    assert_eq!(json["assumptions_used"]["plf"], 0.77);
    Ok(())
}

#[test]
fn cost() -> Result<(), Box<dyn Error>> {
    let airports = load_airports("src/airports.json")?;
    let result = calculate_itinerary(
        &request(&[("LHR", "JFK")], "first", 2, true),
        &airports,
        &Assumptions::default(),
    )?;
    let price = fallback_carbon_price();
    assert_eq!(price.claim, 73.75);
    assert_eq!(emissions_cost_eur(&result, &price), result.co2_t_total * 73.75);
    Ok(())
}
