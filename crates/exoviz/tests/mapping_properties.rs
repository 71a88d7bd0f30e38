use exoviz::mapping::units::compress_orbital_distance;
use exoviz::{temperature_to_planet_color, temperature_to_star_color, PlanetClimate, StarClass, VisualTuning};

const STAR_THRESHOLDS: [f64; 5] = [3500.0, 5000.0, 6000.0, 7500.0, 10000.0];
const PLANET_THRESHOLDS: [f64; 7] = [100.0, 200.0, 400.0, 700.0, 1000.0, 1500.0, 2000.0];

fn sweep() -> impl Iterator<Item = f64> {
    (-100..=4000).map(|i| i as f64 * 5.0)
}

#[test]
fn star_buckets_are_total_and_ordered() {
    let mut previous = StarClass::classify(f64::MIN);
    for k in sweep() {
        let class = StarClass::classify(k);
        assert!(class >= previous, "bucket order broke at {k} K");
        assert_eq!(temperature_to_star_color(k), class.color());
        assert_eq!(temperature_to_star_color(k), temperature_to_star_color(k));
        previous = class;
    }
    assert_eq!(StarClass::classify(f64::MAX), StarClass::Blue);
}

#[test]
fn star_boundaries_belong_to_the_upper_bucket() {
    for t in STAR_THRESHOLDS {
        let below = StarClass::classify(t - 0.001);
        let at = StarClass::classify(t);
        let above = StarClass::classify(t + 0.001);
        assert_ne!(below, at, "no boundary at {t} K");
        assert_eq!(at, above, "{t} K should open its bucket");
    }
}

#[test]
fn planet_buckets_are_total_and_ordered() {
    let mut previous = PlanetClimate::classify(f64::MIN);
    for k in sweep() {
        let climate = PlanetClimate::classify(k);
        assert!(climate >= previous, "bucket order broke at {k} K");
        assert_eq!(temperature_to_planet_color(k), temperature_to_planet_color(k));
        previous = climate;
    }
    assert_eq!(PlanetClimate::classify(-5.0), PlanetClimate::Frozen);
    assert_eq!(PlanetClimate::classify(1e9), PlanetClimate::Molten);
}

#[test]
fn planet_boundaries_belong_to_the_upper_bucket() {
    for t in PLANET_THRESHOLDS {
        let below = PlanetClimate::classify(t - 0.001);
        let at = PlanetClimate::classify(t);
        assert_ne!(below, at, "no boundary at {t} K");
        assert_eq!(at, PlanetClimate::classify(t + 0.001));
    }
}

#[test]
fn orbital_distance_never_inverts_order() {
    let tuning = VisualTuning::default();
    let mut previous = compress_orbital_distance(0.0, &tuning);
    for i in 1..=5000 {
        let r = i as f64 * 0.01;
        let d = compress_orbital_distance(r, &tuning);
        assert!(d >= previous, "distance decreased at r = {r}");
        previous = d;
    }
}

#[test]
fn far_orbits_are_compressed() {
    let tuning = VisualTuning::default();
    let near = compress_orbital_distance(1.0, &tuning);
    let far = compress_orbital_distance(50.0, &tuning);
    assert!(far > near);
    assert!(far < 50.0 * tuning.distance_linear_scale / 2.0);
}
