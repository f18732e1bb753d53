use super::{Bound, Light, Zone, ZoneRule, ZoneTable};

pub const TOO_CLOSE: Zone = Zone::new("TOO CLOSE", "RED (Too Close!)", Some(Light::Red));
pub const CAUTION: Zone = Zone::new("CAUTION", "YELLOW (Caution)", Some(Light::Yellow));
pub const SAFE_DISTANCE: Zone = Zone::new("SAFE DISTANCE", "GREEN (Safe Distance)", Some(Light::Green));
pub const OUT_OF_RANGE: Zone = Zone::new("OUT OF RANGE", "No Light (Out of Range)", None);

const TRAFFIC_LIGHT_RULES: [ZoneRule; 3] = [
    ZoneRule::above_up_to(0.0, 20.0, TOO_CLOSE).captioned("0-20 cm"),
    ZoneRule::above_up_to(20.0, 50.0, CAUTION).captioned("21-50 cm"),
    ZoneRule::above_up_to(50.0, 200.0, SAFE_DISTANCE).captioned("51-200 cm"),
];

/// Three zones, each lighting one indicator. Anything else, including 0 cm readings left by a
/// missing echo, switches every light off.
pub const TRAFFIC_LIGHT_ZONES: ZoneTable<'static> =
    ZoneTable::new(&TRAFFIC_LIGHT_RULES, OUT_OF_RANGE).with_fallback_caption(">200 cm");

pub const NO_OBJECT: Zone = Zone::new("OUT OF RANGE", "Out of Range", None);
pub const VERY_CLOSE: Zone = Zone::new("VERY CLOSE", "Very Close", None);
pub const CLOSE: Zone = Zone::new("CLOSE", "Close", None);
pub const MEDIUM: Zone = Zone::new("MEDIUM", "Medium", None);
pub const FAR: Zone = Zone::new("FAR", "Far", None);

const PROXIMITY_RULES: [ZoneRule; 6] = [
    ZoneRule::new(Bound::Exclusive(400.0), Bound::Unbounded, NO_OBJECT).captioned(">400 cm"),
    ZoneRule::new(Bound::Unbounded, Bound::Inclusive(0.0), NO_OBJECT).captioned("<=0 cm"),
    ZoneRule::above_up_to(0.0, 5.0, VERY_CLOSE).captioned("0-5 cm"),
    ZoneRule::above_up_to(5.0, 20.0, CLOSE).captioned("6-20 cm"),
    ZoneRule::above_up_to(20.0, 100.0, MEDIUM).captioned("21-100 cm"),
    ZoneRule::above_up_to(100.0, 400.0, FAR).captioned("101-400 cm"),
];

/// Five zones reported on the console only. FAR doubles as the fallback, so a reading no rule
/// accepts (NaN) is reported as FAR rather than OUT OF RANGE.
pub const PROXIMITY_ZONES: ZoneTable<'static> = ZoneTable::new(&PROXIMITY_RULES, FAR);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SOUND_SPEED_CM_US, sensors::distance_cm_from_echo};

    fn traffic(distance_cm: f64) -> &'static str {
        TRAFFIC_LIGHT_ZONES.classify(distance_cm).label
    }

    fn proximity(distance_cm: f64) -> &'static str {
        PROXIMITY_ZONES.classify(distance_cm).label
    }

    fn from_echo(echo_us: u64) -> f64 {
        distance_cm_from_echo(echo_us, SOUND_SPEED_CM_US)
    }

    #[test]
    fn traffic_light_boundaries_belong_to_the_lower_zone() {
        assert_eq!(traffic(20.0), "TOO CLOSE");
        assert_eq!(traffic(20.0001), "CAUTION");
        assert_eq!(traffic(50.0), "CAUTION");
        assert_eq!(traffic(200.0), "SAFE DISTANCE");
        assert_eq!(traffic(200.0001), "OUT OF RANGE");
    }

    #[test]
    fn traffic_light_out_of_range_below_zero() {
        assert_eq!(traffic(0.0), "OUT OF RANGE");
        assert_eq!(traffic(-3.0), "OUT OF RANGE");
        assert_eq!(traffic(f64::NAN), "OUT OF RANGE");
        assert_eq!(traffic(f64::INFINITY), "OUT OF RANGE");
    }

    #[test]
    fn traffic_light_zones_light_one_indicator() {
        assert_eq!(TRAFFIC_LIGHT_ZONES.classify(10.0).light, Some(Light::Red));
        assert_eq!(TRAFFIC_LIGHT_ZONES.classify(30.0).light, Some(Light::Yellow));
        assert_eq!(TRAFFIC_LIGHT_ZONES.classify(100.0).light, Some(Light::Green));
        assert_eq!(TRAFFIC_LIGHT_ZONES.classify(300.0).light, None);
    }

    #[test]
    fn proximity_boundaries() {
        assert_eq!(proximity(0.0), "OUT OF RANGE");
        assert_eq!(proximity(5.0), "VERY CLOSE");
        assert_eq!(proximity(5.01), "CLOSE");
        assert_eq!(proximity(20.0), "CLOSE");
        assert_eq!(proximity(100.0), "MEDIUM");
        assert_eq!(proximity(400.0), "FAR");
        assert_eq!(proximity(400.5), "OUT OF RANGE");
        assert_eq!(proximity(f64::NAN), "FAR");
    }

    #[test]
    fn proximity_zones_never_light_anything() {
        for distance in [-1.0, 1.0, 10.0, 50.0, 200.0, 1000.0] {
            assert_eq!(PROXIMITY_ZONES.classify(distance).light, None);
        }
    }

    #[test]
    fn echo_scenarios() {
        assert_eq!(traffic(from_echo(1165)), "TOO CLOSE");
        assert_eq!(proximity(from_echo(1165)), "CLOSE");

        assert_eq!(traffic(from_echo(0)), "OUT OF RANGE");
        assert_eq!(proximity(from_echo(0)), "OUT OF RANGE");

        assert_eq!(proximity(from_echo(23316)), "FAR");
        assert_eq!(traffic(from_echo(2915)), "CAUTION");
    }

    #[test]
    fn classification_is_total_over_a_sweep() {
        let mut distance = -50.0;
        while distance < 600.0 {
            let traffic_zone = TRAFFIC_LIGHT_ZONES.classify(distance);
            let matches = TRAFFIC_LIGHT_ZONES
                .rules()
                .iter()
                .filter(|rule| rule.contains(distance))
                .count();
            assert!(matches <= 1, "overlapping traffic light rules at {distance}");
            if matches == 0 {
                assert_eq!(traffic_zone, TRAFFIC_LIGHT_ZONES.fallback());
            }
            distance += 0.25;
        }
    }
}
