use std::fmt;

/// Column the range captions are padded to in the banner
pub const BANNER_RANGE_WIDTH: usize = 10;

/// Indicator lit while a zone is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Light {
    Red,
    Yellow,
    Green,
}

/// One end of a distance range, in centimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Unbounded,
    Inclusive(f64),
    Exclusive(f64),
}

/// A named distance bucket and the indicator it lights, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    /// Short label printed after every reading
    pub label: &'static str,
    /// Longer description printed in the startup banner
    pub description: &'static str,
    pub light: Option<Light>,
}

/// Maps the distances between `lower` and `upper` to `zone`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneRule {
    pub lower: Bound,
    pub upper: Bound,
    pub zone: Zone,
    /// Range as written in the banner, e.g. `21-50 cm`. Interval notation when absent
    pub caption: Option<&'static str>,
}

/// Ordered rules evaluated top to bottom, first match wins. Values no rule accepts land in the
/// fallback zone, so every distance (NaN included) gets exactly one zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneTable<'a> {
    rules: &'a [ZoneRule],
    fallback: Zone,
    fallback_caption: &'static str,
}

impl Zone {
    pub const fn new(label: &'static str, description: &'static str, light: Option<Light>) -> Self {
        Zone {
            label,
            description,
            light,
        }
    }
}

impl ZoneRule {
    pub const fn new(lower: Bound, upper: Bound, zone: Zone) -> Self {
        ZoneRule {
            lower,
            upper,
            zone,
            caption: None,
        }
    }

    /// Same rule, listed in the banner as `caption`
    pub const fn captioned(self, caption: &'static str) -> Self {
        ZoneRule {
            caption: Some(caption),
            ..self
        }
    }

    /// Rule for the half open range `(lower, upper]`, the shape every threshold chain uses
    pub const fn above_up_to(lower: f64, upper: f64, zone: Zone) -> Self {
        ZoneRule::new(Bound::Exclusive(lower), Bound::Inclusive(upper), zone)
    }

    /// Checks if `distance_cm` lies inside the rule range. NaN is only inside fully unbounded rules.
    pub fn contains(&self, distance_cm: f64) -> bool {
        let above_lower = match self.lower {
            Bound::Unbounded => true,
            Bound::Inclusive(lower) => distance_cm >= lower,
            Bound::Exclusive(lower) => distance_cm > lower,
        };
        let below_upper = match self.upper {
            Bound::Unbounded => true,
            Bound::Inclusive(upper) => distance_cm <= upper,
            Bound::Exclusive(upper) => distance_cm < upper,
        };
        above_lower && below_upper
    }

    /// Human readable range: the caption if there is one, else the interval
    pub fn range_text(&self) -> String {
        match self.caption {
            Some(caption) => caption.to_string(),
            None => self.interval_text(),
        }
    }

    fn interval_text(&self) -> String {
        match (self.lower, self.upper) {
            (Bound::Unbounded, Bound::Unbounded) => "any".to_string(),
            (Bound::Unbounded, Bound::Inclusive(upper)) => format!("<= {upper} cm"),
            (Bound::Unbounded, Bound::Exclusive(upper)) => format!("< {upper} cm"),
            (Bound::Inclusive(lower), Bound::Unbounded) => format!(">= {lower} cm"),
            (Bound::Exclusive(lower), Bound::Unbounded) => format!("> {lower} cm"),
            (Bound::Inclusive(lower), Bound::Inclusive(upper)) => format!("[{lower}, {upper}] cm"),
            (Bound::Inclusive(lower), Bound::Exclusive(upper)) => format!("[{lower}, {upper}) cm"),
            (Bound::Exclusive(lower), Bound::Inclusive(upper)) => format!("({lower}, {upper}] cm"),
            (Bound::Exclusive(lower), Bound::Exclusive(upper)) => format!("({lower}, {upper}) cm"),
        }
    }
}

impl<'a> ZoneTable<'a> {
    pub const fn new(rules: &'a [ZoneRule], fallback: Zone) -> Self {
        ZoneTable {
            rules,
            fallback,
            fallback_caption: "otherwise",
        }
    }

    /// Same table, with the fallback listed in the banner as `caption`
    pub const fn with_fallback_caption(self, caption: &'static str) -> Self {
        ZoneTable {
            fallback_caption: caption,
            ..self
        }
    }

    /// Returns the zone of the first rule containing `distance_cm`, or the fallback zone
    pub fn classify(&self, distance_cm: f64) -> &Zone {
        self.rules
            .iter()
            .find(|rule| rule.contains(distance_cm))
            .map(|rule| &rule.zone)
            .unwrap_or(&self.fallback)
    }

    pub fn rules(&self) -> &'a [ZoneRule] {
        self.rules
    }

    pub fn fallback(&self) -> &Zone {
        &self.fallback
    }

    pub fn fallback_caption(&self) -> &'static str {
        self.fallback_caption
    }
}

impl fmt::Display for ZoneRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<width$}: {}",
            self.range_text(),
            self.zone.description,
            width = BANNER_RANGE_WIDTH
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEAR: Zone = Zone::new("NEAR", "Near", Some(Light::Red));
    const FAR: Zone = Zone::new("FAR", "Far", None);
    const NOWHERE: Zone = Zone::new("NOWHERE", "Nowhere", None);

    #[test]
    fn bounds_respect_their_kind() {
        let rule = ZoneRule::above_up_to(0.0, 20.0, NEAR);
        assert!(!rule.contains(0.0));
        assert!(rule.contains(0.001));
        assert!(rule.contains(20.0));
        assert!(!rule.contains(20.0001));

        let closed = ZoneRule::new(Bound::Inclusive(0.0), Bound::Exclusive(20.0), NEAR);
        assert!(closed.contains(0.0));
        assert!(!closed.contains(20.0));
    }

    #[test]
    fn nan_only_matches_unbounded_rules() {
        let bounded = ZoneRule::new(Bound::Unbounded, Bound::Inclusive(0.0), NEAR);
        let everything = ZoneRule::new(Bound::Unbounded, Bound::Unbounded, FAR);
        assert!(!bounded.contains(f64::NAN));
        assert!(everything.contains(f64::NAN));
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = [
            ZoneRule::above_up_to(0.0, 20.0, NEAR),
            ZoneRule::above_up_to(10.0, 50.0, FAR),
        ];
        let table = ZoneTable::new(&rules, NOWHERE);

        assert_eq!(table.classify(15.0), &NEAR);
        assert_eq!(table.classify(30.0), &FAR);
        assert_eq!(table.classify(-1.0), &NOWHERE);
        assert_eq!(table.classify(f64::NAN), &NOWHERE);
    }

    #[test]
    fn ranges_render_for_the_banner() {
        assert_eq!(ZoneRule::above_up_to(0.0, 20.0, NEAR).range_text(), "(0, 20] cm");
        assert_eq!(
            ZoneRule::new(Bound::Exclusive(400.0), Bound::Unbounded, FAR).range_text(),
            "> 400 cm"
        );
        assert_eq!(
            ZoneRule::new(Bound::Unbounded, Bound::Inclusive(0.0), FAR).range_text(),
            "<= 0 cm"
        );
        assert_eq!(
            ZoneRule::new(Bound::Inclusive(1.5), Bound::Exclusive(2.0), FAR).range_text(),
            "[1.5, 2) cm"
        );
    }

    #[test]
    fn captions_replace_the_interval_in_the_banner() {
        let rule = ZoneRule::above_up_to(20.0, 50.0, NEAR).captioned("21-50 cm");
        assert_eq!(rule.range_text(), "21-50 cm");
        assert_eq!(rule.to_string(), "21-50 cm  : Near");
        assert_eq!(ZoneRule::above_up_to(0.0, 20.0, NEAR).to_string(), "(0, 20] cm: Near");

        let table = ZoneTable::new(&[], NOWHERE);
        assert_eq!(table.fallback_caption(), "otherwise");
        assert_eq!(table.with_fallback_caption(">200 cm").fallback_caption(), ">200 cm");
    }
}
