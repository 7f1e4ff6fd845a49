//! Brand catalogue and badge palette.
//!
//! Brand labels on events and promotions stay free text; this module maps the
//! recognised labels onto a closed enum so the palette is a total function
//! instead of substring matching with a silent default.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brand {
    Heineken,
    Tiger,
    BiaViet,
    Bivina,
    Larue,
    Strongbow,
}

impl Brand {
    pub const ALL: [Brand; 6] = [
        Brand::Heineken,
        Brand::Tiger,
        Brand::BiaViet,
        Brand::Bivina,
        Brand::Larue,
        Brand::Strongbow,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Brand::Heineken => "Heineken",
            Brand::Tiger => "Tiger",
            Brand::BiaViet => "Bia Việt",
            Brand::Bivina => "Bivina",
            Brand::Larue => "Larue",
            Brand::Strongbow => "Strongbow",
        }
    }

    /// Case-insensitive match against the catalogue labels. "Bia Viet"
    /// without diacritics is accepted, since imported sheets often drop them.
    pub fn parse(value: &str) -> Option<Brand> {
        match value.trim().to_lowercase().as_str() {
            "heineken" => Some(Brand::Heineken),
            "tiger" => Some(Brand::Tiger),
            "bia việt" | "bia viet" => Some(Brand::BiaViet),
            "bivina" => Some(Brand::Bivina),
            "larue" => Some(Brand::Larue),
            "strongbow" => Some(Brand::Strongbow),
            _ => None,
        }
    }

    pub fn tone(self) -> BadgeTone {
        match self {
            Brand::Heineken => BadgeTone::Green,
            Brand::Tiger => BadgeTone::Amber,
            Brand::BiaViet => BadgeTone::Red,
            Brand::Bivina => BadgeTone::Blue,
            Brand::Larue => BadgeTone::Gold,
            Brand::Strongbow => BadgeTone::Pink,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Green,
    Amber,
    Gold,
    Red,
    Blue,
    Pink,
    Neutral,
}

impl BadgeTone {
    pub fn css_class(self) -> &'static str {
        match self {
            BadgeTone::Green => "badge-green",
            BadgeTone::Amber => "badge-amber",
            BadgeTone::Gold => "badge-gold",
            BadgeTone::Red => "badge-red",
            BadgeTone::Blue => "badge-blue",
            BadgeTone::Pink => "badge-pink",
            BadgeTone::Neutral => "badge-neutral",
        }
    }
}

/// Badge tone for an arbitrary brand label; unrecognised labels are
/// explicitly neutral.
pub fn badge_tone(label: &str) -> BadgeTone {
    match Brand::parse(label) {
        Some(brand) => brand.tone(),
        None => BadgeTone::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalogue_label_round_trips() {
        for brand in Brand::ALL {
            assert_eq!(Brand::parse(brand.label()), Some(brand));
        }
    }

    #[test]
    fn parse_tolerates_case_and_missing_diacritics() {
        assert_eq!(Brand::parse("  HEINEKEN "), Some(Brand::Heineken));
        assert_eq!(Brand::parse("bia viet"), Some(Brand::BiaViet));
    }

    #[test]
    fn unrecognised_labels_map_to_neutral_explicitly() {
        assert_eq!(badge_tone("Heineken Silver"), BadgeTone::Neutral);
        assert_eq!(badge_tone(""), BadgeTone::Neutral);
        assert_eq!(badge_tone("Tiger"), BadgeTone::Amber);
    }
}
