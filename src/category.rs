//! AQI health-risk categories and advisory recommendations
//!
//! The six EPA categories partition the AQI range 0..=500. Values above 500
//! fall into a dedicated unbounded "Extreme Hazardous" tier; such values can
//! be produced by the uncapped extrapolation in [`crate::pollutant`].

use serde::Serialize;

/// A health-risk category for a range of AQI values
///
/// `min..=max` is the inclusive AQI range the category covers. Ranges are
/// contiguous and non-overlapping. The sentinel tier above 500 keeps
/// `max = u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AqiCategory {
    pub min: u32,
    pub max: u32,
    pub name: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

/// EPA AQI categories, ordered by ascending range
pub const AQI_CATEGORIES: [AqiCategory; 6] = [
    AqiCategory {
        min: 0,
        max: 50,
        name: "Good",
        color: "#00E400",
        description: "Air quality is satisfactory, and air pollution poses little or no risk.",
    },
    AqiCategory {
        min: 51,
        max: 100,
        name: "Moderate",
        color: "#FFFF00",
        description: "Air quality is acceptable. However, there may be a risk for some people, \
                      particularly those who are unusually sensitive to air pollution.",
    },
    AqiCategory {
        min: 101,
        max: 150,
        name: "Unhealthy for Sensitive Groups",
        color: "#FF7E00",
        description: "Members of sensitive groups may experience health effects. The general \
                      public is less likely to be affected.",
    },
    AqiCategory {
        min: 151,
        max: 200,
        name: "Unhealthy",
        color: "#FF0000",
        description: "Some members of the general public may experience health effects; members \
                      of sensitive groups may experience more serious health effects.",
    },
    AqiCategory {
        min: 201,
        max: 300,
        name: "Very Unhealthy",
        color: "#8F3F97",
        description: "Health alert: The risk of health effects is increased for everyone.",
    },
    AqiCategory {
        min: 301,
        max: 500,
        name: "Hazardous",
        color: "#7E0023",
        description: "Health warning of emergency conditions: everyone is more likely to be \
                      affected.",
    },
];

/// Sentinel tier for AQI values above 500
pub const EXTREME_HAZARDOUS: AqiCategory = AqiCategory {
    min: 501,
    max: u32::MAX,
    name: "Extreme Hazardous",
    color: "#7E0023",
    description: "Extreme health hazard: everyone should avoid all outdoor exertion",
};

/// Look up the category covering an AQI value
///
/// Bounded linear scan over [`AQI_CATEGORIES`]; values above 500 return
/// [`EXTREME_HAZARDOUS`].
#[must_use]
pub fn classify(aqi: u32) -> &'static AqiCategory {
    for category in &AQI_CATEGORIES {
        if aqi >= category.min && aqi <= category.max {
            return category;
        }
    }
    &EXTREME_HAZARDOUS
}

/// Health recommendations for an AQI value
///
/// Step function over the category thresholds; each tier maps to a fixed
/// advisory list.
#[must_use]
pub fn recommendations(aqi: u32) -> &'static [&'static str] {
    match aqi {
        0..=50 => &[
            "Air quality is good. Perfect for outdoor activities!",
            "Enjoy outdoor activities with minimal risk from air pollution.",
        ],
        51..=100 => &[
            "Air quality is acceptable for most people.",
            "Unusually sensitive individuals should consider limiting prolonged outdoor exertion.",
            "People with respiratory diseases should be careful.",
        ],
        101..=150 => &[
            "Members of sensitive groups (elderly, children, those with respiratory or heart \
             disease) may experience health effects.",
            "Consider reducing outdoor physical activities, especially near busy roads.",
            "Sensitive groups should move prolonged or heavy exertion activities indoors or \
             reschedule.",
        ],
        151..=200 => &[
            "Everyone may begin to experience health effects.",
            "Avoid prolonged or heavy outdoor exertion.",
            "Sensitive groups should avoid all outdoor physical activities.",
            "Consider using an N95 respirator mask outdoors if you must go out.",
            "Run air purifiers indoors if available.",
        ],
        201..=300 => &[
            "Health alert: everyone may experience more serious health effects.",
            "Avoid all outdoor physical activities.",
            "Stay indoors with windows and doors closed.",
            "Run air purifiers if available.",
            "Wear an N95 respirator mask if you must go outdoors.",
            "Follow local health advice and guidelines.",
        ],
        _ => &[
            "Health emergency! Everyone is likely to be affected.",
            "STAY INDOORS with windows and doors closed.",
            "Avoid all physical activity outdoors.",
            "Run air purifiers on highest setting.",
            "Create a clean room if possible.",
            "Wear N95 respirator masks if you must go outside.",
            "Follow evacuation orders if issued by local authorities.",
            "Consider temporary relocation if conditions persist.",
        ],
    }
}
