//! Rule-based feature extraction from a free-text property query.
//!
//! Used when the language-model extraction is unavailable. Every rule is a
//! plain pattern match, so the result is deterministic for a given query.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::address::extract_zip_code;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("valid extractor regex")
}

static PROPERTY_SEARCH: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)find|search|looking for|properties|homes|houses|apartments"));
static MARKET_INFO: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)market|trends|prices|appreciation|value"));
static LEGAL: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)legal|laws|regulations|taxes|tax|zoning"));
static PROPERTY_DETAIL: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)details|more about|tell me about"));

static BEDROOMS: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)([0-9]+)\s*(?:bed|bedroom|br)"));
static BATHROOMS: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)([0-9]+)\s*(?:bath|bathroom|ba)"));
static SQUARE_FEET: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)([0-9]+)\s*(?:sq\s*ft|square\s*feet|sqft)"));

// "in Austin", "near Lake Forest 60045", "in Springfield and ..."
static CITY: Lazy<Regex> = Lazy::new(|| {
    pattern(r"(?i)(?-u:\b)(?:in|near)\s+([A-Za-z\s.]+?)(?:\s+[0-9]{5}|\s*$|\s+and|\s+near)")
});

static SHOW_LISTINGS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        pattern(r"(?i)show\s+(?:me\s+)?(?:the\s+)?properties"),
        pattern(r"(?i)find\s+(?:me\s+)?(?:a\s+)?home"),
        pattern(r"(?i)looking\s+for\s+(?:a\s+)?(?:house|property|apartment|condo)"),
    ]
});
static ANALYZE_MARKET: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)market|trends|price|appreciation"));

// `[k|K]` also admits a literal `|`, which contributes nothing to the amount
static PRICE_BETWEEN: Lazy<Regex> = Lazy::new(|| {
    pattern(r"(?i)between\s+\$?([0-9]+[k|K]?)\s+and\s+\$?([0-9]+[k|K]?)")
});
static PRICE_UNDER: Lazy<Regex> =
    Lazy::new(|| pattern(r"(?i)(?:under|below|less than)\s+\$?([0-9]+[k|K]?)"));

static SORT_ASC: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)cheapest|lowest price"));
static SORT_DESC: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)expensive|luxury|high end"));
static SORT_NEWEST: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)newest|recent|new listing"));

const PROPERTY_TYPES: [&str; 4] = ["house", "apartment", "condo", "townhouse"];
const PROXIMITY_TYPES: [&str; 7] = [
    "school",
    "transit",
    "restaurant",
    "downtown",
    "park",
    "grocery",
    "hospital",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    #[default]
    General,
    PropertySearch,
    MarketInfo,
    Legal,
    PropertyDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ShowListings,
    ShowTransit,
    ShowRestaurants,
    AnalyzeMarket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    PriceAsc,
    PriceDesc,
    Newest,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFeatures {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub square_feet: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Proximity {
    pub to: &'static str,
    pub distance: u32,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LocationFeatures {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity: Option<Vec<Proximity>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<[u64; 2]>,
}

/// Same shape the language-model extraction is asked to produce.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureExtraction {
    pub query_type: QueryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_zip_code: Option<String>,
    pub property_features: PropertyFeatures,
    pub location_features: LocationFeatures,
    pub action_requested: Option<Action>,
    pub filters: Filters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
}

pub fn extract_real_estate_features(query: &str) -> FeatureExtraction {
    let lower = query.to_lowercase();
    let mut extraction = FeatureExtraction {
        query_type: query_type(query),
        extracted_zip_code: extract_zip_code(query),
        ..Default::default()
    };

    let features = &mut extraction.property_features;
    features.bedrooms = leading_count(&BEDROOMS, query);
    features.bathrooms = leading_count(&BATHROOMS, query);
    // later entries win, so "townhouse" beats "house"
    features.property_type = PROPERTY_TYPES
        .iter()
        .rev()
        .find(|kind| lower.contains(*kind))
        .copied();
    features.square_feet = leading_count(&SQUARE_FEET, query);

    extraction.location_features.city = CITY
        .captures(query)
        .map(|caps| caps[1].trim().to_string());

    if let Some(to) = PROXIMITY_TYPES.into_iter().find(|kind| {
        lower.contains(&format!("near {kind}")) || lower.contains(&format!("close to {kind}"))
    }) {
        extraction.location_features.proximity = Some(vec![Proximity {
            to,
            distance: 1,
            unit: "miles",
        }]);
        extraction.action_requested = match to {
            "transit" => Some(Action::ShowTransit),
            "restaurant" => Some(Action::ShowRestaurants),
            _ => None,
        };
    }

    if SHOW_LISTINGS.iter().any(|re| re.is_match(query)) {
        extraction.action_requested = Some(Action::ShowListings);
    } else if ANALYZE_MARKET.is_match(query) {
        extraction.action_requested = Some(Action::AnalyzeMarket);
    }

    extraction.filters.price_range = price_range(query);
    extraction.sort_by = sort_by(query);
    extraction
}

fn query_type(query: &str) -> QueryType {
    if PROPERTY_SEARCH.is_match(query) {
        QueryType::PropertySearch
    } else if MARKET_INFO.is_match(query) {
        QueryType::MarketInfo
    } else if LEGAL.is_match(query) {
        QueryType::Legal
    } else if PROPERTY_DETAIL.is_match(query) {
        QueryType::PropertyDetail
    } else {
        QueryType::General
    }
}

fn leading_count(re: &Regex, query: &str) -> Option<u64> {
    re.captures(query)?[1].parse().ok()
}

fn price_range(query: &str) -> Option<[u64; 2]> {
    if let Some(caps) = PRICE_BETWEEN.captures(query) {
        return Some([amount(&caps[1])?, amount(&caps[2])?]);
    }
    let caps = PRICE_UNDER.captures(query)?;
    Some([0, amount(&caps[1])?])
}

/// "450k" is 450000. Only the leading digits carry the value.
fn amount(text: &str) -> Option<u64> {
    let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
    let value: u64 = digits.parse().ok()?;
    if text.to_lowercase().ends_with('k') {
        value.checked_mul(1000)
    } else {
        Some(value)
    }
}

fn sort_by(query: &str) -> Option<SortBy> {
    if SORT_ASC.is_match(query) {
        Some(SortBy::PriceAsc)
    } else if SORT_DESC.is_match(query) {
        Some(SortBy::PriceDesc)
    } else if SORT_NEWEST.is_match(query) {
        Some(SortBy::Newest)
    } else {
        None
    }
}
