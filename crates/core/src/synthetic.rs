//! Seeded sample-case generator.
//!
//! Last tier of the catalog fallback chain: when neither the API nor the
//! static export yields records, the browser is filled with synthetic
//! cases so it never renders empty. The same seed always produces the
//! same records.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::case::{CaseRecord, Evidence, CASE_TYPES, STATUS_UNSOLVED};

/// How many records the demo catalog holds.
pub const SAMPLE_CASE_COUNT: usize = 100;

pub const SAMPLE_FIRST_YEAR: i32 = 1980;
pub const SAMPLE_LAST_YEAR: i32 = 2014;

/// Evidence entries attached to every sample record.
pub const SAMPLE_EVIDENCE_PER_CASE: usize = 2;

pub const SAMPLE_DATASET: &str = "synthetic_sample";

/// States and cities that actually belong to them.
const STATE_CITIES: &[(&str, &[&str])] = &[
    ("CA", &["Los Angeles", "Sacramento", "Fresno", "Oakland"]),
    ("TX", &["Houston", "Austin", "El Paso", "Lubbock"]),
    ("FL", &["Miami", "Tampa", "Jacksonville", "Pensacola"]),
    ("NY", &["Buffalo", "Albany", "Rochester", "Syracuse"]),
    ("MN", &["Minneapolis", "Duluth", "St. Cloud", "Rochester"]),
    ("IL", &["Chicago", "Peoria", "Springfield", "Rockford"]),
    ("OH", &["Cleveland", "Dayton", "Toledo", "Akron"]),
    ("WA", &["Seattle", "Spokane", "Tacoma", "Yakima"]),
    ("GA", &["Atlanta", "Savannah", "Macon", "Augusta"]),
    ("AZ", &["Phoenix", "Tucson", "Flagstaff", "Yuma"]),
];

const EVIDENCE_KINDS: &[(&str, &str)] = &[
    ("physical", "Clothing fibers recovered near the scene"),
    ("forensic", "Partial fingerprint lifted from a vehicle door"),
    ("testimonial", "Witness reported a dark sedan leaving the area"),
    ("documentary", "Phone records placing the victim downtown that evening"),
    ("physical", "Shell casing found in a drainage culvert"),
    ("forensic", "DNA profile uploaded to CODIS without a match"),
    ("circumstantial", "Unexplained cash withdrawal two days prior"),
];

const TITLE_PATTERNS: &[&str] = &[
    "The {city} Riverside Case",
    "Disappearance on {city} Highway",
    "The {city} Motel Mystery",
    "Unknown Traveler of {city}",
    "The Last Shift in {city}",
    "Night Bus to {city}",
];

/// Anything that can produce sample records on demand.
pub trait CaseGenerator: Send + Sync {
    fn generate(&self, count: usize) -> Vec<CaseRecord>;
}

/// Deterministic generator keyed by a 64-bit seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticCases {
    seed: u64,
}

impl SyntheticCases {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl CaseGenerator for SyntheticCases {
    fn generate(&self, count: usize) -> Vec<CaseRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..count).map(|i| sample_case(&mut rng, i)).collect()
    }
}

fn sample_case(rng: &mut StdRng, index: usize) -> CaseRecord {
    let (state, cities) = STATE_CITIES.choose(rng).copied().unwrap_or(STATE_CITIES[0]);
    let city = cities.choose(rng).copied().unwrap_or(cities[0]);
    let case_type = CASE_TYPES.choose(rng).copied().unwrap_or(CASE_TYPES[0]);

    let year = rng.random_range(SAMPLE_FIRST_YEAR..=SAMPLE_LAST_YEAR);
    let month = rng.random_range(1..=12);
    let day = rng.random_range(1..=28);

    let title = TITLE_PATTERNS
        .choose(rng)
        .copied()
        .unwrap_or(TITLE_PATTERNS[0])
        .replace("{city}", city);

    let evidence = (0..SAMPLE_EVIDENCE_PER_CASE)
        .filter_map(|_| EVIDENCE_KINDS.choose(&mut *rng))
        .map(|(kind, description)| Evidence {
            evidence_type: (*kind).to_string(),
            description: (*description).to_string(),
            source: None,
        })
        .collect();

    CaseRecord {
        id: format!("sample-{:03}", index + 1),
        title,
        case_type: case_type.to_string(),
        status: STATUS_UNSOLVED.to_string(),
        date_occurred: Some(format!("{year:04}-{month:02}-{day:02}")),
        city: Some(city.to_string()),
        state: Some(state.to_string()),
        summary: Some(format!(
            "Sample record: a {} case reported in {city}, {state} in {year}. \
             Investigators continue to seek information from the public.",
            crate::case::case_type_label(case_type).to_lowercase(),
        )),
        evidence,
        source_dataset: Some(SAMPLE_DATASET.to_string()),
        ..Default::default()
    }
}
