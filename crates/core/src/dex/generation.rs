//! # Generation Buckets
//!
//! Generations are computed arithmetically from the national id, not read
//! from the API: fixed-width buckets of [`GENERATION_SPAN`] ids.

use serde::Serialize;

/// Width of one bucket
pub const GENERATION_SPAN: u32 = 151;
/// Highest national-dex id listed; anything above is a form, not a species
pub const MAX_NATIONAL_ID: u32 = 1025;
/// Generations offered by the picker
pub const GENERATION_COUNT: u8 = 9;

/// Bucket for a national id: `ceil(id / 151)`. Id 0 has no bucket.
pub fn generation_for(id: u32) -> Option<u8> {
    if id == 0 {
        return None;
    }
    let bucket = id.div_ceil(GENERATION_SPAN);
    u8::try_from(bucket).ok()
}

/// Whether `id` is a base species in the national dex range
pub fn is_national_id(id: u32) -> bool {
    (1..=MAX_NATIONAL_ID).contains(&id)
}

/// Entry of the generation picker
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenerationOption {
    /// `None` is "all generations"
    pub generation: Option<u8>,
    pub label: String,
}

pub fn generation_options() -> Vec<GenerationOption> {
    let mut options = vec![GenerationOption {
        generation: None,
        label: "Todas las Generaciones".to_string(),
    }];
    options.extend((1..=GENERATION_COUNT).map(|g| GenerationOption {
        generation: Some(g),
        label: format!("Generación {}", g),
    }));
    options
}
