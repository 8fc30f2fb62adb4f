/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the API layer and the UI layer. They are deserialized straight
/// from TheDogAPI responses and never mutated afterwards.

use serde::{Deserialize, Deserializer};

/// Shown when an image carries no breed entry (or a nameless one)
pub const UNKNOWN_BREED: &str = "Unknown Breed";
/// Shown when the breed has no temperament
pub const TEMPERAMENT_UNAVAILABLE: &str = "Not available";

/// A dog breed from the `/breeds` endpoint (or embedded in an image)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Breed {
    /// Breed identifier, normalised to a string (the live API sends numbers)
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Display name (e.g., "Beagle")
    #[serde(default)]
    pub name: String,
    /// Comma-separated temperament traits
    #[serde(default)]
    pub temperament: Option<String>,
    #[serde(default)]
    pub weight: Option<Weight>,
    /// Life span range (e.g., "10 - 12 years")
    #[serde(default)]
    pub life_span: Option<String>,
}

/// Breed weight ranges as reported by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Weight {
    /// Metric range in kilograms (e.g., "9 - 11")
    #[serde(default)]
    pub metric: Option<String>,
}

/// A photo from the `/images/search` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DogImage {
    #[serde(default)]
    pub id: Option<String>,
    /// Full URL of the photo on the CDN
    pub url: String,
    /// Breeds shown in the photo (0 or 1 entries in practice)
    #[serde(default)]
    pub breeds: Vec<Breed>,
}

impl DogImage {
    /// The breed the detail view describes
    pub fn primary_breed(&self) -> Option<&Breed> {
        self.breeds.first()
    }
}

/// Display-ready breed attributes for the detail overlay.
/// Each field already carries its fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedDetails {
    pub name: String,
    pub temperament: String,
    /// "<metric> kg", or blank
    pub weight: String,
    /// Blank when unknown
    pub life_span: String,
}

impl BreedDetails {
    pub fn for_image(image: &DogImage) -> Self {
        let breed = image.primary_breed();

        let name = breed
            .map(|b| b.name.as_str())
            .and_then(non_blank)
            .unwrap_or(UNKNOWN_BREED)
            .to_string();

        let temperament = breed
            .and_then(|b| b.temperament.as_deref())
            .and_then(non_blank)
            .unwrap_or(TEMPERAMENT_UNAVAILABLE)
            .to_string();

        let weight = breed
            .and_then(|b| b.weight.as_ref())
            .and_then(|w| w.metric.as_deref())
            .and_then(non_blank)
            .map(|metric| format!("{} kg", metric))
            .unwrap_or_default();

        let life_span = breed
            .and_then(|b| b.life_span.as_deref())
            .and_then(non_blank)
            .map(str::to_string)
            .unwrap_or_default();

        Self {
            name,
            temperament,
            weight,
            life_span,
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Accept either `"12"` or `12` for identifiers
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids() {
        let breeds: Vec<Breed> =
            serde_json::from_str(r#"[{"id": 1, "name": "Affenpinscher"}, {"id": "b2", "name": "Akita"}]"#)
                .unwrap();
        assert_eq!(breeds[0].id, "1");
        assert_eq!(breeds[1].id, "b2");
        assert_eq!(breeds[1].temperament, None);
    }

    #[test]
    fn test_image_without_breeds_field() {
        let image: DogImage =
            serde_json::from_str(r#"{"id": "abc", "url": "https://cdn.example/abc.jpg", "width": 800}"#)
                .unwrap();
        assert!(image.breeds.is_empty());
        assert_eq!(image.primary_breed(), None);
    }

    #[test]
    fn test_details_defaults_for_breedless_image() {
        let image = DogImage {
            id: None,
            url: "https://cdn.example/x.jpg".into(),
            breeds: vec![],
        };
        let details = BreedDetails::for_image(&image);
        assert_eq!(details.name, UNKNOWN_BREED);
        assert_eq!(details.temperament, TEMPERAMENT_UNAVAILABLE);
        assert_eq!(details.weight, "");
        assert_eq!(details.life_span, "");
    }

    #[test]
    fn test_details_full_breed() {
        let image: DogImage = serde_json::from_str(
            r#"{
                "url": "https://cdn.example/beagle.jpg",
                "breeds": [{
                    "id": 1,
                    "name": "Beagle",
                    "temperament": "Amiable, Even Tempered",
                    "weight": {"imperial": "20 - 35", "metric": "9 - 16"},
                    "life_span": "13 - 15 years"
                }]
            }"#,
        )
        .unwrap();
        let details = BreedDetails::for_image(&image);
        assert_eq!(details.name, "Beagle");
        assert_eq!(details.temperament, "Amiable, Even Tempered");
        assert_eq!(details.weight, "9 - 16 kg");
        assert_eq!(details.life_span, "13 - 15 years");
    }

    #[test]
    fn test_details_blank_fields_fall_back() {
        let image = DogImage {
            id: None,
            url: "https://cdn.example/y.jpg".into(),
            breeds: vec![Breed {
                id: "7".into(),
                name: "  ".into(),
                temperament: Some(String::new()),
                weight: Some(Weight { metric: None }),
                life_span: None,
            }],
        };
        let details = BreedDetails::for_image(&image);
        assert_eq!(details.name, UNKNOWN_BREED);
        assert_eq!(details.temperament, TEMPERAMENT_UNAVAILABLE);
        assert_eq!(details.weight, "");
    }
}
