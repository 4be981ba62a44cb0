//! Domain types for the pet API.
//!
//! # Design
//! A single `Pet` type covers both drafts and stored records: `id` is `None`
//! until the remote store assigns one on create. These types mirror the
//! mock-server's schema but are defined independently; integration tests
//! catch any schema drift between the two crates.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Gender of a pet. Serialized lowercase; defaults to `Male`.
///
/// The store keeps gender as free text, so decoding ignores case and reads
/// anything unrecognised as the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.trim().to_lowercase().as_str() {
            "female" => Gender::Female,
            _ => Gender::Male,
        })
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pet record, either a local draft (`id == None`) or a stored record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub species: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub breed: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gender: Gender,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
}

impl Pet {
    /// The blank record a new form starts from.
    pub fn draft() -> Self {
        Self::default()
    }

    /// Copy of this record with the id stripped, as sent on create.
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }

    /// Whether `needle` occurs in name, species, breed or gender.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        [
            self.name.as_str(),
            self.species.as_str(),
            self.breed.as_str(),
            self.gender.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

/// The original store keeps nullable columns; `null` decodes as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_defaults_to_male_without_id() {
        let pet = Pet::draft();
        assert_eq!(pet.id, None);
        assert_eq!(pet.gender, Gender::Male);
        assert_eq!(pet.price, 0.0);
        assert!(pet.name.is_empty());
    }

    #[test]
    fn draft_serializes_without_id() {
        let json = serde_json::to_value(Pet::draft()).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["gender"], "male");
    }

    #[test]
    fn nulls_decode_as_defaults() {
        let pet: Pet = serde_json::from_str(
            r#"{"id":4,"name":"Rex","species":null,"breed":null,"gender":null,"image":null,"description":null,"price":null}"#,
        )
        .unwrap();
        assert_eq!(pet.id, Some(4));
        assert_eq!(pet.name, "Rex");
        assert!(pet.species.is_empty());
        assert_eq!(pet.gender, Gender::Male);
        assert_eq!(pet.price, 0.0);
    }

    #[test]
    fn missing_fields_decode_as_defaults() {
        let pet: Pet = serde_json::from_str(r#"{"name":"Mia","gender":"female"}"#).unwrap();
        assert_eq!(pet.id, None);
        assert_eq!(pet.gender, Gender::Female);
        assert!(pet.breed.is_empty());
    }

    #[test]
    fn gender_decodes_case_insensitively() {
        let pets: Vec<Pet> = serde_json::from_str(
            r#"[{"gender":"Female"},{"gender":" MALE "},{"gender":"other"},{"gender":""}]"#,
        )
        .unwrap();
        let genders: Vec<Gender> = pets.iter().map(|p| p.gender).collect();
        assert_eq!(genders, [Gender::Female, Gender::Male, Gender::Male, Gender::Male]);
    }

    #[test]
    fn matches_checks_searchable_fields_only() {
        let pet = Pet {
            name: "Rex".to_string(),
            species: "Dog".to_string(),
            breed: "Beagle".to_string(),
            description: "loves cats".to_string(),
            ..Pet::draft()
        };
        assert!(pet.matches("rex"));
        assert!(pet.matches("eag"));
        assert!(pet.matches("male"));
        assert!(!pet.matches("cat"));
    }

    #[test]
    fn female_matches_male_substring() {
        let pet = Pet {
            gender: Gender::Female,
            ..Pet::draft()
        };
        assert!(pet.matches("male"));
        assert!(pet.matches("fem"));
    }
}
