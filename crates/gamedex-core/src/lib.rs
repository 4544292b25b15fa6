pub mod category;
pub mod model;
pub mod query;
pub mod seed;
pub mod validation;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use serde_json::{Value, json};

    use crate::model::{Game, GameCreateRequest, GameName, Language};

    /// Build a game with English-only names.
    pub fn make_game(id: &str, category: &str, en_name: &str) -> Game {
        Game {
            id: id.to_string(),
            category: category.to_string(),
            name: vec![GameName::new(Language::En, en_name)],
        }
    }

    /// Build a game with an arbitrary list of localized names.
    pub fn make_localized_game(id: &str, category: &str, names: &[(Language, &str)]) -> Game {
        Game {
            id: id.to_string(),
            category: category.to_string(),
            name: names
                .iter()
                .map(|(lang, value)| GameName::new(*lang, *value))
                .collect(),
        }
    }

    /// A `name` array as a client would send it, from `(code, value)` pairs.
    pub fn name_entries(names: &[(&str, &str)]) -> Value {
        names
            .iter()
            .map(|(language, value)| json!({ "language": language, "value": value }))
            .collect()
    }

    /// A well-formed create request.
    pub fn create_request(id: &str, category: &str, names: &[(&str, &str)]) -> GameCreateRequest {
        GameCreateRequest {
            id: Some(Value::from(id)),
            category: Some(Value::from(category)),
            name: Some(name_entries(names)),
        }
    }

    /// The single-record catalog used by most scenario tests.
    pub fn alpha_catalog() -> Vec<Game> {
        vec![make_game("A", "RPG", "Alpha")]
    }
}
