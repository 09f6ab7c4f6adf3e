use serde::{Deserialize, Serialize};

/// Model identifiers the hosted assistant service accepts for this backend.
/// Anything outside this list is rejected at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModelName {
    Gpt4o,
    Gpt4Turbo,
    Gpt35Turbo,
    Gpt41,
    Gpt45Preview,
}

pub const SUPPORTED_MODELS: [ModelName; 5] = [
    ModelName::Gpt4o,
    ModelName::Gpt4Turbo,
    ModelName::Gpt35Turbo,
    ModelName::Gpt41,
    ModelName::Gpt45Preview,
];

impl ModelName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::Gpt4o => "gpt-4o",
            ModelName::Gpt4Turbo => "gpt-4-turbo",
            ModelName::Gpt35Turbo => "gpt-3.5-turbo",
            ModelName::Gpt41 => "gpt-4.1",
            ModelName::Gpt45Preview => "gpt-4.5-preview",
        }
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        match s {
            "gpt-4o" => Ok(ModelName::Gpt4o),
            "gpt-4-turbo" => Ok(ModelName::Gpt4Turbo),
            "gpt-3.5-turbo" => Ok(ModelName::Gpt35Turbo),
            "gpt-4.1" => Ok(ModelName::Gpt41),
            "gpt-4.5-preview" => Ok(ModelName::Gpt45Preview),
            other => Err(format!("Unsupported model: {}", other)),
        }
    }
}

impl Default for ModelName {
    fn default() -> Self {
        ModelName::Gpt4o
    }
}

impl std::fmt::Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for ModelName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ModelName::from_string(&value)
    }
}

impl From<ModelName> for String {
    fn from(model: ModelName) -> Self {
        model.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for model in SUPPORTED_MODELS {
            let parsed = ModelName::from_string(model.as_str()).unwrap();
            assert_eq!(parsed, model);
        }
    }

    #[test]
    fn test_unsupported_model_rejected() {
        assert!(ModelName::from_string("gpt-2").is_err());
        assert!(ModelName::from_string("").is_err());
    }

    #[test]
    fn test_default_is_gpt4o() {
        assert_eq!(ModelName::default(), ModelName::Gpt4o);
    }
}
