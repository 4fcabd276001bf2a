use serde::{Deserialize, Serialize};

/// A recipe as returned by the scraping API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    #[serde(default)]
    pub details: RecipeDetails,
    /// Ingredient sections in the order the page lists them
    #[serde(with = "sections")]
    pub ingredients: Vec<IngredientSection>,
    pub steps: Vec<RecipeStep>,
    #[serde(default)]
    pub nutrition: RecipeNutrition,
}

/// Free-text timing and yield details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeDetails {
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub servings: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#yield: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    #[serde(rename = "step")]
    pub number: u32,
    pub instruction: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeNutrition {
    pub calories: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_fat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
}

/// A named group of ingredient lines, e.g. "For the glaze"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientSection {
    pub name: String,
    pub items: Vec<String>,
}

impl Recipe {
    /// All ingredient lines across sections, in order
    pub fn ingredient_lines(&self) -> impl Iterator<Item = &str> {
        self.ingredients
            .iter()
            .flat_map(|section| section.items.iter().map(String::as_str))
    }
}

/// The API sends ingredients as a JSON object of section name to lines.
/// Keys are kept in document order rather than going through a HashMap.
mod sections {
    use super::IngredientSection;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(sections: &[IngredientSection], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(sections.len()))?;
        for section in sections {
            map.serialize_entry(&section.name, &section.items)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<IngredientSection>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SectionsVisitor;

        impl<'de> Visitor<'de> for SectionsVisitor {
            type Value = Vec<IngredientSection>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of section names to ingredient lists")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut sections = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, items)) = access.next_entry::<String, Vec<String>>()? {
                    sections.push(IngredientSection { name, items });
                }
                Ok(sections)
            }
        }

        deserializer.deserialize_map(SectionsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
    {
        "title": "Banana Bread",
        "details": {
            "prepTime": "15 mins",
            "cookTime": "1 hr",
            "totalTime": "1 hr 15 mins",
            "servings": "10"
        },
        "ingredients": {
            "Bread": ["2 cups flour", "1/2 cup butter"],
            "Glaze": ["1 cup sugar"]
        },
        "steps": [
            {"step": 1, "instruction": "Preheat oven.", "image": ""},
            {"step": 2, "instruction": "Bake for 60 minutes."}
        ],
        "nutrition": {"calories": "229", "totalFat": "8g"}
    }
    "#;

    #[test]
    fn test_deserialize_keeps_section_order() {
        let recipe: Recipe = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(recipe.title, "Banana Bread");
        assert_eq!(recipe.details.servings, "10");
        assert_eq!(recipe.details.r#yield, None);
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[0].name, "Bread");
        assert_eq!(recipe.ingredients[1].name, "Glaze");
        assert_eq!(recipe.steps[1].number, 2);
        assert_eq!(recipe.steps[1].image, "");
        assert_eq!(recipe.nutrition.total_fat.as_deref(), Some("8g"));
    }

    #[test]
    fn test_missing_details_and_nutrition_default() {
        let json = r#"{"title": "Toast", "ingredients": {"": ["1 slice bread"]}, "steps": []}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();

        assert_eq!(recipe.details, RecipeDetails::default());
        assert_eq!(recipe.nutrition.calories, "");
        assert_eq!(recipe.ingredient_lines().collect::<Vec<_>>(), vec!["1 slice bread"]);
    }

    #[test]
    fn test_serialize_uses_api_field_names() {
        let recipe: Recipe = serde_json::from_str(SAMPLE).unwrap();
        let value = serde_json::to_value(&recipe).unwrap();

        assert_eq!(value["details"]["prepTime"], "15 mins");
        assert_eq!(value["steps"][0]["step"], 1);
        assert_eq!(value["ingredients"]["Glaze"][0], "1 cup sugar");
        assert!(value["nutrition"].get("fat").is_none());
    }
}
