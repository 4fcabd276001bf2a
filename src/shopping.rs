use crate::model::{IngredientSection, Recipe};

/// One line of the shopping list
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingItem {
    pub section: String,
    pub item: String,
    pub checked: bool,
}

/// Every ingredient of a recipe as a flat checklist
#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    /// Flatten all ingredient sections, nothing checked yet
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self::from_sections(&recipe.ingredients)
    }

    pub fn from_sections(sections: &[IngredientSection]) -> Self {
        let items = sections
            .iter()
            .flat_map(|section| {
                section.items.iter().map(move |item| ShoppingItem {
                    section: section.name.clone(),
                    item: item.clone(),
                    checked: false,
                })
            })
            .collect();

        Self { items }
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flip the checked state of the item at `index`; out of range is ignored
    pub fn toggle(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.checked = !item.checked;
        }
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|item| item.checked)
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }

    /// Plain-text checklist, one `[x] item` / `[ ] item` per line
    pub fn to_text(&self) -> String {
        self.items
            .iter()
            .map(|entry| {
                let mark = if entry.checked { "[x]" } else { "[ ]" };
                format!("{} {}", mark, entry.item)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> Recipe {
        Recipe {
            title: "Pancakes".to_string(),
            ingredients: vec![
                IngredientSection {
                    name: "Batter".to_string(),
                    items: vec!["1 cup flour".to_string(), "2 eggs".to_string()],
                },
                IngredientSection {
                    name: "Topping".to_string(),
                    items: vec!["maple syrup".to_string()],
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_flattens_sections_in_order() {
        let list = ShoppingList::from_recipe(&recipe());

        assert_eq!(list.len(), 3);
        assert_eq!(list.items()[0].section, "Batter");
        assert_eq!(list.items()[2].section, "Topping");
        assert_eq!(list.items()[2].item, "maple syrup");
        assert_eq!(list.checked_count(), 0);
    }

    #[test]
    fn test_toggle_and_text() {
        let mut list = ShoppingList::from_recipe(&recipe());
        list.toggle(1);
        list.toggle(7);

        assert!(list.is_checked(1));
        assert!(!list.is_checked(7));
        assert_eq!(list.checked_count(), 1);
        assert_eq!(list.to_text(), "[ ] 1 cup flour\n[x] 2 eggs\n[ ] maple syrup");

        list.toggle(1);
        assert!(!list.is_checked(1));
    }

    #[test]
    fn test_empty_recipe() {
        let list = ShoppingList::from_recipe(&Recipe::default());
        assert!(list.is_empty());
        assert_eq!(list.to_text(), "");
    }
}
