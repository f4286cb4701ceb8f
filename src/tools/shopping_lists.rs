//! Shopping List MCP Tools
//!
//! Tools for consolidating recipe ingredients into shopping lists.

use serde::Serialize;

use super::DeleteResponse;
use crate::consolidate::{self, ConsolidatedIngredient, IngredientItem};
use crate::db::Database;
use crate::models::{PantryItem, Recipe, RecipeIngredient, ShoppingList, ShoppingListItem, ShoppingListSummary};

/// A shopping list with its items
#[derive(Debug, Serialize)]
pub struct ShoppingListDetail {
    pub id: i64,
    pub name: String,
    pub recipe_ids: Vec<i64>,
    pub items: Vec<ShoppingListItem>,
    pub created_at: String,
    pub updated_at: String,
}

/// Response for generate_shopping_list
#[derive(Debug, Serialize)]
pub struct GenerateShoppingListResponse {
    #[serde(flatten)]
    pub list: ShoppingListDetail,
    /// Ingredient lines gathered from the recipes
    pub ingredient_count: usize,
    /// Canonical names left off because they are in the pantry
    pub excluded_pantry_items: Vec<String>,
}

/// Response for list_shopping_lists
#[derive(Debug, Serialize)]
pub struct ListShoppingListsResponse {
    pub shopping_lists: Vec<ShoppingListSummary>,
    pub limit: i64,
    pub offset: i64,
}

/// Consolidate an ad hoc ingredient list without saving anything
pub fn consolidate_ingredients(items: &[IngredientItem]) -> Vec<ConsolidatedIngredient> {
    consolidate::consolidate_ingredients(items)
}

/// Default list name for today
fn default_list_name() -> String {
    format!("Shopping list {}", chrono::Local::now().format("%Y-%m-%d"))
}

/// Build and persist a shopping list from one or more recipes
pub fn generate_shopping_list(
    db: &Database,
    name: Option<&str>,
    recipe_ids: &[i64],
    exclude_pantry: bool,
) -> Result<GenerateShoppingListResponse, String> {
    if recipe_ids.is_empty() {
        return Err("At least one recipe_id is required".to_string());
    }

    let mut ids: Vec<i64> = Vec::with_capacity(recipe_ids.len());
    for id in recipe_ids {
        if !ids.contains(id) {
            ids.push(*id);
        }
    }

    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(default_list_name);

    let (items, pantry) = {
        let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

        let mut items = Vec::new();
        for id in &ids {
            let recipe = Recipe::get_by_id(&conn, *id)
                .map_err(|e| format!("Database error checking recipe: {}", e))?;
            if recipe.is_none() {
                return Err(format!("Recipe not found with id: {}", id));
            }

            let ingredients = RecipeIngredient::get_for_recipe(&conn, *id)
                .map_err(|e| format!("Failed to get ingredients: {}", e))?;
            items.extend(ingredients.iter().map(RecipeIngredient::to_item));
        }

        let pantry = if exclude_pantry {
            PantryItem::canonical_names(&conn)
                .map_err(|e| format!("Failed to read pantry: {}", e))?
        } else {
            Default::default()
        };

        (items, pantry)
    };

    let (consolidated, excluded): (Vec<_>, Vec<_>) = consolidate::consolidate_ingredients(&items)
        .into_iter()
        .partition(|c| !pantry.contains(&c.name));
    let excluded_pantry_items = excluded.into_iter().map(|c| c.name).collect();

    let list = db
        .with_transaction(|tx| {
            let list = ShoppingList::create(tx, &name, &ids)?;
            let mut saved = Vec::with_capacity(consolidated.len());
            for (position, item) in consolidated.iter().enumerate() {
                saved.push(ShoppingListItem::insert_consolidated(tx, list.id, position as i64, item)?);
            }

            Ok(ShoppingListDetail {
                id: list.id,
                name: list.name,
                recipe_ids: ShoppingList::recipe_ids(tx, list.id)?,
                items: saved,
                created_at: list.created_at,
                updated_at: list.updated_at,
            })
        })
        .map_err(|e| format!("Failed to save shopping list: {}", e))?;

    tracing::info!(
        "Generated shopping list {} from {} recipes: {} lines -> {} items",
        list.id,
        ids.len(),
        items.len(),
        list.items.len()
    );

    Ok(GenerateShoppingListResponse {
        list,
        ingredient_count: items.len(),
        excluded_pantry_items,
    })
}

/// Get a shopping list with its items
pub fn get_shopping_list(db: &Database, id: i64) -> Result<Option<ShoppingListDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let list = ShoppingList::get_by_id(&conn, id)
        .map_err(|e| format!("Failed to get shopping list: {}", e))?;

    match list {
        Some(list) => {
            let items = ShoppingListItem::list_for_list(&conn, id)
                .map_err(|e| format!("Failed to get shopping list items: {}", e))?;
            let recipe_ids = ShoppingList::recipe_ids(&conn, id)
                .map_err(|e| format!("Failed to get shopping list recipes: {}", e))?;

            Ok(Some(ShoppingListDetail {
                id: list.id,
                name: list.name,
                recipe_ids,
                items,
                created_at: list.created_at,
                updated_at: list.updated_at,
            }))
        }
        None => Ok(None),
    }
}

/// List shopping lists, newest first
pub fn list_shopping_lists(db: &Database, limit: i64, offset: i64) -> Result<ListShoppingListsResponse, String> {
    let limit = limit.clamp(1, 200);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let shopping_lists = ShoppingList::list_summaries(&conn, limit, offset)
        .map_err(|e| format!("Failed to list shopping lists: {}", e))?;

    Ok(ListShoppingListsResponse {
        shopping_lists,
        limit,
        offset,
    })
}

/// Tick or untick a shopping list item
pub fn set_shopping_list_item_checked(
    db: &Database,
    item_id: i64,
    checked: bool,
) -> Result<Option<ShoppingListItem>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    ShoppingListItem::set_checked(&conn, item_id, checked)
        .map_err(|e| format!("Failed to update shopping list item: {}", e))
}

/// Delete a shopping list and its items
pub fn delete_shopping_list(db: &Database, id: i64) -> Result<DeleteResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = ShoppingList::delete(&conn, id)
        .map_err(|e| format!("Failed to delete shopping list: {}", e))?;
    if !deleted {
        return Err(format!("Shopping list not found with id: {}", id));
    }

    Ok(DeleteResponse {
        success: true,
        deleted_id: id,
    })
}
