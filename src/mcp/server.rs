//! Larder MCP Server Implementation
//!
//! Implements the MCP server with all Larder tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::consolidate::IngredientItem;
use crate::db::Database;
use crate::models::{PantryItemCreate, RecipeCreate, RecipeIngredientCreate};
use crate::tools::pantry;
use crate::tools::recipes;
use crate::tools::shopping_lists;
use crate::tools::status::StatusTracker;

/// Larder MCP Service
#[derive(Clone)]
pub struct LarderService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<LarderService>,
}

impl LarderService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

/// Serialize a tool result as pretty JSON text content
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Recipe Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateRecipeParams {
    /// Recipe name
    pub name: String,
    /// Number of servings the recipe makes
    #[serde(default = "default_servings")]
    pub servings: f64,
    pub notes: Option<String>,
}

fn default_servings() -> f64 { 1.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetRecipeParams {
    /// Recipe ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListRecipesParams {
    /// Filter recipes whose name contains this text
    pub query: Option<String>,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 50 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteRecipeParams {
    /// Recipe ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddRecipeIngredientParams {
    /// Recipe ID
    pub recipe_id: i64,
    /// Ingredient name as written in the recipe (e.g., "diced roma tomatoes")
    pub name: String,
    /// Amount as written: "2", "1/2", "1 1/2", "0.75", "½". Empty for "to taste".
    #[serde(default)]
    pub quantity: String,
    /// Unit such as "cup", "tbsp", "g", "lb". Omit for plain counts.
    pub unit: Option<String>,
    /// Store category override (e.g., "snacks")
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveRecipeIngredientParams {
    /// Recipe ingredient ID
    pub id: i64,
}

// ============================================================================
// Shopping List Parameter Structs
// ============================================================================

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct IngredientParam {
    /// Ingredient name as written
    pub name: String,
    /// Amount as text or number ("1 1/2", "0.5", 2)
    #[serde(default)]
    pub quantity: Option<serde_json::Value>,
    pub unit: Option<String>,
    /// Category name, or a list whose first entry is used
    #[serde(default)]
    pub category: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConsolidateIngredientsParams {
    /// Ingredients to merge
    pub items: Vec<IngredientParam>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateShoppingListParams {
    /// Recipes to shop for
    pub recipe_ids: Vec<i64>,
    /// List name (defaults to "Shopping list YYYY-MM-DD")
    pub name: Option<String>,
    /// Leave off ingredients already in the pantry
    #[serde(default)]
    pub exclude_pantry: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetShoppingListParams {
    /// Shopping list ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListShoppingListsParams {
    #[serde(default = "default_shopping_list_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_shopping_list_limit() -> i64 { 20 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetShoppingListItemCheckedParams {
    /// Shopping list item ID
    pub item_id: i64,
    #[serde(default = "default_checked")]
    pub checked: bool,
}

fn default_checked() -> bool { true }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteShoppingListParams {
    /// Shopping list ID
    pub id: i64,
}

// ============================================================================
// Pantry Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddPantryItemParams {
    /// Ingredient name; stored in canonical form
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    pub unit: Option<String>,
    /// Store category (derived from the name when omitted)
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemovePantryItemParams {
    /// Pantry item ID
    pub id: i64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl LarderService {
    // --- Status ---

    #[tool(description = "Get the current status of the Larder service including build info, database status, and process information")]
    async fn larder_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&status)
    }

    #[tool(description = "Get step-by-step instructions for turning recipes into a shopping list. Call this when starting a meal planning session.")]
    fn shopping_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::SHOPPING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(SHOPPING_INSTRUCTIONS)]))
    }

    // --- Recipes ---

    #[tool(description = "Create a new recipe")]
    fn create_recipe(&self, Parameters(p): Parameters<CreateRecipeParams>) -> Result<CallToolResult, McpError> {
        let data = RecipeCreate { name: p.name, servings: p.servings, notes: p.notes };
        let result = recipes::create_recipe(&self.database, data).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get a recipe with its ingredient lines")]
    fn get_recipe(&self, Parameters(p): Parameters<GetRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::get_recipe(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(recipe) => serde_json::to_string_pretty(&recipe),
            None => Ok(format!(r#"{{"error": "Recipe not found", "id": {}}}"#, p.id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List recipes with optional name search and pagination")]
    fn list_recipes(&self, Parameters(p): Parameters<ListRecipesParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::list_recipes(&self.database, p.query.as_deref(), p.limit, p.offset)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Delete a recipe and all of its ingredient lines")]
    fn delete_recipe(&self, Parameters(p): Parameters<DeleteRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::delete_recipe(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Add an ingredient line to a recipe, written the way the recipe states it")]
    fn add_recipe_ingredient(&self, Parameters(p): Parameters<AddRecipeIngredientParams>) -> Result<CallToolResult, McpError> {
        let data = RecipeIngredientCreate {
            recipe_id: p.recipe_id, name: p.name, quantity: p.quantity, unit: p.unit, category: p.category,
        };
        let result = recipes::add_recipe_ingredient(&self.database, data).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Remove an ingredient line from a recipe")]
    fn remove_recipe_ingredient(&self, Parameters(p): Parameters<RemoveRecipeIngredientParams>) -> Result<CallToolResult, McpError> {
        let removed = recipes::remove_recipe_ingredient(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = if removed {
            format!(r#"{{"success": true, "deleted_id": {}}}"#, p.id)
        } else {
            format!(r#"{{"error": "Recipe ingredient not found", "id": {}}}"#, p.id)
        };
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Shopping Lists ---

    #[tool(description = "Merge a list of ingredients: combine matching names, sum quantities across compatible units, assign store categories and flag bulk purchases. Nothing is saved.")]
    fn consolidate_ingredients(&self, Parameters(p): Parameters<ConsolidateIngredientsParams>) -> Result<CallToolResult, McpError> {
        let raw = serde_json::to_value(&p.items).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        let items: Vec<IngredientItem> = serde_json::from_value(raw)
            .map_err(|e| McpError::invalid_params(format!("Invalid ingredient list: {}", e), None))?;
        let result = shopping_lists::consolidate_ingredients(&items);
        json_result(&result)
    }

    #[tool(description = "Generate and save a consolidated shopping list from one or more recipes, optionally leaving off pantry items")]
    fn generate_shopping_list(&self, Parameters(p): Parameters<GenerateShoppingListParams>) -> Result<CallToolResult, McpError> {
        let result = shopping_lists::generate_shopping_list(&self.database, p.name.as_deref(), &p.recipe_ids, p.exclude_pantry)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get a shopping list with its items and the recipes it was built from")]
    fn get_shopping_list(&self, Parameters(p): Parameters<GetShoppingListParams>) -> Result<CallToolResult, McpError> {
        let result = shopping_lists::get_shopping_list(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(list) => serde_json::to_string_pretty(&list),
            None => Ok(format!(r#"{{"error": "Shopping list not found", "id": {}}}"#, p.id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List shopping lists, newest first, with item and checked counts")]
    fn list_shopping_lists(&self, Parameters(p): Parameters<ListShoppingListsParams>) -> Result<CallToolResult, McpError> {
        let result = shopping_lists::list_shopping_lists(&self.database, p.limit, p.offset)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Check or uncheck a shopping list item")]
    fn set_shopping_list_item_checked(&self, Parameters(p): Parameters<SetShoppingListItemCheckedParams>) -> Result<CallToolResult, McpError> {
        let result = shopping_lists::set_shopping_list_item_checked(&self.database, p.item_id, p.checked)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(item) => serde_json::to_string_pretty(&item),
            None => Ok(format!(r#"{{"error": "Shopping list item not found", "id": {}}}"#, p.item_id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Delete a shopping list and its items")]
    fn delete_shopping_list(&self, Parameters(p): Parameters<DeleteShoppingListParams>) -> Result<CallToolResult, McpError> {
        let result = shopping_lists::delete_shopping_list(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Pantry ---

    #[tool(description = "Add an ingredient to the pantry, or update its amount if already stocked")]
    fn add_pantry_item(&self, Parameters(p): Parameters<AddPantryItemParams>) -> Result<CallToolResult, McpError> {
        let data = PantryItemCreate { name: p.name, quantity: p.quantity, unit: p.unit, category: p.category };
        let result = pantry::add_pantry_item(&self.database, data).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "List all pantry items")]
    fn list_pantry_items(&self) -> Result<CallToolResult, McpError> {
        let result = pantry::list_pantry_items(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Remove an item from the pantry")]
    fn remove_pantry_item(&self, Parameters(p): Parameters<RemovePantryItemParams>) -> Result<CallToolResult, McpError> {
        let result = pantry::remove_pantry_item(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for LarderService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "larder".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Larder".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Larder - recipes, pantry and consolidated shopping lists. \
                 IMPORTANT: Call shopping_instructions before building a shopping list. \
                 Recipes: create/get/list/delete_recipe, add/remove_recipe_ingredient. \
                 Shopping lists: generate_shopping_list, get/list/delete_shopping_list, set_shopping_list_item_checked. \
                 Pantry: add/list/remove_pantry_item. \
                 Preview: consolidate_ingredients merges an ad hoc ingredient list without saving."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_db;

    fn text(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_consolidate_tool_accepts_lenient_input() {
        let (dir, db) = test_db();
        let service = LarderService::new(dir.path().join("larder.db"), db);

        let params: ConsolidateIngredientsParams = serde_json::from_value(serde_json::json!({
            "items": [
                {"name": "flour", "quantity": 3, "unit": "cups"},
                {"name": "all-purpose flour", "quantity": "2", "unit": "cups"},
                {"name": "trail mix", "quantity": "1", "unit": "bag", "category": ["snacks"]}
            ]
        }))
        .unwrap();

        let result = service.consolidate_ingredients(Parameters(params)).unwrap();
        let output: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();
        assert_eq!(output[0]["name"], "flour");
        assert_eq!(output[0]["quantity"], "5");
        assert_eq!(output[0]["bulkBuying"], true);
        assert_eq!(output[1]["category"], "snacks");
    }

    #[test]
    fn test_missing_records_render_error_objects() {
        let (dir, db) = test_db();
        let service = LarderService::new(dir.path().join("larder.db"), db);

        let result = service.get_recipe(Parameters(GetRecipeParams { id: 12 })).unwrap();
        let output: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();
        assert_eq!(output["error"], "Recipe not found");
        assert_eq!(output["id"], 12);

        let result = service.get_shopping_list(Parameters(GetShoppingListParams { id: 3 })).unwrap();
        let output: serde_json::Value = serde_json::from_str(&text(&result)).unwrap();
        assert_eq!(output["error"], "Shopping list not found");
    }
}
