//! Catalog tools exposed over JSON-RPC.
//!
//! Each tool takes named parameters and returns a JSON value. Unknown ids and
//! invalid selector labels surface as not-found errors; malformed parameters
//! as invalid-params errors.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::catalog::{Catalog, Category, Difficulty, UpgradePath};
use crate::error::CatalogError;
use crate::server::{RpcError, INTERNAL_ERROR};

pub type Params = Map<String, Value>;

/// Signature every tool handler implements.
pub type ToolHandler = fn(&Catalog, &Params) -> Result<Value, RpcError>;

/// Advertised description of one tool, as returned by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// A tool and the function that serves it.
#[derive(Clone)]
pub struct Tool {
    pub spec: ToolSpec,
    pub handler: ToolHandler,
}

fn tool(spec: ToolSpec, handler: ToolHandler) -> Tool {
    Tool { spec, handler }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::new(INTERNAL_ERROR, e.to_string()))
}

fn required_str<'a>(params: &'a Params, key: &str) -> Result<&'a str, RpcError> {
    match params.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(RpcError::invalid_params(format!("`{key}` must be a string"))),
        None => Err(RpcError::invalid_params(format!("missing parameter `{key}`"))),
    }
}

fn optional_str<'a>(params: &'a Params, key: &str) -> Result<Option<&'a str>, RpcError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(RpcError::invalid_params(format!("`{key}` must be a string"))),
    }
}

fn difficulty(params: &Params) -> Result<Difficulty, RpcError> {
    Ok(optional_str(params, "difficulty")?
        .map(str::parse::<Difficulty>)
        .transpose()?
        .unwrap_or_default())
}

fn path(params: &Params) -> Result<UpgradePath, RpcError> {
    required_str(params, "path")?
        .parse::<UpgradePath>()
        .map_err(RpcError::from)
}

fn tier(params: &Params) -> Result<u8, RpcError> {
    params
        .get("tier")
        .and_then(Value::as_u64)
        .and_then(|t| u8::try_from(t).ok())
        .ok_or_else(|| RpcError::invalid_params("`tier` must be an integer between 0 and 255"))
}

fn get_tower_info(catalog: &Catalog, params: &Params) -> Result<Value, RpcError> {
    let id = required_str(params, "tower_id")?;
    let tower = catalog
        .get_tower(id)
        .ok_or_else(|| CatalogError::not_found("tower", id))?;
    to_json(tower)
}

fn get_hero_info(catalog: &Catalog, params: &Params) -> Result<Value, RpcError> {
    let id = required_str(params, "hero_id")?;
    let hero = catalog
        .get_hero(id)
        .ok_or_else(|| CatalogError::not_found("hero", id))?;
    to_json(hero)
}

fn list_all_towers(catalog: &Catalog, params: &Params) -> Result<Value, RpcError> {
    let category = optional_str(params, "category")?
        .map(str::parse::<Category>)
        .transpose()?;
    to_json(&catalog.list_towers(category))
}

fn list_all_heroes(catalog: &Catalog, _params: &Params) -> Result<Value, RpcError> {
    to_json(&catalog.list_heroes())
}

fn search_towers(catalog: &Catalog, params: &Params) -> Result<Value, RpcError> {
    to_json(&catalog.search_towers(required_str(params, "query")?))
}

fn search_heroes(catalog: &Catalog, params: &Params) -> Result<Value, RpcError> {
    to_json(&catalog.search_heroes(required_str(params, "query")?))
}

fn compare_tower_costs(catalog: &Catalog, params: &Params) -> Result<Value, RpcError> {
    let ids = match params.get("tower_ids") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| {
                v.as_str()
                    .ok_or_else(|| RpcError::invalid_params("`tower_ids` must contain strings"))
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(RpcError::invalid_params("`tower_ids` must be an array")),
        None => return Err(RpcError::invalid_params("missing parameter `tower_ids`")),
    };
    to_json(&catalog.compare_costs(ids, difficulty(params)?))
}

fn get_upgrade_path(catalog: &Catalog, params: &Params) -> Result<Value, RpcError> {
    let upgrades = catalog.upgrade_path(required_str(params, "tower_id")?, path(params)?)?;
    to_json(&upgrades)
}

fn calculate_total_upgrade_cost(catalog: &Catalog, params: &Params) -> Result<Value, RpcError> {
    let cost = catalog.upgrade_path_cost(
        required_str(params, "tower_id")?,
        path(params)?,
        tier(params)?,
        difficulty(params)?,
    )?;
    to_json(&cost)
}

fn catalog_summary(catalog: &Catalog, _params: &Params) -> Result<Value, RpcError> {
    to_json(&catalog.summary())
}

const DIFFICULTIES: [&str; 4] = ["easy", "medium", "hard", "impoppable"];
const PATHS: [&str; 3] = ["top", "middle", "bottom"];

/// Every tool with its handler, in advertised order.
#[must_use]
pub fn builtin_tools() -> Vec<Tool> {
    let no_params = json!({ "type": "object", "properties": {} });
    vec![
        tool(
            ToolSpec {
                name: "get_tower_info",
                description: "Get detailed information about a tower including base stats and upgrades.",
                input_schema: json!({
                    "type": "object",
                    "properties": { "tower_id": { "type": "string", "description": "e.g. dart_monkey" } },
                    "required": ["tower_id"],
                }),
            },
            get_tower_info,
        ),
        tool(
            ToolSpec {
                name: "get_hero_info",
                description: "Get detailed information about a hero.",
                input_schema: json!({
                    "type": "object",
                    "properties": { "hero_id": { "type": "string", "description": "e.g. quincy" } },
                    "required": ["hero_id"],
                }),
            },
            get_hero_info,
        ),
        tool(
            ToolSpec {
                name: "list_all_towers",
                description: "List all towers, optionally filtered by category.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "enum": ["Primary", "Military", "Magic", "Support"] },
                    },
                }),
            },
            list_all_towers,
        ),
        tool(
            ToolSpec {
                name: "list_all_heroes",
                description: "List all heroes.",
                input_schema: no_params.clone(),
            },
            list_all_heroes,
        ),
        tool(
            ToolSpec {
                name: "search_towers",
                description: "Search towers by name, description or upgrade text (case-insensitive).",
                input_schema: json!({
                    "type": "object",
                    "properties": { "query": { "type": "string" } },
                    "required": ["query"],
                }),
            },
            search_towers,
        ),
        tool(
            ToolSpec {
                name: "search_heroes",
                description: "Search heroes by name, description or ability (case-insensitive).",
                input_schema: json!({
                    "type": "object",
                    "properties": { "query": { "type": "string" } },
                    "required": ["query"],
                }),
            },
            search_heroes,
        ),
        tool(
            ToolSpec {
                name: "compare_tower_costs",
                description: "Compare base costs of several towers on one difficulty; unknown ids are reported as not_found.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "tower_ids": { "type": "array", "items": { "type": "string" } },
                        "difficulty": { "type": "string", "enum": DIFFICULTIES, "default": "medium" },
                    },
                    "required": ["tower_ids"],
                }),
            },
            compare_tower_costs,
        ),
        tool(
            ToolSpec {
                name: "get_upgrade_path",
                description: "Get the upgrades of one tower path, ordered by tier.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "tower_id": { "type": "string" },
                        "path": { "type": "string", "enum": PATHS },
                    },
                    "required": ["tower_id", "path"],
                }),
            },
            get_upgrade_path,
        ),
        tool(
            ToolSpec {
                name: "calculate_total_upgrade_cost",
                description: "Total cost to buy a tower and upgrade one path up to a tier.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "tower_id": { "type": "string" },
                        "path": { "type": "string", "enum": PATHS },
                        "tier": { "type": "integer", "minimum": 0, "maximum": 5 },
                        "difficulty": { "type": "string", "enum": DIFFICULTIES, "default": "medium" },
                    },
                    "required": ["tower_id", "path", "tier"],
                }),
            },
            calculate_total_upgrade_cost,
        ),
        tool(
            ToolSpec {
                name: "catalog_summary",
                description: "Tower, hero and upgrade counts with towers per category.",
                input_schema: no_params,
            },
            catalog_summary,
        ),
    ]
}
