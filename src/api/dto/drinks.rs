/*
 * Responsibility
 * - Drinks の request/response DTO
 * - short (name 抜き) / long (全項目) の二表現はここで固定
 */
use serde::{Deserialize, Serialize};

use crate::repos::drink_repo::{DrinkRecord, Ingredient};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientDto {
    pub name: String,
    pub color: String,
    pub parts: i64,
}

impl From<IngredientDto> for Ingredient {
    fn from(dto: IngredientDto) -> Self {
        Ingredient {
            name: dto.name,
            color: dto.color,
            parts: dto.parts,
        }
    }
}

/// Summarized ingredient: the name stays behind the permission gate.
#[derive(Debug, Serialize)]
pub struct IngredientShortDto {
    pub color: String,
    pub parts: i64,
}

#[derive(Debug, Serialize)]
pub struct DrinkLong {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<IngredientDto>,
}

impl DrinkLong {
    pub fn from_record(record: DrinkRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            recipe: record
                .recipe
                .into_iter()
                .map(|i| IngredientDto {
                    name: i.name,
                    color: i.color,
                    parts: i.parts,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DrinkShort {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<IngredientShortDto>,
}

impl DrinkShort {
    pub fn from_record(record: DrinkRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            recipe: record
                .recipe
                .into_iter()
                .map(|i| IngredientShortDto {
                    color: i.color,
                    parts: i.parts,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<Vec<IngredientDto>>,
}

impl CreateDrinkRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        match &self.title {
            Some(title) if !title.trim().is_empty() => {}
            _ => return Err("title is required"),
        }
        match &self.recipe {
            Some(recipe) if !recipe.is_empty() => {}
            _ => return Err("recipe is required"),
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<Vec<IngredientDto>>,
}

impl UpdateDrinkRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct DrinksShortResponse {
    pub success: bool,
    pub drinks: Vec<DrinkShort>,
}

#[derive(Debug, Serialize)]
pub struct DrinksLongResponse {
    pub success: bool,
    pub drinks: Vec<DrinkLong>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: Vec<DrinkLong>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i64,
}
