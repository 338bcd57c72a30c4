use leptos::*;
use recipe_grid_model::Recipe;

use crate::assets::AssetResolver;
use crate::card_component::RecipeGrid;

pub const PAGE_TITLE: &str = "Recipes";
pub const STYLESHEET_PATH: &str = "/index.css";

/// Renders the grid of cards on its own, without the document shell.
pub fn render_recipe_grid(recipes: Vec<Recipe>, assets: &AssetResolver) -> String {
    let assets = assets.clone();
    leptos::ssr::render_to_string(move || {
        view! { <RecipeGrid recipes assets /> }
    })
    .to_string()
}

/// The complete listing page as an HTML document.
pub fn render_recipes_page(recipes: Vec<Recipe>, assets: &AssetResolver) -> String {
    let body = render_recipe_grid(recipes, assets);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{PAGE_TITLE}</title>
<link rel="stylesheet" href="{STYLESHEET_PATH}">
</head>
<body>
{body}
</body>
</html>
"#
    )
}
