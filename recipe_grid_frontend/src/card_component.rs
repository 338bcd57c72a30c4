use leptos::*;
use recipe_grid_model::Recipe;

use crate::assets::AssetResolver;

#[component]
pub fn RecipeAvatar(title: String, fallback: String, src: Option<String>) -> impl IntoView {
    let avatar = match src {
        Some(src) => view! { <img class = "avatar-image" src = {src} alt = {title} /> }.into_view(),
        None => view! { <span class = "avatar-fallback">{fallback}</span> }.into_view(),
    };
    view! {
        <span class = "avatar">{avatar}</span>
    }
}

#[component]
pub fn VeganBadge() -> impl IntoView {
    view! { <span class = "badge badge-secondary">"Vegan!"</span> }
}

#[component]
pub fn RecipeCard(recipe: Recipe, avatar_src: Option<String>) -> impl IntoView {
    let duration = recipe.duration_text();
    let fallback = recipe.avatar_fallback();
    let Recipe {
        title,
        description,
        vegan,
        id,
        ..
    } = recipe;

    view! {
        <div class = "card flex flex-col justify-between" data-recipe-id = {id.to_string()}>
            <div class = "card-header flex-row gap-4 items-center">
                <RecipeAvatar title = title.clone() fallback src = avatar_src />
                <div>
                    <h3 class = "card-title">{title}</h3>
                    <p class = "card-description">{duration}</p>
                </div>
            </div>
            <div class = "card-content">
                <p>{description}</p>
            </div>
            <div class = "card-footer flex justify-between">
                <button class = "btn">"View Recipe"</button>
                {vegan.then(|| view! { <VeganBadge /> })}
            </div>
        </div>
    }
}

/// Every recipe becomes a card, in the order given.
#[component]
pub fn RecipeGrid(recipes: Vec<Recipe>, assets: AssetResolver) -> impl IntoView {
    let cards = recipes
        .into_iter()
        .map(|recipe| {
            let avatar_src = assets.resolve(&recipe.image);
            view! { <RecipeCard recipe avatar_src /> }
        })
        .collect_view();

    view! {
        <main>
            <div class = "grid grid-cols-3 gap-8">
                {cards}
            </div>
        </main>
    }
}
