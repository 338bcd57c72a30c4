pub mod api;
pub mod assets;
pub mod card_component;

pub mod templates {
    pub mod recipes;
}
