pub mod card;
pub mod config;
pub mod geometry;

pub use card::{CardFace, DataPoint, Ingredient, IngredientCard};
pub use config::RecognizerConfig;
pub use geometry::Point;
