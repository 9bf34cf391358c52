pub mod controller;
pub mod recommender;

pub use controller::{AppController, HealthScoreView, Phase, ViewState};
pub use recommender::IngredientPicker;
