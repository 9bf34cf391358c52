use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::recommender::IngredientPicker;
use crate::models::{HealthScoreAnalysis, NutritionAnalysis, UpgradedRecipe};
use crate::services::AIService;

/// How long a closed health-score modal keeps its payload for the closing animation.
pub const HEALTH_SCORE_SETTLE_DELAY: Duration = Duration::from_millis(300);

pub const MSG_EMPTY_QUERY: &str = "음식 이름을 입력해주세요!";
pub const MSG_SEARCH_FAILED: &str = "정보를 가져오는 데 실패했어요. 다시 시도해 주세요.";
pub const MSG_RECIPE_FAILED: &str = "레시피를 만드는 데 실패했어요. 다시 시도해 주세요.";
pub const MSG_HEALTH_SCORE_FAILED: &str = "건강 점수를 계산하는 데 실패했어요. 다시 시도해 주세요.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LoadingSearch,
    SearchError,
    Results,
    UpgradeSelect,
    LoadingRecipe,
    RecipeError,
    RecipeShown,
}

/// What the health-score overlay shows. Loading wins over error, error over data.
#[derive(Debug, Clone, PartialEq)]
pub enum HealthScoreView {
    Hidden,
    Loading,
    Error(String),
    Score(HealthScoreAnalysis),
}

/// Bumped whenever a phase is started or reset; results carrying an older value are dropped.
#[derive(Debug, Clone, Copy, Default)]
struct Epochs {
    search: u64,
    recipe: u64,
    health_score: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub food_name: String,
    pub analysis: Option<NutritionAnalysis>,
    pub is_loading: bool,
    pub search_error: Option<String>,

    pub upgrade_view_visible: bool,
    pub picker: IngredientPicker,
    pub is_upgrading: bool,
    pub upgraded_recipe: Option<UpgradedRecipe>,
    pub recipe_error: Option<String>,

    pub is_checking_health_score: bool,
    pub health_score: Option<HealthScoreAnalysis>,
    pub health_score_error: Option<String>,
    pub is_health_score_modal_open: bool,

    epochs: Epochs,
}

impl ViewState {
    pub fn phase(&self) -> Phase {
        if self.upgrade_view_visible && self.analysis.is_some() {
            if self.is_upgrading {
                Phase::LoadingRecipe
            } else if self.upgraded_recipe.is_some() {
                Phase::RecipeShown
            } else if self.recipe_error.is_some() {
                Phase::RecipeError
            } else {
                Phase::UpgradeSelect
            }
        } else if self.is_loading {
            Phase::LoadingSearch
        } else if self.search_error.is_some() {
            Phase::SearchError
        } else if self.analysis.is_some() {
            Phase::Results
        } else {
            Phase::Idle
        }
    }

    pub fn health_score_view(&self) -> HealthScoreView {
        if !self.is_health_score_modal_open {
            return HealthScoreView::Hidden;
        }
        if self.is_checking_health_score {
            return HealthScoreView::Loading;
        }
        if let Some(error) = &self.health_score_error {
            return HealthScoreView::Error(error.clone());
        }
        match &self.health_score {
            Some(score) => HealthScoreView::Score(score.clone()),
            None => HealthScoreView::Loading,
        }
    }

    fn clear_recipe(&mut self) {
        self.is_upgrading = false;
        self.upgraded_recipe = None;
        self.recipe_error = None;
        self.epochs.recipe += 1;
    }

    fn clear_health_score(&mut self) {
        self.is_checking_health_score = false;
        self.health_score = None;
        self.health_score_error = None;
        self.is_health_score_modal_open = false;
        self.epochs.health_score += 1;
    }
}

struct Inner {
    api: Arc<dyn AIService>,
    state: Mutex<ViewState>,
    settle_delay: Duration,
}

/// Top-level view-state machine. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct AppController {
    inner: Arc<Inner>,
}

impl AppController {
    pub fn new(api: Arc<dyn AIService>) -> Self {
        Self::with_settle_delay(api, HEALTH_SCORE_SETTLE_DELAY)
    }

    pub fn with_settle_delay(api: Arc<dyn AIService>, settle_delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                state: Mutex::new(ViewState::default()),
                settle_delay,
            }),
        }
    }

    pub async fn snapshot(&self) -> ViewState {
        self.inner.state.lock().await.clone()
    }

    pub async fn set_food_name(&self, food_name: impl Into<String>) {
        self.inner.state.lock().await.food_name = food_name.into();
    }

    pub async fn submit_search(&self) {
        let (query, epoch) = {
            let mut s = self.inner.state.lock().await;
            if s.food_name.trim().is_empty() {
                log::warn!("⚠️ Empty food name, search not sent");
                s.search_error = Some(MSG_EMPTY_QUERY.to_string());
                return;
            }

            s.is_loading = true;
            s.analysis = None;
            s.search_error = None;
            s.upgrade_view_visible = false;
            s.clear_recipe();
            s.clear_health_score();
            s.epochs.search += 1;
            (s.food_name.clone(), s.epochs.search)
        };

        log::info!("🔍 Searching nutrition info for '{}'", query);
        let result = self.inner.api.fetch_nutrition_info(&query).await;

        let mut s = self.inner.state.lock().await;
        if s.epochs.search != epoch {
            log::warn!("⚠️ Discarding stale search result for '{}'", query);
            return;
        }
        s.is_loading = false;
        match result {
            Ok(analysis) => {
                log::info!("✅ Analysis ready for '{}'", analysis.food_name);
                s.analysis = Some(analysis);
            }
            Err(e) => {
                log::error!("❌ Search failed: {:#}", e);
                s.search_error = Some(MSG_SEARCH_FAILED.to_string());
            }
        }
    }

    /// Opens the upgrade view with a fresh recommendation. Needs an analysis.
    pub async fn enter_upgrade_view(&self) -> bool {
        let mut s = self.inner.state.lock().await;
        if s.analysis.is_none() || s.is_loading {
            return false;
        }
        s.upgrade_view_visible = true;
        s.picker.recommend();
        log::info!("🚀 Upgrade view opened");
        true
    }

    pub async fn recommend_again(&self) {
        let mut s = self.inner.state.lock().await;
        if s.phase() == Phase::UpgradeSelect || s.phase() == Phase::RecipeError {
            s.picker.recommend();
        }
    }

    pub async fn toggle_ingredient(&self, label: &str) -> bool {
        let mut s = self.inner.state.lock().await;
        if s.is_upgrading || s.upgraded_recipe.is_some() || !s.upgrade_view_visible {
            return false;
        }
        s.picker.toggle(label)
    }

    pub async fn submit_recipe(&self) {
        let (food_name, ingredients, epoch) = {
            let mut s = self.inner.state.lock().await;
            let food_name = match &s.analysis {
                Some(analysis) if s.upgrade_view_visible && !s.is_upgrading => {
                    analysis.food_name.clone()
                }
                _ => return,
            };
            let ingredients = s.picker.plain_selection();
            if ingredients.is_empty() {
                log::warn!("⚠️ No ingredients selected, recipe not requested");
                return;
            }

            s.clear_recipe();
            s.is_upgrading = true;
            s.search_error = None;
            s.clear_health_score();
            (food_name, ingredients, s.epochs.recipe)
        };

        log::info!("🍳 Generating recipe: '{}' + {:?}", food_name, ingredients);
        let result = self
            .inner
            .api
            .generate_upgraded_recipe(&food_name, &ingredients)
            .await;

        let mut s = self.inner.state.lock().await;
        if s.epochs.recipe != epoch {
            log::warn!("⚠️ Discarding stale recipe for '{}'", food_name);
            return;
        }
        s.is_upgrading = false;
        match result {
            Ok(recipe) => s.upgraded_recipe = Some(recipe),
            Err(e) => {
                log::error!("❌ Recipe generation failed: {:#}", e);
                s.recipe_error = Some(MSG_RECIPE_FAILED.to_string());
            }
        }
    }

    pub async fn check_health_score(&self) {
        let (recipe, epoch) = {
            let mut s = self.inner.state.lock().await;
            let recipe = match &s.upgraded_recipe {
                Some(recipe) if !s.is_checking_health_score => recipe.clone(),
                _ => return,
            };

            s.clear_health_score();
            s.is_health_score_modal_open = true;
            s.is_checking_health_score = true;
            (recipe, s.epochs.health_score)
        };

        log::info!("💯 Checking health score for '{}'", recipe.recipe_name);
        let result = self.inner.api.fetch_health_score(&recipe).await;

        let mut s = self.inner.state.lock().await;
        if s.epochs.health_score != epoch {
            log::warn!("⚠️ Discarding stale health score for '{}'", recipe.recipe_name);
            return;
        }
        s.is_checking_health_score = false;
        match result {
            Ok(score) => s.health_score = Some(score),
            Err(e) => {
                log::error!("❌ Health score failed: {:#}", e);
                s.health_score_error = Some(MSG_HEALTH_SCORE_FAILED.to_string());
            }
        }
    }

    /// Hides the modal now; its payload is dropped after the settle delay
    /// unless the modal was reopened in the meantime.
    pub async fn close_health_score_modal(&self) {
        let epoch = {
            let mut s = self.inner.state.lock().await;
            s.is_health_score_modal_open = false;
            s.is_checking_health_score = false;
            s.epochs.health_score += 1;
            s.epochs.health_score
        };

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.settle_delay).await;
            let mut s = inner.state.lock().await;
            if s.epochs.health_score == epoch {
                s.health_score = None;
                s.health_score_error = None;
            }
        });
    }

    pub async fn back_to_analysis(&self) {
        let mut s = self.inner.state.lock().await;
        s.upgrade_view_visible = false;
        s.search_error = None;
        s.clear_recipe();
        s.clear_health_score();
    }

    pub async fn reset_recipe(&self) {
        let mut s = self.inner.state.lock().await;
        s.search_error = None;
        s.clear_recipe();
        s.clear_health_score();
    }

    pub async fn go_home(&self) {
        let mut s = self.inner.state.lock().await;
        s.food_name.clear();
        s.analysis = None;
        s.is_loading = false;
        s.search_error = None;
        s.epochs.search += 1;
        s.upgrade_view_visible = false;
        s.clear_recipe();
        s.clear_health_score();
        log::info!("🏠 Back to welcome screen");
    }
}
