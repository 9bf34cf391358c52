use anyhow::Result;
use dotenv::dotenv;
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use nutrition_teacher::config::ClientConfig;
use nutrition_teacher::handlers::{AppController, HealthScoreView, Phase, ViewState};
use nutrition_teacher::models::NutritionAnalysis;
use nutrition_teacher::services::ProxyGateway;

const HELP: &str = "\
💬 명령어:
   <음식 이름>   영양 정보 검색
   /upgrade     건강 식단으로 Upgrade!
   1-12         재료 선택/해제 (최대 3개)
   /again       재료 다시 추천받기
   /cook        요리 시작!
   /score       건강 점수 확인
   /close       건강 점수 창 닫기
   /reset       다른 재료로 다시 만들기
   /back        분석 결과로 돌아가기
   /home        처음으로
   /quit        종료";

/// What a non-command line means in the current phase.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Toggle(&'static str),
    Search,
    Ignore,
}

fn route_input(phase: Phase, input: &str, offered: &[&'static str]) -> Input {
    let choice = input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| offered.get(i).copied());

    match (phase, choice) {
        (Phase::UpgradeSelect | Phase::RecipeError, Some(label)) => Input::Toggle(label),
        (
            Phase::UpgradeSelect | Phase::RecipeError | Phase::LoadingRecipe | Phase::RecipeShown,
            _,
        ) => Input::Ignore,
        _ => Input::Search,
    }
}

fn render(s: &ViewState) -> String {
    let mut out = String::new();
    match s.phase() {
        Phase::Idle => line(&mut out, "🥗 궁금한 음식의 영양 정보를 쉽고 재미있게 알아봐요!"),
        Phase::LoadingSearch => line(&mut out, "⏳ 영양 정보를 찾고 있어요..."),
        Phase::SearchError => {
            line(&mut out, &format!("❗ 오류! {}", s.search_error.as_deref().unwrap_or("")));
            // validation failures keep the previous analysis on screen
            if let Some(a) = &s.analysis {
                render_analysis(&mut out, a);
            }
        }
        Phase::Results => {
            if let Some(a) = &s.analysis {
                render_analysis(&mut out, a);
            }
        }
        Phase::UpgradeSelect | Phase::RecipeError => {
            if let Some(error) = &s.recipe_error {
                line(&mut out, &format!("❗ 오류! {}", error));
            }
            let food = s.analysis.as_ref().map(|a| a.food_name.as_str()).unwrap_or("");
            line(
                &mut out,
                &format!("🔼 {} 건강하게 Level Up! (최대 3개까지 선택할 수 있어요!)", food),
            );
            for (i, label) in s.picker.offered().iter().enumerate() {
                let mark = if s.picker.is_selected(label) {
                    "✅"
                } else if s.picker.is_disabled(label) {
                    "🚫"
                } else {
                    "  "
                };
                line(&mut out, &format!("   {:>2}. {} {}", i + 1, mark, label));
            }
        }
        Phase::LoadingRecipe => line(&mut out, "🍳 맛있는 레시피를 만들고 있어요!"),
        Phase::RecipeShown => {
            if let Some(r) = &s.upgraded_recipe {
                line(&mut out, &format!("👩‍🍳 {}", r.recipe_name));
                line(&mut out, &format!("   {}", r.description));
                render_list(&mut out, "🧺 준비물", &r.ingredients);
                for (i, step) in r.steps.iter().enumerate() {
                    line(&mut out, &format!("   {}. {}", i + 1, step));
                }
                if let Some(tip) = &r.tip {
                    line(&mut out, &format!("   💡 {}", tip));
                }
            }
        }
    }

    match s.health_score_view() {
        HealthScoreView::Hidden => {}
        HealthScoreView::Loading => line(&mut out, "\n💯 건강 점수를 계산하고 있어요..."),
        HealthScoreView::Error(error) => line(&mut out, &format!("\n💯 {}", error)),
        HealthScoreView::Score(score) => {
            line(&mut out, &format!("\n💯 건강 점수: {}점", score.score));
            line(&mut out, &format!("   {}", score.comment));
        }
    }
    out
}

fn render_analysis(out: &mut String, a: &NutritionAnalysis) {
    let f = &a.nutrition_facts;
    line(out, &format!("🍽️ {}", a.food_name));
    line(out, &format!("   재료: {}", a.ingredients.join(", ")));
    line(
        out,
        &format!(
            "   열량 {} | 탄수화물 {}g | 단백질 {}g | 지방 {}g",
            f.calories, f.carbs, f.protein, f.fat
        ),
    );
    line(out, &format!("   비타민: {}", f.vitamins));
    render_list(out, "👍 좋은 점", &a.pros);
    render_list(out, "🤔 아쉬운 점", &a.cons);
    render_list(out, "💡 더 건강하게", &a.tips);
    line(out, "\n   /upgrade 로 건강 식단 만들기 🚀");
}

fn render_list(out: &mut String, title: &str, items: &[String]) {
    line(out, &format!("   {}", title));
    for item in items {
        line(out, &format!("     • {}", item));
    }
}

fn line(out: &mut String, text: &str) {
    let _ = writeln!(out, "{}", text);
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = ClientConfig::from_env();
    log::info!("🌐 Using proxy at {}", config.proxy_url);

    let controller = AppController::new(Arc::new(ProxyGateway::new(config.proxy_url)));

    println!("🥗 AI 영양 선생님 🧑‍🏫\n{}", HELP);
    println!("\n{}", render(&controller.snapshot().await));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(raw) = lines.next_line().await? {
        let input = raw.trim();
        match input {
            "/quit" => break,
            "/help" => println!("{}", HELP),
            "/upgrade" => {
                controller.enter_upgrade_view().await;
            }
            "/again" => controller.recommend_again().await,
            "/cook" => controller.submit_recipe().await,
            "/score" => controller.check_health_score().await,
            "/close" => controller.close_health_score_modal().await,
            "/reset" => controller.reset_recipe().await,
            "/back" => controller.back_to_analysis().await,
            "/home" => controller.go_home().await,
            _ => {
                let state = controller.snapshot().await;
                match route_input(state.phase(), input, state.picker.offered()) {
                    Input::Toggle(label) => {
                        controller.toggle_ingredient(label).await;
                    }
                    Input::Search => {
                        controller.set_food_name(input).await;
                        controller.submit_search().await;
                    }
                    Input::Ignore => {
                        println!("💬 재료 번호나 명령어를 입력해 주세요. 검색하려면 /home 으로 돌아가요.");
                        continue;
                    }
                }
            }
        }
        println!("\n{}", render(&controller.snapshot().await));
    }

    Ok(())
}
