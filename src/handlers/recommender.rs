use rand::seq::SliceRandom;
use rand::Rng;

/// Number of choices offered per recommendation.
pub const RECOMMENDATION_SIZE: usize = 12;
/// Maximum number of choices that can be selected at once.
pub const MAX_SELECTED: usize = 3;

/// Labelled upgrade ingredients ("name glyph").
pub const INGREDIENT_VOCABULARY: &[&str] = &[
    // 채소
    "버섯 🍄", "브로콜리 🥦", "파프리카 🌈", "양파 🧅", "토마토 🍅", "옥수수 🌽",
    "시금치 🌿", "마늘 🧄", "감자 🥔", "고구마 🍠", "오이 🥒", "가지 🍆",
    "단호박 🎃", "양배추 🥬", "애호박 🥒", "당근 🥕", "청경채 🥬", "콩나물 🌱",
    "숙주나물 🌱", "깻잎 🍃", "아스파라거스 🥢", "파 🌿", "무 ⚪️", "비트 🟣",
    "완두콩 🟢", "피망 🫑", "김치 🌶️", "상추 🥬", "샐러리 🌿",
    // 단백질
    "닭가슴살 🐔", "두부 🤍", "계란 🥚", "새우 🍤", "연어 🐟", "소고기 🥩",
    "해산물 🦀", "오리고기 🦆", "돼지고기 🐷", "퀴노아 🌾", "병아리콩 🌰",
    "렌틸콩 🫘", "오징어 🦑", "베이컨 🥓", "햄 🍖", "참치캔 🥫", "소시지 🌭",
    "미트볼 🧆", "콩 🫘", "게맛살 🦀", "고등어 🐟",
    // 유제품 및 기타
    "치즈 🧀", "그릭요거트 🍦", "아보카도 🥑", "올리브 🫒", "우유 🥛",
    "모짜렐라 치즈 🧀", "체다치즈 🧀", "김 🍙", "옥수수콘 🌽",
    // 견과류 및 씨앗
    "아몬드 🌰", "호두 🧠", "해바라기씨 🌻", "참깨 ✨", "땅콩 🥜",
    // 과일
    "파인애플 🍍", "사과 🍎", "레몬 🍋", "딸기 🍓", "바나나 🍌", "블루베리 🫐",
    "오렌지 🍊", "키위 🥝", "망고 🥭", "포도 🍇", "복숭아 🍑",
    // 곡물
    "현미밥 🍚", "귀리 🥣", "파스타면 🍝", "라면 🍜", "식빵 🍞", "또띠아 🌮",
    // 소스 및 양념
    "케첩 🥫", "마요네즈 🥚", "꿀 🍯",
];

/// Plain ingredient name sent to the model: the first whitespace-separated segment.
pub fn strip_label(label: &str) -> &str {
    label.split_whitespace().next().unwrap_or("")
}

/// Offered choices plus the user's current picks (at most three).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientPicker {
    offered: Vec<&'static str>,
    selected: Vec<&'static str>,
}

impl IngredientPicker {
    /// Shuffles the vocabulary, offers the first twelve and clears the selection.
    pub fn recommend(&mut self) {
        self.recommend_with(&mut rand::thread_rng());
    }

    pub fn recommend_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut shuffled = INGREDIENT_VOCABULARY.to_vec();
        shuffled.shuffle(rng);
        shuffled.truncate(RECOMMENDATION_SIZE);

        self.offered = shuffled;
        self.selected.clear();
    }

    #[cfg(test)]
    pub(crate) fn with_offer(offered: Vec<&'static str>) -> Self {
        Self {
            offered,
            selected: Vec::new(),
        }
    }

    pub fn offered(&self) -> &[&'static str] {
        &self.offered
    }

    pub fn selected(&self) -> &[&'static str] {
        &self.selected
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selected.iter().any(|s| *s == label)
    }

    /// A choice the UI should render disabled.
    pub fn is_disabled(&self, label: &str) -> bool {
        !self.is_selected(label) && self.selected.len() >= MAX_SELECTED
    }

    /// Removes an already selected label, otherwise adds it if there is room.
    /// Returns whether the selection changed.
    pub fn toggle(&mut self, label: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| *s == label) {
            self.selected.remove(pos);
            return true;
        }

        if self.selected.len() >= MAX_SELECTED {
            return false;
        }

        match self.offered.iter().find(|s| **s == label) {
            Some(offered) => {
                self.selected.push(*offered);
                true
            }
            None => false,
        }
    }

    /// Selected labels without their decorative suffix, in selection order.
    pub fn plain_selection(&self) -> Vec<String> {
        self.selected
            .iter()
            .map(|label| strip_label(label).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_recommend_offers_twelve_distinct_vocabulary_items() {
        let mut picker = IngredientPicker::default();

        for seed in 0..20 {
            picker.recommend_with(&mut StdRng::seed_from_u64(seed));

            let offered = picker.offered();
            assert_eq!(offered.len(), RECOMMENDATION_SIZE);
            let unique: HashSet<_> = offered.iter().collect();
            assert_eq!(unique.len(), RECOMMENDATION_SIZE);
            assert!(offered.iter().all(|o| INGREDIENT_VOCABULARY.contains(o)));
        }
    }

    #[test]
    fn test_recommend_order_varies() {
        let mut picker = IngredientPicker::default();
        let mut seen = HashSet::new();

        for seed in 0..10 {
            picker.recommend_with(&mut StdRng::seed_from_u64(seed));
            seen.insert(picker.offered().to_vec());
        }

        assert!(seen.len() > 1);
    }

    #[test]
    fn test_vocabulary_has_no_duplicates() {
        let unique: HashSet<_> = INGREDIENT_VOCABULARY.iter().collect();
        assert_eq!(unique.len(), INGREDIENT_VOCABULARY.len());
        assert!(INGREDIENT_VOCABULARY.len() >= RECOMMENDATION_SIZE);
    }

    #[test]
    fn test_fourth_selection_is_ignored() {
        let mut picker = IngredientPicker::default();
        picker.recommend_with(&mut StdRng::seed_from_u64(7));
        let offered = picker.offered().to_vec();

        assert!(picker.toggle(offered[0]));
        assert!(picker.toggle(offered[1]));
        assert!(picker.toggle(offered[2]));
        let before = picker.selected().to_vec();

        assert!(!picker.toggle(offered[3]));
        assert_eq!(picker.selected(), before.as_slice());
        assert!(picker.is_disabled(offered[3]));
        assert!(!picker.is_disabled(offered[0]));
    }

    #[test]
    fn test_toggle_off_removes_exactly_one() {
        let mut picker = IngredientPicker::default();
        picker.recommend_with(&mut StdRng::seed_from_u64(3));
        let offered = picker.offered().to_vec();

        picker.toggle(offered[0]);
        picker.toggle(offered[1]);
        picker.toggle(offered[2]);
        assert!(picker.toggle(offered[1]));

        assert_eq!(picker.selected(), &[offered[0], offered[2]]);
    }

    #[test]
    fn test_labels_not_on_offer_cannot_be_selected() {
        let mut picker = IngredientPicker::default();
        picker.recommend_with(&mut StdRng::seed_from_u64(1));

        assert!(!picker.toggle("피자 🍕"));
        assert!(picker.selected().is_empty());
    }

    #[test]
    fn test_recommend_clears_selection() {
        let mut picker = IngredientPicker::default();
        picker.recommend_with(&mut StdRng::seed_from_u64(5));
        let first = picker.offered()[0];
        picker.toggle(first);

        picker.recommend_with(&mut StdRng::seed_from_u64(6));

        assert!(picker.selected().is_empty());
    }

    #[test]
    fn test_plain_selection_strips_glyphs() {
        assert_eq!(strip_label("당근 🥕"), "당근");
        assert_eq!(strip_label("모짜렐라 치즈 🧀"), "모짜렐라");
        assert_eq!(strip_label("치즈"), "치즈");

        let picker = IngredientPicker {
            offered: vec!["당근 🥕", "치즈 🧀"],
            selected: vec!["당근 🥕", "치즈 🧀"],
        };
        assert_eq!(picker.plain_selection(), vec!["당근", "치즈"]);
    }
}
