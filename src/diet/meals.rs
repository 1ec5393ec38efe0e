//! Meal recommendation templates
//!
//! Three fixed template sets keyed by BMI category. Overweight and obese share one.

use serde::{Deserialize, Serialize};

use super::bmi::BmiCategory;

/// Meal slot in a daily plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    pub fn all() -> [MealSlot; 4] {
        [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner, MealSlot::Snacks]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snacks => "Snacks",
        }
    }

    /// Extra item and notes clause appended when pregnant
    fn pregnancy_addition(&self) -> (&'static str, &'static str) {
        match self {
            MealSlot::Breakfast => (
                "Spinach and folic acid-rich vegetables in omelets",
                "Include folate-rich foods for fetal development.",
            ),
            MealSlot::Lunch => (
                "Calcium-rich foods like dairy or fortified plant alternatives",
                "Focus on iron and calcium-rich options.",
            ),
            MealSlot::Dinner => (
                "Iron-rich foods like leafy greens with vitamin C for absorption",
                "Include a variety of nutrients essential for pregnancy.",
            ),
            MealSlot::Snacks => (
                "Yogurt with almonds for calcium and protein",
                "More frequent snacks may help with nausea.",
            ),
        }
    }
}

/// One meal's recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealRecommendation {
    pub title: String,
    pub items: Vec<String>,
    pub notes: String,
}

impl MealRecommendation {
    fn from_template(title: &str, items: &[&str], notes: &str) -> Self {
        Self {
            title: title.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
            notes: notes.to_string(),
        }
    }

    fn append_pregnancy(&mut self, slot: MealSlot) {
        let (item, clause) = slot.pregnancy_addition();
        self.items.push(item.to_string());
        self.notes.push(' ');
        self.notes.push_str(clause);
    }
}

/// The four meals of a daily plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: MealRecommendation,
    pub lunch: MealRecommendation,
    pub dinner: MealRecommendation,
    pub snacks: MealRecommendation,
}

impl Meals {
    pub fn get(&self, slot: MealSlot) -> &MealRecommendation {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    fn get_mut(&mut self, slot: MealSlot) -> &mut MealRecommendation {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Snacks => &mut self.snacks,
        }
    }

    /// Meals in serving order
    pub fn iter(&self) -> impl Iterator<Item = (MealSlot, &MealRecommendation)> {
        MealSlot::all().into_iter().map(move |slot| (slot, self.get(slot)))
    }
}

/// Build the meal set for a category, with pregnancy additions when requested
pub fn generate_meals(category: BmiCategory, pregnant: bool) -> Meals {
    let mut meals = match category {
        BmiCategory::Underweight => underweight_meals(),
        BmiCategory::Normal => normal_meals(),
        BmiCategory::Overweight | BmiCategory::Obese => reduction_meals(),
    };

    if pregnant {
        for slot in MealSlot::all() {
            meals.get_mut(slot).append_pregnancy(slot);
        }
    }

    meals
}

fn underweight_meals() -> Meals {
    Meals {
        breakfast: MealRecommendation::from_template(
            "Nutrient-Dense Breakfast",
            &[
                "Greek yogurt (1 cup) with berries and honey",
                "Whole grain toast (2 slices) with avocado and eggs",
                "Smoothie with protein powder, banana, peanut butter, and milk",
            ],
            "Focus on protein and healthy fats to support weight gain.",
        ),
        lunch: MealRecommendation::from_template(
            "Energy-Rich Lunch",
            &[
                "Quinoa bowl with grilled chicken, avocado, and roasted vegetables",
                "Whole grain wrap with turkey, cheese, and plenty of vegetables",
                "Salmon with sweet potato and steamed vegetables",
            ],
            "Include complex carbs, protein, and healthy fats.",
        ),
        dinner: MealRecommendation::from_template(
            "Balanced Dinner",
            &[
                "Lean protein (fish, chicken, or beans) with brown rice and vegetables",
                "Whole grain pasta with olive oil, vegetables, and chicken or shrimp",
                "Stir-fry with tofu or meat, vegetables, and brown rice",
            ],
            "Focus on a mix of nutrients to support healthy weight gain.",
        ),
        snacks: MealRecommendation::from_template(
            "Nutrient-Dense Snacks",
            &[
                "Trail mix with nuts and dried fruit",
                "Cheese and whole grain crackers",
                "Smoothie with protein powder",
                "Peanut butter on whole grain toast",
                "Hummus with vegetables",
            ],
            "Aim for 2-3 snacks daily between meals.",
        ),
    }
}

fn normal_meals() -> Meals {
    Meals {
        breakfast: MealRecommendation::from_template(
            "Balanced Breakfast",
            &[
                "Oatmeal with berries and a tablespoon of nut butter",
                "Whole grain toast with avocado and poached eggs",
                "Greek yogurt parfait with granola and fresh fruit",
            ],
            "Balance protein and complex carbs for sustained energy.",
        ),
        lunch: MealRecommendation::from_template(
            "Nutrient-Rich Lunch",
            &[
                "Large salad with grilled chicken, olive oil, and vinegar dressing",
                "Grain bowl with quinoa, roasted vegetables, and chickpeas",
                "Vegetable soup with a side salad and whole grain roll",
            ],
            "Focus on vegetables, lean protein, and moderate portions.",
        ),
        dinner: MealRecommendation::from_template(
            "Balanced Dinner",
            &[
                "Baked fish with roasted vegetables and quinoa",
                "Stir-fry with tofu or chicken and plenty of vegetables",
                "Lentil soup with a side salad and small portion of whole grain bread",
            ],
            "Include lean protein, vegetables, and moderate complex carbs.",
        ),
        snacks: MealRecommendation::from_template(
            "Healthy Snacks",
            &[
                "Apple with a tablespoon of almond butter",
                "Handful of mixed nuts",
                "Greek yogurt with berries",
                "Hummus with vegetable sticks",
                "Hardboiled egg",
            ],
            "Choose 1-2 snacks daily as needed.",
        ),
    }
}

fn reduction_meals() -> Meals {
    Meals {
        breakfast: MealRecommendation::from_template(
            "Protein-Focused Breakfast",
            &[
                "Egg white omelet with vegetables",
                "Greek yogurt with a small amount of berries",
                "Protein smoothie with spinach, protein powder, and almond milk",
            ],
            "Emphasize protein and fiber while limiting carbohydrates.",
        ),
        lunch: MealRecommendation::from_template(
            "Vegetable-Forward Lunch",
            &[
                "Large salad with grilled chicken and light dressing",
                "Lettuce wraps with turkey and vegetables",
                "Zucchini noodles with lean protein and tomato sauce",
            ],
            "Focus on non-starchy vegetables and lean protein.",
        ),
        dinner: MealRecommendation::from_template(
            "Lean Dinner",
            &[
                "Grilled fish with steamed vegetables",
                "Chicken breast with large portion of roasted vegetables",
                "Tofu stir-fry with plenty of vegetables and small portion of brown rice",
            ],
            "Emphasize protein and vegetables while limiting starchy carbs.",
        ),
        snacks: MealRecommendation::from_template(
            "Low-Calorie Snacks",
            &[
                "Celery with a tablespoon of almond butter",
                "Hard-boiled egg",
                "Small handful of nuts",
                "Cucumber slices with hummus",
                "Greek yogurt (plain, low-fat)",
            ],
            "Limit to 1-2 small snacks daily if needed.",
        ),
    }
}
