//! Статический справочный каталог: компоненты, цвета, отделки, размеры.
//!
//! Каталог загружается один раз и дальше используется только на чтение.
//! Политика ошибок: неизвестный id даёт `None`/пустой список, никогда не
//! ошибку — вызывающая сторона обязана проверять результат.

pub mod entries;

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use entries::{BallVariant, Color, Combination, Component, Finish, Size};

/// Каталог справочных данных
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub colors: Vec<Color>,
    #[serde(default)]
    pub finishes: Vec<Finish>,
    #[serde(default)]
    pub sizes: Vec<Size>,
    #[serde(default)]
    pub combinations: Vec<Combination>,
    #[serde(rename = "ballVariants", default)]
    pub ball_variants: Vec<BallVariant>,
}

impl Catalog {
    pub fn new(
        components: Vec<Component>,
        colors: Vec<Color>,
        finishes: Vec<Finish>,
        sizes: Vec<Size>,
        combinations: Vec<Combination>,
        ball_variants: Vec<BallVariant>,
    ) -> Self {
        Self {
            components,
            colors,
            finishes,
            sizes,
            combinations,
            ball_variants,
        }
    }

    /// Загрузить каталог из JSON-выгрузки
    pub fn from_json(payload: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    // ============================================================================
    // Поиск по идентификаторам
    // ============================================================================

    pub fn component_by_id(&self, id: i32) -> Option<&Component> {
        self.components.iter().find(|entry| entry.id == id)
    }

    pub fn color_by_id(&self, id: i32) -> Option<&Color> {
        self.colors.iter().find(|entry| entry.id == id)
    }

    pub fn finish_by_id(&self, id: i32) -> Option<&Finish> {
        self.finishes.iter().find(|entry| entry.id == id)
    }

    pub fn size_by_id(&self, id: i32) -> Option<&Size> {
        self.sizes.iter().find(|entry| entry.id == id)
    }

    // ============================================================================
    // Зависимые выборки: компонент -> цвет
    // ============================================================================

    /// Цвета, для которых существует комбинация с данным компонентом
    /// (без дублей, по алфавиту)
    pub fn colors_for_component(&self, component_id: i32) -> Vec<&Color> {
        let mut seen = HashSet::new();
        let mut colors: Vec<&Color> = self
            .combinations
            .iter()
            .filter(|combination| combination.component_id == component_id)
            .filter(|combination| seen.insert(combination.color_id))
            .filter_map(|combination| self.color_by_id(combination.color_id))
            .collect();
        colors.sort_by(|a, b| a.name.cmp(&b.name));
        colors
    }

    /// Первая подходящая комбинация «компонент + цвет»
    pub fn combination_for(&self, component_id: i32, color_id: i32) -> Option<&Combination> {
        self.combinations.iter().find(|combination| {
            combination.component_id == component_id && combination.color_id == color_id
        })
    }

    // ============================================================================
    // Зависимые выборки: цвет -> отделка -> размер шара
    // ============================================================================

    /// Цвета, встречающиеся хотя бы в одном SKU шара (по алфавиту)
    pub fn ball_colors_available(&self) -> Vec<&Color> {
        let mut seen = HashSet::new();
        let mut colors: Vec<&Color> = self
            .ball_variants
            .iter()
            .filter(|variant| seen.insert(variant.color_id))
            .filter_map(|variant| self.color_by_id(variant.color_id))
            .collect();
        colors.sort_by(|a, b| a.name.cmp(&b.name));
        colors
    }

    /// Отделки, доступные для цвета шара; без цвета — весь список отделок
    pub fn finishes_for_ball_color(&self, color_id: Option<i32>) -> Vec<&Finish> {
        let color_id = match color_id {
            Some(id) => id,
            None => return self.finishes.iter().collect(),
        };
        let mut seen = HashSet::new();
        self.ball_variants
            .iter()
            .filter(|variant| variant.color_id == color_id)
            .filter(|variant| seen.insert(variant.finish_id))
            .filter_map(|variant| self.finish_by_id(variant.finish_id))
            .collect()
    }

    /// Размеры, доступные для пары «цвет + отделка», в числовом порядке;
    /// если любой из ключей не задан — весь список размеров
    pub fn sizes_for_ball_color_and_finish(
        &self,
        color_id: Option<i32>,
        finish_id: Option<i32>,
    ) -> Vec<&Size> {
        let mut sizes: Vec<&Size> = match (color_id, finish_id) {
            (Some(color_id), Some(finish_id)) => {
                let mut seen = HashSet::new();
                self.ball_variants
                    .iter()
                    .filter(|variant| {
                        variant.color_id == color_id && variant.finish_id == finish_id
                    })
                    .filter(|variant| seen.insert(variant.size_id))
                    .filter_map(|variant| self.size_by_id(variant.size_id))
                    .collect()
            }
            _ => self.sizes.iter().collect(),
        };
        sizes.sort_by(|a, b| compare_size_names(&a.name, &b.name));
        sizes
    }

    /// SKU шара по трём ключам
    pub fn ball_variant(
        &self,
        color_id: i32,
        finish_id: i32,
        size_id: i32,
    ) -> Option<&BallVariant> {
        self.ball_variants.iter().find(|variant| {
            variant.color_id == color_id
                && variant.finish_id == finish_id
                && variant.size_id == size_id
        })
    }
}

/// Числовой префикс имени размера ("20 см" -> 20.0); без префикса — в конец
fn size_sort_key(name: &str) -> Option<f64> {
    let digits: String = name
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    digits.replace(',', ".").parse().ok()
}

fn compare_size_names(a: &str, b: &str) -> Ordering {
    match (size_sort_key(a), size_sort_key(b)) {
        (Some(left), Some(right)) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Component {
                    id: 1,
                    name: "Каркас звезды".into(),
                    reference: Some("FR-STAR".into()),
                    requires_no_color: false,
                },
                Component {
                    id: 2,
                    name: "Блок питания".into(),
                    reference: Some("PSU-24".into()),
                    requires_no_color: true,
                },
            ],
            vec![
                Color {
                    id: 10,
                    name: "Тёплый белый".into(),
                    reference: None,
                },
                Color {
                    id: 11,
                    name: "Красный".into(),
                    reference: None,
                },
                Color {
                    id: 12,
                    name: "Синий".into(),
                    reference: None,
                },
            ],
            vec![
                Finish {
                    id: 20,
                    name: "Глянец".into(),
                    reference: None,
                },
                Finish {
                    id: 21,
                    name: "Матовый".into(),
                    reference: None,
                },
            ],
            vec![
                Size {
                    id: 30,
                    name: "20 см".into(),
                    reference: None,
                },
                Size {
                    id: 31,
                    name: "9 см".into(),
                    reference: None,
                },
                Size {
                    id: 32,
                    name: "12,5 см".into(),
                    reference: None,
                },
            ],
            vec![
                Combination {
                    id: 100,
                    component_id: 1,
                    color_id: 11,
                    reference: "FR-STAR-RED".into(),
                },
                Combination {
                    id: 101,
                    component_id: 1,
                    color_id: 10,
                    reference: "FR-STAR-WW".into(),
                },
                // Дубль цвета для проверки дедупликации
                Combination {
                    id: 102,
                    component_id: 1,
                    color_id: 11,
                    reference: "FR-STAR-RED-ALT".into(),
                },
            ],
            vec![
                BallVariant {
                    id: 200,
                    color_id: 11,
                    finish_id: 20,
                    size_id: 30,
                    reference: "BOLA-RED-GL-20".into(),
                },
                BallVariant {
                    id: 201,
                    color_id: 11,
                    finish_id: 20,
                    size_id: 31,
                    reference: "BOLA-RED-GL-9".into(),
                },
                BallVariant {
                    id: 202,
                    color_id: 12,
                    finish_id: 21,
                    size_id: 32,
                    reference: "BOLA-BLUE-MT-12".into(),
                },
            ],
        )
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = catalog();
        assert_eq!(catalog.component_by_id(1).unwrap().name, "Каркас звезды");
        assert!(catalog.component_by_id(999).is_none());
        assert!(catalog.color_by_id(999).is_none());
        assert!(catalog.finish_by_id(999).is_none());
        assert!(catalog.size_by_id(999).is_none());
    }

    #[test]
    fn test_colors_for_component_dedup_and_sort() {
        let catalog = catalog();
        let colors = catalog.colors_for_component(1);
        let names: Vec<&str> = colors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Красный", "Тёплый белый"]);
        assert!(catalog.colors_for_component(999).is_empty());
    }

    #[test]
    fn test_combination_for_returns_first_match() {
        let catalog = catalog();
        let combination = catalog.combination_for(1, 11).unwrap();
        assert_eq!(combination.reference, "FR-STAR-RED");
        assert!(catalog.combination_for(1, 999).is_none());
    }

    #[test]
    fn test_ball_colors_available() {
        let catalog = catalog();
        let names: Vec<&str> = catalog
            .ball_colors_available()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Красный", "Синий"]);
    }

    #[test]
    fn test_finishes_for_ball_color() {
        let catalog = catalog();
        let for_red: Vec<i32> = catalog
            .finishes_for_ball_color(Some(11))
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(for_red, vec![20]);
        // Без ключа — весь справочник отделок
        assert_eq!(catalog.finishes_for_ball_color(None).len(), 2);
    }

    #[test]
    fn test_sizes_sorted_numerically() {
        let catalog = catalog();
        // Частично заданные ключи дают весь список в числовом порядке
        let names: Vec<&str> = catalog
            .sizes_for_ball_color_and_finish(Some(11), None)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["9 см", "12,5 см", "20 см"]);

        let for_pair: Vec<&str> = catalog
            .sizes_for_ball_color_and_finish(Some(11), Some(20))
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(for_pair, vec!["9 см", "20 см"]);
    }

    #[test]
    fn test_ball_variant_lookup() {
        let catalog = catalog();
        assert_eq!(
            catalog.ball_variant(11, 20, 30).unwrap().reference,
            "BOLA-RED-GL-20"
        );
        assert!(catalog.ball_variant(11, 21, 30).is_none());
    }

    #[test]
    fn test_from_json() {
        let payload = r#"{
            "components": [{"id": 1, "name": "Каркас", "requiresNoColor": false}],
            "colors": [{"id": 10, "name": "Красный"}],
            "combinations": [{"id": 100, "componentId": 1, "colorId": 10, "reference": "FR-RED"}]
        }"#;
        let catalog = Catalog::from_json(payload).unwrap();
        assert_eq!(catalog.components.len(), 1);
        assert_eq!(catalog.combination_for(1, 10).unwrap().reference, "FR-RED");
        assert!(catalog.ball_variants.is_empty());
    }
}
