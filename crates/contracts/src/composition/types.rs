use serde::{Deserialize, Serialize};

/// Строка состава: компонент конструкции (+ цвет) с производственным артикулом
///
/// Инвариант: для компонента без шага цвета (`requires_no_color`) цветовые
/// поля остаются пустыми, а `reference` берётся из самого компонента либо
/// из единственной доступной комбинации. Иначе `reference` заполняется
/// только при выбранных компоненте и цвете с существующей комбинацией.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentRow {
    #[serde(rename = "componentId", default)]
    pub component_id: Option<i32>,
    #[serde(rename = "componentName", default)]
    pub component_name: Option<String>,
    #[serde(rename = "componentReference", default)]
    pub component_reference: Option<String>,
    #[serde(rename = "colorId", default)]
    pub color_id: Option<i32>,
    #[serde(rename = "colorName", default)]
    pub color_name: Option<String>,
    #[serde(rename = "combinationId", default)]
    pub combination_id: Option<i32>,
    #[serde(default)]
    pub reference: Option<String>,
}

impl ComponentRow {
    /// Пустая редактируемая строка
    pub fn blank() -> Self {
        Self::default()
    }
}

/// Строка состава: декоративный шар (цвет + отделка + размер)
///
/// Инвариант: `bola_id`/`reference` заполнены тогда и только тогда, когда
/// заданы все три ключа и в каталоге есть соответствующий SKU.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BallRow {
    #[serde(rename = "bolaId", default)]
    pub bola_id: Option<i32>,
    #[serde(rename = "colorId", default)]
    pub color_id: Option<i32>,
    #[serde(rename = "colorName", default)]
    pub color_name: Option<String>,
    #[serde(rename = "finishId", default)]
    pub finish_id: Option<i32>,
    #[serde(rename = "finishName", default)]
    pub finish_name: Option<String>,
    #[serde(rename = "sizeId", default)]
    pub size_id: Option<i32>,
    #[serde(rename = "sizeName", default)]
    pub size_name: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
}

impl BallRow {
    /// Пустая редактируемая строка
    pub fn blank() -> Self {
        Self::default()
    }
}

/// Состав логотипа
///
/// Ключи сериализации — формат хранимых данных, менять нельзя.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    #[serde(rename = "componentes", default)]
    pub components: Vec<ComponentRow>,
    #[serde(rename = "bolas", default)]
    pub balls: Vec<BallRow>,
}

impl Composition {
    /// Новый состав: по одной пустой редактируемой строке в каждом списке
    pub fn new() -> Self {
        Self {
            components: vec![ComponentRow::blank()],
            balls: vec![BallRow::blank()],
        }
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}
