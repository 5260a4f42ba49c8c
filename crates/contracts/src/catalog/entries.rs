use serde::{Deserialize, Serialize};

/// Компонент логотипа (физическая деталь конструкции)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: i32,
    pub name: String,
    /// Собственный производственный артикул компонента
    #[serde(default)]
    pub reference: Option<String>,
    /// Компонент без шага выбора цвета
    #[serde(rename = "requiresNoColor", default)]
    pub requires_no_color: bool,
}

/// Цвет
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub reference: Option<String>,
}

/// Отделка (финиш) декоративного шара
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finish {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub reference: Option<String>,
}

/// Размер декоративного шара (имя начинается с числового значения, "20 см")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub reference: Option<String>,
}

/// Допустимая пара «компонент + цвет» с производственным артикулом
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    pub id: i32,
    #[serde(rename = "componentId")]
    pub component_id: i32,
    #[serde(rename = "colorId")]
    pub color_id: i32,
    pub reference: String,
}

/// SKU декоративного шара: цвет + отделка + размер
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallVariant {
    pub id: i32,
    #[serde(rename = "colorId")]
    pub color_id: i32,
    #[serde(rename = "finishId")]
    pub finish_id: i32,
    #[serde(rename = "sizeId")]
    pub size_id: i32,
    pub reference: String,
}
