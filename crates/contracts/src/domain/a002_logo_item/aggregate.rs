use crate::composition::Composition;
use crate::domain::common::AggregateId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор логотипа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogoItemId(pub Uuid);

impl LogoItemId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for LogoItemId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(LogoItemId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Value objects
// ============================================================================

/// Габарит: значение из формы и признак обязательности
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    /// Значение как введено в форме
    #[serde(default)]
    pub value: String,
    /// Обязательный габарит
    #[serde(default)]
    pub imperative: bool,
}

impl Dimension {
    /// Числовое значение: конечное число >= 0; запятая допускается
    pub fn parsed_value(&self) -> Option<f64> {
        let normalized = self.value.trim().replace(',', ".");
        match normalized.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() && parsed >= 0.0 => Some(parsed),
            _ => None,
        }
    }
}

/// Вид габарита
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionKind {
    Height,
    Width,
    Length,
    Diameter,
}

/// Габариты логотипа
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default)]
    pub height: Dimension,
    #[serde(default)]
    pub width: Dimension,
    #[serde(default)]
    pub length: Dimension,
    #[serde(default)]
    pub diameter: Dimension,
}

impl Dimensions {
    pub fn get(&self, kind: DimensionKind) -> &Dimension {
        match kind {
            DimensionKind::Height => &self.height,
            DimensionKind::Width => &self.width,
            DimensionKind::Length => &self.length,
            DimensionKind::Diameter => &self.diameter,
        }
    }

    pub fn get_mut(&mut self, kind: DimensionKind) -> &mut Dimension {
        match kind {
            DimensionKind::Height => &mut self.height,
            DimensionKind::Width => &mut self.width,
            DimensionKind::Length => &mut self.length,
            DimensionKind::Diameter => &mut self.diameter,
        }
    }

    /// Хотя бы один габарит задан корректным числом
    pub fn has_any_value(&self) -> bool {
        [&self.height, &self.width, &self.length, &self.diameter]
            .iter()
            .any(|dimension| dimension.parsed_value().is_some())
    }
}

/// Загруженный файл-вложение
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentFile {
    pub name: String,
    pub url: String,
    pub mimetype: String,
    pub size: i64,
}

/// Связанный товар (размерный вариант базового продукта)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: Option<String>,
}

// ============================================================================
// Logo Item
// ============================================================================

/// Логотип — единица работы мастера
///
/// Текущий (редактируемый) элемент не входит в список сохранённых до
/// явного коммита; `id` появляется при первом коммите.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoItem {
    #[serde(default)]
    pub id: Option<LogoItemId>,

    /// Порядковый номер в формате "<проект> -L<n>"
    #[serde(rename = "logoNumber", default)]
    pub logo_number: String,

    #[serde(rename = "logoName", default)]
    pub logo_name: String,

    #[serde(default)]
    pub description: String,

    /// Заказчик (заполняется автоматически именем пользователя)
    #[serde(rename = "requestedBy", default)]
    pub requested_by: String,

    #[serde(default)]
    pub budget: String,

    #[serde(default)]
    pub dimensions: Dimensions,

    /// Тип крепления
    #[serde(rename = "fixationType", default)]
    pub fixation_type: String,

    #[serde(default)]
    pub composition: Composition,

    #[serde(rename = "attachmentFiles", default)]
    pub attachment_files: Vec<AttachmentFile>,

    /// Модификация существующего продукта
    #[serde(rename = "isModification", default)]
    pub is_modification: bool,

    #[serde(rename = "baseProductId", default)]
    pub base_product_id: Option<String>,

    #[serde(rename = "baseProduct", default)]
    pub base_product: Option<String>,

    #[serde(rename = "relatedProducts", default)]
    pub related_products: Vec<RelatedProduct>,
}

impl LogoItem {
    /// Пустой логотип для нового прохода мастера
    pub fn new_blank() -> Self {
        Self {
            id: None,
            logo_number: String::new(),
            logo_name: String::new(),
            description: String::new(),
            requested_by: String::new(),
            budget: String::new(),
            dimensions: Dimensions::default(),
            fixation_type: String::new(),
            composition: Composition::new(),
            attachment_files: Vec::new(),
            is_modification: false,
            base_product_id: None,
            base_product: None,
            related_products: Vec::new(),
        }
    }

    /// Полная проверка перед коммитом в коллекцию
    ///
    /// Строже постраничной валидации мастера: обязательны все ключевые
    /// реквизиты и хотя бы один габарит.
    pub fn is_fully_valid(&self) -> bool {
        !self.logo_number.trim().is_empty()
            && !self.logo_name.trim().is_empty()
            && !self.description.trim().is_empty()
            && !self.requested_by.trim().is_empty()
            && !self.fixation_type.trim().is_empty()
            && self.dimensions.has_any_value()
    }
}

impl Default for LogoItem {
    fn default() -> Self {
        Self::new_blank()
    }
}
