use crate::domain::a002_logo_item::LogoCollection;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор проекта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
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

impl AggregateId for ProjectId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProjectId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Проект оформления (витрина, атриум, фасад)
///
/// Владеет коллекцией логотипов; имя проекта (description) участвует в
/// автонумерации логотипов.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(flatten)]
    pub base: BaseAggregate<ProjectId>,

    #[serde(rename = "logoCollection", default)]
    pub logo_collection: LogoCollection,
}

impl Project {
    /// Создать новый проект для вставки в БД
    pub fn new_for_insert(code: String, description: String, comment: Option<String>) -> Self {
        let mut base = BaseAggregate::new(ProjectId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            logo_collection: LogoCollection::new(),
        }
    }

    /// Отображаемое имя проекта
    pub fn name(&self) -> &str {
        &self.base.description
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &ProjectDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название проекта не может быть пустым".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Project {
    type Id = ProjectId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "project"
    }

    fn element_name() -> &'static str {
        "Проект"
    }

    fn list_name() -> &'static str {
        "Проекты"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления проекта
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_name_and_code() {
        let project = Project::new_for_insert("PRJ-001".into(), "Атриум ТЦ".into(), None);
        assert!(project.validate().is_ok());

        let empty = Project::new_for_insert("PRJ-002".into(), "   ".into(), None);
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_update_from_dto() {
        let mut project = Project::new_for_insert("PRJ-001".into(), "Атриум".into(), None);
        project.update(&ProjectDto {
            id: None,
            code: Some("PRJ-001".into()),
            description: "Атриум ТЦ «Восток»".into(),
            comment: Some("срочный".into()),
        });

        assert_eq!(project.name(), "Атриум ТЦ «Восток»");
        assert_eq!(project.base.comment.as_deref(), Some("срочный"));
    }

    #[test]
    fn test_aggregate_full_name() {
        assert_eq!(Project::full_name(), "a001_project");
    }
}
