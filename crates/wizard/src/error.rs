use thiserror::Error;

/// Ошибка валидации одного поля формы
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Ключ поля (совпадает с именем поля в форме)
    pub field: &'static str,
    /// Человекочитаемое сообщение
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Ошибки сессии мастера
#[derive(Debug, Error)]
pub enum WizardError {
    /// Текущая страница не прошла валидацию
    #[error("валидация не пройдена: ошибок {}", .0.len())]
    Validation(Vec<FieldError>),

    /// Внешний коллаборатор сохранения отклонил запрос
    #[error("ошибка сохранения: {0}")]
    Persistence(anyhow::Error),
}
