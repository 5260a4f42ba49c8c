//! Порты внешних коллабораторов сессии мастера.
//!
//! Реализации живут снаружи (HTTP-клиент, хранилище файлов, роутер);
//! сессия видит только трейты.

use async_trait::async_trait;
use contracts::domain::a002_logo_item::{AttachmentFile, LogoCollection};
use serde::{Deserialize, Serialize};

/// Кандидат базового продукта из внешнего каталога
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductHit {
    pub id: String,
    pub name: String,
    /// Доступные размерные варианты
    #[serde(default)]
    pub sizes: Vec<String>,
}

/// Сохранение коллекции логотипов
///
/// Коллекция передаётся целиком как непрозрачный блоб; хранилище
/// выполняет last-write-wins по всему payload.
#[async_trait]
pub trait PersistencePort: Send + Sync {
    async fn save_logo_collection(
        &self,
        project_id: &str,
        payload: &LogoCollection,
    ) -> anyhow::Result<()>;
}

/// Сигнал «мастер завершён» (fire-and-forget)
pub trait NavigationPort: Send + Sync {
    fn leave_wizard(&self);
}

/// Хранилище файлов-вложений
#[async_trait]
pub trait AttachmentStorePort: Send + Sync {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> anyhow::Result<AttachmentFile>;
}

/// Поиск по внешнему каталогу продуктов
#[async_trait]
pub trait ProductSearchPort: Send + Sync {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<ProductHit>>;
}
