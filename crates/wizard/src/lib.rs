//! Сессия мастера создания логотипов.
//!
//! Машина состояний четырёхстраничного мастера (Реквизиты → Габариты →
//! Состав → Сводка), автонумерация логотипов и порты внешних
//! коллабораторов. Вся логика синхронна; единственная асинхронная
//! граница — сохранение коллекции в [`session::WizardSession::finish`].

pub mod config;
pub mod error;
pub mod numbering;
pub mod ports;
pub mod row_state;
pub mod session;

pub use error::{FieldError, WizardError};
pub use session::{RowUiState, WizardPage, WizardSession};
