use serde::{Deserialize, Serialize};

use super::aggregate::{LogoItem, LogoItemId};

/// Коллекция логотипов проекта: текущий (редактируемый) плюс сохранённые
///
/// Текущий элемент принадлежит открытой сессии мастера и попадает в
/// `logos` только через [`LogoCollection::commit_current`]. Порядок
/// элементов в `logos` значим для нумерации.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoCollection {
    #[serde(rename = "currentLogo", default)]
    pub current_logo: LogoItem,
    #[serde(default)]
    pub logos: Vec<LogoItem>,
}

impl LogoCollection {
    pub fn new() -> Self {
        Self {
            current_logo: LogoItem::new_blank(),
            logos: Vec::new(),
        }
    }

    /// Зафиксировать элемент в списке
    ///
    /// Существующая запись с тем же id или тем же непустым номером
    /// заменяется на месте (позиция сохраняется), иначе элемент
    /// добавляется в конец. Инвариант: в списке не бывает двух элементов
    /// с одинаковым непустым номером.
    pub fn commit(&mut self, mut item: LogoItem) {
        if item.id.is_none() {
            item.id = Some(LogoItemId::new_v4());
        }

        let position = self.logos.iter().position(|existing| {
            existing.id == item.id
                || (!item.logo_number.trim().is_empty()
                    && existing.logo_number == item.logo_number)
        });

        match position {
            Some(index) => self.logos[index] = item,
            None => self.logos.push(item),
        }
    }

    /// Зафиксировать текущий элемент и открыть новый пустой
    pub fn commit_current(&mut self) {
        let item = std::mem::replace(&mut self.current_logo, LogoItem::new_blank());
        self.commit(item);
    }

    /// Вернуть сохранённый элемент в «текущие» для повторного редактирования
    ///
    /// Запись остаётся в списке и будет заменена на месте при следующем
    /// коммите (по совпадению id).
    pub fn open_for_edit(&mut self, index: usize) -> bool {
        match self.logos.get(index) {
            Some(item) => {
                self.current_logo = item.clone();
                true
            }
            None => false,
        }
    }
}

impl Default for LogoCollection {
    fn default() -> Self {
        Self::new()
    }
}
