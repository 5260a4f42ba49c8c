//! Машина состояний четырёхстраничного мастера.
//!
//! Сессия владеет проектом с его коллекцией логотипов; «текущий» элемент
//! редактируется на месте, в список сохранённых он попадает только через
//! `new_item`. Переход вперёд закрыт, пока текущая страница не прошла
//! валидацию; назад можно всегда.

use std::collections::HashSet;
use std::sync::Arc;

use contracts::catalog::Catalog;
use contracts::composition::{
    BallRowField, ComponentRowField, Composition, CompositionEngine,
};
use contracts::domain::a001_project::Project;
use contracts::domain::a002_logo_item::{DimensionKind, LogoItem, RelatedProduct};
use contracts::shared::validation::ValidationRules;

use crate::config::WizardConfig;
use crate::error::{FieldError, WizardError};
use crate::numbering;
use crate::ports::{
    AttachmentStorePort, NavigationPort, PersistencePort, ProductHit, ProductSearchPort,
};
use crate::row_state::RowStateMap;

// ============================================================================
// Pages
// ============================================================================

/// Страницы мастера
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardPage {
    /// Реквизиты и вложения
    Details = 1,
    /// Габариты и крепление
    Dimensions = 2,
    /// Состав (компоненты и шары)
    Composition = 3,
    /// Сводка
    Summary = 4,
}

impl WizardPage {
    pub const FIRST: WizardPage = WizardPage::Details;
    pub const LAST: WizardPage = WizardPage::Summary;

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(WizardPage::Details),
            2 => Some(WizardPage::Dimensions),
            3 => Some(WizardPage::Composition),
            4 => Some(WizardPage::Summary),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }
}

/// Переходное состояние строки состава в форме
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowUiState {
    /// Строка раскрыта в режиме редактирования
    pub is_editing: bool,
    /// Текст поиска в выпадающем списке строки
    pub search_text: String,
}

// ============================================================================
// Session
// ============================================================================

/// Сессия мастера: одна на открытую коллекцию логотипов
pub struct WizardSession {
    catalog: Arc<Catalog>,
    config: WizardConfig,
    project: Project,
    current_page: WizardPage,
    /// Поля, отмеченные «тронутыми» после неудачной валидации
    touched: HashSet<&'static str>,
    // Одноразовые защёлки автозаполнения; сбрасываются на новом элементе
    requested_by_auto_filled: bool,
    logo_number_initialized: bool,
    /// Защита от повторного входа в finish()
    is_finishing: bool,
    component_row_ui: RowStateMap<RowUiState>,
    ball_row_ui: RowStateMap<RowUiState>,
}

impl WizardSession {
    pub fn new(project: Project, catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            config: WizardConfig::default(),
            project,
            current_page: WizardPage::FIRST,
            touched: HashSet::new(),
            requested_by_auto_filled: false,
            logo_number_initialized: false,
            is_finishing: false,
            component_row_ui: RowStateMap::new(),
            ball_row_ui: RowStateMap::new(),
        }
    }

    pub fn with_config(mut self, config: WizardConfig) -> Self {
        self.config = config;
        self
    }

    // ============================================================================
    // Доступ к состоянию
    // ============================================================================

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn current_page(&self) -> WizardPage {
        self.current_page
    }

    pub fn current_logo(&self) -> &LogoItem {
        &self.project.logo_collection.current_logo
    }

    pub fn saved_logos(&self) -> &[LogoItem] {
        &self.project.logo_collection.logos
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    pub fn component_row_ui(&self, row: usize) -> Option<&RowUiState> {
        self.component_row_ui.get(row)
    }

    pub fn ball_row_ui(&self, row: usize) -> Option<&RowUiState> {
        self.ball_row_ui.get(row)
    }

    fn current_logo_mut(&mut self) -> &mut LogoItem {
        &mut self.project.logo_collection.current_logo
    }

    // ============================================================================
    // Валидация
    // ============================================================================

    /// Проверка страницы; пустой список ошибок означает «можно дальше»
    pub fn validate_page(&self, page: WizardPage) -> Vec<FieldError> {
        let logo = self.current_logo();
        let mut errors = Vec::new();

        match page {
            WizardPage::Details => {
                let required = ValidationRules::required();
                if let Err(message) = required.validate_string(&logo.logo_name, "Название") {
                    errors.push(FieldError::new("logoName", message));
                }
                if let Err(message) = required.validate_string(&logo.description, "Описание") {
                    errors.push(FieldError::new("description", message));
                }
            }
            WizardPage::Dimensions => {
                if !logo.dimensions.has_any_value() {
                    errors.push(FieldError::new(
                        "dimensions",
                        "Укажите хотя бы один габарит",
                    ));
                }
                if let Err(message) = ValidationRules::required()
                    .validate_string(&logo.fixation_type, "Тип крепления")
                {
                    errors.push(FieldError::new("fixationType", message));
                }
            }
            // Состав и сводка ничего не требуют
            WizardPage::Composition | WizardPage::Summary => {}
        }

        errors
    }

    fn mark_touched(&mut self, errors: &[FieldError]) {
        for error in errors {
            self.touched.insert(error.field);
        }
    }

    // ============================================================================
    // Навигация
    // ============================================================================

    /// Вперёд, если текущая страница валидна; иначе поля помечаются
    /// тронутыми и страница не меняется
    pub fn go_next(&mut self) -> bool {
        let errors = self.validate_page(self.current_page);
        if !errors.is_empty() {
            self.mark_touched(&errors);
            return false;
        }
        if let Some(next) = self.current_page.next() {
            self.current_page = next;
        }
        true
    }

    /// Назад — без валидации
    pub fn go_prev(&mut self) -> bool {
        match self.current_page.prev() {
            Some(prev) => {
                self.current_page = prev;
                true
            }
            None => false,
        }
    }

    /// Переход на произвольную страницу: назад и на текущую — всегда,
    /// на следующую — через валидацию, дальше — запрещено
    pub fn go_to_page(&mut self, page: WizardPage) -> bool {
        if page <= self.current_page {
            self.current_page = page;
            return true;
        }
        if page.index() == self.current_page.index() + 1 {
            return self.go_next();
        }
        false
    }

    // ============================================================================
    // Завершение и новый элемент
    // ============================================================================

    /// Завершить мастер: сохранить коллекцию и уйти со страницы
    ///
    /// Повторный вызов, пока сохранение в полёте, — no-op. Защёлка
    /// снимается и на успехе, и на ошибке, поэтому повтор после сбоя
    /// возможен, а данные в памяти не теряются.
    pub async fn finish(
        &mut self,
        persistence: &dyn PersistencePort,
        navigation: &dyn NavigationPort,
    ) -> Result<(), WizardError> {
        if self.is_finishing {
            tracing::warn!("finish() уже выполняется, повторный вызов пропущен");
            return Ok(());
        }

        let errors = self.validate_page(self.current_page);
        if !errors.is_empty() {
            self.mark_touched(&errors);
            return Err(WizardError::Validation(errors));
        }

        self.is_finishing = true;
        let project_id = self.project.to_string_id();
        let result = persistence
            .save_logo_collection(&project_id, &self.project.logo_collection)
            .await;
        self.is_finishing = false;

        match result {
            Ok(()) => {
                tracing::info!(project_id = %project_id, "коллекция логотипов сохранена");
                navigation.leave_wizard();
                Ok(())
            }
            Err(error) => {
                tracing::error!(project_id = %project_id, %error, "сохранение коллекции не удалось");
                Err(WizardError::Persistence(error))
            }
        }
    }

    /// Сохранить текущий элемент (если он полностью заполнен) и начать новый
    ///
    /// Невалидный текущий элемент отбрасывается. Защёлки автозаполнения
    /// сбрасываются, мастер возвращается на первую страницу.
    pub fn new_item(&mut self) {
        let collection = &mut self.project.logo_collection;
        if collection.current_logo.is_fully_valid() {
            collection.commit_current();
        } else {
            collection.current_logo = LogoItem::new_blank();
        }

        self.requested_by_auto_filled = false;
        self.logo_number_initialized = false;
        self.current_page = WizardPage::FIRST;
        self.touched.clear();
        self.component_row_ui.clear_all();
        self.ball_row_ui.clear_all();
    }

    /// Вернуть сохранённый логотип в редактирование
    pub fn open_for_edit(&mut self, index: usize) -> bool {
        if !self.project.logo_collection.open_for_edit(index) {
            return false;
        }
        // Идентифицированный элемент: номер и заказчик уже заданы
        self.requested_by_auto_filled = true;
        self.logo_number_initialized = true;
        self.current_page = WizardPage::FIRST;
        self.touched.clear();
        self.component_row_ui.clear_all();
        self.ball_row_ui.clear_all();
        true
    }

    // ============================================================================
    // Одноразовое автозаполнение
    // ============================================================================

    /// Первое непустое имя пользователя заполняет пустого «заказчика»
    pub fn observe_user_name(&mut self, display_name: &str) {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return;
        }
        if !self.requested_by_auto_filled && self.current_logo().requested_by.trim().is_empty() {
            self.current_logo_mut().requested_by = display_name.to_string();
        }
        self.requested_by_auto_filled = true;
    }

    /// Пересчитать номер логотипа (вызывается при смене имени проекта или
    /// числа сохранённых элементов)
    pub fn refresh_logo_number(&mut self) {
        if self.logo_number_initialized {
            return;
        }
        let collection = &self.project.logo_collection;
        let generated = numbering::generate_logo_number(
            self.project.name(),
            &collection.current_logo.logo_number,
            &collection.logos,
            &collection.current_logo,
        );
        if generated.is_empty() {
            // Имя проекта ещё не известно — попробуем на следующем событии
            return;
        }
        self.current_logo_mut().logo_number = generated;
        self.logo_number_initialized = true;
    }

    // ============================================================================
    // Скалярные поля
    // ============================================================================

    pub fn set_logo_name(&mut self, value: impl Into<String>) {
        self.current_logo_mut().logo_name = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.current_logo_mut().description = value.into();
    }

    /// Ручная правка заказчика отключает автозаполнение
    pub fn set_requested_by(&mut self, value: impl Into<String>) {
        self.current_logo_mut().requested_by = value.into();
        self.requested_by_auto_filled = true;
    }

    /// Ручная правка номера фиксирует его за элементом
    pub fn set_logo_number(&mut self, value: impl Into<String>) {
        self.current_logo_mut().logo_number = value.into();
        self.logo_number_initialized = true;
    }

    pub fn set_budget(&mut self, value: impl Into<String>) {
        self.current_logo_mut().budget = value.into();
    }

    pub fn set_fixation_type(&mut self, value: impl Into<String>) {
        self.current_logo_mut().fixation_type = value.into();
    }

    pub fn set_dimension_value(&mut self, kind: DimensionKind, value: impl Into<String>) {
        self.current_logo_mut().dimensions.get_mut(kind).value = value.into();
    }

    pub fn set_dimension_imperative(&mut self, kind: DimensionKind, imperative: bool) {
        self.current_logo_mut().dimensions.get_mut(kind).imperative = imperative;
    }

    // ============================================================================
    // Состав
    // ============================================================================

    /// Обновить поле строки компонента с резолюцией зависимых полей
    pub fn update_component_field(&mut self, row_index: usize, field: ComponentRowField) {
        let engine = CompositionEngine::new(self.catalog.as_ref());
        let current = &mut self.project.logo_collection.current_logo;
        current.composition = engine.update_component_field(&current.composition, row_index, field);
    }

    /// Обновить поле строки шара
    pub fn update_ball_field(&mut self, row_index: usize, field: BallRowField) {
        let engine = CompositionEngine::new(self.catalog.as_ref());
        let current = &mut self.project.logo_collection.current_logo;
        current.composition = engine.update_ball_field(&current.composition, row_index, field);
    }

    /// Удалить строку компонента вместе с перенумерацией состояния строк
    pub fn remove_component_row(&mut self, row_index: usize) {
        let engine = CompositionEngine::new(self.catalog.as_ref());
        let current = &mut self.project.logo_collection.current_logo;
        current.composition = engine.remove_component_row(&current.composition, row_index);
        self.component_row_ui.remove_row(row_index);
    }

    /// Удалить строку шара вместе с перенумерацией состояния строк
    pub fn remove_ball_row(&mut self, row_index: usize) {
        let engine = CompositionEngine::new(self.catalog.as_ref());
        let current = &mut self.project.logo_collection.current_logo;
        current.composition = engine.remove_ball_row(&current.composition, row_index);
        self.ball_row_ui.remove_row(row_index);
    }

    /// Очистить состав вместе со всеми переходными состояниями строк
    pub fn clear_composition(&mut self) {
        self.current_logo_mut().composition = Composition::new();
        self.component_row_ui.clear_all();
        self.ball_row_ui.clear_all();
    }

    pub fn set_component_row_ui(&mut self, row: usize, state: RowUiState) {
        self.component_row_ui.set(row, state);
    }

    pub fn set_ball_row_ui(&mut self, row: usize, state: RowUiState) {
        self.ball_row_ui.set(row, state);
    }

    // ============================================================================
    // Базовый продукт (режим «модификация существующего»)
    // ============================================================================

    /// Поиск базового продукта во внешнем каталоге
    ///
    /// Запросы короче порога не отправляются; дебаунс ввода — на
    /// вызывающей стороне (см. `config.search.debounce_ms`).
    pub async fn search_base_products(
        &self,
        port: &dyn ProductSearchPort,
        query: &str,
    ) -> anyhow::Result<Vec<ProductHit>> {
        let query = query.trim();
        if query.chars().count() < self.config.search.min_chars {
            return Ok(Vec::new());
        }
        port.search(query).await
    }

    /// Выбрать базовый продукт; его размерные варианты становятся
    /// связанными товарами
    pub fn select_base_product(&mut self, hit: &ProductHit) {
        let current = self.current_logo_mut();
        current.is_modification = true;
        current.base_product_id = Some(hit.id.clone());
        current.base_product = Some(hit.name.clone());
        current.related_products = hit
            .sizes
            .iter()
            .map(|size| RelatedProduct {
                id: hit.id.clone(),
                name: format!("{} {}", hit.name, size),
                size: Some(size.clone()),
            })
            .collect();
    }

    /// Сбросить режим модификации
    pub fn clear_base_product(&mut self) {
        let current = self.current_logo_mut();
        current.is_modification = false;
        current.base_product_id = None;
        current.base_product = None;
        current.related_products.clear();
    }

    // ============================================================================
    // Вложения
    // ============================================================================

    /// Загрузить файл через хранилище и добавить запись к логотипу
    pub async fn add_attachment(
        &mut self,
        port: &dyn AttachmentStorePort,
        file_name: &str,
        bytes: &[u8],
    ) -> anyhow::Result<()> {
        let stored = port.store(file_name, bytes).await?;
        self.current_logo_mut().attachment_files.push(stored);
        Ok(())
    }

    pub fn remove_attachment(&mut self, index: usize) {
        let files = &mut self.current_logo_mut().attachment_files;
        if index < files.len() {
            files.remove(index);
        }
    }
}
