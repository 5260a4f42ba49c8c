use crate::catalog::Catalog;

use super::types::{BallRow, ComponentRow, Composition};

/// Редактируемое пользователем поле строки компонента
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentRowField {
    Component(Option<i32>),
    Color(Option<i32>),
}

/// Редактируемое пользователем поле строки шара
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallRowField {
    Color(Option<i32>),
    Finish(Option<i32>),
    Size(Option<i32>),
}

/// Движок резолюции состава
///
/// Все операции чистые: принимают снимок состава и возвращают новый,
/// исходный не изменяется. Пустая строка дописывается в конец списка
/// ровно в момент перехода строки из незавершённой в завершённую.
pub struct CompositionEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> CompositionEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    // ============================================================================
    // Строки компонентов
    // ============================================================================

    /// Обновить поле строки компонента с резолюцией зависимых полей
    pub fn update_component_field(
        &self,
        composition: &Composition,
        row_index: usize,
        field: ComponentRowField,
    ) -> Composition {
        let mut next = composition.clone();
        ensure_row(&mut next.components, row_index);

        let was_complete = self.is_component_complete(&next.components[row_index]);
        {
            let row = &mut next.components[row_index];
            match field {
                ComponentRowField::Component(value) => self.apply_component(row, value),
                ComponentRowField::Color(value) => self.apply_component_color(row, value),
            }
        }

        if !was_complete && self.is_component_complete(&next.components[row_index]) {
            next.components.push(ComponentRow::blank());
        }
        next
    }

    fn apply_component(&self, row: &mut ComponentRow, value: Option<i32>) {
        row.component_id = value;

        let component = match value.and_then(|id| self.catalog.component_by_id(id)) {
            Some(component) => component,
            None => {
                // Компонент не выбран или отсутствует в каталоге;
                // уже выбранный цвет сохраняется
                row.component_name = None;
                row.component_reference = None;
                row.combination_id = None;
                row.reference = None;
                return;
            }
        };

        row.component_name = Some(component.name.clone());
        row.component_reference = component.reference.clone();

        if component.requires_no_color {
            let colors = self.catalog.colors_for_component(component.id);
            if colors.len() == 1 {
                // Единственный доступный цвет подставляется как удобное умолчание
                let color = colors[0];
                let combination = self.catalog.combination_for(component.id, color.id);
                row.color_id = Some(color.id);
                row.color_name = Some(color.name.clone());
                row.combination_id = combination.map(|c| c.id);
                row.reference = combination.map(|c| c.reference.clone());
            } else {
                row.color_id = None;
                row.color_name = None;
                row.combination_id = None;
                row.reference = component.reference.clone();
            }
        } else if let Some(color_id) = row.color_id {
            // Цвет сохраняется, комбинация пересчитывается под новый компонент
            let combination = self.catalog.combination_for(component.id, color_id);
            row.combination_id = combination.map(|c| c.id);
            row.reference = combination.map(|c| c.reference.clone());
        } else {
            row.combination_id = None;
            row.reference = None;
        }
    }

    fn apply_component_color(&self, row: &mut ComponentRow, value: Option<i32>) {
        row.color_id = value;

        let color_id = match value {
            Some(color_id) => color_id,
            None => {
                row.color_name = None;
                row.combination_id = None;
                row.reference = None;
                return;
            }
        };

        row.color_name = self.catalog.color_by_id(color_id).map(|c| c.name.clone());
        let combination = row
            .component_id
            .and_then(|component_id| self.catalog.combination_for(component_id, color_id));
        row.combination_id = combination.map(|c| c.id);
        row.reference = combination.map(|c| c.reference.clone());
    }

    /// Правило завершённости строки компонента
    pub fn is_component_complete(&self, row: &ComponentRow) -> bool {
        let component = match row.component_id.and_then(|id| self.catalog.component_by_id(id)) {
            Some(component) => component,
            None => return false,
        };
        if component.requires_no_color {
            return true;
        }
        row.color_id.is_some() && row.reference.is_some()
    }

    // ============================================================================
    // Строки шаров
    // ============================================================================

    /// Обновить поле строки шара
    ///
    /// Сброс каскадом: очистка ключа уровнем выше обнуляет все зависимые
    /// ключи ниже. SKU подбирается заново после каждого изменения.
    pub fn update_ball_field(
        &self,
        composition: &Composition,
        row_index: usize,
        field: BallRowField,
    ) -> Composition {
        let mut next = composition.clone();
        ensure_row(&mut next.balls, row_index);

        let was_complete = self.is_ball_complete(&next.balls[row_index]);
        {
            let row = &mut next.balls[row_index];
            match field {
                BallRowField::Color(value) => {
                    row.color_id = value;
                    match value {
                        Some(id) => {
                            row.color_name =
                                self.catalog.color_by_id(id).map(|c| c.name.clone());
                        }
                        None => {
                            row.color_name = None;
                            row.finish_id = None;
                            row.finish_name = None;
                            row.size_id = None;
                            row.size_name = None;
                            row.reference = None;
                        }
                    }
                }
                BallRowField::Finish(value) => {
                    row.finish_id = value;
                    match value {
                        Some(id) => {
                            row.finish_name =
                                self.catalog.finish_by_id(id).map(|f| f.name.clone());
                        }
                        None => {
                            row.finish_name = None;
                            row.size_id = None;
                            row.size_name = None;
                            row.reference = None;
                        }
                    }
                }
                BallRowField::Size(value) => {
                    row.size_id = value;
                    match value {
                        Some(id) => {
                            row.size_name = self.catalog.size_by_id(id).map(|s| s.name.clone());
                        }
                        None => {
                            row.size_name = None;
                            row.reference = None;
                        }
                    }
                }
            }

            match (row.color_id, row.finish_id, row.size_id) {
                (Some(color_id), Some(finish_id), Some(size_id)) => {
                    let variant = self.catalog.ball_variant(color_id, finish_id, size_id);
                    row.bola_id = variant.map(|v| v.id);
                    row.reference = variant.map(|v| v.reference.clone());
                }
                _ => {
                    row.bola_id = None;
                    row.reference = None;
                }
            }
        }

        if !was_complete && self.is_ball_complete(&next.balls[row_index]) {
            next.balls.push(BallRow::blank());
        }
        next
    }

    /// Правило завершённости строки шара
    pub fn is_ball_complete(&self, row: &BallRow) -> bool {
        row.color_id.is_some()
            && row.finish_id.is_some()
            && row.size_id.is_some()
            && row.reference.is_some()
    }

    // ============================================================================
    // Удаление строк
    // ============================================================================

    /// Удалить строку компонента по индексу
    ///
    /// Сопутствующий контракт: перенумерация внешних карт состояния строк
    /// лежит на вызывающей стороне.
    pub fn remove_component_row(&self, composition: &Composition, row_index: usize) -> Composition {
        let mut next = composition.clone();
        if row_index < next.components.len() {
            next.components.remove(row_index);
        }
        next
    }

    /// Удалить строку шара по индексу
    pub fn remove_ball_row(&self, composition: &Composition, row_index: usize) -> Composition {
        let mut next = composition.clone();
        if row_index < next.balls.len() {
            next.balls.remove(row_index);
        }
        next
    }
}

fn ensure_row<T: Default>(rows: &mut Vec<T>, row_index: usize) {
    while rows.len() <= row_index {
        rows.push(T::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BallVariant, Color, Combination, Component, Finish, Size};

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
                Component {
                    id: 3,
                    name: "Крепёжная скоба".into(),
                    reference: None,
                    requires_no_color: true,
                },
                Component {
                    id: 4,
                    name: "Каркас ёлки".into(),
                    reference: Some("FR-TREE".into()),
                    requires_no_color: false,
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
            ],
            vec![Finish {
                id: 20,
                name: "Глянец".into(),
                reference: None,
            }],
            vec![Size {
                id: 30,
                name: "20 см".into(),
                reference: None,
            }],
            vec![
                Combination {
                    id: 100,
                    component_id: 1,
                    color_id: 10,
                    reference: "FR-STAR-WW".into(),
                },
                Combination {
                    id: 101,
                    component_id: 1,
                    color_id: 11,
                    reference: "FR-STAR-RED".into(),
                },
                // У блока питания ровно один "цвет" — корпусной
                Combination {
                    id: 102,
                    component_id: 2,
                    color_id: 10,
                    reference: "PSU-24-WW".into(),
                },
                Combination {
                    id: 103,
                    component_id: 4,
                    color_id: 10,
                    reference: "FR-TREE-WW".into(),
                },
            ],
            vec![BallVariant {
                id: 200,
                color_id: 11,
                finish_id: 20,
                size_id: 30,
                reference: "BOLA-RED-GL-20".into(),
            }],
        )
    }

    #[test]
    fn test_component_selection_fills_names() {
        let catalog = catalog();
        let engine = CompositionEngine::new(&catalog);
        let composition = engine.update_component_field(
            &Composition::new(),
            0,
            ComponentRowField::Component(Some(1)),
        );

        let row = &composition.components[0];
        assert_eq!(row.component_name.as_deref(), Some("Каркас звезды"));
        assert_eq!(row.component_reference.as_deref(), Some("FR-STAR"));
        assert!(row.reference.is_none());
        // Строка не завершена — пустая строка не дописывается
        assert_eq!(composition.components.len(), 1);
    }

    #[test]
    fn test_color_selection_resolves_combination_and_appends_blank() {
        let catalog = catalog();
        let engine = CompositionEngine::new(&catalog);
        let composition = engine.update_component_field(
            &Composition::new(),
            0,
            ComponentRowField::Component(Some(1)),
        );
        let composition =
            engine.update_component_field(&composition, 0, ComponentRowField::Color(Some(11)));

        let row = &composition.components[0];
        assert_eq!(row.color_name.as_deref(), Some("Красный"));
        assert_eq!(row.combination_id, Some(101));
        assert_eq!(row.reference.as_deref(), Some("FR-STAR-RED"));
        assert!(engine.is_component_complete(row));
        // Переход в завершённую строку дописал пустую
        assert_eq!(composition.components.len(), 2);
        assert_eq!(composition.components[1], ComponentRow::blank());
    }

    #[test]
    fn test_update_is_idempotent_no_double_append() {
        let catalog = catalog();
        let engine = CompositionEngine::new(&catalog);
        let composition = engine.update_component_field(
            &Composition::new(),
            0,
            ComponentRowField::Component(Some(1)),
        );
        let once =
            engine.update_component_field(&composition, 0, ComponentRowField::Color(Some(11)));
        let twice = engine.update_component_field(&once, 0, ComponentRowField::Color(Some(11)));

        // Пустая строка дописывается только на переходе, не на каждом апдейте
        assert_eq!(once, twice);
        assert_eq!(twice.components.len(), 2);
    }

    #[test]
    fn test_no_color_component_auto_resolves_single_combination() {
        let catalog = catalog();
        let engine = CompositionEngine::new(&catalog);
        let composition = engine.update_component_field(
            &Composition::new(),
            0,
            ComponentRowField::Component(Some(2)),
        );

        let row = &composition.components[0];
        assert_eq!(row.color_id, Some(10));
        assert_eq!(row.combination_id, Some(102));
        assert_eq!(row.reference.as_deref(), Some("PSU-24-WW"));
        assert!(engine.is_component_complete(row));
        assert_eq!(composition.components.len(), 2);
    }

    #[test]
    fn test_no_color_component_without_combinations_uses_own_reference() {
        let catalog = catalog();
        let engine = CompositionEngine::new(&catalog);
        let composition = engine.update_component_field(
            &Composition::new(),
            0,
            ComponentRowField::Component(Some(3)),
        );

        let row = &composition.components[0];
        assert!(row.color_id.is_none());
        assert!(row.combination_id.is_none());
        // Собственного артикула у скобы нет — reference остаётся пустым,
        // но строка считается завершённой
        assert!(row.reference.is_none());
        assert!(engine.is_component_complete(row));
    }

    #[test]
    fn test_component_change_preserves_color_and_reresolves() {
        let catalog = catalog();
        let engine = CompositionEngine::new(&catalog);
        let composition = engine.update_component_field(
            &Composition::new(),
            0,
            ComponentRowField::Component(Some(1)),
        );
        let composition =
            engine.update_component_field(&composition, 0, ComponentRowField::Color(Some(10)));
        assert_eq!(
            composition.components[0].reference.as_deref(),
            Some("FR-STAR-WW")
        );

        // Цвет сохранён, комбинация пересчитана под новый компонент
        let composition = engine.update_component_field(
            &composition,
            0,
            ComponentRowField::Component(Some(4)),
        );
        let row = &composition.components[0];
        assert_eq!(row.color_id, Some(10));
        assert_eq!(row.combination_id, Some(103));
        assert_eq!(row.reference.as_deref(), Some("FR-TREE-WW"));

        // Пары (4, Красный) в каталоге нет — артикул сбрасывается
        let composition =
            engine.update_component_field(&composition, 0, ComponentRowField::Color(Some(11)));
        let row = &composition.components[0];
        assert_eq!(row.color_name.as_deref(), Some("Красный"));
        assert!(row.combination_id.is_none());
        assert!(row.reference.is_none());
        assert!(!engine.is_component_complete(row));
    }

    #[test]
    fn test_clearing_color_resets_reference() {
        let catalog = catalog();
        let engine = CompositionEngine::new(&catalog);
        let composition = engine.update_component_field(
            &Composition::new(),
            0,
            ComponentRowField::Component(Some(1)),
        );
        let composition =
            engine.update_component_field(&composition, 0, ComponentRowField::Color(Some(11)));
        let composition =
            engine.update_component_field(&composition, 0, ComponentRowField::Color(None));

        let row = &composition.components[0];
        assert!(row.color_name.is_none());
        assert!(row.combination_id.is_none());
        assert!(row.reference.is_none());
        assert!(!engine.is_component_complete(row));
    }

    #[test]
    fn test_ball_row_resolves_sku_when_all_keys_set() {
        let catalog = catalog();
        let engine = CompositionEngine::new(&catalog);
        let composition =
            engine.update_ball_field(&Composition::new(), 0, BallRowField::Color(Some(11)));
        let composition =
            engine.update_ball_field(&composition, 0, BallRowField::Finish(Some(20)));
        assert!(composition.balls[0].reference.is_none());

        let composition = engine.update_ball_field(&composition, 0, BallRowField::Size(Some(30)));
        let row = &composition.balls[0];
        assert_eq!(row.bola_id, Some(200));
        assert_eq!(row.reference.as_deref(), Some("BOLA-RED-GL-20"));
        assert_eq!(row.size_name.as_deref(), Some("20 см"));
        // Завершённая строка дописала пустую
        assert_eq!(composition.balls.len(), 2);
    }

    #[test]
    fn test_ball_cascade_reset_on_color_clear() {
        let catalog = catalog();
        let engine = CompositionEngine::new(&catalog);
        let composition =
            engine.update_ball_field(&Composition::new(), 0, BallRowField::Color(Some(11)));
        let composition =
            engine.update_ball_field(&composition, 0, BallRowField::Finish(Some(20)));
        let composition = engine.update_ball_field(&composition, 0, BallRowField::Size(Some(30)));

        let composition = engine.update_ball_field(&composition, 0, BallRowField::Color(None));
        let row = &composition.balls[0];
        assert!(row.finish_id.is_none());
        assert!(row.finish_name.is_none());
        assert!(row.size_id.is_none());
        assert!(row.size_name.is_none());
        assert!(row.reference.is_none());
        assert!(row.bola_id.is_none());
    }

    #[test]
    fn test_ball_unknown_sku_clears_reference() {
        let catalog = catalog();
        let engine = CompositionEngine::new(&catalog);
        // Пара «тёплый белый + глянец» не образует SKU
        let composition =
            engine.update_ball_field(&Composition::new(), 0, BallRowField::Color(Some(10)));
        let composition =
            engine.update_ball_field(&composition, 0, BallRowField::Finish(Some(20)));
        let composition = engine.update_ball_field(&composition, 0, BallRowField::Size(Some(30)));

        let row = &composition.balls[0];
        assert!(row.bola_id.is_none());
        assert!(row.reference.is_none());
        assert_eq!(composition.balls.len(), 1);
    }

    #[test]
    fn test_update_pads_missing_rows() {
        let catalog = catalog();
        let engine = CompositionEngine::new(&catalog);
        let composition = engine.update_component_field(
            &Composition::new(),
            2,
            ComponentRowField::Component(Some(1)),
        );
        assert_eq!(composition.components.len(), 3);
        assert_eq!(composition.components[0], ComponentRow::blank());
    }

    #[test]
    fn test_remove_rows_by_index() {
        let catalog = catalog();
        let engine = CompositionEngine::new(&catalog);
        let composition = engine.update_component_field(
            &Composition::new(),
            0,
            ComponentRowField::Component(Some(2)),
        );
        assert_eq!(composition.components.len(), 2);

        let composition = engine.remove_component_row(&composition, 0);
        assert_eq!(composition.components.len(), 1);
        assert_eq!(composition.components[0], ComponentRow::blank());

        // Индекс за пределами списка игнорируется
        let composition = engine.remove_ball_row(&composition, 5);
        assert_eq!(composition.balls.len(), 1);
    }
}
