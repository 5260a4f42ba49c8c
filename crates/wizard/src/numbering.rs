//! Автонумерация логотипов.
//!
//! Номер хранится строкой в формате `"<проект> -L<n>"`. Номера уже
//! идентифицированных элементов стабильны между сохранениями; новый
//! элемент получает наименьший свободный номер, дыры заполняются раньше
//! роста максимума.

use std::collections::HashSet;

use contracts::domain::a002_logo_item::LogoItem;
use once_cell::sync::Lazy;
use regex::Regex;

/// Формат номера в хранимых данных — контракт совместимости, менять нельзя
static LOGO_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)-L\s*(\d+)").expect("invalid logo number pattern"));

/// Порядковый номер из строки вида "Проект -L7"
///
/// Строки без номера (легаси, ручные правки) дают `None` и никогда ошибку.
pub fn parse_number(value: &str) -> Option<u32> {
    LOGO_NUMBER_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Выбрать номер для текущего логотипа
pub fn generate_logo_number(
    project_name: &str,
    current_logo_number: &str,
    saved_logos: &[LogoItem],
    current_item: &LogoItem,
) -> String {
    if project_name.trim().is_empty() {
        return String::new();
    }

    // Уже сохранённый элемент со своим корректным номером не перенумеровывается
    if current_item.id.is_some() && parse_number(&current_item.logo_number).is_some() {
        return current_item.logo_number.clone();
    }

    let mut used: HashSet<u32> = saved_logos
        .iter()
        .filter_map(|logo| parse_number(&logo.logo_number))
        .collect();

    // Номер несохранённого черновика тоже занят
    if current_item.id.is_none() && current_item.logo_number != current_logo_number {
        if let Some(number) = parse_number(&current_item.logo_number) {
            used.insert(number);
        }
    }

    // Уже учтённый номер посреди редактирования остаётся как есть
    if let Some(current) = parse_number(current_logo_number) {
        if used.contains(&current) {
            return current_logo_number.to_string();
        }
    }

    let mut next = 1u32;
    while used.contains(&next) {
        next += 1;
    }

    format!("{} -L{}", project_name, next)
}
