//! Общие типы и доменная модель конструктора световых логотипов.
//!
//! Крейт не содержит I/O: только справочный каталог, структуры данных и
//! чистую логику резолюции состава.

pub mod catalog;
pub mod composition;
pub mod domain;
pub mod shared;
