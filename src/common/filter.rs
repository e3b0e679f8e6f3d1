// src/common/filter.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Um conjunto de predicados aplicado sobre a lista de um store.
///
/// `apply` é uma função pura: sempre devolve um subconjunto da entrada,
/// preservando a ordem de inserção.
pub trait RecordFilter<T> {
    fn matches(&self, record: &T) -> bool;

    fn apply(&self, records: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Multi-seleção: vazio significa "sem filtro", nunca "nada".
pub fn selected<E: PartialEq>(choices: &[E], value: &E) -> bool {
    choices.is_empty() || choices.contains(value)
}

/// Busca textual sem diferenciar maiúsculas, em qualquer um dos campos.
pub fn text_matches(search: &str, fields: &[&str]) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

/// Filtro opcional por id relacionado (cliente, processo...).
pub fn related<I: PartialEq>(wanted: Option<I>, actual: Option<I>) -> bool {
    match wanted {
        Some(id) => actual == Some(id),
        None => true,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn lower_bound(&self) -> Option<DateTime<Utc>> {
        self.from.map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    // O "até" vale o dia inteiro: 23:59:59.999.
    pub fn upper_bound(&self) -> Option<DateTime<Utc>> {
        self.to
            .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
            .map(|dt| dt.and_utc())
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        if let Some(lower) = self.lower_bound() {
            if at < lower {
                return false;
            }
        }
        if let Some(upper) = self.upper_bound() {
            if at > upper {
                return false;
            }
        }
        true
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(date.and_time(NaiveTime::MIN).and_utc())
    }
}
