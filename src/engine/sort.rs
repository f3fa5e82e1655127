use std::borrow::Cow;
use std::cmp::Ordering;

use crate::engine::accessor::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        }
    }
}

/// Single-column, tri-state sort.
///
/// Clicking a column cycles `Asc -> Desc -> Default`; clicking another
/// column always restarts at `Asc` on that column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortState {
    #[default]
    Default,
    Active {
        column: String,
        direction: SortDirection,
    },
}

impl SortState {
    pub fn column(&self) -> Option<&str> {
        match self {
            SortState::Default => None,
            SortState::Active { column, .. } => Some(column),
        }
    }

    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            SortState::Default => None,
            SortState::Active { direction, .. } => Some(*direction),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, SortState::Default)
    }

    /// Direction to show on the header of `column`, if it is the active one.
    pub fn direction_for(&self, column: &str) -> Option<SortDirection> {
        match self {
            SortState::Active {
                column: active,
                direction,
            } if active == column => Some(*direction),
            _ => None,
        }
    }

    pub fn toggled(&self, column: &str) -> SortState {
        match self {
            SortState::Active {
                column: active,
                direction: SortDirection::Asc,
            } if active == column => SortState::Active {
                column: column.to_string(),
                direction: SortDirection::Desc,
            },
            SortState::Active {
                column: active,
                direction: SortDirection::Desc,
            } if active == column => SortState::Default,
            _ => SortState::Active {
                column: column.to_string(),
                direction: SortDirection::Asc,
            },
        }
    }
}

/// Orders two resolved values for `direction`.
///
/// `Null` is the minimal value, so it leads under `Asc` and trails under
/// `Desc`. Values of different kinds fall back to a fixed kind order; the
/// result is always a total order, which `sort_by` requires.
pub fn compare_values(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    direction.apply(natural_order(a, b))
}

fn natural_order(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Text(a), Value::Text(b)) => locale_compare(a, b),
        (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Date(a), Value::Date(b)) => a.cmp(b),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::Date(_) => 3,
        Value::Text(_) => 4,
    }
}

/// Latin letter with its accent removed; anything else unchanged.
fn base_letter(ch: char) -> char {
    match ch {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

/// Ignores case and Latin accents first, then puts unaccented ahead of
/// accented, then lower case ahead of upper case.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let lower = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    let (a_lower, b_lower) = (lower(a), lower(b));
    a_lower
        .iter()
        .map(|ch| base_letter(*ch))
        .cmp(b_lower.iter().map(|ch| base_letter(*ch)))
        .then_with(|| a_lower.cmp(&b_lower))
        .then_with(|| b.cmp(a))
}

/// Sorts `filtered` by the active column, or hands back `default_ordered`
/// verbatim when no column is active.
///
/// The sort is stable: rows with equal keys keep their input order.
pub fn apply_sort<'a, T, F>(
    filtered: &'a [T],
    default_ordered: &'a [T],
    state: &SortState,
    resolve: F,
) -> Cow<'a, [T]>
where
    T: Clone,
    F: Fn(&T, &str) -> Value,
{
    let SortState::Active { column, direction } = state else {
        return Cow::Borrowed(default_ordered);
    };

    let mut keyed: Vec<(Value, &T)> = filtered
        .iter()
        .map(|row| (resolve(row, column.as_str()), row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_values(a, b, *direction));
    Cow::Owned(keyed.into_iter().map(|(_, row)| row.clone()).collect())
}
