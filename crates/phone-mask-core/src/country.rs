//! Country mask table.
//!
//! The table maps ISO 3166-1 alpha-2 ids to one or more mask entries, each
//! carrying its calling code: `{"US": "+1 ###-###-####", "CN": ["+86
//! (###)####-###", "+86 (###)####-####"]}`. A built-in table ships with the
//! crate; hosts can load their own in the same format.

use std::collections::BTreeMap;

use log::debug;
use serde::Deserialize;

use crate::error::{MaskError, MaskResult};
use crate::formatter::Formatter;

const BUILTIN_MASKS: &str = include_str!("../data/masks.json");

/// Country used by [`MaskTable::get_or_default`] when the requested id is
/// unknown.
pub const DEFAULT_COUNTRY: &str = "US";

// 'A' (0x41) + this offset is U+1F1E6 REGIONAL INDICATOR SYMBOL LETTER A.
const REGIONAL_INDICATOR_OFFSET: u32 = 127397;

/// One mask or a list of variants.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MaskSpec {
    Single(String),
    Many(Vec<String>),
}

impl MaskSpec {
    fn into_vec(self) -> Vec<String> {
        match self {
            MaskSpec::Single(mask) => vec![mask],
            MaskSpec::Many(masks) => masks,
        }
    }
}

/// Split a table entry at its first space into calling code and mask.
///
/// An entry without a space is all code.
///
/// ```
/// use phone_mask_core::country::split_mask;
///
/// assert_eq!(split_mask("+7 (###) ###-##-##"), ("+7", "(###) ###-##-##"));
/// assert_eq!(split_mask("+1"), ("+1", ""));
/// ```
pub fn split_mask(entry: &str) -> (&str, &str) {
    entry.split_once(' ').unwrap_or((entry, ""))
}

/// Flag emoji for a two-letter country id.
///
/// ```
/// use phone_mask_core::country::flag_emoji;
///
/// assert_eq!(flag_emoji("us").unwrap(), "🇺🇸");
/// assert!(flag_emoji("USA").is_err());
/// ```
pub fn flag_emoji(id: &str) -> MaskResult<String> {
    let upper = id.to_ascii_uppercase();
    if upper.len() != 2 || !upper.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(MaskError::invalid_country_id(id));
    }

    upper
        .chars()
        .map(|c| char::from_u32(c as u32 + REGIONAL_INDICATOR_OFFSET))
        .collect::<Option<String>>()
        .ok_or_else(|| MaskError::invalid_country_id(id))
}

/// Region subtag of a locale tag as an uppercase country id.
///
/// Accepts `-` and `_` separators and skips script subtags.
///
/// ```
/// use phone_mask_core::country::country_from_locale;
///
/// assert_eq!(country_from_locale("en-US").as_deref(), Some("US"));
/// assert_eq!(country_from_locale("pt_br").as_deref(), Some("BR"));
/// assert_eq!(country_from_locale("zh-Hant-TW").as_deref(), Some("TW"));
/// assert_eq!(country_from_locale("de"), None);
/// ```
pub fn country_from_locale(tag: &str) -> Option<String> {
    tag.split(['-', '_'])
        .skip(1)
        .find(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
        .map(str::to_ascii_uppercase)
}

/// A country entry of the mask table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    /// Uppercase ISO 3166-1 alpha-2 id.
    pub id: String,
    /// Calling code with its plus sign (`"+1"`).
    pub code: String,
    /// Mask variants without the calling code.
    pub masks: Vec<String>,
    pub flag: String,
    /// Display name; the id unless the host supplied one.
    pub name: String,
}

impl Country {
    /// The mask variants with the calling code put back in front.
    pub fn full_masks(&self) -> Vec<String> {
        self.masks
            .iter()
            .map(|mask| {
                if self.code.is_empty() {
                    mask.clone()
                } else {
                    format!("{} {}", self.code, mask)
                }
            })
            .collect()
    }

    /// A formatter for this country's variants.
    pub fn formatter(&self) -> MaskResult<Formatter> {
        Formatter::from_country(self)
    }
}

/// All countries known to the engine, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MaskTable {
    countries: BTreeMap<String, Country>,
}

impl MaskTable {
    /// Parse a mask table.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, ids that are not two ASCII letters, and
    /// entries with an empty variant list.
    ///
    /// ```
    /// use phone_mask_core::country::MaskTable;
    ///
    /// let table = MaskTable::from_json(r#"{"us": "+1 ###-###-####"}"#).unwrap();
    /// let us = table.get("US").unwrap();
    /// assert_eq!(us.code, "+1");
    /// assert_eq!(us.masks, ["###-###-####"]);
    /// ```
    pub fn from_json(json: &str) -> MaskResult<Self> {
        let raw: BTreeMap<String, MaskSpec> = serde_json::from_str(json)?;

        let mut countries = BTreeMap::new();
        for (id, spec) in raw {
            let flag = flag_emoji(&id)?;
            let id = id.to_ascii_uppercase();

            let entries = spec.into_vec();
            if entries.is_empty() {
                return Err(MaskError::EmptyEntry { id });
            }

            let mut code = "";
            let mut masks = Vec::with_capacity(entries.len());
            for entry in &entries {
                let (entry_code, mask) = split_mask(entry);
                if code.is_empty() {
                    code = entry_code;
                }
                masks.push(mask.to_string());
            }

            let country = Country {
                name: id.clone(),
                id: id.clone(),
                code: code.to_string(),
                masks,
                flag,
            };
            countries.insert(id, country);
        }

        Ok(MaskTable { countries })
    }

    /// The table embedded in the crate.
    pub fn builtin() -> MaskResult<Self> {
        Self::from_json(BUILTIN_MASKS)
    }

    /// Attach display names. Names for ids missing from the table are
    /// ignored.
    pub fn with_names<I, K, V>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (id, name) in names {
            let id = id.as_ref();
            match self.countries.get_mut(&id.to_ascii_uppercase()) {
                Some(country) => country.name = name.into(),
                None => debug!("skipping name for unknown country {id:?}"),
            }
        }
        self
    }

    /// Look a country up by id, ignoring case.
    pub fn get(&self, id: &str) -> Option<&Country> {
        self.countries.get(&id.to_ascii_uppercase())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Like [`MaskTable::get`], falling back to [`DEFAULT_COUNTRY`] and
    /// then to the first country. `None` only for an empty table.
    pub fn get_or_default(&self, id: &str) -> Option<&Country> {
        self.get(id)
            .or_else(|| self.get(DEFAULT_COUNTRY))
            .or_else(|| self.countries.values().next())
    }

    /// Look a country up or fail with [`MaskError::UnknownCountry`].
    pub fn require(&self, id: &str) -> MaskResult<&Country> {
        self.get(id).ok_or_else(|| MaskError::unknown_country(id))
    }

    /// All countries in id order.
    pub fn countries(&self) -> impl Iterator<Item = &Country> {
        self.countries.values()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Countries matching `query`, most relevant first.
    ///
    /// Name matches outrank everything, then id, calling code and code
    /// digits add to the score. A blank query returns every country in id
    /// order.
    ///
    /// ```
    /// use phone_mask_core::country::MaskTable;
    ///
    /// let table = MaskTable::builtin().unwrap();
    /// let hits: Vec<_> = table.search("+44").iter().map(|c| c.id.as_str()).collect();
    /// assert_eq!(hits, ["GB"]);
    /// ```
    pub fn search(&self, query: &str) -> Vec<&Country> {
        let query = query.trim().to_uppercase();
        if query.is_empty() {
            return self.countries().collect();
        }

        let query_digits: String = query.chars().filter(char::is_ascii_digit).collect();

        let mut scored: Vec<(u32, &Country)> = self
            .countries()
            .map(|country| (relevance(country, &query, &query_digits), country))
            .filter(|&(score, _)| score > 0)
            .collect();

        scored.sort_by(|(a_score, a), (b_score, b)| {
            b_score
                .cmp(a_score)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });

        scored.into_iter().map(|(_, country)| country).collect()
    }
}

/// Search score of one country; `query` is already trimmed and uppercased.
fn relevance(country: &Country, query: &str, query_digits: &str) -> u32 {
    let name = country.name.to_uppercase();
    let code_digits: String = country.code.chars().filter(char::is_ascii_digit).collect();
    let mut score = 0;

    if name.starts_with(query) {
        score = 1000;
    } else if name.contains(query) {
        score = 500;
    }

    if country.code.starts_with(query) {
        score += 100;
    } else if country.code.contains(query) {
        score += 50;
    }

    if country.id == query {
        score += 200;
    } else if country.id.starts_with(query) {
        score += 150;
    }

    if !query_digits.is_empty() {
        if code_digits.starts_with(query_digits) {
            score += 80;
        } else if code_digits.contains(query_digits) {
            score += 40;
        }
    }

    score
}
