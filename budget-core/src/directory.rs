//! Spending categories and the companies known under each one.
//!
//! The directory only feeds pickers; aggregation never consults it, and a
//! receipt from an unregistered company is perfectly valid.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{BudgetError, Result};

/// The fixed spending categories, in display order.
pub const CATEGORIES: [&str; 9] = [
    "Transporte",
    "Supermercado",
    "Contas",
    "Eventos",
    "Jantar fora",
    "Lojas",
    "Assinaturas",
    "Combustível",
    "Cuidados pessoais",
];

const DEFAULT_COMPANIES: [(&str, &[&str]); 9] = [
    ("Transporte", &["STM", "UBER"]),
    (
        "Supermercado",
        &[
            "MARCHE SA", "WALMART", "SUPER C", "MAXI", "MARCHE DOMAINE", "IGA", "COSTCO",
            "PROVIGO", "SAQ", "MARCHE BRESILIEN", "BULKBARN", "METRO", "ADONIS", "T&T",
            "KIMPHAY", "MERCADO",
        ],
    ),
    (
        "Contas",
        &[
            "HIPOTECA", "LUZ", "VIRGEM", "IPTU", "TAXA MUNICIPAL", "CONDÔMINO",
            "CARTÃO CRÉDITO", "CARTÃO ZOO", "H. EXTR. ANUAL", "VIDEOTRON",
        ],
    ),
    (
        "Eventos",
        &[
            "MOOSE BAWR", "YATAI", "POTAGER MONT-ROUGE", "BIXI", "AIRBNB", "ESTACIONAMENTO",
            "ZOO", "CENTRE BELL", "CINEMA",
        ],
    ),
    (
        "Jantar fora",
        &[
            "CAFÉ", "TIM HORTONS", "PRESOTEA", "KETTLEMANS BAGEL", "SUSHI", "BOSTON", "PIZZA",
            "McDonalds", "LA CAGE", "THE KEG", "SUBWAY", "REFEITÓRIO DESJARDINS", "RESTAURANTE",
        ],
    ),
    (
        "Lojas",
        &[
            "CDN TIRE", "SHEIN", "DOLLARAMA", "AMAZON", "MINISO", "URBAN PLANET", "JOGOS ONLINE",
            "HP", "ZARA", "WINNERS", "ARDENE", "IKEA", "AVIZOO",
        ],
    ),
    (
        "Assinaturas",
        &[
            "MICROSOFT", "NETFLIX", "ICI TOUT TELE", "MY FAMILY", "DISNEY", "AMAZON PRIME", "HBO",
            "APPLE TV", "CHATGPT", "YOUTUBE", "SPOTIFY",
        ],
    ),
    ("Combustível", &["PETRO CANADA", "COSTCO GASOLINA", "ESSO"]),
    (
        "Cuidados pessoais",
        &[
            "CABELO", "UNHA", "PHARMAPRIX", "JEAN COUTO", "ACADEMIA", "REMÉDIO", "MASSAGEM",
            "MÉDICO", "VETERINÁRIO",
        ],
    ),
];

pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

#[derive(Debug, Clone)]
pub struct CompanyDirectory {
    companies: HashMap<String, Vec<String>>,
}

impl Default for CompanyDirectory {
    fn default() -> Self {
        let companies = DEFAULT_COMPANIES
            .iter()
            .map(|(cat, names)| (cat.to_string(), names.iter().map(|n| n.to_string()).collect()))
            .collect();
        Self { companies }
    }
}

impl CompanyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self {
            companies: HashMap::new(),
        }
    }

    /// Companies registered under `category`, in registration order.
    pub fn companies(&self, category: &str) -> &[String] {
        self.companies
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The fixed categories first, then any category created by
    /// registration, alphabetically.
    pub fn categories(&self) -> Vec<&str> {
        let mut extra: Vec<&str> = self
            .companies
            .keys()
            .map(String::as_str)
            .filter(|c| !is_known_category(c))
            .collect();
        extra.sort_unstable();
        CATEGORIES.iter().copied().chain(extra).collect()
    }

    /// Adds `name` under `category`. Returns `false` if it was already there.
    pub fn register(&mut self, category: &str, name: &str) -> Result<bool> {
        let category = category.trim();
        let name = name.trim();
        if name.is_empty() {
            return Err(BudgetError::validation("company name is required"));
        }
        if category.is_empty() {
            return Err(BudgetError::validation("category is required"));
        }

        let list = self.companies.entry(category.to_string()).or_default();
        if list.iter().any(|n| n == name) {
            return Ok(false);
        }
        list.push(name.to_string());
        debug!(category, name, "company registered");
        Ok(true)
    }
}
