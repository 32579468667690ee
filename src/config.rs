// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{EnrichmentError, Result};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub input: InputConfig,
    pub storage: StorageConfig,
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub outreach: OutreachConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    pub path: PathBuf,
    pub format: SourceFormat,
    /// Only used for sqlite sources.
    #[serde(default = "default_table")]
    pub table: String,
    pub id_column: String,
    pub text_column: String,
    #[serde(default)]
    pub name_column: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub database_path: PathBuf,
    pub validation_path: PathBuf,
    pub drafts_path: PathBuf,
    pub report_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub parallel_workers: usize,
    pub force_reprocess: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,
    /// Extra `form<TAB>lemma` entries layered over the built-in lexicon.
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
    #[serde(default = "default_import_keywords")]
    pub import_keywords: Vec<String>,
    #[serde(default = "default_negation_lemmas")]
    pub negation_lemmas: Vec<String>,
    #[serde(default = "default_electronics_keywords")]
    pub electronics_keywords: Vec<String>,
    #[serde(default = "default_country_keywords")]
    pub country_keywords: Vec<String>,
    // Stems such as "поставщ" are matched literally against lemmas.
    #[serde(default = "default_activity_indicator_lemmas")]
    pub activity_indicator_lemmas: Vec<String>,
    #[serde(default = "default_financial_lemmas")]
    pub financial_lemmas: Vec<String>,
    #[serde(default = "default_recent_activity_phrases")]
    pub recent_activity_phrases: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutreachConfig {
    pub sender_company: String,
    pub sender_name: String,
    pub product_offering: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub only_validated: bool,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("LEAD_ENRICHER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| EnrichmentError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| EnrichmentError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            input: InputConfig {
                path: PathBuf::from("data/raw/companies_demo.db"),
                format: SourceFormat::Sqlite,
                table: default_table(),
                id_column: "inn".to_string(),
                text_column: "news".to_string(),
                name_column: Some("name_short".to_string()),
            },
            storage: StorageConfig {
                database_path: PathBuf::from("data/processed/enriched_companies.db"),
                validation_path: PathBuf::from("data/processed/validated.csv"),
                drafts_path: PathBuf::from("data/processed/generated_emails.csv"),
                report_path: PathBuf::from("data/processed/enrichment_report.json"),
            },
            pipeline: PipelineConfig {
                parallel_workers: 4,
                force_reprocess: false,
            },
            extraction: ExtractionConfig::default(),
            outreach: OutreachConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.parallel_workers == 0 {
            return Err(EnrichmentError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.extraction.min_text_length == 0 {
            return Err(EnrichmentError::Config(
                "min_text_length must be greater than 0".to_string(),
            ));
        }

        if self.extraction.import_keywords.is_empty() {
            return Err(EnrichmentError::Config(
                "import_keywords must not be empty".to_string(),
            ));
        }

        if self.input.format == SourceFormat::Sqlite {
            Validator::validate_sql_identifier(&self.input.table)
                .map_err(|e| EnrichmentError::Config(e.to_string()))?;
            Validator::validate_sql_identifier(&self.input.id_column)
                .map_err(|e| EnrichmentError::Config(e.to_string()))?;
            Validator::validate_sql_identifier(&self.input.text_column)
                .map_err(|e| EnrichmentError::Config(e.to_string()))?;
            if let Some(name_column) = &self.input.name_column {
                Validator::validate_sql_identifier(name_column)
                    .map_err(|e| EnrichmentError::Config(e.to_string()))?;
            }
        }

        Ok(())
    }
}

impl ExtractionConfig {
    /// SHA-256 over every setting that affects extraction output. Stored
    /// alongside each record so a settings change forces reprocessing.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.min_text_length.to_le_bytes());
        if let Some(path) = &self.lexicon_path {
            hasher.update(path.to_string_lossy().as_bytes());
        }
        for list in [
            &self.import_keywords,
            &self.negation_lemmas,
            &self.electronics_keywords,
            &self.country_keywords,
            &self.activity_indicator_lemmas,
            &self.financial_lemmas,
            &self.recent_activity_phrases,
        ] {
            hasher.update(b"\x1e");
            for item in list {
                hasher.update(item.as_bytes());
                hasher.update(b"\x1f");
            }
        }
        format!("{:x}", hasher.finalize())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_text_length: default_min_text_length(),
            lexicon_path: None,
            import_keywords: default_import_keywords(),
            negation_lemmas: default_negation_lemmas(),
            electronics_keywords: default_electronics_keywords(),
            country_keywords: default_country_keywords(),
            activity_indicator_lemmas: default_activity_indicator_lemmas(),
            financial_lemmas: default_financial_lemmas(),
            recent_activity_phrases: default_recent_activity_phrases(),
        }
    }
}

impl Default for OutreachConfig {
    fn default() -> Self {
        Self {
            sender_company: "Ваша Компания".to_string(),
            sender_name: "Менеджер по развитию".to_string(),
            product_offering: "логистические решения для импортёров".to_string(),
            contact_email: "manager@example.com".to_string(),
            contact_phone: "+7 (XXX) XXX-XX-XX".to_string(),
            only_validated: true,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_table() -> String {
    "companies".to_string()
}

fn default_min_text_length() -> usize {
    20
}

fn default_import_keywords() -> Vec<String> {
    to_strings(&[
        "импорт",
        "импортирование",
        "ввоз",
        "ввозить",
        "импортировать",
        "импортёр",
        "закупка",
        "закупать",
        "поставляем из",
        "поставка",
        "поставлять",
        "дистрибуция",
        "дистрибьютор",
        "поставщик",
        "оптовый",
        "оптом",
        "опт",
        "реэкспорт",
        "экспорт/импорт",
    ])
}

fn default_negation_lemmas() -> Vec<String> {
    to_strings(&["не", "нет", "без", "ни", "никогда", "никак"])
}

fn default_electronics_keywords() -> Vec<String> {
    to_strings(&[
        "микросхема",
        "интегральная схема",
        "ics",
        "чип",
        "плата",
        "контроллер",
        "процессор",
        "память",
        "модуль",
        "радиодеталь",
        "конденсатор",
        "резистор",
        "транзистор",
        "адаптер",
        "разъём",
        "дисплей",
        "экран",
        "смартфон",
        "телевизор",
        "ноутбук",
        "компьютер",
        "компонент",
        "сборка",
        "электроника",
    ])
}

fn default_country_keywords() -> Vec<String> {
    to_strings(&[
        "китай",
        "кндр",
        "китайская народная республика",
        "тайвань",
        "корея",
        "южная корея",
        "юж. корея",
        "япония",
        "германия",
        "польша",
        "сша",
        "соединенные штаты",
        "великобритания",
        "европа",
    ])
}

fn default_activity_indicator_lemmas() -> Vec<String> {
    to_strings(&[
        "поставка",
        "поставок",
        "оборот",
        "объём",
        "объем",
        "контракт",
        "контракты",
        "договор",
        "договоры",
        "реализовано",
        "продано",
        "продажи",
        "продажа",
        "клиент",
        "клиенты",
        "партнёр",
        "партнёры",
        "поставщ",
        "закупк",
        "закупки",
        "заказ",
        "заказы",
        "проект",
        "проекты",
        "экспорт",
        "импор",
    ])
}

fn default_financial_lemmas() -> Vec<String> {
    to_strings(&[
        "миллион", "миллиард", "тысяча", "рубль", "доллар", "евро", "млн", "млрд", "тыс",
    ])
}

fn default_recent_activity_phrases() -> Vec<String> {
    to_strings(&[
        "последний год",
        "в этом году",
        "за последний год",
        "недавно",
        "в прошлом году",
        "2025",
    ])
}
