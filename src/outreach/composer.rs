// file: src/outreach/composer.rs
// description: personalized outreach draft generation from feature records
// reference: string templating over extracted company facts

use crate::config::OutreachConfig;
use crate::models::{FeatureRecord, OutreachDraft, SentStatus};
use chrono::Utc;

const FALLBACK_NAME: &str = "Уважаемые коллеги";
const HIGH_SCORE: u8 = 5;
const MEDIUM_SCORE: u8 = 3;
const PRODUCTS_SHOWN: usize = 3;
const COUNTRIES_SHOWN: usize = 2;

pub struct EmailComposer {
    sender_company: String,
    sender_name: String,
    product_offering: String,
    contact_email: String,
    contact_phone: String,
}

impl EmailComposer {
    pub fn from_config(config: &OutreachConfig) -> Self {
        Self {
            sender_company: config.sender_company.clone(),
            sender_name: config.sender_name.clone(),
            product_offering: config.product_offering.clone(),
            contact_email: config.contact_email.clone(),
            contact_phone: config.contact_phone.clone(),
        }
    }

    /// 0..=9: importer 3, products 2, countries 2, financial 1, recent 1.
    pub fn personalization_score(record: &FeatureRecord) -> u8 {
        let mut score = 0;
        if record.is_importer {
            score += 3;
        }
        if !record.product_mentions.is_empty() {
            score += 2;
        }
        if !record.mentioned_countries.is_empty() {
            score += 2;
        }
        if record.has_financial_indicators {
            score += 1;
        }
        if record.recent_activity {
            score += 1;
        }
        score
    }

    pub fn compose(&self, record: &FeatureRecord, display_name: Option<&str>) -> OutreachDraft {
        let name = resolve_name(display_name);
        let score = Self::personalization_score(record);
        let facts = collect_facts(record);

        OutreachDraft {
            company_id: record.company_id.clone(),
            company_name: display_name.map(str::to_string).unwrap_or_else(|| "N/A".to_string()),
            subject: self.subject(record, score),
            body: self.body(name, &facts, score),
            personalization_score: score,
            generated_at: Utc::now(),
            sent_status: SentStatus::Pending,
        }
    }

    fn subject(&self, record: &FeatureRecord, score: u8) -> String {
        if score >= HIGH_SCORE {
            match record.product_mentions.iter().next() {
                Some(product) => format!("Оптимизация поставок {}. Персональное предложение", product),
                None => "Специальное предложение для вашей компании".to_string(),
            }
        } else if record.is_importer {
            "Решения для импортёров. Снижение затрат до 20%".to_string()
        } else {
            format!("Предложение от {}", self.sender_company)
        }
    }

    fn body(&self, name: &str, facts: &[String], score: u8) -> String {
        let greeting = format!("Здравствуйте, {}!\n\n", name);

        let intro = if facts.is_empty() {
            "Мы внимательно изучили профиль вашей компании.\n\n".to_string()
        } else {
            format!(
                "Мы заметили, что вы {}. Это делает наше предложение особенно актуальным для вас.\n\n",
                facts.join(", ")
            )
        };

        let value_prop = if score >= HIGH_SCORE {
            format!(
                "{} специализируется на {}. Учитывая специфику вашего бизнеса, мы можем предложить:\n\n\
                 + Снижение затрат на логистику до 20%\n\
                 + Оптимизацию таможенного оформления\n\
                 + Надёжных партнёров для комплексных поставок\n\n",
                self.sender_company, self.product_offering
            )
        } else if score >= MEDIUM_SCORE {
            format!(
                "{} помогает компаниям оптимизировать {}.\n\n\
                 Наши клиенты в среднем:\n\
                 + Экономят до 15% на логистике\n\
                 + Сокращают время доставки на 30%\n\
                 + Минимизируют риски при импорте\n\n",
                self.sender_company, self.product_offering
            )
        } else {
            format!(
                "{} предлагает {}.\n\n\
                 Мы будем рады обсудить возможности сотрудничества.\n\n",
                self.sender_company, self.product_offering
            )
        };

        let cta = "Готовы рассказать о конкретных решениях для вашей компании.\n\n\
                   Удобно ли вам созвониться на этой неделе?\n\n";

        let signature = format!(
            "С уважением,\n{}\n{}\nEmail: {}\nТел: {}",
            self.sender_name, self.sender_company, self.contact_email, self.contact_phone
        );

        format!("{}{}{}{}{}", greeting, intro, value_prop, cta, signature)
    }
}

fn resolve_name(display_name: Option<&str>) -> &str {
    match display_name.map(str::trim) {
        Some(name) if !name.is_empty() && name != "N/A" => name,
        _ => FALLBACK_NAME,
    }
}

fn collect_facts(record: &FeatureRecord) -> Vec<String> {
    let mut facts = Vec::new();

    if record.is_importer {
        facts.push("занимаетесь импортом".to_string());
    }
    if !record.product_mentions.is_empty() {
        let shown: Vec<&str> = record
            .product_mentions
            .iter()
            .take(PRODUCTS_SHOWN)
            .map(String::as_str)
            .collect();
        facts.push(format!("работаете с {}", shown.join(", ")));
    }
    if !record.mentioned_countries.is_empty() {
        let shown: Vec<&str> = record
            .mentioned_countries
            .iter()
            .take(COUNTRIES_SHOWN)
            .map(String::as_str)
            .collect();
        facts.push(format!("сотрудничаете с партнёрами из {}", shown.join(", ")));
    }
    if record.has_financial_indicators {
        facts.push("ведёте активную коммерческую деятельность".to_string());
    }
    if record.recent_activity {
        facts.push("развиваете бизнес в текущем году".to_string());
    }

    facts
}
