//! Localized text for market-analysis clauses and recommendations.

use crate::domain::{DealType, MarketClause, RecommendationType, Season};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Locale::Ru),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported locale {}", other)),
        }
    }
}

impl Locale {
    pub fn clause(&self, clause: &MarketClause) -> String {
        match self {
            Locale::Ru => ru_clause(clause),
            Locale::En => en_clause(clause),
        }
    }

    /// Join clauses into one paragraph.
    pub fn market_analysis(&self, clauses: &[MarketClause]) -> String {
        clauses
            .iter()
            .map(|c| self.clause(c))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Title and description of a recommendation.
    pub fn recommendation(&self, kind: RecommendationType) -> (&'static str, &'static str) {
        match self {
            Locale::Ru => ru_recommendation(kind),
            Locale::En => en_recommendation(kind),
        }
    }
}

fn ru_clause(clause: &MarketClause) -> String {
    match clause {
        MarketClause::Opening(deal) => {
            let deal = match deal {
                Some(DealType::Sale) => "продажи",
                Some(DealType::Rent) => "сдачи в аренду",
                None => "сделки",
            };
            format!("Текущая рыночная ситуация благоприятна для {}.", deal)
        }
        MarketClause::PremiumLocation => {
            "Локация объекта относится к престижному району, что повышает его стоимость.".into()
        }
        MarketClause::DevelopingLocation => {
            "Расположение в развивающемся районе позволяет предложить конкурентную цену.".into()
        }
        MarketClause::ExcellentCondition => {
            "Отличное состояние объекта положительно влияет на оценку.".into()
        }
        MarketClause::RenovationReflected => "Необходимость ремонта учтена в цене.".into(),
        MarketClause::SpaciousRooms => "Просторные комнаты являются преимуществом объекта.".into(),
        MarketClause::Season(Season::HighDemand) => {
            "Текущий сезон характеризуется повышенным спросом на недвижимость.".into()
        }
        MarketClause::Season(Season::Summer) => {
            "Летний период обычно показывает умеренную активность на рынке.".into()
        }
        MarketClause::Season(Season::Winter) => {
            "Зимний период может потребовать гибкости в ценообразовании.".into()
        }
    }
}

fn en_clause(clause: &MarketClause) -> String {
    match clause {
        MarketClause::Opening(deal) => {
            let deal = match deal {
                Some(DealType::Sale) => "a sale",
                Some(DealType::Rent) => "renting out",
                None => "a transaction",
            };
            format!("Current market conditions are favourable for {}.", deal)
        }
        MarketClause::PremiumLocation => {
            "The property is in a premium area, which raises its value.".into()
        }
        MarketClause::DevelopingLocation => {
            "A developing area allows for competitive pricing.".into()
        }
        MarketClause::ExcellentCondition => {
            "The excellent condition of the property improves the estimate.".into()
        }
        MarketClause::RenovationReflected => {
            "The cost of the required renovation is already reflected in the price.".into()
        }
        MarketClause::SpaciousRooms => "Spacious rooms are an advantage of the property.".into(),
        MarketClause::Season(Season::HighDemand) => {
            "The current season is a high demand season for real estate.".into()
        }
        MarketClause::Season(Season::Summer) => {
            "Summer usually shows moderate market activity.".into()
        }
        MarketClause::Season(Season::Winter) => {
            "The winter period may require price flexibility.".into()
        }
    }
}

fn ru_recommendation(kind: RecommendationType) -> (&'static str, &'static str) {
    match kind {
        RecommendationType::Renovation => (
            "Рекомендуем косметический ремонт",
            "Небольшие вложения в ремонт могут увеличить стоимость на 10-15%",
        ),
        RecommendationType::Staging => (
            "Рассмотрите стейджинг",
            "Профессиональная подготовка квартиры к продаже ускорит сделку",
        ),
        RecommendationType::Photography => (
            "Профессиональная фотосъемка",
            "Качественные фото увеличивают количество просмотров на 60%",
        ),
        RecommendationType::Documents => (
            "Подготовьте документы заранее",
            "Готовый пакет документов ускоряет сделку на 2-3 недели",
        ),
        RecommendationType::Marketing => (
            "Комплексное продвижение",
            "Размещение на топовых площадках и в соцсетях увеличит поток клиентов",
        ),
    }
}

fn en_recommendation(kind: RecommendationType) -> (&'static str, &'static str) {
    match kind {
        RecommendationType::Renovation => (
            "Consider a cosmetic renovation",
            "A small renovation budget can raise the value by 10-15%",
        ),
        RecommendationType::Staging => (
            "Consider staging",
            "Professional preparation of the property speeds up the deal",
        ),
        RecommendationType::Photography => (
            "Professional photography",
            "Quality photos increase listing views by 60%",
        ),
        RecommendationType::Documents => (
            "Prepare documents in advance",
            "A complete document package shortens the deal by 2-3 weeks",
        ),
        RecommendationType::Marketing => (
            "Full-channel promotion",
            "Listing on top portals and social networks brings more buyers",
        ),
    }
}
