//! Plain-text valuation report rendered from a stored result.

use super::Locale;
use crate::domain::{CoefficientKind, Decimal, EvaluationResult};

/// Group the integer part in threes: `23986000` → `23 986 000`.
pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp(0).to_canonical_string();
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}

/// Signed percent with one decimal: `+50.0%`, `-8.0%`.
pub fn format_impact(percent: Decimal) -> String {
    let value = percent.round_dp(1).inner();
    let sign = if percent.is_positive() { "+" } else { "" };
    format!("{}{:.1}%", sign, value)
}

struct Labels {
    title: &'static str,
    estimate: &'static str,
    range: &'static str,
    per_sqm: &'static str,
    base: &'static str,
    confidence: &'static str,
    analysis: &'static str,
    recommendations: &'static str,
    gain: &'static str,
}

fn labels(locale: Locale) -> Labels {
    match locale {
        Locale::Ru => Labels {
            title: "ОТЧЕТ ОБ ОЦЕНКЕ НЕДВИЖИМОСТИ",
            estimate: "Рыночная стоимость",
            range: "Диапазон",
            per_sqm: "Базовая цена за м²",
            base: "Базовая стоимость",
            confidence: "Достоверность оценки",
            analysis: "АНАЛИЗ РЫНОЧНОЙ СИТУАЦИИ",
            recommendations: "РЕКОМЕНДАЦИИ",
            gain: "Потенциальная выгода",
        },
        Locale::En => Labels {
            title: "PROPERTY VALUATION REPORT",
            estimate: "Market value",
            range: "Range",
            per_sqm: "Base price per m²",
            base: "Base price",
            confidence: "Confidence",
            analysis: "MARKET ANALYSIS",
            recommendations: "RECOMMENDATIONS",
            gain: "Potential gain",
        },
    }
}

fn coefficient_label(locale: Locale, kind: CoefficientKind) -> &'static str {
    match (locale, kind) {
        (Locale::Ru, CoefficientKind::Location) => "Корректировка по местоположению",
        (Locale::Ru, CoefficientKind::Condition) => "Корректировка по состоянию",
        (Locale::Ru, CoefficientKind::Floor) => "Корректировка по этажу",
        (Locale::Ru, CoefficientKind::Amenities) => "Удобства и улучшения",
        (Locale::En, CoefficientKind::Location) => "Location adjustment",
        (Locale::En, CoefficientKind::Condition) => "Condition adjustment",
        (Locale::En, CoefficientKind::Floor) => "Floor adjustment",
        (Locale::En, CoefficientKind::Amenities) => "Amenities",
    }
}

/// Render a report without re-running the engine.
///
/// Analysis and recommendation text is rebuilt from the stored clause tags
/// and recommendation kinds, so every line follows `locale`.
pub fn render_text_report(result: &EvaluationResult, locale: Locale) -> String {
    let l = labels(locale);
    let mut lines = vec![
        l.title.to_string(),
        String::new(),
        format!("{}: {}", l.estimate, format_price(result.estimated_price)),
        format!(
            "{}: {} - {}",
            l.range,
            format_price(result.min_price),
            format_price(result.max_price)
        ),
        format!("{}: {}", l.per_sqm, format_price(result.base_price_per_sqm)),
        format!("{}: {}", l.base, format_price(result.base_price)),
    ];
    lines.extend(result.coefficients.iter().map(|c| {
        format!(
            "{}: {}",
            coefficient_label(locale, c.name),
            format_impact(c.percent_impact)
        )
    }));
    lines.push(format!("{}: {}%", l.confidence, result.confidence_level));

    if !result.analysis_clauses.is_empty() {
        lines.push(String::new());
        lines.push(l.analysis.to_string());
        lines.push(locale.market_analysis(&result.analysis_clauses));
    }

    if !result.recommendations.is_empty() {
        lines.push(String::new());
        lines.push(l.recommendations.to_string());
        for (i, rec) in result.recommendations.iter().enumerate() {
            let (title, description) = locale.recommendation(rec.kind);
            lines.push(format!("{}. {}", i + 1, title));
            lines.push(format!("   {}", description));
            if let Some(gain) = rec.potential_gain {
                lines.push(format!("   {}: {}", l.gain, format_price(gain)));
            }
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
