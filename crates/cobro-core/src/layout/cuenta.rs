//! Fixed template for the cuenta de cobro page.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::models::config::DocumentConfig;
use crate::models::record::PersonRecord;
use crate::report::rules::format_whole_amount;
use crate::words::to_words;

use super::canvas::{Canvas, Font, Page};
use super::dates::date_line;

/// US Letter, in points.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

const MARGIN_LEFT: f32 = 40.0;
const MARGIN_RIGHT: f32 = PAGE_WIDTH - 40.0;
const TOP_OFFSET: f32 = 40.0;

const TITLE: &str = "CUENTA DE COBRO";
const LEGAL_WRAP_CHARS: usize = 80;

const YES_X: f32 = MARGIN_RIGHT - 120.0;
const NO_X: f32 = MARGIN_RIGHT - 60.0;
const VALUE_LABEL_X: f32 = MARGIN_RIGHT - 100.0;
const RULE_WIDTH: f32 = 40.0;
const RULE_GAP: f32 = 5.0;
const SIGNATURE_WIDTH: f32 = 150.0;

/// Right-hand side of a fact table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FactKind {
    /// `SÍ` / `NO` columns with `NO` marked.
    YesNo,
    /// `VALOR` label between two rules.
    Valued,
    /// Valued row carrying the ICA rate and withholding amount.
    Withholding,
}

const FACTS: [(&str, FactKind); 5] = [
    ("Responsable de IVA", FactKind::YesNo),
    ("Inscrito en el registro Nal de Vendedores", FactKind::YesNo),
    (
        "Código actividad económica en el Distrito Capital",
        FactKind::Valued,
    ),
    ("Tarifa de Retención de ICA asumido", FactKind::Withholding),
    ("Tarifa de Retención en la Fuente", FactKind::Valued),
];

/// Lays out one cuenta de cobro page per record.
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    config: DocumentConfig,
}

impl DocumentLayout {
    pub fn new(config: DocumentConfig) -> Self {
        Self { config }
    }

    /// Render a record dated `today`.
    pub fn render(&self, record: &PersonRecord, today: NaiveDate) -> Page {
        let mut canvas = Canvas::new(PAGE_WIDTH, PAGE_HEIGHT);
        let mut y = PAGE_HEIGHT - TOP_OFFSET;

        canvas.set_font(Font::HelveticaBold, 16.0);
        canvas.draw_centred_string(PAGE_WIDTH / 2.0, y, TITLE);
        y -= 30.0;

        canvas.set_font(Font::Helvetica, 11.0);
        canvas.draw_string(MARGIN_LEFT, y, date_line(&self.config.city, today));
        y -= 25.0;

        canvas.set_font(Font::HelveticaBold, 11.0);
        canvas.draw_string(MARGIN_LEFT, y, self.config.issuer_name.as_str());
        y -= 15.0;
        canvas.set_font(Font::Helvetica, 11.0);
        canvas.draw_string(MARGIN_LEFT, y, format!("NIT: {}", self.config.issuer_nit));
        y -= 25.0;

        canvas.set_font(Font::HelveticaBold, 11.0);
        canvas.draw_string(MARGIN_LEFT, y, "DEBE A");
        y -= 25.0;
        canvas.draw_string(MARGIN_LEFT, y, format!("NOMBRE: {}", record.name));
        y -= 20.0;
        canvas.draw_string(MARGIN_LEFT, y, format!("C.C. No. {}", record.national_id));
        y -= 30.0;

        canvas.draw_string(
            MARGIN_LEFT,
            y,
            format!("Valor subtotal: {}", format_whole_amount(record.subtotal)),
        );
        y -= 20.0;
        canvas.draw_string(
            MARGIN_LEFT,
            y,
            format!("Valor total: {}", format_whole_amount(record.total)),
        );
        y -= 20.0;
        canvas.draw_string(
            MARGIN_LEFT,
            y,
            format!(
                "Valor en letras: {} {}",
                amount_words(record),
                self.config.currency_words
            ),
        );
        y -= 25.0;
        canvas.draw_string(
            MARGIN_LEFT,
            y,
            format!("Por concepto de: {}", self.config.concept),
        );
        y -= 30.0;

        canvas.set_font(Font::Helvetica, 10.0);
        y = self.draw_legal_notice(&mut canvas, y);
        y = draw_fact_table(&mut canvas, y, record);

        y -= 30.0;
        y -= 120.0;
        canvas.line(MARGIN_LEFT, y, MARGIN_LEFT + SIGNATURE_WIDTH, y);
        y -= 15.0;
        canvas.draw_string(MARGIN_LEFT, y, record.name.as_str());
        y -= 15.0;
        canvas.draw_string(MARGIN_LEFT, y, format!("C.C. {}", record.national_id));

        debug!("Laid out page for {}", record.name);
        canvas.finish()
    }

    /// Render every record, in order, with the same date.
    pub fn render_all(&self, records: &[PersonRecord], today: NaiveDate) -> Vec<Page> {
        records.iter().map(|r| self.render(r, today)).collect()
    }

    fn draw_legal_notice(&self, canvas: &mut Canvas, mut y: f32) -> f32 {
        let notice = self.config.legal_notice.as_str();
        if notice.chars().count() > LEGAL_WRAP_CHARS {
            let words: Vec<&str> = notice.split_whitespace().collect();
            let (first, second) = words.split_at(words.len() / 2);
            canvas.draw_string(MARGIN_LEFT, y, first.join(" "));
            y -= 15.0;
            canvas.draw_string(MARGIN_LEFT, y, second.join(" "));
            y -= 25.0;
        } else {
            canvas.draw_string(MARGIN_LEFT, y, notice);
            y -= 30.0;
        }
        y
    }
}

fn amount_words(record: &PersonRecord) -> String {
    // Totals beyond u64 fall into the out-of-range wording.
    let whole = record.total.trunc().to_u64().unwrap_or(u64::MAX);
    to_words(whole)
}

fn draw_fact_table(canvas: &mut Canvas, mut y: f32, record: &PersonRecord) -> f32 {
    for (label, kind) in FACTS {
        canvas.set_font(Font::Helvetica, 10.0);
        canvas.draw_string(MARGIN_LEFT, y, label);

        match kind {
            FactKind::YesNo => {
                canvas.draw_string(YES_X, y, "SÍ");
                canvas.draw_string(NO_X, y, "NO");
                canvas.set_font(Font::HelveticaBold, 12.0);
                canvas.draw_string(NO_X + 20.0, y, "X");
                canvas.set_font(Font::Helvetica, 10.0);
            }
            FactKind::Valued => draw_valued(canvas, y, "", ""),
            FactKind::Withholding => {
                let rate = record.withholding_rate.normalize().to_string();
                let amount = format_whole_amount(record.withholding_amount);
                draw_valued(canvas, y, &rate, &amount);
            }
        }

        y -= 20.0;
    }
    y
}

fn draw_valued(canvas: &mut Canvas, y: f32, before: &str, after: &str) {
    let pre_start = VALUE_LABEL_X - RULE_WIDTH - RULE_GAP;
    canvas.line(pre_start, y - 2.0, pre_start + RULE_WIDTH, y - 2.0);
    draw_over_rule(canvas, pre_start, y, before);

    canvas.draw_string(VALUE_LABEL_X, y, "VALOR");
    let post_start = VALUE_LABEL_X + canvas.string_width("VALOR") + RULE_GAP;
    canvas.line(post_start, y - 2.0, post_start + RULE_WIDTH, y - 2.0);
    draw_over_rule(canvas, post_start, y, after);
}

fn draw_over_rule(canvas: &mut Canvas, rule_start: f32, y: f32, text: &str) {
    if text.is_empty() {
        return;
    }
    let x = rule_start + (RULE_WIDTH - canvas.string_width(text)) / 2.0;
    canvas.draw_string(x, y, text);
}
